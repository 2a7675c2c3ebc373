use crate::core::error::DataError;
use crate::models::attendance::{
    AttendanceBuckets, BirthdayRow, LatestLogin, MemberActivity, TopScore,
};
use crate::models::user;
use crate::utils::birthday::days_to_next_birthday;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use std::collections::HashMap;
use tracing::warn;

/// Most recent check-in per user, joined with the user's type.
pub async fn latest_logins(pool: &MySqlPool) -> Result<Vec<LatestLogin>, DataError> {
    let rows = sqlx::query_as::<_, LatestLogin>(
        "SELECT User.NickName, User.UserType, R1.Login \
         FROM Register AS R1 \
         LEFT JOIN User ON User.UserID = R1.UserID \
         WHERE R1.Login = (SELECT MAX(R2.Login) \
         FROM Register AS R2 \
         WHERE R2.UserID = R1.UserID)",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Days until each user's next birthday, keyed by nickname. Rows with a
/// malformed DOB are skipped with a warning rather than poisoning the whole
/// listing.
pub async fn birthdays(
    pool: &MySqlPool,
    today: NaiveDate,
) -> Result<HashMap<String, i64>, DataError> {
    let rows = sqlx::query_as::<_, BirthdayRow>("SELECT NickName, DOB FROM User")
        .fetch_all(pool)
        .await?;

    Ok(compute_birthdays(rows, today))
}

fn compute_birthdays(rows: Vec<BirthdayRow>, today: NaiveDate) -> HashMap<String, i64> {
    let mut days_by_nickname = HashMap::with_capacity(rows.len());
    for row in rows {
        match days_to_next_birthday(&row.dob, today) {
            Some(days) => {
                days_by_nickname.insert(row.nickname, days);
            }
            None => {
                warn!(nickname = %row.nickname, dob = %row.dob, "Skipping malformed DOB");
            }
        }
    }
    days_by_nickname
}

/// Check-in counts per user, highest first.
pub async fn top_scores(pool: &MySqlPool) -> Result<Vec<TopScore>, DataError> {
    let rows = sqlx::query_as::<_, TopScore>(
        "SELECT User.NickName, COUNT(R.Login) AS Attendances \
         FROM Register AS R \
         LEFT JOIN User ON User.UserID = R.UserID \
         GROUP BY User.NickName \
         ORDER BY Attendances DESC \
         LIMIT 10",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The member-activity listing: latest check-ins and birthday distances are
/// fetched concurrently and joined in memory by nickname.
pub async fn member_activity(
    pool: &MySqlPool,
    today: NaiveDate,
) -> Result<Vec<MemberActivity>, DataError> {
    let (logins, birthdays) = tokio::try_join!(latest_logins(pool), birthdays(pool, today))?;
    merge_activity(logins, &birthdays)
}

/// Join the two result sets by nickname. A nickname present in the check-in
/// set but absent from the birthday set fails loudly; the sets come from
/// independent queries and a gap means inconsistent data.
pub fn merge_activity(
    logins: Vec<LatestLogin>,
    days_by_nickname: &HashMap<String, i64>,
) -> Result<Vec<MemberActivity>, DataError> {
    logins
        .into_iter()
        .map(|login| {
            let days_to_birthday = days_by_nickname
                .get(&login.nickname)
                .copied()
                .ok_or_else(|| DataError::BirthdayMissing {
                    nickname: login.nickname.clone(),
                })?;
            Ok(MemberActivity {
                nickname: login.nickname,
                user_type: login.user_type,
                last_login: login.last_login,
                days_to_birthday,
            })
        })
        .collect()
}

/// Split the merged records into the dashboard's all/student/mentor buckets.
pub fn bucket_by_type(activity: &[MemberActivity]) -> AttendanceBuckets {
    AttendanceBuckets {
        all: activity.to_vec(),
        student: activity
            .iter()
            .filter(|a| a.user_type == "Student")
            .cloned()
            .collect(),
        mentor: activity
            .iter()
            .filter(|a| a.user_type == user::MENTOR)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn timestamp() -> NaiveDateTime {
        date(2026, 8, 1).and_hms_opt(18, 30, 0).expect("valid time")
    }

    fn login(nickname: &str, user_type: &str) -> LatestLogin {
        LatestLogin {
            nickname: nickname.to_string(),
            user_type: user_type.to_string(),
            last_login: timestamp(),
        }
    }

    fn birthday_row(nickname: &str, dob: &str) -> BirthdayRow {
        BirthdayRow {
            nickname: nickname.to_string(),
            dob: dob.to_string(),
        }
    }

    #[test]
    fn test_merge_joins_by_nickname() {
        let days = HashMap::from([("ada".to_string(), 10), ("bob".to_string(), 200)]);
        let merged = merge_activity(vec![login("ada", "Mentor"), login("bob", "Student")], &days)
            .expect("join succeeds");

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].nickname, "ada");
        assert_eq!(merged[0].days_to_birthday, 10);
        assert_eq!(merged[1].days_to_birthday, 200);
    }

    #[test]
    fn test_merge_fails_loudly_on_missing_birthday() {
        let days = HashMap::from([("ada".to_string(), 10)]);
        let result = merge_activity(vec![login("ada", "Mentor"), login("ghost", "Student")], &days);

        match result {
            Err(DataError::BirthdayMissing { nickname }) => assert_eq!(nickname, "ghost"),
            other => panic!("expected BirthdayMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_empty_login_set() {
        let merged = merge_activity(Vec::new(), &HashMap::new()).expect("empty join");
        assert!(merged.is_empty());
    }

    #[test]
    fn test_compute_birthdays_skips_malformed_dob() {
        let today = date(2026, 3, 10);
        let days = compute_birthdays(
            vec![birthday_row("ada", "1990-03-15"), birthday_row("bob", "not-a-date")],
            today,
        );

        assert_eq!(days.get("ada"), Some(&5));
        assert!(!days.contains_key("bob"));
    }

    #[test]
    fn test_bucket_by_type() {
        let days = HashMap::from([
            ("ada".to_string(), 1),
            ("bob".to_string(), 2),
            ("visitor".to_string(), 3),
        ]);
        let merged = merge_activity(
            vec![
                login("ada", "Mentor"),
                login("bob", "Student"),
                login("visitor", "Guest"),
            ],
            &days,
        )
        .expect("join succeeds");

        let buckets = bucket_by_type(&merged);
        assert_eq!(buckets.all.len(), 3);
        assert_eq!(buckets.student.len(), 1);
        assert_eq!(buckets.mentor.len(), 1);
        assert_eq!(buckets.mentor[0].nickname, "ada");
    }
}
