use chrono::NaiveDateTime;
use serde::Serialize;

/// A user's most recent check-in, joined with their type.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LatestLogin {
    #[sqlx(rename = "NickName")]
    pub nickname: String,
    #[sqlx(rename = "UserType")]
    pub user_type: String,
    #[sqlx(rename = "Login")]
    pub last_login: NaiveDateTime,
}

/// Nickname plus date of birth, input to the birthday computation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BirthdayRow {
    #[sqlx(rename = "NickName")]
    pub nickname: String,
    #[sqlx(rename = "DOB")]
    pub dob: String,
}

/// Check-in count per user, for the dashboard leaderboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopScore {
    #[sqlx(rename = "NickName")]
    pub nickname: String,
    #[sqlx(rename = "Attendances")]
    pub attendances: i64,
}

/// One member's merged activity record: latest check-in joined with the
/// days-until-next-birthday computation, keyed by nickname.
#[derive(Debug, Clone, Serialize)]
pub struct MemberActivity {
    pub nickname: String,
    pub user_type: String,
    pub last_login: NaiveDateTime,
    pub days_to_birthday: i64,
}

/// Member activity bucketed by user type for the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceBuckets {
    pub all: Vec<MemberActivity>,
    pub student: Vec<MemberActivity>,
    pub mentor: Vec<MemberActivity>,
}

/// Everything the mentor dashboard shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub attendance: AttendanceBuckets,
    pub top_scores: Vec<TopScore>,
}
