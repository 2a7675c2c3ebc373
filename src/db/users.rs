use crate::core::error::DataError;
use crate::models::user::User;
use sqlx::MySqlPool;

/// Credential lookup: the stored hash must match the salted hash computed by
/// the caller. Returns None for an unknown nickname or a wrong password;
/// the two cases are indistinguishable by design.
pub async fn login(
    pool: &MySqlPool,
    nickname: &str,
    password_hash: &str,
) -> Result<Option<User>, DataError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT NickName, UserType, DOB, Password FROM User \
         WHERE NickName = ? AND Password = ? LIMIT 1",
    )
    .bind(nickname)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Re-fetch a user by nickname; used by the session gate to refresh the
/// session's embedded copy on every request.
pub async fn find_by_nickname(
    pool: &MySqlPool,
    nickname: &str,
) -> Result<Option<User>, DataError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT NickName, UserType, DOB, Password FROM User \
         WHERE NickName = ? LIMIT 1",
    )
    .bind(nickname)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
