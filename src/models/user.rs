use serde::{Deserialize, Serialize};

/// The user type that is allowed through the mentor gate.
pub const MENTOR: &str = "Mentor";

/// A row from the User table. Users are created externally; this service
/// only ever reads them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    #[sqlx(rename = "NickName")]
    pub nickname: String,
    #[sqlx(rename = "UserType")]
    pub user_type: String,
    /// Date of birth as stored: "YYYY-MM-DD".
    #[sqlx(rename = "DOB")]
    pub dob: String,
    /// Salted sha512 hash, hex-encoded.
    #[sqlx(rename = "Password")]
    pub password_hash: String,
}

impl User {
    pub fn is_mentor(&self) -> bool {
        self.user_type == MENTOR
    }
}

/// The copy of a user carried in the session: everything except the
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub nickname: String,
    pub user_type: String,
    pub dob: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            nickname: user.nickname,
            user_type: user.user_type,
            dob: user.dob,
        }
    }
}
