use serde::{Deserialize, Serialize};

/// The user embedded in auth responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Profile returned by the `/users` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub report_count: u32,
}

impl From<UserProfile> for User {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
