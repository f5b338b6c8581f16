use scout_common::User;

/// Logged-in user and token pair. Tokens live only in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    pub fn login(&mut self, user: User, access_token: String, refresh_token: String) {
        *self = Self {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        };
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Replaces the user only. Token state is not consulted, so this can
    /// leave a user set while logged out.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Swap in a refreshed access token, keeping the refresh token.
    pub fn set_access_token(&mut self, access_token: String) {
        if self.refresh_token.is_some() {
            self.access_token = Some(access_token);
        }
    }
}
