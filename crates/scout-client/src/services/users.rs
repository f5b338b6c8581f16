use scout_common::api::UserUpdate;
use scout_common::UserProfile;

use crate::api_client::ApiClient;
use crate::error::Result;

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of the user the access token belongs to.
    pub fn get_me(&self) -> Result<UserProfile> {
        self.client.get("/users/me")
    }

    pub fn get_user(&self, id: &str) -> Result<UserProfile> {
        self.client.get(&format!("/users/{}", urlencoding::encode(id)))
    }

    /// Change the signed-in user's username or email.
    pub fn update_me(&self, update: &UserUpdate) -> Result<UserProfile> {
        self.client.put_json("/users/me", update)
    }
}
