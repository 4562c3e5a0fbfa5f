use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, RegisterRequest, TokenResponse, User, UserUpdate},
};

impl ApiClient {
    /// Exchanges credentials for a bearer token. Form-encoded per the
    /// backend's OAuth2 password flow. The returned token is not persisted
    /// here; the session store owns the credential slot.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/login")
            .await
            .form(&[("username", username), ("password", password)]);
        self.fetch_json_public(request, "POST /auth/login").await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<User, ApiError> {
        let request = self.request(Method::POST, "/users/").await.json(payload);
        self.fetch_json_public(request, "POST /users/").await
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        let request = self.request(Method::GET, "/users/me").await;
        self.fetch_json(request, "GET /users/me").await
    }

    pub async fn update_me(&self, payload: &UserUpdate) -> Result<User, ApiError> {
        let request = self.request(Method::PATCH, "/users/me").await.json(payload);
        self.fetch_json(request, "PATCH /users/me").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        let request = self.request(Method::GET, &format!("/users/{}", id)).await;
        self.fetch_json(request, "GET /users/{id}").await
    }
}
