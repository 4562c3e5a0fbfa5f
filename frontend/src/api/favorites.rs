use reqwest::Method;

use super::{
    client::ApiClient,
    types::{Apartment, ApiError, FavoriteCreate},
};

impl ApiClient {
    /// The favorites collection is returned as full listings; membership
    /// tracking reduces it to ids.
    pub async fn list_favorites(&self) -> Result<Vec<Apartment>, ApiError> {
        let request = self.request(Method::GET, "/favorites/").await;
        self.fetch_json(request, "GET /favorites/").await
    }

    pub async fn add_favorite(&self, apartment_id: i64) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, "/favorites/")
            .await
            .json(&FavoriteCreate { apartment_id });
        self.fetch_unit(request, "POST /favorites/").await
    }

    pub async fn remove_favorite(&self, apartment_id: i64) -> Result<(), ApiError> {
        let request = self
            .request(Method::DELETE, &format!("/favorites/{}", apartment_id))
            .await;
        self.fetch_unit(request, "DELETE /favorites/{id}").await
    }
}
