use reqwest::Method;

use super::{
    client::ApiClient,
    types::{Apartment, ApiError},
};

impl ApiClient {
    pub async fn similar_apartments(&self, apartment_id: i64) -> Result<Vec<Apartment>, ApiError> {
        let request = self
            .request(
                Method::GET,
                &format!("/recommendations/similar/{}", apartment_id),
            )
            .await;
        self.fetch_json(request, "GET /recommendations/similar/{id}")
            .await
    }

    pub async fn personalized_recommendations(&self) -> Result<Vec<Apartment>, ApiError> {
        let request = self
            .request(Method::GET, "/recommendations/personalized")
            .await;
        self.fetch_json(request, "GET /recommendations/personalized")
            .await
    }
}
