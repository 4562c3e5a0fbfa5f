use reqwest::Method;

use super::{
    client::ApiClient,
    types::{Apartment, ApartmentCreate, ApartmentFilter, ApartmentUpdate, ApiError},
};

impl ApiClient {
    pub async fn list_apartments(
        &self,
        filter: &ApartmentFilter,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Apartment>, ApiError> {
        let request = self
            .request(Method::GET, "/apartments/")
            .await
            .query(&[("skip", skip.to_string()), ("limit", limit.to_string())])
            .query(&filter.to_query_pairs());
        self.fetch_json(request, "GET /apartments/").await
    }

    pub async fn latest_apartments(&self) -> Result<Vec<Apartment>, ApiError> {
        let request = self.request(Method::GET, "/apartments/latest").await;
        self.fetch_json(request, "GET /apartments/latest").await
    }

    pub async fn get_apartment(&self, id: i64) -> Result<Apartment, ApiError> {
        let request = self
            .request(Method::GET, &format!("/apartments/{}", id))
            .await;
        self.fetch_json(request, "GET /apartments/{id}").await
    }

    pub async fn my_apartments(&self) -> Result<Vec<Apartment>, ApiError> {
        let request = self.request(Method::GET, "/apartments/my").await;
        self.fetch_json(request, "GET /apartments/my").await
    }

    pub async fn create_apartment(&self, payload: &ApartmentCreate) -> Result<Apartment, ApiError> {
        let request = self.request(Method::POST, "/apartments/").await.json(payload);
        self.fetch_json(request, "POST /apartments/").await
    }

    pub async fn update_apartment(
        &self,
        id: i64,
        payload: &ApartmentUpdate,
    ) -> Result<Apartment, ApiError> {
        let request = self
            .request(Method::PATCH, &format!("/apartments/{}", id))
            .await
            .json(payload);
        self.fetch_json(request, "PATCH /apartments/{id}").await
    }

    pub async fn delete_apartment(&self, id: i64) -> Result<(), ApiError> {
        let request = self
            .request(Method::DELETE, &format!("/apartments/{}", id))
            .await;
        self.fetch_unit(request, "DELETE /apartments/{id}").await
    }
}
