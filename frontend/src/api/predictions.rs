use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, PredictionRequest, PredictionResponse},
};

impl ApiClient {
    pub async fn predict_price(
        &self,
        payload: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        let request = self
            .request(Method::POST, "/predictions/price")
            .await
            .json(payload);
        self.fetch_json(request, "POST /predictions/price").await
    }
}
