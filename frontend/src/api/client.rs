use reqwest::{
    header::{HeaderMap, AUTHORIZATION},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;

use crate::{
    api::types::{ApiError, ErrorBody},
    config,
    utils::storage,
};

/// How a 401 on the wire maps onto the session. Protected calls invalidate
/// the whole session; the login exchange itself surfaces the server message
/// instead (bad credentials are an expected, locally recovered failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnauthorizedPolicy {
    ForceLogout,
    PassThrough,
}

/// Single point of outbound HTTP. Reads the persisted credential at call
/// time, translates failures into [`ApiError`], and reports every outcome to
/// the diagnostic log.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn bearer_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = storage::credential() {
            if let Ok(value) = format!("Bearer {}", token).parse() {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base_url = self.resolved_base_url().await;
        self.client
            .request(method, format!("{}{}", base_url, path))
            .headers(Self::bearer_headers())
    }

    /// Sends the request and maps the response status onto the error
    /// taxonomy. Diagnostic logging is best-effort and never changes the
    /// outcome.
    pub(crate) async fn dispatch(
        request: RequestBuilder,
        op: &str,
        policy: UnauthorizedPolicy,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            log::warn!("{}: transport failure: {}", op, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        log::debug!("{} -> {}", op, status);
        if status.is_success() {
            return Ok(response);
        }

        let error = Self::map_failure(response, status, policy).await;
        log::warn!("{} failed: {}", op, error);
        Err(error)
    }

    async fn map_failure(
        response: Response,
        status: StatusCode,
        policy: UnauthorizedPolicy,
    ) -> ApiError {
        if status == StatusCode::UNAUTHORIZED && policy == UnauthorizedPolicy::ForceLogout {
            crate::state::auth::force_logout();
            return ApiError::Unauthorized;
        }
        if status == StatusCode::NOT_FOUND {
            return ApiError::NotFound;
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message());
        match status {
            StatusCode::UNAUTHORIZED => {
                ApiError::Api(detail.unwrap_or_else(|| "Неверное имя пользователя или пароль".into()))
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(detail.unwrap_or_else(|| "Проверьте введенные данные".into()))
            }
            _ if status.is_server_error() => ApiError::Transport(
                detail.unwrap_or_else(|| format!("ошибка сервера ({})", status.as_u16())),
            ),
            _ => ApiError::Api(detail.unwrap_or_else(|| format!("Ошибка запроса ({})", status.as_u16()))),
        }
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &str,
    ) -> Result<T, ApiError> {
        let response = Self::dispatch(request, op, UnauthorizedPolicy::ForceLogout).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("некорректный ответ: {}", e)))
    }

    pub(crate) async fn fetch_json_public<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &str,
    ) -> Result<T, ApiError> {
        let response = Self::dispatch(request, op, UnauthorizedPolicy::PassThrough).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("некорректный ответ: {}", e)))
    }

    pub(crate) async fn fetch_unit(&self, request: RequestBuilder, op: &str) -> Result<(), ApiError> {
        Self::dispatch(request, op, UnauthorizedPolicy::ForceLogout).await?;
        Ok(())
    }
}
