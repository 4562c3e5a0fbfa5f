use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure taxonomy of the API gateway. Every public operation returns one of
/// these instead of letting a rejected future escape; `Display` is the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Требуется авторизация")]
    Unauthorized,
    #[error("Не найдено")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Api(String),
    #[error("Сервис недоступен: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// FastAPI error body: `{"detail": "..."}`, where `detail` may also be a
/// structured validation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: i64,
    pub owner_id: i64,
    pub metro: String,
    pub price: f64,
    pub minutes: i32,
    pub way: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub fee_percent: Option<f64>,
    pub storey: i32,
    pub storeys: i32,
    pub rooms: i32,
    pub total_area: f64,
    #[serde(default)]
    pub living_area: Option<f64>,
    #[serde(default)]
    pub kitchen_area: Option<f64>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentCreate {
    pub metro: String,
    pub price: f64,
    pub minutes: i32,
    pub way: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub fee_percent: f64,
    pub storey: i32,
    pub storeys: i32,
    pub rooms: i32,
    pub total_area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen_area: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub way: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storey: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storeys: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen_area: Option<f64>,
}

/// Listing filter criteria. Absent fields mean "no constraint"; blank form
/// input never reaches this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentFilter {
    pub metro: Option<String>,
    pub rooms: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
}

impl ApartmentFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query pairs for `GET /apartments/`; only set fields appear.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(metro) = &self.metro {
            pairs.push(("metro".to_string(), metro.clone()));
        }
        if let Some(rooms) = self.rooms {
            pairs.push(("rooms".to_string(), rooms.to_string()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price".to_string(), min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price".to_string(), max_price.to_string()));
        }
        if let Some(min_area) = self.min_area {
            pairs.push(("min_area".to_string(), min_area.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteCreate {
    pub apartment_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub metro: String,
    pub minutes: i32,
    pub way: String,
    pub rooms: i32,
    pub total_area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen_area: Option<f64>,
    pub storey: i32,
    pub storeys: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub message: String,
}
