mod apartments;
mod auth;
pub mod client;
mod favorites;
mod predictions;
mod recommendations;
pub mod types;

pub use client::ApiClient;
pub use types::*;
