//! Informado backend API
//!
//! - `auth`: login and refresh endpoints (the `AuthApi` port)
//! - `gateway`: bearer injection with single refresh-and-retry on 401
//! - `reports`: typed report endpoints over the gateway
//! - `multipart`: replayable form bodies for photo uploads
//! - `errors`: classification of API failures

pub mod auth;
pub mod errors;
pub mod gateway;
pub mod multipart;
pub mod reports;
pub mod response;

pub use auth::HttpAuthApi;
pub use errors::{ApiError, ApiErrorCategory, GatewayError};
pub use gateway::{AuthGateway, RequestOptions};
pub use multipart::MultipartBody;
pub use reports::ReportsApi;
pub use response::ApiResponse;
