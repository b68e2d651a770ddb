use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::words::SupplierError;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Word supplier failed: {0}")]
    Supplier(#[from] SupplierError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Supplier(SupplierError::Empty) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Supplier(SupplierError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("{self}");

        (status, self.to_string()).into_response()
    }
}
