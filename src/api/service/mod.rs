pub mod endpoints;
pub mod router;
pub mod types;

use std::future::Future;
use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db;

use types::{ErrorKind, ErrorResponse};

#[derive(Clone)]
pub struct State {
    pub db: db::Database,
    pub query_timeout: QueryTimeout,
}

impl State {
    pub fn new(db: db::Database, query_timeout: Duration) -> Self {
        Self {
            db,
            query_timeout: QueryTimeout(query_timeout),
        }
    }
}

impl axum::extract::FromRef<State> for sqlx::SqlitePool {
    fn from_ref(input: &State) -> Self {
        input.db.pool.clone()
    }
}

impl axum::extract::FromRef<State> for QueryTimeout {
    fn from_ref(input: &State) -> Self {
        input.query_timeout
    }
}

/// Upper bound on a single store round trip.
#[derive(Debug, Clone, Copy)]
pub struct QueryTimeout(pub Duration);

impl QueryTimeout {
    pub async fn run<T, E, F>(self, fut: F) -> Result<T, ErrorResponse>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ErrorResponse>,
    {
        match tokio::time::timeout(self.0, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(ErrorResponse::new(
                ErrorKind::Timeout,
                format!("store did not answer within {}ms", self.0.as_millis()),
            )),
        }
    }
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::MalformedInput => StatusCode::BAD_REQUEST,
            ErrorKind::EmptyDataset | ErrorKind::CorruptRecord => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_client_error() {
            log::warn!("{self}");
        } else {
            log::error!("{self}");
        }

        (status, Json(self)).into_response()
    }
}

impl ErrorResponse {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for ErrorResponse {
    fn from(value: sqlx::Error) -> Self {
        ErrorResponse::new(ErrorKind::StoreUnavailable, format!("db returned error: {value}"))
    }
}
