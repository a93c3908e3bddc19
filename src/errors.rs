use axum::http::StatusCode;
use thiserror::Error;

/// Failure reported by a remote row store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("row not found")]
    RowNotFound,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid credentials: {0}")]
    AuthInvalid(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("backend unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("backend error: {0}")]
    Unknown(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::RowNotFound => "row-not-found",
            BackendError::PermissionDenied(_) => "permission-denied",
            BackendError::AuthInvalid(_) => "auth-invalid",
            BackendError::MalformedRequest(_) => "malformed-request",
            BackendError::NetworkUnreachable(_) => "network-unreachable",
            BackendError::Unknown(_) => "unknown",
        }
    }

    /// Maps an error response from the REST endpoint onto the taxonomy.
    pub fn classify(status: u16, code: Option<&str>, message: String) -> Self {
        match (status, code) {
            (_, Some("PGRST116")) => BackendError::RowNotFound,
            (403, _) | (_, Some("42501")) => BackendError::PermissionDenied(message),
            (401, _) => BackendError::AuthInvalid(message),
            (_, Some(code)) if code.starts_with("PGRST30") => BackendError::AuthInvalid(message),
            (400 | 404 | 405 | 406, _) => BackendError::MalformedRequest(message),
            _ => BackendError::Unknown(message),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            BackendError::NetworkUnreachable(err.to_string())
        } else if err.is_builder() {
            BackendError::MalformedRequest(err.to_string())
        } else {
            BackendError::Unknown(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown counter id: {0}")]
    UnknownId(String),

    #[error(transparent)]
    Remote(#[from] BackendError),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::UnknownId(_) => "unknown-id",
            StoreError::Remote(err) => err.kind(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::UnknownId(_) => StatusCode::BAD_REQUEST,
            StoreError::Remote(BackendError::NetworkUnreachable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            StoreError::Remote(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_follows_postgrest_codes() {
        assert_eq!(
            BackendError::classify(406, Some("PGRST116"), String::new()),
            BackendError::RowNotFound
        );
        assert_eq!(
            BackendError::classify(401, Some("42501"), "rls".into()).kind(),
            "permission-denied"
        );
        assert_eq!(
            BackendError::classify(401, Some("PGRST301"), "jwt".into()).kind(),
            "auth-invalid"
        );
        assert_eq!(
            BackendError::classify(400, Some("22P02"), "bad".into()).kind(),
            "malformed-request"
        );
        assert_eq!(BackendError::classify(500, None, "boom".into()).kind(), "unknown");
    }

    #[test]
    fn store_errors_map_to_http_status() {
        let unknown = AppError::from(StoreError::UnknownId("triangle".into()));
        assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

        let offline = AppError::from(StoreError::from(BackendError::NetworkUnreachable(
            "refused".into(),
        )));
        assert_eq!(offline.status, StatusCode::SERVICE_UNAVAILABLE);

        let denied = AppError::from(StoreError::from(BackendError::PermissionDenied(
            "rls".into(),
        )));
        assert_eq!(denied.status, StatusCode::BAD_GATEWAY);
    }
}
