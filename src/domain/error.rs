use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    Network(String),

    #[error("siteInfo not found")]
    NotFound,

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Filesystem(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => AppError::Network(e.to_string()),
            ApiError::InvalidResponse(msg) => AppError::Parse(msg),
            ApiError::SiteInfoNotFound => AppError::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_error() {
        assert!(matches!(
            AppError::from(ApiError::SiteInfoNotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(ApiError::InvalidResponse("bad".to_string())),
            AppError::Parse(msg) if msg == "bad"
        ));
    }
}
