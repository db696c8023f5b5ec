use axum::http::StatusCode;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PropertiesError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(realestate::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(realestate::config))]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    #[diagnostic(code(realestate::db))]
    Db(#[from] sea_orm::DbErr),

    /// Raised on purpose by the service layer; `status` is what the HTTP edge answers with.
    #[error("{message}")]
    #[diagnostic(code(realestate::service))]
    Service { status: StatusCode, message: String },

    #[error("Bad request: {0}")]
    #[diagnostic(code(realestate::bad_request))]
    BadRequest(String),
}

impl PropertiesError {
    pub fn not_found(message: impl Into<String>) -> Self {
        PropertiesError::Service {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PropertiesError::Service { status, .. } => *status,
            PropertiesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_status_and_message() {
        let err = PropertiesError::not_found("Property not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Property not found");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err = PropertiesError::from(sea_orm::DbErr::Custom("connection reset".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_not_found());
    }
}
