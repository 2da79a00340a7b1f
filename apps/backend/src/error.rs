use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::trace_ctx;

/// Wire shape for every failed request.
///
/// The frontend only ever inspects `success` and `message`; everything else
/// (error code, trace id) travels in logs and response headers.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Authorization header absent, not `Bearer`, or empty token.
    #[error("missing or malformed bearer token")]
    MissingBearer,
    /// Token failed signature/issuer/format checks. Also the fail-closed
    /// outcome for unexpected identity-provider or account-store failures
    /// inside the gate pipeline.
    #[error("invalid access token")]
    InvalidToken,
    /// Token verified but past expiry.
    #[error("expired access token")]
    ExpiredToken,
    /// Verified identity has no linked account record.
    #[error("no account profile for verified identity")]
    ProfileNotFound,
    /// Account exists but is deactivated; no role passes this.
    #[error("account is deactivated")]
    AccountDeactivated,
    /// Principal's role is not in the route's required set.
    #[error("role not permitted: required {required}, actual {actual}")]
    RoleDenied {
        required: String,
        actual: &'static str,
    },
    /// Principal is neither admin nor the owner of the target resource.
    #[error("ownership check failed")]
    OwnershipDenied,
    /// Principal's club affiliation does not cover the requested club.
    #[error("club scope check failed")]
    ClubScopeDenied,
    #[error("bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("database error: {detail}")]
    Db { detail: String },
    #[error("database unavailable")]
    DbUnavailable,
    #[error("configuration error: {detail}")]
    Config { detail: String },
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable machine-readable code, used in logs only.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            AppError::InvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            AppError::ExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN",
            AppError::ProfileNotFound => "PROFILE_NOT_FOUND",
            AppError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            AppError::RoleDenied { .. } => "ROLE_DENIED",
            AppError::OwnershipDenied => "OWNERSHIP_DENIED",
            AppError::ClubScopeDenied => "CLUB_SCOPE_DENIED",
            AppError::BadRequest { code, .. } => code,
            AppError::NotFound { code, .. } => code,
            AppError::Conflict { code, .. } => code,
            AppError::Db { .. } => "DB_ERROR",
            AppError::DbUnavailable => "DB_UNAVAILABLE",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    /// User-facing message. Server-side failures render a generic message;
    /// their detail stays in logs.
    pub fn message(&self) -> String {
        match self {
            AppError::MissingBearer => {
                "No token provided or invalid authorization format".to_string()
            }
            AppError::InvalidToken => "Invalid token, please login again".to_string(),
            AppError::ExpiredToken => "Token expired, please login again".to_string(),
            AppError::ProfileNotFound => {
                "Profile not found, please complete your registration".to_string()
            }
            AppError::AccountDeactivated => {
                "Account deactivated, please contact support".to_string()
            }
            AppError::RoleDenied { required, actual } => {
                format!("Access denied, required role(s): {required}, your role: {actual}")
            }
            AppError::OwnershipDenied => "You can only access your own resources".to_string(),
            AppError::ClubScopeDenied => "You can only access your assigned club".to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Config { .. }
            | AppError::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingBearer | AppError::InvalidToken | AppError::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ProfileNotFound => StatusCode::NOT_FOUND,
            AppError::AccountDeactivated
            | AppError::RoleDenied { .. }
            | AppError::OwnershipDenied
            | AppError::ClubScopeDenied => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Config { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_bearer() -> Self {
        Self::MissingBearer
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn expired_token() -> Self {
        Self::ExpiredToken
    }

    pub fn profile_not_found() -> Self {
        Self::ProfileNotFound
    }

    pub fn account_deactivated() -> Self {
        Self::AccountDeactivated
    }

    pub fn ownership_denied() -> Self {
        Self::OwnershipDenied
    }

    pub fn club_scope_denied() -> Self {
        Self::ClubScopeDenied
    }

    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::current();

        if status.is_server_error() {
            tracing::error!(code = %self.code(), trace_id = %trace_id, error = %self, "request failed");
        } else {
            tracing::debug!(code = %self.code(), trace_id = %trace_id, error = %self, "request rejected");
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(ErrorEnvelope {
                success: false,
                message: self.message(),
            })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[test]
    fn gate_failures_map_to_documented_statuses() {
        assert_eq!(AppError::missing_bearer().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::invalid_token().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::expired_token().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::profile_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::account_deactivated().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::ownership_denied().status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::club_scope_denied().status(), StatusCode::FORBIDDEN);
        let role_denied = AppError::RoleDenied {
            required: "admin".to_string(),
            actual: "coach",
        };
        assert_eq!(role_denied.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn expired_and_invalid_messages_differ() {
        let expired = AppError::expired_token().message();
        let invalid = AppError::invalid_token().message();
        assert!(expired.to_lowercase().contains("expired"));
        assert_ne!(expired, invalid);
    }

    #[test]
    fn server_errors_do_not_leak_detail() {
        let err = AppError::db("connection refused to 10.0.0.3:5432");
        assert_eq!(err.message(), "Internal server error");
        let err = AppError::internal("state missing");
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn role_denied_names_both_sides() {
        let err = AppError::RoleDenied {
            required: "admin, clubManager".to_string(),
            actual: "coach",
        };
        let message = err.message();
        assert!(message.contains("admin, clubManager"));
        assert!(message.contains("coach"));
    }

    #[actix_web::test]
    async fn error_response_renders_envelope() {
        let resp = AppError::club_scope_denied().error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(resp.headers().get("x-trace-id").is_some());

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert_eq!(json["message"], "You can only access your assigned club");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
