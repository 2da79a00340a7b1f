//! Bearer-token gate middleware.
//!
//! Wraps protected scopes. Requires a well-formed `Authorization: Bearer`
//! header (absence or malformation rejects with 401 before the token is
//! even verified), then verifies the token and stores the resulting
//! [`VerifiedIdentity`] in request extensions for the extractors downstream.
//! Fail-closed: no verification outcome ever falls through to the handler
//! unauthenticated.
//!
//! Rejections are rendered here as early responses (the `EitherBody`
//! pattern) so they carry the standard error envelope and pass through the
//! outer trace middleware like any other response.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();

        let outcome = bearer_token(auth_header.as_ref()).and_then(|token| {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            verify_access_token(&token, &app_state.security)
        });

        match outcome {
            Ok(identity) => {
                // Store the identity BEFORE calling the downstream service so
                // extractors can read it.
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(err) => Box::pin(async move {
                // Rendered inside the async block so the trace scope
                // established by outer middleware is active.
                let (req, _payload) = req.into_parts();
                let res = err.error_response().map_into_right_body();
                Ok(ServiceResponse::new(req, res))
            }),
        }
    }
}

/// Parse `Authorization: Bearer <token>`.
///
/// Every malformation (absent header, non-UTF8 value, wrong scheme, empty
/// token) collapses to the same missing-bearer rejection.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::missing_bearer)?;

    let auth_str = auth_value.to_str().map_err(|_| AppError::missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AppError::missing_bearer());
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AppError::missing_bearer());
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::bearer_token;
    use crate::error::AppError;

    #[test]
    fn accepts_well_formed_bearer() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&value)).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_absent_and_malformed_headers() {
        for value in ["", "Bearer", "Token abc", "bearer abc", "Bearer a b"] {
            let header = HeaderValue::from_static(value);
            assert!(
                matches!(bearer_token(Some(&header)), Err(AppError::MissingBearer)),
                "expected rejection for {value:?}"
            );
        }
        assert!(matches!(bearer_token(None), Err(AppError::MissingBearer)));
    }
}
