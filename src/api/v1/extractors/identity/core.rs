use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::VerifiedIdentity;
use crate::middleware::auth::AuthError;
use crate::middleware::auth::error::AUTHORIZATION_REQUIRED;

/// Handler-side access to the identity a gate attached.
///
/// Assumes a gate already inserted `VerifiedIdentity` into the request
/// extensions; if none is there the route was mounted without a gate and the
/// request is refused with the usual 401 `{"error": ...}` body.
pub struct Identity(pub VerifiedIdentity);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .map(Identity)
            .ok_or(AuthError::MissingCredential(AUTHORIZATION_REQUIRED))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use super::*;

    #[tokio::test]
    async fn attached_identity_is_returned() {
        let (mut parts, ()) = Request::new(()).into_parts();
        parts.extensions.insert(VerifiedIdentity::user("u1"));

        let Identity(identity) = Identity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity, VerifiedIdentity::user("u1"));
    }

    #[tokio::test]
    async fn ungated_route_is_refused_with_error_body() {
        let (mut parts, ()) = Request::new(()).into_parts();

        let rejection = match Identity::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("identity without a gate"),
            Err(rejection) => rejection,
        };
        assert_eq!(rejection, AuthError::MissingCredential("header required"));
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
