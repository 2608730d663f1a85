use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::handlers::{api_error, ApiError};
use crate::error::ServiceError;

/// JSON request body extractor.
///
/// A body that does not decode into `T` (bad syntax, unknown user type, an
/// age outside the integer range, a missing content type) is answered as an
/// invalid argument in the service's error shape instead of axum's plain-text
/// rejection.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(api_error(ServiceError::InvalidArgument(
                rejection.body_text(),
            ))),
        }
    }
}

/// Query string extractor with the same error shape as [`JsonBody`]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(api_error(ServiceError::InvalidArgument(
                rejection.body_text(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{CreateUserRequest, PageFilter, UserType};
    use axum::{
        body::Body,
        http::{self, StatusCode},
    };

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_decodes() {
        let request = json_request(r#"{"name": "John Doe", "age": 14, "user_type": "ADMIN"}"#);
        let JsonBody(decoded) = JsonBody::<CreateUserRequest>::from_request(request, &())
            .await
            .unwrap_or_else(|_| panic!("body should decode"));
        assert_eq!(decoded.user_type, UserType::Admin);
    }

    #[tokio::test]
    async fn test_unknown_user_type_is_invalid_argument() {
        let request = json_request(r#"{"name": "John Doe", "age": 14, "user_type": "SUPERUSER"}"#);
        let Err((status, Json(body))) =
            JsonBody::<CreateUserRequest>::from_request(request, &()).await
        else {
            panic!("unknown user type should be rejected");
        };

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, ErrorKind::InvalidArgument);
        assert!(body.error.contains("SUPERUSER"));
    }

    #[tokio::test]
    async fn test_negative_limit_is_invalid_argument() {
        let (mut parts, _) = http::Request::builder()
            .uri("/users?limit=-1")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let Err((status, Json(body))) =
            QueryParams::<PageFilter>::from_request_parts(&mut parts, &()).await
        else {
            panic!("negative limit should be rejected");
        };

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, ErrorKind::InvalidArgument);
    }
}
