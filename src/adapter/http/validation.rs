use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::app_error::AppError;

/// JSON body that has passed its `validator` rules. Malformed JSON keeps the
/// rejection's status; rule failures become `422`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use rstest::rstest;

    use crate::adapter::http::schema::profile::CreateProfileRequest;
    use crate::adapter::http::validation::ValidJson;
    use crate::application::app_error::AppError;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"business_name":"Acme Spa","business_type":"Wellness","phone":"5551234567"}"#);

        let ValidJson(body) = ValidJson::<CreateProfileRequest>::from_request(request, &()).await.unwrap();

        assert_eq!(body.business_name, "Acme Spa");
        assert!(body.city.is_none());
    }

    #[rstest]
    #[case(r#"{"business_name":"","business_type":"Wellness","phone":"5551234567"}"#)]
    #[case(r#"{"business_name":"   ","business_type":"Wellness","phone":"5551234567"}"#)]
    #[case(r#"{"business_name":"Acme","business_type":"  ","phone":"5551234567"}"#)]
    #[case(r#"{"business_name":"Acme","business_type":"Wellness","phone":" "}"#)]
    #[case(r#"{"business_name":"Acme","business_type":"Wellness","phone":"5551234567890123"}"#)]
    #[tokio::test]
    async fn test_rule_failures(#[case] body: &'static str) {
        let result = ValidJson::<CreateProfileRequest>::from_request(json_request(body), &()).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let result = ValidJson::<CreateProfileRequest>::from_request(json_request("{"), &()).await;

        assert!(matches!(result, Err(AppError::InvalidJson(_))));
    }
}
