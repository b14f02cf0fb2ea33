//! Request extractor for webhook bodies.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::error::{AppError, AppResult};
use crate::webhook::RawBody;

fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Map a body-level failure, keeping 413 distinct so producers can tell an
/// oversized thumbnail from a broken request.
fn body_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { message }
    } else {
        AppError::BadRequest { message }
    }
}

/// Collects the text fields of a multipart body.
///
/// Parts with a file name (Plex's `thumb` JPEG) are skipped unread.
async fn multipart_fields(mut multipart: Multipart) -> AppResult<HashMap<String, String>> {
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        fields.insert(name, value);
    }

    Ok(fields)
}

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Multipart and url-encoded bodies become [`RawBody::Form`]; anything
    /// else is kept as raw bytes for the JSON adapters.
    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let content_type = content_type(&req);

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            return multipart_fields(multipart).await.map(RawBody::Form);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            return Ok(RawBody::Form(fields));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        Ok(RawBody::Json(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Method;

    fn request(content_type: &str, body: impl Into<Body>) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_is_kept_raw() {
        let req = request("application/json", r#"{"a":1}"#);
        let body = RawBody::from_request(req, &()).await.unwrap();
        assert!(matches!(body, RawBody::Json(ref bytes) if bytes.as_ref() == br#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_treated_as_json() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .body(Body::from("{}"))
            .unwrap();
        let body = RawBody::from_request(req, &()).await.unwrap();
        assert!(matches!(body, RawBody::Json(_)));
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let req = request(
            "application/x-www-form-urlencoded",
            "payload=%7B%22event%22%3A%22library.new%22%7D",
        );
        let body = RawBody::from_request(req, &()).await.unwrap();
        match body {
            RawBody::Form(fields) => {
                assert_eq!(fields["payload"], r#"{"event":"library.new"}"#);
            }
            other => panic!("expected form, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multipart_skips_file_parts() {
        let boundary = "XyZ";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"payload\"\r\n\
             \r\n\
             {{\"event\":\"library.new\"}}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"thumb\"; filename=\"thumb.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\
             \r\n\
             \u{00ff}\u{00d8}binary\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let req = request(&format!("multipart/form-data; boundary={}", boundary), body);

        let body = RawBody::from_request(req, &()).await.unwrap();
        match body {
            RawBody::Form(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields["payload"], r#"{"event":"library.new"}"#);
            }
            other => panic!("expected form, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_broken_multipart_is_bad_request() {
        let req = request("multipart/form-data", "no boundary here");
        let err = RawBody::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
