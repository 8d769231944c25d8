//! Authenticated access to the platform REST API.
//!
//! Responses are parsed strictly: a 2xx body that does not have the expected
//! shape is a `MalformedResponse`, never a silently empty page.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use gratiswag_api_types::{ApiEnvelope, ErrorBody};
use metrics::counter;
use reqwest::{
    Client, Method, RequestBuilder, StatusCode, Url,
    header::{AUTHORIZATION, HeaderValue},
    multipart,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    application::{error::ApiError, forms::Submission, session::SessionStore},
    domain::{
        pagination::{Page, PageFetch, PageRequest, last_page},
        session::BearerToken,
    },
    infra::error::InfraError,
};

/// Credential attached to a request.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// The session store's token; the call is refused without one.
    Session,
    /// An explicit token, e.g. the password-reset token.
    Bearer(&'a BearerToken),
    Anonymous,
}

enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(multipart::Form),
}

/// A 2xx response as received.
struct Reply {
    status: StatusCode,
    body: Bytes,
}

#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base: Url,
    sessions: Arc<dyn SessionStore>,
}

impl RestClient {
    pub fn new(
        base_url: &Url,
        timeout: Duration,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, InfraError> {
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self {
            http,
            base: normalize_base(base_url),
            sessions,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("gratiswag-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Resolve `path` (relative, no leading slash) against the base URL.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::rejected(Some(format!("invalid request path `{path}`: {err}"))))?;
        if !query.is_empty() {
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch one page of a paginated list. `items_key` names the array inside
    /// `data` for endpoints that nest it (orders send `data.orders`).
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: PageRequest,
        items_key: Option<&str>,
    ) -> Result<PageFetch<T>, ApiError> {
        let url = self.url(path, &request.query_pairs())?;
        let reply = self.send(Method::GET, url, Auth::Session, Body::Empty).await?;
        decode_page(parse_envelope(&reply.body)?, request, items_key)
    }

    /// Fetch an unpaginated list whose `data` is a plain array.
    pub async fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get(path, &[], Auth::Session).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: Auth<'_>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let reply = self.send(Method::GET, url, auth, Body::Empty).await?;
        decode_data(parse_envelope(&reply.body)?)
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let reply = self.send(method, url, auth, Body::Json(encode(body)?)).await?;
        decode_data(parse_envelope(&reply.body)?)
    }

    /// Send a JSON body when only the acknowledgement matters.
    pub async fn send_json_unit<B>(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
        body: &B,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        let reply = self.send(method, url, auth, Body::Json(encode(body)?)).await?;
        acknowledge(reply.status, &reply.body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        let reply = self.send(Method::DELETE, url, Auth::Session, Body::Empty).await?;
        acknowledge(reply.status, &reply.body)
    }

    /// Send a prepared form submission and return the `data` the server echoed,
    /// or `Null` when the server only acknowledged it.
    pub async fn submit(
        &self,
        method: Method,
        path: &str,
        submission: Submission,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.url(path, &[])?;
        let body = match submission {
            Submission::Json(value) => Body::Json(value),
            Submission::Multipart {
                data,
                image_field,
                image,
            } => {
                let part = multipart::Part::bytes(image.bytes().to_vec())
                    .file_name(image.file_name().to_string())
                    .mime_str(image.content_type())
                    .map_err(|err| ApiError::rejected(Some(err.to_string())))?;
                let form = multipart::Form::new()
                    .text("data", data.to_string())
                    .part(image_field, part);
                Body::Multipart(form)
            }
        };
        let reply = self.send(method, url, Auth::Session, body).await?;
        if reply.status == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }
        let envelope = acknowledged(parse_envelope(&reply.body)?)?;
        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }

    fn authorize(&self, builder: RequestBuilder, auth: Auth<'_>) -> Result<RequestBuilder, ApiError> {
        let token = match auth {
            Auth::Anonymous => return Ok(builder),
            Auth::Bearer(token) => token.clone(),
            Auth::Session => self.sessions.token().ok_or_else(ApiError::missing_session)?,
        };
        let value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|_| ApiError::rejected(Some("session token is not a valid header value".into())))?;
        Ok(builder.header(AUTHORIZATION, value))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        auth: Auth<'_>,
        body: Body,
    ) -> Result<Reply, ApiError> {
        let path = url.path().to_string();
        let builder = self.authorize(self.http.request(method.clone(), url), auth)?;
        let builder = match body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form),
        };

        counter!("gratiswag_api_requests_total", "method" => method.to_string()).increment(1);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                return Err(record_failure(&method, &path, ApiError::network(err.to_string())));
            }
        };
        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(record_failure(&method, &path, ApiError::network(err.to_string())));
            }
        };

        debug!(
            target = "gratiswag_admin::http",
            method = %method,
            path = %path,
            status = status.as_u16(),
            bytes = bytes.len(),
            "api call completed"
        );

        if !status.is_success() {
            return Err(record_failure(&method, &path, error_from_response(status, &bytes)));
        }
        Ok(Reply {
            status,
            body: bytes,
        })
    }
}

fn normalize_base(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    base
}

fn record_failure(method: &Method, path: &str, error: ApiError) -> ApiError {
    counter!("gratiswag_api_errors_total", "kind" => error.kind()).increment(1);
    warn!(
        target = "gratiswag_admin::http",
        method = %method,
        path = %path,
        kind = error.kind(),
        error = %error,
        "api call failed"
    );
    error
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::rejected(Some(format!("failed to encode request body: {err}"))))
}

pub(crate) fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message);
    ApiError::from_status(status.as_u16(), message)
}

pub(crate) fn parse_envelope(body: &[u8]) -> Result<ApiEnvelope, ApiError> {
    let envelope: ApiEnvelope = serde_json::from_slice(body)
        .map_err(|err| ApiError::malformed(format!("response is not a valid envelope: {err}")))?;
    if envelope.is_rejected() {
        return Err(ApiError::rejected(envelope.message));
    }
    Ok(envelope)
}

/// Accept a bodiless `204` or an envelope that positively acknowledges the call.
fn acknowledge(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(());
    }
    acknowledged(parse_envelope(body)?).map(drop)
}

/// An envelope counts as an acknowledgement only with a success flag or a `data` payload.
fn acknowledged(envelope: ApiEnvelope) -> Result<ApiEnvelope, ApiError> {
    if envelope.success == Some(true) || envelope.data.is_some() {
        Ok(envelope)
    } else {
        Err(ApiError::malformed("response carries neither a success flag nor `data`"))
    }
}

pub(crate) fn decode_data<T: DeserializeOwned>(envelope: ApiEnvelope) -> Result<T, ApiError> {
    let data = envelope
        .data
        .ok_or_else(|| ApiError::malformed("response has no `data`"))?;
    serde_json::from_value(data)
        .map_err(|err| ApiError::malformed(format!("unexpected `data` shape: {err}")))
}

pub(crate) fn decode_page<T: DeserializeOwned>(
    envelope: ApiEnvelope,
    request: PageRequest,
    items_key: Option<&str>,
) -> Result<PageFetch<T>, ApiError> {
    let meta = *envelope
        .page_meta()
        .ok_or_else(|| ApiError::malformed("list response has no pagination block"))?;
    let data = envelope
        .data
        .ok_or_else(|| ApiError::malformed("list response has no `data`"))?;
    let items = match items_key {
        Some(key) => data
            .get(key)
            .cloned()
            .ok_or_else(|| ApiError::malformed(format!("list response has no `data.{key}`")))?,
        None => data,
    };
    let items: Vec<T> = serde_json::from_value(items)
        .map_err(|err| ApiError::malformed(format!("unexpected list item shape: {err}")))?;

    if request.page() > last_page(meta.total_pages) {
        return Ok(PageFetch::BeyondEnd {
            total_items: meta.total,
            total_pages: meta.total_pages,
        });
    }
    if meta.page != request.page() {
        return Err(ApiError::malformed(format!(
            "asked for page {} but the server answered page {}",
            request.page(),
            meta.page
        )));
    }
    Page::new(
        items,
        request.page(),
        request.limit(),
        meta.total,
        meta.total_pages,
    )
    .map(PageFetch::Page)
    .map_err(|err| ApiError::malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn envelope(value: serde_json::Value) -> ApiEnvelope {
        serde_json::from_value(value).expect("envelope")
    }

    fn request(page: u32) -> PageRequest {
        PageRequest::new(page, 10).expect("request")
    }

    #[test]
    fn decodes_nested_order_items() {
        let body = envelope(json!({
            "success": true,
            "data": { "orders": [1, 2] },
            "meta": { "total": 2, "page": 1, "limit": 10, "totalPages": 1 }
        }));
        let fetched: PageFetch<u8> = decode_page(body, request(1), Some("orders")).expect("page");
        let page = fetched.into_page().expect("in range");
        assert_eq!(page.items(), &[1, 2]);
    }

    #[test]
    fn missing_meta_is_malformed() {
        let body = envelope(json!({ "success": true, "data": [] }));
        let err = decode_page::<u8>(body, request(1), None).expect_err("malformed");
        assert_eq!(err.kind(), "malformed_response");
    }

    #[test]
    fn wrong_item_shape_is_malformed() {
        let body = envelope(json!({
            "data": { "unexpected": true },
            "meta": { "total": 1, "page": 1, "limit": 10, "totalPages": 1 }
        }));
        assert!(decode_page::<u8>(body, request(1), None).is_err());
    }

    #[test]
    fn page_past_the_end_is_reported() {
        let body = envelope(json!({
            "data": [],
            "meta": { "total": 20, "page": 3, "limit": 10, "totalPages": 2 }
        }));
        let fetched = decode_page::<u8>(body, request(3), None).expect("decoded");
        assert_eq!(
            fetched,
            PageFetch::BeyondEnd {
                total_items: 20,
                total_pages: 2
            }
        );
    }

    #[test]
    fn oversized_page_is_malformed() {
        let body = envelope(json!({
            "data": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            "meta": { "total": 11, "page": 1, "limit": 10, "totalPages": 2 }
        }));
        assert!(decode_page::<u8>(body, request(1), None).is_err());
    }

    #[test]
    fn rejected_envelope_becomes_validation_error() {
        let err = parse_envelope(br#"{"success":false,"message":"Email already used"}"#)
            .expect_err("rejected");
        assert_eq!(err, ApiError::rejected(Some("Email already used".into())));
    }

    #[test]
    fn error_bodies_keep_server_message() {
        let err = error_from_response(StatusCode::NOT_FOUND, br#"{"message":"Blog not found"}"#);
        assert_eq!(err.message(), "Blog not found");
        let err = error_from_response(StatusCode::BAD_GATEWAY, b"<html>");
        assert_eq!(err.kind(), "server");
    }

    #[test]
    fn acknowledgement_requires_an_envelope() {
        assert!(acknowledge(StatusCode::NO_CONTENT, b"").is_ok());
        assert!(acknowledge(StatusCode::OK, br#"{"status":true,"message":"deleted"}"#).is_ok());

        let err = acknowledge(StatusCode::OK, b"").expect_err("empty 200");
        assert_eq!(err.kind(), "malformed_response");
        let err = acknowledge(StatusCode::OK, b"<html>proxy page</html>").expect_err("html");
        assert_eq!(err.kind(), "malformed_response");
        let err = acknowledge(StatusCode::OK, b"{}").expect_err("bare object");
        assert_eq!(err.kind(), "malformed_response");

        let err = acknowledge(StatusCode::OK, br#"{"success":false,"message":"no"}"#)
            .expect_err("rejected");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = normalize_base(&Url::parse("https://api.gratiswag.test/api/v1").expect("url"));
        assert_eq!(base.as_str(), "https://api.gratiswag.test/api/v1/");
        assert_eq!(
            base.join("blog").expect("join").as_str(),
            "https://api.gratiswag.test/api/v1/blog"
        );
    }
}
