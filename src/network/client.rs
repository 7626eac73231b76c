//! HTTP client wrapper - builds and executes calls against the shigure backend

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, Url};

use crate::constants::{
    ROUTE_ACTIVITY, ROUTE_ACTIVITY_CLEAR, ROUTE_ACTIVITY_IMAGE, ROUTE_TOKEN, ROUTE_TOKEN_VERIFY,
};
use crate::models::Activity;
use crate::network::error::ApiError;

/// Header carrying the passcode on token issuance
pub const PASSCODE_HEADER: &str = "Passcode";

/// Client for the backend's auth and activity endpoints
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

fn bearer(req: RequestBuilder, token: &str) -> RequestBuilder {
    req.header(AUTHORIZATION, format!("Bearer {}", token))
}

/// Location of the rendered image for an activity
pub fn activity_image_url(base_url: &str, id: &str) -> String {
    let base = format!("{}{}", base_url.trim_end_matches('/'), ROUTE_ACTIVITY_IMAGE);
    match Url::parse_with_params(&base, &[("id", id)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?id={}", base, id),
    }
}

/// Map non-success statuses to an error, passing the response through otherwise
async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    pub fn issue_token_request(&self, passcode: &str) -> RequestBuilder {
        self.http
            .get(self.url(ROUTE_TOKEN))
            .header(PASSCODE_HEADER, passcode)
    }

    pub fn verify_token_request(&self, token: &str) -> RequestBuilder {
        bearer(self.http.post(self.url(ROUTE_TOKEN_VERIFY)), token)
    }

    pub fn get_activity_request(&self, token: Option<&str>) -> RequestBuilder {
        let req = self.http.get(self.url(ROUTE_ACTIVITY));
        match token {
            Some(token) => bearer(req, token),
            None => req,
        }
    }

    pub fn clear_activity_request(&self, token: &str) -> RequestBuilder {
        bearer(self.http.post(self.url(ROUTE_ACTIVITY_CLEAR)), token)
    }

    /// Exchange a passcode for a token
    pub async fn issue_token(&self, passcode: &str) -> Result<String, ApiError> {
        let resp = check(self.issue_token_request(passcode).send().await?).await?;
        let status = resp.status().as_u16();
        let token = resp.text().await?;
        if token.is_empty() {
            return Err(ApiError::ServerError {
                status,
                message: "empty token".to_string(),
            });
        }
        Ok(token)
    }

    /// Confirm a token is still accepted
    pub async fn verify_token(&self, token: &str) -> Result<(), ApiError> {
        check(self.verify_token_request(token).send().await?).await?;
        Ok(())
    }

    pub async fn get_activity(&self, token: Option<&str>) -> Result<Activity, ApiError> {
        let resp = check(self.get_activity_request(token).send().await?).await?;
        Ok(resp.json::<Activity>().await?)
    }

    pub async fn clear_activity(&self, token: &str) -> Result<(), ApiError> {
        check(self.clear_activity_request(token).send().await?).await?;
        Ok(())
    }

    pub fn activity_image_url(&self, id: &str) -> String {
        activity_image_url(&self.base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> ApiClient {
        ApiClient::new("http://api.test/", Duration::from_secs(5))
    }

    /// Answer a single request with a canned status and body, returning the base url
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn client_for(status: &'static str, body: &'static str) -> ApiClient {
        ApiClient::new(serve_once(status, body).await, Duration::from_secs(5))
    }

    #[test]
    fn test_issue_token_request_carries_passcode() {
        let req = client().issue_token_request("123456").build().unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().as_str(), "http://api.test/auth/token");
        assert_eq!(req.headers()[PASSCODE_HEADER], "123456");
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_verify_token_request_is_authenticated_post() {
        let req = client().verify_token_request("abc").build().unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().path(), "/auth/token/verify");
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc");
    }

    #[test]
    fn test_activity_requests() {
        let c = client();
        let anon = c.get_activity_request(None).build().unwrap();
        assert_eq!(anon.url().path(), "/activity");
        assert!(anon.headers().get(AUTHORIZATION).is_none());

        let authed = c.get_activity_request(Some("tk")).build().unwrap();
        assert_eq!(authed.headers()[AUTHORIZATION], "Bearer tk");

        let clear = c.clear_activity_request("tk").build().unwrap();
        assert_eq!(clear.method(), Method::POST);
        assert_eq!(clear.url().path(), "/activity/clear");
        assert_eq!(clear.headers()[AUTHORIZATION], "Bearer tk");
    }

    #[test]
    fn test_activity_image_url_encodes_id() {
        let c = client();
        assert_eq!(c.activity_image_url("abc"), "http://api.test/activity/svg?id=abc");
        assert_eq!(
            c.activity_image_url("a b&c"),
            "http://api.test/activity/svg?id=a+b%26c"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 1 is reserved and nothing listens on it in test environments
        let c = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = c.issue_token("123456").await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)), "got {:?}", err);
        let err = c.verify_token("stale").await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_issue_token_returns_body_verbatim() {
        let c = client_for("200 OK", "abc").await;
        assert_eq!(c.issue_token("123456").await, Ok("abc".to_string()));

        let c = client_for("200 OK", " abc ").await;
        assert_eq!(c.issue_token("123456").await, Ok(" abc ".to_string()));
    }

    #[tokio::test]
    async fn test_issue_token_empty_body_fails() {
        let c = client_for("200 OK", "").await;
        assert_eq!(
            c.issue_token("123456").await,
            Err(ApiError::ServerError {
                status: 200,
                message: "empty token".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_rejected_passcode_is_invalid_credential() {
        let c = client_for("401 Unauthorized", "Unauthorized").await;
        assert_eq!(
            c.issue_token("000000").await,
            Err(ApiError::InvalidCredential { status: 401 })
        );

        let c = client_for("400 Bad Request", "").await;
        assert_eq!(
            c.verify_token("garbage").await,
            Err(ApiError::InvalidCredential { status: 400 })
        );
    }

    #[tokio::test]
    async fn test_other_failures_are_server_errors() {
        let c = client_for("500 Internal Server Error", "boom").await;
        assert_eq!(
            c.clear_activity("tk").await,
            Err(ApiError::ServerError {
                status: 500,
                message: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_get_activity_decodes_body() {
        let c = client_for(
            "200 OK",
            r#"{"Id":"42","Title":"Song","Author":"Me","ThumbnailUrl":"t","Url":"u"}"#,
        )
        .await;
        let activity = c.get_activity(Some("tk")).await.unwrap();
        assert_eq!(activity.id, "42");
        assert_eq!(activity.title, "Song");
        assert_eq!(activity.url, "u");
    }

    #[tokio::test]
    async fn test_undecodable_activity_is_server_error() {
        let c = client_for("200 OK", "not json").await;
        let err = c.get_activity(Some("tk")).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError { .. }), "got {:?}", err);
    }
}
