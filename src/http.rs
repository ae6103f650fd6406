//! The HTTP capability used by every outbound call.
//!
//! Chart scraping, token requests and Spotify Web API calls all go through the
//! [`HttpClient`] trait instead of calling `reqwest` directly. The production
//! implementation is [`ReqwestClient`]. Tests provide their own implementation
//! that serves canned chart pages and JSON bodies.
//!
//! Responses are returned as status plus raw body for every status code. Callers
//! decide which codes count as success, so a 403 from the append endpoint and a
//! 401 from search can be treated differently.

use std::future::Future;

use reqwest::{Client, header::USER_AGENT};
use serde_json::Value;

use crate::Res;

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Outbound HTTP operations needed by chartify.
///
/// An `Err` means the request never produced a response (DNS, TLS, connection
/// reset). Every response that arrived, whatever its status, is `Ok`.
pub trait HttpClient {
    /// `GET` with an explicit `User-Agent` header, used for the chart page.
    fn get_page(
        &self,
        url: &str,
        user_agent: &str,
    ) -> impl Future<Output = Res<HttpResponse>> + Send;

    /// `GET` authorized with a bearer token.
    fn get_authorized(
        &self,
        url: &str,
        token: &str,
    ) -> impl Future<Output = Res<HttpResponse>> + Send;

    /// `POST` with an `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> impl Future<Output = Res<HttpResponse>> + Send;

    /// `POST` with a JSON body, authorized with a bearer token.
    fn post_json(
        &self,
        url: &str,
        token: &str,
        body: &Value,
    ) -> impl Future<Output = Res<HttpResponse>> + Send;
}

/// [`HttpClient`] backed by a single `reqwest::Client`.
///
/// No timeout is configured, a hung endpoint blocks the run.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        ReqwestClient {
            client: Client::new(),
        }
    }

    async fn finish(response: reqwest::Response) -> Res<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    async fn get_page(&self, url: &str, user_agent: &str) -> Res<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;
        Self::finish(response).await
    }

    async fn get_authorized(&self, url: &str, token: &str) -> Res<HttpResponse> {
        let response = self.client.get(url).bearer_auth(token).send().await?;
        Self::finish(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Res<HttpResponse> {
        let response = self.client.post(url).form(form).send().await?;
        Self::finish(response).await
    }

    async fn post_json(&self, url: &str, token: &str, body: &Value) -> Res<HttpResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::finish(response).await
    }
}
