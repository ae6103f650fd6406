#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex};

use chartify::{
    Res,
    config::Config,
    http::{HttpClient, HttpResponse},
};
use serde_json::Value;

pub const STORED_ACCESS: &str = "stored-access";
pub const FRESH_ACCESS: &str = "fresh-access";

#[derive(Debug, Clone)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub token: Option<String>,
    pub user_agent: Option<String>,
    pub form: Vec<(String, String)>,
    pub body: Option<Value>,
}

struct Route {
    method: &'static str,
    url_prefix: String,
    responses: VecDeque<HttpResponse>,
}

/// Serves canned responses by method and URL prefix and records every request.
///
/// Routes are checked in registration order. Each route hands out its
/// responses in order and keeps repeating the last one.
#[derive(Default)]
pub struct FixtureHttp {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<Request>>,
}

impl FixtureHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: &'static str, url_prefix: &str, response: HttpResponse) -> Self {
        self.on_sequence(method, url_prefix, vec![response])
    }

    pub fn on_sequence(
        self,
        method: &'static str,
        url_prefix: &str,
        responses: Vec<HttpResponse>,
    ) -> Self {
        self.routes.lock().unwrap().push(Route {
            method,
            url_prefix: url_prefix.to_string(),
            responses: responses.into(),
        });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, url_prefix: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.url.starts_with(url_prefix))
            .collect()
    }

    fn respond(&self, request: Request) -> Res<HttpResponse> {
        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && request.url.starts_with(&r.url_prefix));

        let response = match route {
            Some(route) if route.responses.len() > 1 => route.responses.pop_front(),
            Some(route) => route.responses.front().cloned(),
            None => None,
        };
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        response.ok_or_else(|| format!("no fixture for {}", url).into())
    }

    fn request(method: &'static str, url: &str) -> Request {
        Request {
            method,
            url: url.to_string(),
            token: None,
            user_agent: None,
            form: Vec::new(),
            body: None,
        }
    }
}

impl HttpClient for FixtureHttp {
    async fn get_page(&self, url: &str, user_agent: &str) -> Res<HttpResponse> {
        let mut request = Self::request("GET", url);
        request.user_agent = Some(user_agent.to_string());
        self.respond(request)
    }

    async fn get_authorized(&self, url: &str, token: &str) -> Res<HttpResponse> {
        let mut request = Self::request("GET", url);
        request.token = Some(token.to_string());
        self.respond(request)
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Res<HttpResponse> {
        let mut request = Self::request("POST", url);
        request.form = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.respond(request)
    }

    async fn post_json(&self, url: &str, token: &str, body: &Value) -> Res<HttpResponse> {
        let mut request = Self::request("POST", url);
        request.token = Some(token.to_string());
        request.body = Some(body.clone());
        self.respond(request)
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| {
        let value = match key {
            "SPOTIFY_API_AUTH_CLIENT_ID" => "client-id",
            "SPOTIFY_API_AUTH_CLIENT_SECRET" => "client-secret",
            "SPOTIFY_API_REDIRECT_URI" => "http://127.0.0.1:8888/callback",
            "SPOTIFY_USER_ID" => "listener",
            "SPOTIFY_ACCESS_TOKEN" => STORED_ACCESS,
            "SPOTIFY_REFRESH_TOKEN" => "stored-refresh",
            _ => return None,
        };
        Some(value.to_string())
    })
}

pub fn form_value<'a>(request: &'a Request, key: &str) -> Option<&'a str> {
    request
        .form
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// A chart page with one nested list row per title, wrapped in page noise.
pub fn chart_page(titles: &[String]) -> String {
    let rows: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<div class="o-chart-results-list-row-container">
                     <ul class="o-chart-results-list-row">
                       <li><span class="rank">{rank}</span></li>
                       <li><ul><li>
                         <h3 id="title-of-a-story" class="c-title">
                           {title}
                         </h3>
                         <span class="c-label">Artist {rank}</span>
                       </li></ul></li>
                     </ul>
                   </div>"#,
                rank = i + 1,
                title = title
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Billboard Hot 100</title></head>
           <body><header><h3>Billboard</h3><nav><ul><li><a href="/">Home</a></li></ul></nav></header>
           <main>{rows}</main></body></html>"#
    )
}

pub fn token_body(access_token: &str) -> String {
    format!(
        r#"{{"access_token":"{}","token_type":"Bearer","scope":"playlist-modify-public","expires_in":3600}}"#,
        access_token
    )
}

pub fn search_hit(uri: &str) -> String {
    format!(r#"{{"tracks":{{"items":[{{"uri":"{}","name":"hit"}}],"total":1}}}}"#, uri)
}

pub fn search_miss() -> String {
    r#"{"tracks":{"items":[],"total":0}}"#.to_string()
}

pub fn created_playlist(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"Billboard Top 100 - 2020","external_urls":{{"spotify":"https://open.spotify.com/playlist/{id}"}}}}"#,
        id = id
    )
}
