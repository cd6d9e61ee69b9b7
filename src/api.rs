//! Access to the GitHub REST API.
//!
//! [`GitHubApi`] is the set of calls the reporter needs; [`Client`] implements
//! it over blocking `reqwest`.

use std::fmt;

use log::debug;
use reqwest::{
    StatusCode, Url,
    blocking::{RequestBuilder, Response},
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK},
};
use serde::Deserialize;

use crate::{
    Error, Result,
    model::{CombinedStatus, Issue, Page, RateLimits, Repository},
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Placeholder the CLI has always used for "no token given".
pub const UNCONFIGURED_TOKEN: &str = "ACCESSTOKEN";

const USER_AGENT: &str = concat!("repo-stats/", env!("CARGO_PKG_VERSION"));

pub trait GitHubApi {
    fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository>;

    fn get_combined_status(&self, owner: &str, repo: &str, reference: &str)
    -> Result<CombinedStatus>;

    fn list_closed_issues(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Issue>>;

    fn get_rate_limit(&self) -> Result<RateLimits>;
}

/// A bearer token that is known to be configured.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() || trimmed == UNCONFIGURED_TOKEN {
            return Err(Error::MissingToken);
        }
        Ok(AccessToken(trimmed.to_string()))
    }

    fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    resources: RateLimits,
}

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: &str, token: AccessToken) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidApiUrl { url: base_url.to_string(), reason };
        let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.secret()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Client { http, base_url: parsed })
    }

    /// Appends `segments` to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes()?;
        Err(api_error(status, &body))
    }
}

/// Error for a non-2xx response, preferring GitHub's own `message`.
fn api_error(status: StatusCode, body: &[u8]) -> Error {
    let message = match serde_json::from_slice::<ApiMessage>(body) {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Error::Api { status, message }
}

fn closed_issues_query(page: u32, per_page: u32) -> [(&'static str, String); 3] {
    [
        ("state", "closed".to_string()),
        ("per_page", per_page.to_string()),
        ("page", page.to_string()),
    ]
}

impl GitHubApi for Client {
    fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let url = self.endpoint(&["repos", owner, repo]);
        debug!("GET {url}");
        Ok(self.send(self.http.get(url))?.json()?)
    }

    fn get_combined_status(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> Result<CombinedStatus> {
        let url = self.endpoint(&["repos", owner, repo, "commits", reference, "status"]);
        debug!("GET {url}");
        Ok(self.send(self.http.get(url))?.json()?)
    }

    fn list_closed_issues(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Issue>> {
        let url = self.endpoint(&["repos", owner, repo, "issues"]);
        debug!("GET {url} page={page} per_page={per_page}");
        let request = self.http.get(url).query(&closed_issues_query(page, per_page));
        let response = self.send(request)?;
        let next_page = next_page(response.headers());
        Ok(Page { items: response.json()?, next_page })
    }

    fn get_rate_limit(&self) -> Result<RateLimits> {
        let url = self.endpoint(&["rate_limit"]);
        debug!("GET {url}");
        let body: RateLimitResponse = self.send(self.http.get(url))?.json()?;
        Ok(body.resources)
    }
}

/// Page number of the `rel="next"` entry of a `Link` header, if any.
fn next_page(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    let part = link.split(',').find(|part| part.contains(r#"rel="next""#))?;
    let start = part.find('<')? + 1;
    let end = part.find('>')?;
    let url = Url::parse(part.get(start..end)?).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|&page| page != 0)
}
