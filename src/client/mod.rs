//! HTTP client for the Google People API.
//!
//! This module provides a synchronous client covering the three calls the
//! cleanup needs: listing contact groups, paging through connections, and
//! deleting a contact. Errors are mapped onto [`PeopleApiError`] so callers
//! can tell throttling, transient failures, missing resources and fatal
//! conditions apart.

use crate::config::Config;
use crate::domain::ResourceName;
use crate::error::{ConfigResult, PeopleApiError, PeopleApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Contact, ContactGroup};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Person fields requested when listing connections.
pub const PERSON_FIELDS: &str = "names,phoneNumbers,memberships";

/// Largest page size the connections endpoint accepts.
pub const PAGE_SIZE: usize = 1000;

/// One page of `people/me/connections`.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionsPage {
    /// Contacts on this page
    pub connections: Vec<Contact>,

    /// Token for the next page, absent on the last page
    pub next_page_token: Option<String>,

    /// Total contacts across all pages
    pub total_people: Option<u32>,
}

/// One page of `contactGroups`.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactGroupsPage {
    pub contact_groups: Vec<ContactGroup>,
    pub next_page_token: Option<String>,
}

/// HTTP client for the People API.
///
/// This client uses `ureq` for synchronous HTTP requests.
#[derive(Clone)]
pub struct PeopleClient {
    /// Base URL for the People API
    base_url: String,

    /// OAuth bearer token
    access_token: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl PeopleClient {
    /// Create a new PeopleClient from configuration.
    ///
    /// Fails if no access token is configured.
    pub fn new(config: &Config, metrics: Metrics) -> ConfigResult<Self> {
        let access_token = config.require_access_token()?.to_string();
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Ok(Self {
            base_url: config.api_url.clone(),
            access_token,
            agent: Arc::new(agent),
            metrics,
        })
    }

    /// Create a PeopleClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            access_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Execute a request with authentication, recording timing.
    fn send(&self, request: ureq::Request) -> PeopleApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let method = request.method().to_string();
        let url = request.url().to_string();

        match request.set("Authorization", &self.bearer()).call() {
            Ok(response) => {
                tracing::debug!("{} {} - {}", method, url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                timer.complete_with_error();
                let err = Self::map_error(e);
                tracing::debug!("{} {} - {}", method, url, err);
                Err(err)
            }
        }
    }

    /// Execute a GET request and parse the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> PeopleApiResult<T> {
        let response = self.send(self.agent.get(&self.build_url(path)))?;
        let body = response
            .into_string()
            .map_err(|e| PeopleApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(PeopleApiError::JsonError)
    }

    /// Map a ureq error to a PeopleApiError.
    fn map_error(error: ureq::Error) -> PeopleApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => PeopleApiError::Unauthorized,
                    403 if is_rate_limit_body(&message) => PeopleApiError::RateLimitExceeded,
                    403 => PeopleApiError::Forbidden(message),
                    404 => PeopleApiError::NotFound(message),
                    429 => PeopleApiError::RateLimitExceeded,
                    500 | 502 | 503 | 504 => PeopleApiError::ServiceUnavailable(code),
                    _ => PeopleApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => {
                    PeopleApiError::ConnectionFailed(transport.to_string())
                }
                ureq::ErrorKind::Io => PeopleApiError::Timeout,
                ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                    PeopleApiError::InvalidRequest(transport.to_string())
                }
                _ => PeopleApiError::HttpError(transport.to_string()),
            },
        }
    }

    // ========================= Contact Group Operations =========================

    /// Fetch one page of the user's contact groups.
    pub fn list_contact_groups(
        &self,
        page_token: Option<&str>,
    ) -> PeopleApiResult<ContactGroupsPage> {
        let mut path = format!("/contactGroups?pageSize={}", PAGE_SIZE);
        if let Some(token) = page_token {
            path.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }
        self.get_json(&path)
    }

    // ========================= Contact Operations =========================

    /// Fetch one page of the user's connections.
    pub fn list_connections(&self, page_token: Option<&str>) -> PeopleApiResult<ConnectionsPage> {
        let mut path = format!(
            "/people/me/connections?personFields={}&pageSize={}",
            urlencoding::encode(PERSON_FIELDS),
            PAGE_SIZE
        );
        if let Some(token) = page_token {
            path.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        let page: ConnectionsPage = self.get_json(&path)?;
        self.metrics.record_contacts_fetched(page.connections.len());
        Ok(page)
    }

    /// Delete a contact. The deletion is permanent.
    pub fn delete_contact(&self, resource_name: &ResourceName) -> PeopleApiResult<()> {
        let path = format!("/{}:deleteContact", resource_name);
        self.send(self.agent.delete(&self.build_url(&path)))?;
        Ok(())
    }
}

/// Google reports some quota errors as 403 with a rate-limit reason.
fn is_rate_limit_body(body: &str) -> bool {
    body.contains("RATE_LIMIT_EXCEEDED") || body.contains("rateLimitExceeded")
}
