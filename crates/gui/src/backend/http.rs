use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use shared::{BoardPayload, DetailResponse, ErrorBody, PlaceDetail, SubmitRequest, SubmitResponse};

use super::{Backend, BackendError};

/// Cookie holding the CSRF token set by the board page
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the token is echoed in on POST
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Location of the submission endpoint
const SUBMIT_LOCATION: &str = "search/2";

/// Backend over HTTP with a shared cookie jar.
pub struct HttpBackend {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base: Url,
}

impl HttpBackend {
    /// Creates a client rooted at `base_url` (a trailing slash is added if missing).
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base = parse_base(base_url)?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        Ok(Self { http, jar, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a location relative to the base URL
    pub fn url(&self, location: &str) -> Result<Url, BackendError> {
        self.base
            .join(location.trim_start_matches('/'))
            .map_err(|e| BackendError::InvalidUrl {
                url: location.to_string(),
                reason: e.to_string(),
            })
    }

    /// Detail endpoint for a place; the id is always one encoded path segment
    pub fn detail_url(&self, place_id: &str) -> Result<Url, BackendError> {
        if matches!(place_id, "" | "." | "..") {
            return Err(BackendError::InvalidUrl {
                url: place_id.to_string(),
                reason: "not a place id".to_string(),
            });
        }
        let mut url = self.url("search/detail/")?;
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl {
                url: self.base.to_string(),
                reason: "base URL cannot hold a path".to_string(),
            })?
            .pop_if_empty()
            .push(place_id);
        Ok(url)
    }

    /// Current value of the CSRF cookie, if the server has set one
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let cookies = header.to_str().ok()?;
        cookie_value(cookies, CSRF_COOKIE)
    }

    /// Store a cookie as if the server had sent it
    pub fn add_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base);
    }

    fn post(&self, url: Url) -> RequestBuilder {
        let request = self.http.post(url);
        match self.csrf_token() {
            Some(token) => request.header(CSRF_HEADER, token),
            None => {
                warn!("No {CSRF_COOKIE} cookie; sending POST without {CSRF_HEADER}");
                request
            }
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_board(&self, location: &str) -> Result<BoardPayload, BackendError> {
        let url = self.url(location)?;
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        Self::read(response).await
    }

    #[instrument(skip(self))]
    async fn fetch_detail(&self, place_id: &str) -> Result<PlaceDetail, BackendError> {
        let url = self.detail_url(place_id)?;
        debug!("POST {url}");
        let response = self.post(url).send().await?;
        let body: DetailResponse = Self::read(response).await?;
        Ok(body.detail)
    }

    #[instrument(skip(self, request), fields(count = request.shops.len()))]
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, BackendError> {
        let url = self.url(SUBMIT_LOCATION)?;
        debug!("POST {url}");
        let response = self.post(url).json(request).send().await?;
        Self::read(response).await
    }
}

fn parse_base(base_url: &str) -> Result<Url, BackendError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| BackendError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Find `name` in a `Cookie` header value (`a=1; b=2`)
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}
