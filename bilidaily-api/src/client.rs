use std::{sync::Arc, time::Duration};

use bilidaily_config::Config;
use bilidaily_models::web::ApiResponse;
use bilidaily_utilities::delay::random_delay;
use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE, ORIGIN, REFERER},
    Client, Method, Response, StatusCode, Url,
};
use serde::de::DeserializeOwned;

use crate::{
    endpoints::{Endpoints, Host},
    error::{ApiError, Result},
    session::Session,
};

pub(crate) type Params = Vec<(&'static str, String)>;

const RETRY_STATUSES: [u16; 10] = [408, 413, 429, 500, 502, 503, 504, 521, 522, 524];
const SITE: &str = "https://www.bilibili.com";

/// Cookie-authenticated client for the platform's web endpoints.
#[derive(Clone)]
pub struct BiliClient {
    client: Client,
    session: Arc<Session>,
    endpoints: Endpoints,
    retries: u32,
    request_delay: Duration,
}

impl BiliClient {
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.bilibili.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static(SITE));

        let client = Client::builder()
            .user_agent(config.user_agent().to_string())
            .default_headers(headers)
            .timeout(Duration::from_millis(config.network.timeout.max(1)))
            .build()?;

        Ok(Self {
            client,
            session,
            endpoints: Endpoints::default(),
            retries: config.network.retries,
            request_delay: Duration::from_millis(config.network.delay),
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) async fn get<T>(&self, host: Host, path: &str, query: Params) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoints.url(host, path)?;
        let response = self.execute(Method::GET, url.clone(), &query, None).await?;
        Self::decode(url, response).await
    }

    pub(crate) async fn post_form<T>(&self, host: Host, path: &str, form: Params) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoints.url(host, path)?;
        let response = self.execute(Method::POST, url.clone(), &[], Some(&form)).await?;
        Self::decode(url, response).await
    }

    pub(crate) fn url(&self, host: Host, path: &str) -> Result<Url> {
        self.endpoints.url(host, path)
    }

    /// Sends one logical request, retrying transport failures and throttling statuses.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(&'static str, String)],
        form: Option<&Params>,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            random_delay(self.request_delay).await;
            debug!("Request: {} {}", method, url);

            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .header(COOKIE, self.session.cookie());
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(form) = form {
                request = request.form(form);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!("Response: {} {}", status, url);
                    if status.is_success() {
                        return Ok(response);
                    }
                    if attempt < self.retries && is_retryable(status) {
                        attempt += 1;
                        warn!("{} returned {}, retry {}/{}", url, status, attempt, self.retries);
                        backoff(attempt).await;
                        continue;
                    }
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<unable to read body>".into());
                    return Err(ApiError::Http { status, url, message });
                }
                Err(err) if attempt < self.retries && (err.is_timeout() || err.is_connect()) => {
                    attempt += 1;
                    warn!("{} failed: {}, retry {}/{}", url, err, attempt, self.retries);
                    backoff(attempt).await;
                }
                Err(err) => return Err(ApiError::Request(err)),
            }
        }
    }

    pub(crate) async fn decode<T>(url: Url, response: Response) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

fn is_retryable(status: StatusCode) -> bool {
    RETRY_STATUSES.contains(&status.as_u16())
}

async fn backoff(attempt: u32) {
    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
}
