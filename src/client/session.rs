use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, RequestBuilder, Response, StatusCode, Url,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{error::ClientError, navigator::Navigator, storage::CredentialStore};
use crate::models::{normalize_email, ErrorResponse, ImagesResponse, LoginResponse};

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";
pub const LANDING_PAGE: &str = "home_page.html";

const REGISTER_ENDPOINT: &str = "/api/auth/register";
const LOGIN_ENDPOINT: &str = "/api/auth/login";
const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
const IMAGES_ENDPOINT: &str = "/api/images";

/// The user object persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

/// Client-side authentication state for one server.
///
/// Built once with [`AuthSession::load`], which picks up any persisted
/// credentials, and consumed by [`AuthSession::logout`]. The session is either
/// anonymous (no token) or authenticated (token and user held); any request
/// answered with 401 drops it back to anonymous.
pub struct AuthSession {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl AuthSession {
    pub fn load(
        base_url: &str,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let token = store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user = match store.get(USER_KEY)? {
            Some(raw) => serde_json::from_str::<Option<SessionUser>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable stored user: {}", e);
                None
            }),
            None => None,
        };

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            navigator,
            token,
            user,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// anonymous -> authenticated. Persists both values.
    pub fn set_auth(&mut self, token: impl Into<String>, user: SessionUser) -> Result<(), ClientError> {
        let token = token.into();
        self.store.set(TOKEN_KEY, &token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// authenticated -> anonymous. In-memory state is dropped even when the
    /// store fails; the first store error is returned.
    pub fn clear_auth(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.user = None;
        let token_result = self.store.remove(TOKEN_KEY);
        let user_result = self.store.remove(USER_KEY);
        token_result.and(user_result)
    }

    /// JSON content type, plus the bearer header when a token is held.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Stored token is not a valid header value; sending without it"),
            }
        }

        headers
    }

    /// Sends an authenticated request. A 401 clears credentials and navigates
    /// to the landing page; the response is returned whatever its status.
    pub async fn request(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Response, ClientError> {
        let response = self.build(method, endpoint, body)?.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(%endpoint, "Unauthorized response; clearing stored credentials");
            if let Err(e) = self.clear_auth() {
                tracing::warn!("Failed to clear stored credentials: {}", e);
            }
            self.go_to_landing_page();
        }

        Ok(response)
    }

    /// Navigates to the landing page when anonymous. Returns whether the
    /// caller may continue.
    pub fn require_auth(&self) -> bool {
        if !self.is_logged_in() {
            self.go_to_landing_page();
            return false;
        }
        true
    }

    /// Tells the server, then clears local state and navigates away no matter
    /// how the notification went.
    pub async fn logout(mut self) -> Result<(), ClientError> {
        let notified = async {
            self.build(Method::POST, LOGOUT_ENDPOINT, None)?
                .send()
                .await?;
            Ok::<_, ClientError>(())
        }
        .await;

        if let Err(e) = notified {
            tracing::error!("Logout error: {}", e);
        }

        let cleared = self.clear_auth();
        self.go_to_landing_page();
        cleared
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .build(Method::POST, REGISTER_ENDPOINT, Some(&body))?
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    /// Posts credentials and stores the issued token with `{ email }` as the user.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .build(Method::POST, LOGIN_ENDPOINT, Some(&body))?
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let login: LoginResponse = response.json().await?;
        self.set_auth(
            login.token,
            SessionUser {
                email: normalize_email(email),
            },
        )
    }

    pub async fn images(&mut self) -> Result<Vec<String>, ClientError> {
        let response = self.request(Method::GET, IMAGES_ENDPOINT, None).await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let listing: ImagesResponse = response.json().await?;
        Ok(listing.images)
    }

    fn build(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;

        let mut builder = self.http.request(method, url).headers(self.auth_headers());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder)
    }

    fn go_to_landing_page(&self) {
        let location = self
            .base_url
            .join(LANDING_PAGE)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| LANDING_PAGE.to_string());
        self.navigator.navigate(&location);
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
