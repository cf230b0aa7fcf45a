//! API client for communicating with the SocialFlow REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests to fetch and mutate posts, accounts, analytics, and media.
//!
//! Every request carries the current access token as a bearer header. On a
//! 401 the client silently exchanges the refresh token for a new pair and
//! resends the original request exactly once; a second 401 (or any refresh
//! failure) clears the token store and surfaces `ApiError::SessionExpired`.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{
    AnalyticsData, BestTimeSlot, DashboardStats, MediaFolder, MediaItem, MediaKind, NewPost,
    Pagination, Platform, PlatformStats, Post, PostStatus, SocialAccount, User,
};
use crate::utils::DateRange;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Access/refresh token pair issued by the backend.
///
/// Owned by the client; mutated only by login, refresh, and logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Standard `{ success, message, data }` response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    // No serde(default) here: missing Option fields already deserialize
    // to None, and the attribute would force a T: Default bound.
    data: Option<T>,
}

/// Payload of a successful `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Filters for `GET /posts`.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<PostStatus>,
    pub platform: Option<Platform>,
    pub search: Option<String>,
}

impl PostFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_param().to_string()));
        }
        if let Some(platform) = self.platform {
            query.push(("platform", platform.as_param().to_string()));
        }
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                query.push(("search", search.clone()));
            }
        }
        query
    }
}

/// Filters for `GET /media`.
#[derive(Debug, Clone, Default)]
pub struct MediaFilter {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub kind: Option<MediaKind>,
    pub folder: Option<String>,
}

impl MediaFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type", kind.as_param().to_string()));
        }
        if let Some(ref folder) = self.folder {
            query.push(("folder", folder.clone()));
        }
        query
    }
}

/// A page of posts with pagination info.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// A page of media items with pagination info.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// API client for SocialFlow.
/// Clone is cheap - reqwest::Client and the token store both use Arc
/// internally, so clones share the connection pool and see token updates
/// made by any other clone (including refreshes).
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            tokens: Arc::new(RwLock::new(None)),
        })
    }

    // =========================================================================
    // Token store
    // =========================================================================

    /// Current token pair, if logged in.
    pub fn tokens(&self) -> Option<TokenPair> {
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_tokens(&self, pair: TokenPair) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = Some(pair),
            Err(poisoned) => *poisoned.into_inner() = Some(pair),
        }
    }

    pub fn clear_tokens(&self) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    fn access_token(&self) -> Option<String> {
        self.tokens().map(|pair| pair.token)
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Build and send one attempt at a request, attaching the current access
    /// token as a bearer credential when one is held.
    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        query: &[(&'static str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.access_token() {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Check if a response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a request, transparently recovering from access-token expiry.
    ///
    /// At most one retry-after-refresh happens per original request. A second
    /// 401 after a successful refresh is a hard authentication failure and is
    /// not retried again. Non-401 errors never trigger a refresh.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.attempt(&method, &url, query, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_response(response).await;
        }

        // Without a refresh token the original failure stands.
        if self.tokens().is_none() {
            return Err(ApiError::Unauthorized);
        }

        debug!(path, "Access token rejected, refreshing");
        self.refresh_tokens().await?;

        let retried = self.attempt(&method, &url, query, body).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!(path, "Still unauthorized after token refresh");
            self.clear_tokens();
            return Err(ApiError::SessionExpired);
        }
        Self::check_response(retried).await
    }

    /// Exchange the stored refresh token for a new access/refresh pair.
    ///
    /// Any failure here is terminal: the token store is cleared and the
    /// caller gets `SessionExpired`, which the UI surfaces as a forced
    /// re-login.
    async fn refresh_tokens(&self) -> Result<(), ApiError> {
        let refresh_token = match self.tokens() {
            Some(pair) => pair.refresh_token,
            None => return Err(ApiError::Unauthorized),
        };

        let url = format!("{}/auth/refresh-token", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token refresh request failed");
                self.clear_tokens();
                ApiError::SessionExpired
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Token refresh rejected");
            self.clear_tokens();
            return Err(ApiError::SessionExpired);
        }

        let envelope: Envelope<TokenPair> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse token refresh response");
            self.clear_tokens();
            ApiError::SessionExpired
        })?;

        match envelope.data {
            Some(pair) => {
                debug!("Token refresh succeeded");
                self.set_tokens(pair);
                Ok(())
            }
            None => {
                warn!("Token refresh response missing data");
                self.clear_tokens();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// Send a request and unwrap the `data` field of the response envelope.
    async fn request_data<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, query, body).await?;
        let text = response.text().await?;

        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{} (at {})", e, path)))?;

        envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse(
                envelope
                    .message
                    .unwrap_or_else(|| format!("response envelope missing data (at {})", path)),
            )
        })
    }

    /// Send a request where the caller does not care about the payload.
    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, &[], body).await?;
        // Drain the body so the connection can be reused
        let _ = response.text().await;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        self.request_data(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request_data(Method::POST, path, &[], body).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        self.request_data(Method::PATCH, path, &[], Some(body)).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in with email and password. On success the returned token pair is
    /// installed on the client for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let data: LoginData = self.post("/auth/login", Some(&body)).await?;

        self.set_tokens(TokenPair {
            token: data.token.clone(),
            refresh_token: data.refresh_token.clone(),
        });

        Ok(data)
    }

    /// Log out, revoking the refresh token server-side. The local token
    /// store is cleared even if the server call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let body = self
            .tokens()
            .map(|pair| serde_json::json!({ "refreshToken": pair.refresh_token }));

        let result = self
            .request_unit(Method::POST, "/auth/logout", body.as_ref())
            .await;

        self.clear_tokens();

        match result {
            Ok(()) => Ok(()),
            // Auth failures during logout are moot - the session is gone
            Err(ApiError::Unauthorized) | Err(ApiError::SessionExpired) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Fetch the logged-in user's profile.
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        #[derive(Deserialize)]
        struct MeData {
            user: User,
        }

        let data: MeData = self.get("/auth/me", &[]).await?;
        Ok(data.user)
    }

    // =========================================================================
    // Posts
    // =========================================================================

    pub async fn fetch_posts(&self, filter: &PostFilter) -> Result<PostsPage, ApiError> {
        self.get("/posts", &filter.to_query()).await
    }

    pub async fn fetch_post(&self, id: &str) -> Result<Post, ApiError> {
        #[derive(Deserialize)]
        struct PostData {
            post: Post,
        }

        let data: PostData = self.get(&format!("/posts/{}", id), &[]).await?;
        Ok(data.post)
    }

    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        #[derive(Deserialize)]
        struct PostData {
            post: Post,
        }

        let body = serde_json::to_value(new_post)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to encode post: {}", e)))?;
        let data: PostData = self.post("/posts", Some(&body)).await?;
        Ok(data.post)
    }

    pub async fn update_post(
        &self,
        id: &str,
        changes: &serde_json::Value,
    ) -> Result<Post, ApiError> {
        #[derive(Deserialize)]
        struct PostData {
            post: Post,
        }

        let data: PostData = self.patch(&format!("/posts/{}", id), changes).await?;
        Ok(data.post)
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::DELETE, &format!("/posts/{}", id), None)
            .await
    }

    pub async fn publish_post(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::POST, &format!("/posts/{}/publish", id), None)
            .await
    }

    pub async fn schedule_post(
        &self,
        id: &str,
        scheduled_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "scheduledAt": scheduled_at.to_rfc3339() });
        self.request_unit(Method::POST, &format!("/posts/{}/schedule", id), Some(&body))
            .await
    }

    pub async fn cancel_scheduled_post(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::POST, &format!("/posts/{}/cancel", id), None)
            .await
    }

    pub async fn duplicate_post(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::POST, &format!("/posts/{}/duplicate", id), None)
            .await
    }

    /// Fetch posts scheduled inside a date range (for the calendar view).
    pub async fn fetch_scheduled_posts(&self, range: &DateRange) -> Result<Vec<Post>, ApiError> {
        #[derive(Deserialize)]
        struct ScheduledData {
            #[serde(default)]
            posts: Vec<Post>,
        }

        let query = vec![
            ("startDate", range.start.to_rfc3339()),
            ("endDate", range.end.to_rfc3339()),
        ];
        let data: ScheduledData = self.get("/posts/scheduled", &query).await?;
        Ok(data.posts)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub async fn fetch_accounts(&self) -> Result<Vec<SocialAccount>, ApiError> {
        #[derive(Deserialize)]
        struct AccountsData {
            #[serde(default)]
            accounts: Vec<SocialAccount>,
        }

        let data: AccountsData = self.get("/accounts", &[]).await?;
        Ok(data.accounts)
    }

    pub async fn disconnect_account(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::POST, &format!("/accounts/{}/disconnect", id), None)
            .await
    }

    pub async fn delete_account(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::DELETE, &format!("/accounts/{}", id), None)
            .await
    }

    pub async fn sync_account(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::POST, &format!("/accounts/{}/sync", id), None)
            .await
    }

    pub async fn fetch_platform_stats(&self) -> Result<Vec<PlatformStats>, ApiError> {
        #[derive(Deserialize)]
        struct StatsData {
            #[serde(default)]
            stats: Vec<PlatformStats>,
        }

        let data: StatsData = self.get("/accounts/stats", &[]).await?;
        Ok(data.stats)
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    pub async fn fetch_dashboard_stats(
        &self,
        range: Option<&DateRange>,
    ) -> Result<DashboardStats, ApiError> {
        let query = match range {
            Some(range) => vec![
                ("startDate", range.start.to_rfc3339()),
                ("endDate", range.end.to_rfc3339()),
            ],
            None => vec![],
        };
        self.get("/analytics/dashboard", &query).await
    }

    pub async fn fetch_analytics(
        &self,
        platform: Option<Platform>,
        range: Option<&DateRange>,
    ) -> Result<AnalyticsData, ApiError> {
        let mut query = Vec::new();
        if let Some(platform) = platform {
            query.push(("platform", platform.as_param().to_string()));
        }
        if let Some(range) = range {
            query.push(("startDate", range.start.to_rfc3339()));
            query.push(("endDate", range.end.to_rfc3339()));
        }
        self.get("/analytics", &query).await
    }

    pub async fn fetch_best_times(
        &self,
        platform: Option<Platform>,
    ) -> Result<Vec<BestTimeSlot>, ApiError> {
        #[derive(Deserialize)]
        struct SlotsData {
            #[serde(default, alias = "bestTimes", alias = "slots")]
            times: Vec<BestTimeSlot>,
        }

        let query = match platform {
            Some(platform) => vec![("platform", platform.as_param().to_string())],
            None => vec![],
        };
        let data: SlotsData = self.get("/analytics/best-time-to-post", &query).await?;
        Ok(data.times)
    }

    // =========================================================================
    // Media
    // =========================================================================

    pub async fn fetch_media(&self, filter: &MediaFilter) -> Result<MediaPage, ApiError> {
        self.get("/media", &filter.to_query()).await
    }

    pub async fn update_media(
        &self,
        id: &str,
        changes: &serde_json::Value,
    ) -> Result<MediaItem, ApiError> {
        #[derive(Deserialize)]
        struct MediaData {
            media: MediaItem,
        }

        let data: MediaData = self.patch(&format!("/media/{}", id), changes).await?;
        Ok(data.media)
    }

    pub async fn delete_media(&self, id: &str) -> Result<(), ApiError> {
        self.request_unit(Method::DELETE, &format!("/media/{}", id), None)
            .await
    }

    pub async fn fetch_media_folders(&self) -> Result<Vec<MediaFolder>, ApiError> {
        #[derive(Deserialize)]
        struct FoldersData {
            #[serde(default)]
            folders: Vec<MediaFolder>,
        }

        let data: FoldersData = self.get("/media/folders", &[]).await?;
        Ok(data.folders)
    }

    pub async fn create_media_folder(&self, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "name": name });
        self.request_unit(Method::POST, "/media/folders", Some(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_for_non_default_payloads() {
        // TokenPair has no Default impl; the envelope must still parse with
        // or without a data field.
        let full: Envelope<TokenPair> = serde_json::from_str(
            r#"{"success": true, "data": {"token": "a", "refreshToken": "r"}}"#,
        )
        .expect("envelope with data");
        assert_eq!(
            full.data,
            Some(TokenPair {
                token: "a".to_string(),
                refresh_token: "r".to_string(),
            })
        );

        let empty: Envelope<TokenPair> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#)
                .expect("envelope without data");
        assert!(empty.data.is_none());
        assert_eq!(empty.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:5000/api/").expect("client");
        assert_eq!(client.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_token_store_roundtrip() {
        let client = ApiClient::new("http://localhost:5000/api").expect("client");
        assert!(client.tokens().is_none());

        let pair = TokenPair {
            token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        };
        client.set_tokens(pair.clone());
        assert_eq!(client.tokens(), Some(pair));
        assert_eq!(client.access_token().as_deref(), Some("access-1"));

        client.clear_tokens();
        assert!(client.tokens().is_none());
    }

    #[test]
    fn test_clones_share_token_store() {
        let client = ApiClient::new("http://localhost:5000/api").expect("client");
        let clone = client.clone();

        client.set_tokens(TokenPair {
            token: "a".to_string(),
            refresh_token: "r".to_string(),
        });
        assert_eq!(clone.access_token().as_deref(), Some("a"));
    }

    #[test]
    fn test_post_filter_query() {
        let filter = PostFilter {
            page: Some(2),
            limit: Some(20),
            status: Some(PostStatus::Scheduled),
            platform: Some(Platform::Instagram),
            search: Some("launch".to_string()),
        };
        let query = filter.to_query();
        assert!(query.contains(&("page", "2".to_string())));
        assert!(query.contains(&("status", "scheduled".to_string())));
        assert!(query.contains(&("platform", "instagram".to_string())));
        assert!(query.contains(&("search", "launch".to_string())));

        // Empty search is omitted entirely
        let filter = PostFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.to_query().is_empty());
    }

    #[test]
    fn test_parse_login_envelope() {
        let json = r#"{
            "success": true,
            "data": {
                "user": {"_id": "u1", "email": "a@b.co", "firstName": "A", "lastName": "B"},
                "token": "acc",
                "refreshToken": "ref"
            }
        }"#;

        let envelope: Envelope<LoginData> =
            serde_json::from_str(json).expect("Failed to parse login envelope");
        let data = envelope.data.expect("data present");
        assert_eq!(data.token, "acc");
        assert_eq!(data.refresh_token, "ref");
        assert_eq!(data.user.email, "a@b.co");
    }

    #[test]
    fn test_envelope_data_may_be_absent() {
        let json = r#"{"success": true, "message": "deleted"}"#;
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(json).expect("Failed to parse empty envelope");
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("deleted"));
    }
}
