//! Application state management for Flowdeck.
//!
//! This module contains the core `App` struct that manages all application
//! state: UI view state, cached data, session management, and background
//! task coordination.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, MediaFilter, PostFilter};
use crate::auth::{CredentialStore, Session, SessionData};
use crate::cache::{CacheAges, CacheManager};
use crate::config::Config;
use crate::models::{
    AccountSortColumn, AnalyticsData, BestTimeSlot, DashboardStats, MediaFolder, MediaItem,
    MediaKind, NewPlatformTarget, NewPost, Platform, PlatformStats, Post, PostSortColumn,
    SocialAccount, User,
};
use crate::utils::{bucket_by_day, contains_ignore_case, month_grid, DateRange};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// 32 covers a full refresh (~8 API calls) with headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 80;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for compose content.
/// Twitter's limit is the smallest of the supported platforms.
pub const MAX_COMPOSE_LENGTH: usize = 280;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Calendar,
    Accounts,
    Analytics,
    Media,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Calendar => "Calendar",
            Tab::Accounts => "Accounts",
            Tab::Analytics => "Analytics",
            Tab::Media => "Media",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Calendar,
            Tab::Calendar => Tab::Accounts,
            Tab::Accounts => Tab::Analytics,
            Tab::Analytics => Tab::Media,
            Tab::Media => Tab::Dashboard,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Media,
            Tab::Calendar => Tab::Dashboard,
            Tab::Accounts => Tab::Calendar,
            Tab::Analytics => Tab::Accounts,
            Tab::Media => Tab::Analytics,
        }
    }
}

/// Layout of the calendar tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Week,
    List,
}

impl CalendarView {
    pub fn title(&self) -> &'static str {
        match self {
            CalendarView::Month => "Month",
            CalendarView::Week => "Week",
            CalendarView::List => "List",
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    LoggingIn,
    Composing,
    ConfirmingQuit,
    ConfirmingDelete,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

/// Compose form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComposeFocus {
    Content,
    Time,
    Platforms,
    Button,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result types from background refresh tasks.
///
/// These variants are sent through an MPSC channel from background refresh
/// tasks back to the main application.
enum RefreshResult {
    /// Dashboard overview stats fetched successfully
    Dashboard(DashboardStats),
    /// Scheduled posts for the current calendar range
    Scheduled(Vec<Post>),
    /// Connected social accounts
    Accounts(Vec<SocialAccount>),
    /// Per-platform account aggregates
    PlatformStats(Vec<PlatformStats>),
    /// Analytics data (overall, per-platform, growth trend)
    Analytics(AnalyticsData),
    /// Suggested posting time slots
    BestTimes(Vec<BestTimeSlot>),
    /// Media library items
    Media(Vec<MediaItem>),
    /// Media folders
    Folders(Vec<MediaFolder>),
    /// The refresh token exchange failed mid-refresh; force re-login
    SessionExpired,
    /// Signal that all refresh tasks have completed
    RefreshComplete,
    /// An error occurred during refresh
    Error(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    pub cache: CacheManager,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub search_query: String,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Compose form state
    pub compose_content: String,
    pub compose_day: NaiveDate,
    pub compose_time: String,
    pub compose_platforms: Vec<(Platform, bool)>,
    pub compose_focus: ComposeFocus,
    pub compose_platform_selection: usize,
    pub compose_error: Option<String>,

    // Calendar state
    pub calendar_view: CalendarView,
    pub calendar_anchor: NaiveDate,
    pub selected_day: NaiveDate,
    pub day_post_selection: usize,
    pub list_selection: usize,

    // Other tab selections
    pub dashboard_selection: usize,
    pub account_selection: usize,
    pub analytics_platform_selection: usize,
    pub media_selection: usize,
    pub media_kind_filter: Option<MediaKind>,

    // Sort state
    pub account_sort_column: AccountSortColumn,
    pub account_sort_reversed: bool,
    pub post_sort_column: PostSortColumn,
    pub post_sort_reversed: bool,

    // Data
    pub dashboard: DashboardStats,
    pub scheduled_posts: Vec<Post>,
    pub accounts: Vec<SocialAccount>,
    pub platform_stats: Vec<PlatformStats>,
    pub analytics: AnalyticsData,
    pub best_times: Vec<BestTimeSlot>,
    pub media_items: Vec<MediaItem>,
    pub media_folders: Vec<MediaFolder>,

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    // Status message
    pub status_message: Option<String>,

    // Cache ages for the status bar
    pub cache_ages: CacheAges,

    // Background refresh in flight
    pub refreshing: bool,
}

impl App {
    /// Create a new application instance
    pub async fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let cache_dir = config
            .cache_dir()
            .unwrap_or_else(|_| PathBuf::from("./cache"));
        debug!(?cache_dir, "Cache directory configured");

        // Load session from disk if it exists
        let mut session = Session::new(cache_dir.clone());
        let load_result = session.load();
        debug!(?load_result, has_data = session.data.is_some(), "Session loaded");

        let api = ApiClient::new(config.base_url())?;

        // If we have a valid session, install the token pair on the client
        if let Some(tokens) = session.tokens() {
            api.set_tokens(tokens.clone());
            debug!("Token pair set on API client");
        }

        let cache = CacheManager::new(cache_dir)?;

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_email = std::env::var("FLOWDECK_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var("FLOWDECK_PASSWORD").unwrap_or_default();

        let today = Utc::now().date_naive();

        Ok(Self {
            config,
            session,
            api,
            cache,

            state: AppState::Normal,
            current_tab: Tab::Dashboard,
            search_query: String::new(),

            login_email,
            login_password,
            login_focus: LoginFocus::Email,
            login_error: None,

            compose_content: String::new(),
            compose_day: today,
            compose_time: "09:00".to_string(),
            compose_platforms: Vec::new(),
            compose_focus: ComposeFocus::Content,
            compose_platform_selection: 0,
            compose_error: None,

            calendar_view: CalendarView::Month,
            calendar_anchor: today,
            selected_day: today,
            day_post_selection: 0,
            list_selection: 0,

            dashboard_selection: 0,
            account_selection: 0,
            analytics_platform_selection: 0,
            media_selection: 0,
            media_kind_filter: None,

            account_sort_column: AccountSortColumn::Platform,
            account_sort_reversed: false,
            post_sort_column: PostSortColumn::ScheduledAt,
            post_sort_reversed: false,

            dashboard: DashboardStats::default(),
            scheduled_posts: Vec::new(),
            accounts: Vec::new(),
            platform_stats: Vec::new(),
            analytics: AnalyticsData::default(),
            best_times: Vec::new(),
            media_items: Vec::new(),
            media_folders: Vec::new(),

            refresh_rx: rx,
            refresh_tx: tx,

            status_message: None,
            cache_ages: CacheAges::default(),
            refreshing: false,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if the user has a usable session
    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;

        // Offer the stored password for the last used email
        if self.login_password.is_empty()
            && !self.login_email.is_empty()
            && CredentialStore::has_credentials(&self.login_email)
        {
            if let Ok(password) = CredentialStore::get_password(&self.login_email) {
                self.login_password = password;
            }
        }
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return Err(anyhow::anyhow!("Email and password required"));
        }

        self.login_error = None;

        match self.api.login(&email, &password).await {
            Ok(data) => {
                if let Err(e) = CredentialStore::store(&email, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_email = Some(email.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                let tokens = self
                    .api
                    .tokens()
                    .ok_or_else(|| anyhow::anyhow!("Login succeeded but no tokens stored"))?;
                self.session
                    .update(SessionData::new(tokens, data.user, email));
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                self.login_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");
                self.refresh_all_background();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                let user_message = match &e {
                    ApiError::Unauthorized => "Invalid email or password".to_string(),
                    ApiError::Network(inner) if inner.is_timeout() => {
                        "Connection timed out. Please try again.".to_string()
                    }
                    ApiError::Network(_) => {
                        "Unable to connect to server. Check your internet connection.".to_string()
                    }
                    other => format!("Login failed: {}", other),
                };
                self.login_error = Some(user_message);
                Err(e.into())
            }
        }
    }

    /// Log out: revoke the refresh token, drop session, caches, and the
    /// stored password.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Logout request failed");
        }
        if let Some(email) = self.session.data.as_ref().map(|d| d.email.clone()) {
            if let Err(e) = CredentialStore::delete(&email) {
                warn!(error = %e, "Failed to remove stored password");
            }
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "Failed to clear cache");
        }
        info!("Logged out");
        self.start_login();
    }

    /// Drop local state after the backend declared the session expired.
    fn handle_session_expired(&mut self) {
        warn!("Session expired, forcing re-login");
        self.api.clear_tokens();
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.status_message = Some("Session expired - please log in again".to_string());
        self.start_login();
    }

    /// Persist the client's token pair when a silent refresh changed it.
    fn persist_refreshed_tokens(&mut self) {
        let Some(current) = self.api.tokens() else {
            return;
        };
        if self.session.tokens() != Some(&current) {
            debug!("Persisting refreshed token pair");
            self.session.update_tokens(current);
            if let Err(e) = self.session.save() {
                warn!(error = %e, "Failed to save refreshed session");
            }
        }
    }

    pub fn logged_in_user(&self) -> Option<&User> {
        self.session.user()
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Load all data from cache for instant rendering
    pub fn load_from_cache(&mut self) {
        if let Ok(Some(cached)) = self.cache.load_dashboard() {
            self.dashboard = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_scheduled() {
            self.scheduled_posts = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_accounts() {
            self.accounts = cached.data;
            self.sort_accounts();
        }
        if let Ok(Some(cached)) = self.cache.load_analytics() {
            self.analytics = cached.data;
        }
        if let Ok(Some(cached)) = self.cache.load_media() {
            self.media_items = cached.data;
        }
        self.cache_ages = self.cache.get_cache_ages();
    }

    pub fn is_cache_stale(&self) -> bool {
        self.cache.any_stale()
    }

    // =========================================================================
    // Background Data Refresh
    // =========================================================================

    /// Spawn a background task to refresh all data
    pub fn refresh_all_background(&mut self) {
        info!("Starting background refresh of all data");

        if !self.is_authenticated() {
            warn!("Not authenticated, skipping refresh");
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let range = self.calendar_range();

        tokio::spawn(async move {
            Self::execute_background_refresh(tx, api, range).await;
        });

        self.refreshing = true;
        self.status_message = Some("Refreshing...".to_string());
    }

    /// Refresh only the scheduled-post list, after a mutation or month change.
    pub fn refresh_scheduled_background(&mut self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let range = self.calendar_range();

        tokio::spawn(async move {
            match api.fetch_scheduled_posts(&range).await {
                Ok(posts) => Self::send_result(&tx, RefreshResult::Scheduled(posts)).await,
                Err(e) => Self::send_error(&tx, "Scheduled posts", e).await,
            }
            Self::send_result(&tx, RefreshResult::RefreshComplete).await;
        });

        self.refreshing = true;
    }

    /// Refresh accounts and platform stats, after an account mutation.
    pub fn refresh_accounts_background(&mut self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let (accounts_res, stats_res) =
                tokio::join!(api.fetch_accounts(), api.fetch_platform_stats());
            match accounts_res {
                Ok(accounts) => Self::send_result(&tx, RefreshResult::Accounts(accounts)).await,
                Err(e) => Self::send_error(&tx, "Accounts", e).await,
            }
            match stats_res {
                Ok(stats) => Self::send_result(&tx, RefreshResult::PlatformStats(stats)).await,
                Err(e) => debug!(error = %e, "Failed to fetch platform stats"),
            }
            Self::send_result(&tx, RefreshResult::RefreshComplete).await;
        });

        self.refreshing = true;
    }

    /// Refresh the media library, after a media mutation or filter change.
    pub fn refresh_media_background(&mut self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        let filter = MediaFilter {
            kind: self.media_kind_filter,
            ..Default::default()
        };

        tokio::spawn(async move {
            let (media_res, folders_res) =
                tokio::join!(api.fetch_media(&filter), api.fetch_media_folders());
            match media_res {
                Ok(page) => Self::send_result(&tx, RefreshResult::Media(page.media)).await,
                Err(e) => Self::send_error(&tx, "Media", e).await,
            }
            match folders_res {
                Ok(folders) => Self::send_result(&tx, RefreshResult::Folders(folders)).await,
                Err(e) => debug!(error = %e, "Failed to fetch media folders"),
            }
            Self::send_result(&tx, RefreshResult::RefreshComplete).await;
        });

        self.refreshing = true;
    }

    /// Helper to send refresh results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send refresh result - channel closed");
        }
    }

    /// Map a fetch error to either a session-expired signal or a status line.
    async fn send_error(tx: &mpsc::Sender<RefreshResult>, what: &str, e: ApiError) {
        if e.is_session_expired() {
            Self::send_result(tx, RefreshResult::SessionExpired).await;
        } else {
            warn!(error = %e, "{} fetch failed", what);
            Self::send_result(tx, RefreshResult::Error(format!("{}: {}", what, e))).await;
        }
    }

    /// Execute the full background refresh.
    ///
    /// Runs in a spawned Tokio task. The API client clone shares the token
    /// store with the main app, so a silent 401 refresh performed by any of
    /// these fetches is visible to the whole application afterwards.
    async fn execute_background_refresh(
        tx: mpsc::Sender<RefreshResult>,
        api: ApiClient,
        range: DateRange,
    ) {
        info!("Background refresh task started");

        // Bound before the join so the borrow outlives all the futures
        let media_filter = MediaFilter::default();

        let (dashboard_res, scheduled_res, accounts_res, stats_res, analytics_res, times_res, media_res, folders_res) = tokio::join!(
            api.fetch_dashboard_stats(None),
            api.fetch_scheduled_posts(&range),
            api.fetch_accounts(),
            api.fetch_platform_stats(),
            api.fetch_analytics(None, None),
            api.fetch_best_times(None),
            api.fetch_media(&media_filter),
            api.fetch_media_folders(),
        );

        match dashboard_res {
            Ok(stats) => Self::send_result(&tx, RefreshResult::Dashboard(stats)).await,
            Err(e) => {
                // A session-expired from the first fetch means the rest
                // failed the same way - report once and stop.
                let expired = e.is_session_expired();
                Self::send_error(&tx, "Dashboard", e).await;
                if expired {
                    Self::send_result(&tx, RefreshResult::RefreshComplete).await;
                    return;
                }
            }
        }
        match scheduled_res {
            Ok(posts) => Self::send_result(&tx, RefreshResult::Scheduled(posts)).await,
            Err(e) => Self::send_error(&tx, "Scheduled posts", e).await,
        }
        match accounts_res {
            Ok(accounts) => Self::send_result(&tx, RefreshResult::Accounts(accounts)).await,
            Err(e) => Self::send_error(&tx, "Accounts", e).await,
        }
        match stats_res {
            Ok(stats) => Self::send_result(&tx, RefreshResult::PlatformStats(stats)).await,
            Err(e) => debug!(error = %e, "Failed to fetch platform stats"),
        }
        match analytics_res {
            Ok(analytics) => Self::send_result(&tx, RefreshResult::Analytics(analytics)).await,
            Err(e) => Self::send_error(&tx, "Analytics", e).await,
        }
        match times_res {
            Ok(times) => Self::send_result(&tx, RefreshResult::BestTimes(times)).await,
            Err(e) => debug!(error = %e, "Failed to fetch best posting times"),
        }
        match media_res {
            Ok(page) => Self::send_result(&tx, RefreshResult::Media(page.media)).await,
            Err(e) => Self::send_error(&tx, "Media", e).await,
        }
        match folders_res {
            Ok(folders) => Self::send_result(&tx, RefreshResult::Folders(folders)).await,
            Err(e) => debug!(error = %e, "Failed to fetch media folders"),
        }

        info!("Background refresh complete");
        Self::send_result(&tx, RefreshResult::RefreshComplete).await;
    }

    /// Drain completed background task results into app state.
    pub async fn check_background_tasks(&mut self) {
        while let Ok(result) = self.refresh_rx.try_recv() {
            match result {
                RefreshResult::Dashboard(stats) => {
                    if let Err(e) = self.cache.save_dashboard(&stats) {
                        warn!(error = %e, "Failed to cache dashboard");
                    }
                    self.dashboard = stats;
                }
                RefreshResult::Scheduled(posts) => {
                    if let Err(e) = self.cache.save_scheduled(&posts) {
                        warn!(error = %e, "Failed to cache scheduled posts");
                    }
                    self.scheduled_posts = posts;
                    self.clamp_selections();
                }
                RefreshResult::Accounts(accounts) => {
                    if let Err(e) = self.cache.save_accounts(&accounts) {
                        warn!(error = %e, "Failed to cache accounts");
                    }
                    self.accounts = accounts;
                    self.sort_accounts();
                    self.clamp_selections();
                }
                RefreshResult::PlatformStats(stats) => {
                    self.platform_stats = stats;
                }
                RefreshResult::Analytics(analytics) => {
                    if let Err(e) = self.cache.save_analytics(&analytics) {
                        warn!(error = %e, "Failed to cache analytics");
                    }
                    self.analytics = analytics;
                }
                RefreshResult::BestTimes(times) => {
                    self.best_times = times;
                }
                RefreshResult::Media(items) => {
                    if let Err(e) = self.cache.save_media(&items) {
                        warn!(error = %e, "Failed to cache media");
                    }
                    self.media_items = items;
                    self.clamp_selections();
                }
                RefreshResult::Folders(folders) => {
                    self.media_folders = folders;
                }
                RefreshResult::SessionExpired => {
                    self.refreshing = false;
                    self.handle_session_expired();
                    return;
                }
                RefreshResult::RefreshComplete => {
                    self.refreshing = false;
                    self.persist_refreshed_tokens();
                    self.cache_ages = self.cache.get_cache_ages();
                    if self
                        .status_message
                        .as_deref()
                        .map(|m| m.starts_with("Refreshing"))
                        .unwrap_or(false)
                    {
                        self.status_message = None;
                    }
                }
                RefreshResult::Error(message) => {
                    self.status_message = Some(message);
                }
            }
        }
    }

    // =========================================================================
    // Calendar
    // =========================================================================

    /// Query range for the current calendar view.
    pub fn calendar_range(&self) -> DateRange {
        match self.calendar_view {
            CalendarView::Week => DateRange::for_week(self.selected_day),
            _ => DateRange::for_month_grid(self.calendar_anchor),
        }
    }

    /// The days shown in the month grid.
    pub fn calendar_days(&self) -> Vec<NaiveDate> {
        month_grid(self.calendar_anchor)
    }

    /// Indices into `scheduled_posts` for each day.
    pub fn posts_by_day(&self) -> HashMap<NaiveDate, Vec<usize>> {
        bucket_by_day(&self.scheduled_posts)
    }

    /// Scheduled posts on the currently selected day.
    pub fn posts_on_selected_day(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .scheduled_posts
            .iter()
            .filter(|p| p.scheduled_date() == Some(self.selected_day))
            .collect();
        posts.sort_by_key(|p| p.scheduled_at);
        posts
    }

    /// Scheduled posts matching the search query, ordered by the active
    /// sort column (list view).
    pub fn filtered_scheduled_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .scheduled_posts
            .iter()
            .filter(|p| {
                self.search_query.is_empty()
                    || contains_ignore_case(&p.content, &self.search_query)
            })
            .collect();
        posts.sort_by(|a, b| self.post_sort_column.compare(a, b));
        if self.post_sort_reversed {
            posts.reverse();
        }
        posts
    }

    /// Toggle list sort column - if already sorting by this column, flip
    /// direction; otherwise switch to it ascending. Resets selection to 0.
    pub fn toggle_post_sort(&mut self, column: PostSortColumn) {
        if self.post_sort_column == column {
            self.post_sort_reversed = !self.post_sort_reversed;
        } else {
            self.post_sort_column = column;
            self.post_sort_reversed = false;
        }
        self.list_selection = 0;
    }

    pub fn calendar_next_month(&mut self) {
        self.calendar_anchor = crate::utils::next_month(self.calendar_anchor);
        self.selected_day = self.calendar_anchor;
        self.refresh_scheduled_background();
    }

    pub fn calendar_prev_month(&mut self) {
        self.calendar_anchor = crate::utils::prev_month(self.calendar_anchor);
        self.selected_day = self.calendar_anchor;
        self.refresh_scheduled_background();
    }

    pub fn calendar_move_day(&mut self, days: i64) {
        self.selected_day = self.selected_day + chrono::Duration::days(days);
        // Follow the selection across month boundaries
        if self.selected_day.month() != self.calendar_anchor.month()
            || self.selected_day.year() != self.calendar_anchor.year()
        {
            self.calendar_anchor = self.selected_day;
            self.refresh_scheduled_background();
        }
        self.day_post_selection = 0;
    }

    // =========================================================================
    // Compose
    // =========================================================================

    /// Open the compose overlay for the given day.
    pub fn start_compose(&mut self, day: NaiveDate) {
        self.compose_content.clear();
        self.compose_day = day;
        self.compose_time = "09:00".to_string();
        self.compose_platforms = self
            .accounts
            .iter()
            .filter(|a| a.is_connected)
            .map(|a| (a.platform, false))
            .collect();
        self.compose_platforms.sort_by_key(|(p, _)| p.tag());
        self.compose_platforms.dedup_by_key(|(p, _)| *p);
        self.compose_focus = ComposeFocus::Content;
        self.compose_platform_selection = 0;
        self.compose_error = None;
        self.state = AppState::Composing;
    }

    /// Validate and submit the compose form as a new scheduled post.
    pub async fn submit_compose(&mut self) -> Result<()> {
        if self.compose_content.trim().is_empty() {
            self.compose_error = Some("Content is required".to_string());
            return Ok(());
        }

        let time = match NaiveTime::parse_from_str(&self.compose_time, "%H:%M") {
            Ok(t) => t,
            Err(_) => {
                self.compose_error = Some("Time must be HH:MM".to_string());
                return Ok(());
            }
        };

        let targets: Vec<NewPlatformTarget> = self
            .compose_platforms
            .iter()
            .filter(|(_, selected)| *selected)
            .filter_map(|(platform, _)| {
                self.accounts
                    .iter()
                    .find(|a| a.platform == *platform && a.is_connected)
                    .map(|a| NewPlatformTarget {
                        platform: *platform,
                        account: a.id.clone(),
                    })
            })
            .collect();

        if targets.is_empty() {
            self.compose_error = Some("Select at least one platform".to_string());
            return Ok(());
        }

        let scheduled_at = Utc.from_utc_datetime(&self.compose_day.and_time(time));

        let new_post = NewPost {
            content: self.compose_content.clone(),
            title: None,
            platforms: targets,
            post_type: "post".to_string(),
            scheduled_at: Some(scheduled_at),
            tags: Vec::new(),
        };

        match self.api.create_post(&new_post).await {
            Ok(post) => {
                info!(post_id = %post.id, "Post scheduled");
                self.status_message = Some(format!(
                    "Scheduled for {}",
                    scheduled_at.format("%b %d, %Y %H:%M")
                ));
                self.state = AppState::Normal;
                self.refresh_scheduled_background();
                Ok(())
            }
            Err(e) if e.is_session_expired() => {
                self.state = AppState::Normal;
                self.handle_session_expired();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to schedule post");
                self.compose_error = Some(format!("Failed to schedule: {}", e));
                Ok(())
            }
        }
    }

    // =========================================================================
    // Post actions
    // =========================================================================

    /// The scheduled post currently selected in the calendar tab.
    pub fn selected_post_id(&self) -> Option<String> {
        match self.calendar_view {
            CalendarView::List => self
                .filtered_scheduled_posts()
                .get(self.list_selection)
                .map(|p| p.id.clone()),
            _ => self
                .posts_on_selected_day()
                .get(self.day_post_selection)
                .map(|p| p.id.clone()),
        }
    }

    pub async fn publish_selected_post(&mut self) {
        let Some(id) = self.selected_post_id() else {
            return;
        };
        let result = self.api.publish_post(&id).await;
        self.run_post_action("Publishing", result);
    }

    pub async fn cancel_selected_post(&mut self) {
        let Some(id) = self.selected_post_id() else {
            return;
        };
        let result = self.api.cancel_scheduled_post(&id).await;
        self.run_post_action("Cancelling", result);
    }

    pub async fn duplicate_selected_post(&mut self) {
        let Some(id) = self.selected_post_id() else {
            return;
        };
        let result = self.api.duplicate_post(&id).await;
        self.run_post_action("Duplicating", result);
    }

    pub async fn delete_selected_post(&mut self) {
        let Some(id) = self.selected_post_id() else {
            return;
        };
        let result = self.api.delete_post(&id).await;
        self.run_post_action("Deleting", result);
    }

    /// Shared handling for post mutations: status line plus list re-fetch.
    fn run_post_action(&mut self, verb: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.status_message = Some(format!("{} done", verb));
                self.refresh_scheduled_background();
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                warn!(error = %e, "{} failed", verb);
                self.status_message = Some(format!("{} failed: {}", verb, e));
            }
        }
    }

    /// Fetch the first page of posts matching the current search, for the
    /// dashboard recent-posts pane when searching.
    pub async fn search_posts(&mut self) {
        let filter = PostFilter {
            search: Some(self.search_query.clone()),
            limit: Some(20),
            ..Default::default()
        };
        match self.api.fetch_posts(&filter).await {
            Ok(page) => {
                self.dashboard.recent_posts = page.posts;
                self.dashboard_selection = 0;
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                self.status_message = Some(format!("Search failed: {}", e));
            }
        }
    }

    // =========================================================================
    // Account actions
    // =========================================================================

    pub fn selected_account(&self) -> Option<&SocialAccount> {
        self.accounts.get(self.account_selection)
    }

    /// Toggle accounts sort column - if already sorting by this column, flip
    /// direction; otherwise switch to it ascending. Resets selection to 0.
    pub fn toggle_account_sort(&mut self, column: AccountSortColumn) {
        if self.account_sort_column == column {
            self.account_sort_reversed = !self.account_sort_reversed;
        } else {
            self.account_sort_column = column;
            self.account_sort_reversed = false;
        }
        self.account_selection = 0;
        self.sort_accounts();
    }

    /// Re-order the accounts list in place per the active sort column.
    fn sort_accounts(&mut self) {
        let column = self.account_sort_column;
        self.accounts.sort_by(|a, b| column.compare(a, b));
        if self.account_sort_reversed {
            self.accounts.reverse();
        }
    }

    pub async fn sync_selected_account(&mut self) {
        let Some(id) = self.selected_account().map(|a| a.id.clone()) else {
            return;
        };
        match self.api.sync_account(&id).await {
            Ok(()) => {
                self.status_message = Some("Sync requested".to_string());
                self.refresh_accounts_background();
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                self.status_message = Some(format!("Sync failed: {}", e));
            }
        }
    }

    pub async fn disconnect_selected_account(&mut self) {
        let Some(id) = self.selected_account().map(|a| a.id.clone()) else {
            return;
        };
        match self.api.disconnect_account(&id).await {
            Ok(()) => {
                self.status_message = Some("Account disconnected".to_string());
                self.refresh_accounts_background();
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                self.status_message = Some(format!("Disconnect failed: {}", e));
            }
        }
    }

    /// Remove the account from the backend entirely (not just disconnect).
    pub async fn delete_selected_account(&mut self) {
        let Some(id) = self.selected_account().map(|a| a.id.clone()) else {
            return;
        };
        match self.api.delete_account(&id).await {
            Ok(()) => {
                self.status_message = Some("Account removed".to_string());
                self.refresh_accounts_background();
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                self.status_message = Some(format!("Remove failed: {}", e));
            }
        }
    }

    // =========================================================================
    // Media actions
    // =========================================================================

    pub fn selected_media(&self) -> Option<&MediaItem> {
        self.media_items.get(self.media_selection)
    }

    /// Cycle the media type filter (all -> image -> video -> ... -> all)
    /// and re-fetch the library with it.
    pub fn cycle_media_filter(&mut self) {
        self.media_kind_filter = match self.media_kind_filter {
            None => Some(MediaKind::Image),
            Some(MediaKind::Image) => Some(MediaKind::Video),
            Some(MediaKind::Video) => Some(MediaKind::Gif),
            Some(MediaKind::Gif) => Some(MediaKind::Audio),
            Some(MediaKind::Audio) => Some(MediaKind::Document),
            Some(MediaKind::Document) => None,
        };
        self.media_selection = 0;
        self.refresh_media_background();
    }

    pub async fn delete_selected_media(&mut self) {
        let Some(id) = self.selected_media().map(|m| m.id.clone()) else {
            return;
        };
        match self.api.delete_media(&id).await {
            Ok(()) => {
                self.status_message = Some("Media deleted".to_string());
                self.refresh_media_background();
            }
            Err(e) if e.is_session_expired() => self.handle_session_expired(),
            Err(e) => {
                self.status_message = Some(format!("Delete failed: {}", e));
            }
        }
    }

    // =========================================================================
    // Selection helpers
    // =========================================================================

    /// Keep selection indices inside the (possibly shrunken) lists.
    fn clamp_selections(&mut self) {
        let day_posts = self.posts_on_selected_day().len();
        if self.day_post_selection >= day_posts {
            self.day_post_selection = day_posts.saturating_sub(1);
        }
        let list_posts = self.filtered_scheduled_posts().len();
        if self.list_selection >= list_posts {
            self.list_selection = list_posts.saturating_sub(1);
        }
        if self.account_selection >= self.accounts.len() {
            self.account_selection = self.accounts.len().saturating_sub(1);
        }
        if self.media_selection >= self.media_items.len() {
            self.media_selection = self.media_items.len().saturating_sub(1);
        }
        if self.dashboard_selection >= self.dashboard.recent_posts.len() {
            self.dashboard_selection = self.dashboard.recent_posts.len().saturating_sub(1);
        }
    }
}

/// Whether another character fits in the email field
pub fn can_add_email_char(email: &str) -> bool {
    email.len() < MAX_EMAIL_LENGTH
}

/// Whether another character fits in the password field
pub fn can_add_password_char(password: &str) -> bool {
    password.len() < MAX_PASSWORD_LENGTH
}

/// Whether another character fits in the compose content field
pub fn can_add_compose_char(content: &str) -> bool {
    content.chars().count() < MAX_COMPOSE_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_roundtrip() {
        let mut tab = Tab::Dashboard;
        for _ in 0..5 {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Media);
        assert_eq!(Tab::Media.next(), Tab::Dashboard);
    }

    #[test]
    fn test_input_length_limits() {
        assert!(can_add_email_char("a@b.co"));
        assert!(!can_add_email_char(&"x".repeat(MAX_EMAIL_LENGTH)));
        assert!(can_add_password_char("hunter2"));
        assert!(!can_add_password_char(&"x".repeat(MAX_PASSWORD_LENGTH)));
        assert!(!can_add_compose_char(&"y".repeat(MAX_COMPOSE_LENGTH)));
    }
}
