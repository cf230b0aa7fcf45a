use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::{AnalyticsData, DashboardStats, MediaItem, Post, SocialAccount};

/// Consider cache stale after 15 minutes.
/// Social metrics move fast enough that anything older should be refreshed,
/// while still letting the dashboard render instantly on startup.
const CACHE_STALE_MINUTES: i64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew (negative ages)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

/// Ages of the cached datasets, for the status bar.
#[derive(Debug, Clone, Default)]
pub struct CacheAges {
    pub dashboard: Option<String>,
    pub scheduled: Option<String>,
    pub accounts: Option<String>,
}

/// Per-dataset JSON snapshots under the cache directory, so views render
/// immediately from the last known data while a background refresh runs.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Remove all cached datasets (on logout).
    pub fn clear(&self) -> Result<()> {
        for name in ["dashboard", "scheduled", "accounts", "analytics", "media"] {
            let path = self.cache_path(name);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    // ===== Dashboard =====

    pub fn load_dashboard(&self) -> Result<Option<CachedData<DashboardStats>>> {
        self.load("dashboard")
    }

    pub fn save_dashboard(&self, stats: &DashboardStats) -> Result<()> {
        self.save("dashboard", stats)
    }

    // ===== Scheduled posts =====

    pub fn load_scheduled(&self) -> Result<Option<CachedData<Vec<Post>>>> {
        self.load("scheduled")
    }

    pub fn save_scheduled(&self, posts: &[Post]) -> Result<()> {
        self.save("scheduled", &posts)
    }

    // ===== Accounts =====

    pub fn load_accounts(&self) -> Result<Option<CachedData<Vec<SocialAccount>>>> {
        self.load("accounts")
    }

    pub fn save_accounts(&self, accounts: &[SocialAccount]) -> Result<()> {
        self.save("accounts", &accounts)
    }

    // ===== Analytics =====

    pub fn load_analytics(&self) -> Result<Option<CachedData<AnalyticsData>>> {
        self.load("analytics")
    }

    pub fn save_analytics(&self, analytics: &AnalyticsData) -> Result<()> {
        self.save("analytics", analytics)
    }

    // ===== Media =====

    pub fn load_media(&self) -> Result<Option<CachedData<Vec<MediaItem>>>> {
        self.load("media")
    }

    pub fn save_media(&self, media: &[MediaItem]) -> Result<()> {
        self.save("media", &media)
    }

    // ===== Staleness =====

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            dashboard: self
                .load_dashboard()
                .ok()
                .flatten()
                .map(|c| c.age_display()),
            scheduled: self
                .load_scheduled()
                .ok()
                .flatten()
                .map(|c| c.age_display()),
            accounts: self.load_accounts().ok().flatten().map(|c| c.age_display()),
        }
    }

    /// True when any dataset is missing or stale.
    pub fn any_stale(&self) -> bool {
        let dashboard_stale = self
            .load_dashboard()
            .ok()
            .flatten()
            .map(|c| c.is_stale())
            .unwrap_or(true);
        let scheduled_stale = self
            .load_scheduled()
            .ok()
            .flatten()
            .map(|c| c.is_stale())
            .unwrap_or(true);
        dashboard_stale || scheduled_stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_data_age_display() {
        let mut cached = CachedData::new(42);
        assert_eq!(cached.age_display(), "just now");
        assert!(!cached.is_stale());

        cached.cached_at = Utc::now() - chrono::Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");
        assert!(!cached.is_stale());

        cached.cached_at = Utc::now() - chrono::Duration::minutes(90);
        assert_eq!(cached.age_display(), "1h ago");
        assert!(cached.is_stale());

        cached.cached_at = Utc::now() - chrono::Duration::days(3);
        assert_eq!(cached.age_display(), "3d ago");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = CacheManager::new(dir.path().to_path_buf()).expect("cache manager");

        assert!(cache.load_scheduled().expect("load").is_none());
        assert!(cache.any_stale());

        let posts: Vec<Post> = serde_json::from_str(
            r#"[{"_id": "p1", "content": "hello", "status": "scheduled"}]"#,
        )
        .expect("valid posts JSON");
        cache.save_scheduled(&posts).expect("save");

        let loaded = cache
            .load_scheduled()
            .expect("load")
            .expect("cache present");
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].id, "p1");
        assert!(!loaded.is_stale());
    }

    #[test]
    fn test_clear_removes_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = CacheManager::new(dir.path().to_path_buf()).expect("cache manager");

        cache.save_scheduled(&[]).expect("save");
        cache.clear().expect("clear");
        assert!(cache.load_scheduled().expect("load").is_none());
    }
}
