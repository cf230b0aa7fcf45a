use serde::{Deserialize, Serialize};

use crate::utils::cmp_ignore_case;

/// Social platforms supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Pinterest,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::Linkedin => "LinkedIn",
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
            Platform::Pinterest => "Pinterest",
        }
    }

    /// Short tag shown in list rows and calendar cells.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Facebook => "FB",
            Platform::Instagram => "IG",
            Platform::Twitter => "TW",
            Platform::Linkedin => "LI",
            Platform::Youtube => "YT",
            Platform::Tiktok => "TT",
            Platform::Pinterest => "PIN",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Pinterest => "pinterest",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub platform: Platform,
    #[serde(rename = "accountType", default)]
    pub account_type: Option<String>,
    pub name: String,
    pub username: String,
    #[serde(rename = "followersCount", default)]
    pub followers_count: i64,
    #[serde(rename = "followingCount", default)]
    pub following_count: i64,
    #[serde(rename = "postsCount", default)]
    pub posts_count: i64,
    #[serde(rename = "isConnected", default)]
    pub is_connected: bool,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default)]
    pub analytics: Option<AccountAnalytics>,
    #[serde(rename = "lastSyncedAt", default)]
    pub last_synced_at: Option<String>,
    #[serde(rename = "connectedAt", default)]
    pub connected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountAnalytics {
    #[serde(rename = "totalPosts", default)]
    pub total_posts: i64,
    #[serde(rename = "totalEngagement", default)]
    pub total_engagement: i64,
    #[serde(rename = "avgEngagementRate", default)]
    pub avg_engagement_rate: f64,
    #[serde(rename = "totalReach", default)]
    pub total_reach: i64,
    #[serde(rename = "totalImpressions", default)]
    pub total_impressions: i64,
}

impl SocialAccount {
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    pub fn status_display(&self) -> &'static str {
        if self.is_connected {
            "Connected"
        } else {
            "Disconnected"
        }
    }
}

/// Per-platform aggregate returned by `GET /accounts/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    #[serde(rename = "_id", alias = "platform")]
    pub platform: Platform,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub posts: i64,
}

/// Sort order for the accounts list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSortColumn {
    Platform,
    Name,
    Followers,
}

impl AccountSortColumn {
    /// Ascending comparator for the accounts table. Ties fall back to the
    /// account name so the order is stable across refreshes.
    pub fn compare(&self, a: &SocialAccount, b: &SocialAccount) -> std::cmp::Ordering {
        let name_cmp =
            |x: &SocialAccount, y: &SocialAccount| cmp_ignore_case(&x.name, &y.name);
        match self {
            AccountSortColumn::Platform => a
                .platform
                .display_name()
                .cmp(b.platform.display_name())
                .then_with(|| name_cmp(a, b)),
            AccountSortColumn::Name => name_cmp(a, b),
            AccountSortColumn::Followers => a
                .followers_count
                .cmp(&b.followers_count)
                .then_with(|| name_cmp(a, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account() {
        let json = r#"{
            "_id": "a1",
            "platform": "instagram",
            "accountType": "business",
            "name": "Acme Coffee",
            "username": "acmecoffee",
            "followersCount": 15200,
            "isConnected": true,
            "isActive": true,
            "analytics": {"totalPosts": 42, "totalEngagement": 9001, "avgEngagementRate": 3.2}
        }"#;

        let account: SocialAccount =
            serde_json::from_str(json).expect("Failed to parse account JSON");
        assert_eq!(account.platform, Platform::Instagram);
        assert_eq!(account.handle(), "@acmecoffee");
        assert_eq!(account.status_display(), "Connected");
        assert_eq!(account.analytics.as_ref().map(|a| a.total_posts), Some(42));
    }

    fn account(platform: &str, name: &str, followers: i64) -> SocialAccount {
        serde_json::from_str(&format!(
            r#"{{
                "_id": "a-{name}",
                "platform": "{platform}",
                "name": "{name}",
                "username": "{name}",
                "followersCount": {followers}
            }}"#
        ))
        .expect("valid account JSON")
    }

    #[test]
    fn test_sort_columns_order_accounts() {
        let acme = account("twitter", "acme", 500);
        let bistro = account("facebook", "Bistro", 200);
        let coffee = account("facebook", "coffee", 900);

        let mut accounts = vec![&acme, &bistro, &coffee];

        accounts.sort_by(|a, b| AccountSortColumn::Name.compare(a, b));
        // Case-insensitive: "acme" < "Bistro" < "coffee"
        assert_eq!(accounts[0].name, "acme");
        assert_eq!(accounts[1].name, "Bistro");

        accounts.sort_by(|a, b| AccountSortColumn::Followers.compare(a, b));
        assert_eq!(accounts[0].followers_count, 200);
        assert_eq!(accounts[2].followers_count, 900);

        accounts.sort_by(|a, b| AccountSortColumn::Platform.compare(a, b));
        // Same platform falls back to name
        assert_eq!(accounts[0].platform, Platform::Facebook);
        assert_eq!(accounts[0].name, "Bistro");
        assert_eq!(accounts[2].platform, Platform::Twitter);
    }

    #[test]
    fn test_platform_tags_are_distinct() {
        let mut tags: Vec<&str> = Platform::ALL.iter().map(|p| p.tag()).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), Platform::ALL.len());
    }
}
