use serde::{Deserialize, Serialize};

use super::account::Platform;
use super::post::Post;

/// Summary numbers for the dashboard header cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overview {
    #[serde(rename = "totalPosts", default)]
    pub total_posts: i64,
    #[serde(rename = "publishedPosts", default)]
    pub published_posts: i64,
    #[serde(rename = "scheduledPosts", default)]
    pub scheduled_posts: i64,
    #[serde(rename = "failedPosts", default)]
    pub failed_posts: i64,
    #[serde(rename = "draftPosts", default)]
    pub draft_posts: i64,
    #[serde(rename = "connectedAccounts", default)]
    pub connected_accounts: i64,
    #[serde(rename = "totalEngagement", default)]
    pub total_engagement: i64,
    #[serde(rename = "avgEngagementRate", default)]
    pub avg_engagement_rate: f64,
    #[serde(rename = "totalReach", default)]
    pub total_reach: i64,
    #[serde(rename = "totalImpressions", default)]
    pub total_impressions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    #[serde(rename = "_id", alias = "platform")]
    pub platform: Platform,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub posts: i64,
}

/// Payload of `GET /analytics/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub overview: Overview,
    #[serde(rename = "platformBreakdown", default)]
    pub platform_breakdown: Vec<PlatformBreakdown>,
    #[serde(rename = "recentPosts", default)]
    pub recent_posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverallMetrics {
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
    #[serde(rename = "totalFollowers", default)]
    pub total_followers: i64,
    #[serde(rename = "followerGrowth", default)]
    pub follower_growth: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSummary {
    #[serde(rename = "totalPosts", default)]
    pub total_posts: i64,
    #[serde(rename = "totalEngagement", default)]
    pub total_engagement: i64,
    #[serde(rename = "avgEngagementRate", default)]
    pub avg_engagement_rate: f64,
    #[serde(rename = "totalReach", default)]
    pub total_reach: i64,
    #[serde(rename = "totalFollowers", default)]
    pub total_followers: i64,
    #[serde(rename = "followerGrowth", default)]
    pub follower_growth: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformAnalytics {
    pub platform: Platform,
    #[serde(default)]
    pub summary: Option<PlatformSummary>,
}

/// One point of the follower/engagement trend line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: String,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub engagement: i64,
}

/// Payload of `GET /analytics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsData {
    #[serde(default)]
    pub overall: OverallMetrics,
    #[serde(rename = "byPlatform", default)]
    pub by_platform: Vec<PlatformAnalytics>,
    #[serde(rename = "growthTrend", default)]
    pub growth_trend: Vec<GrowthPoint>,
}

/// One suggested posting slot from `GET /analytics/best-time-to-post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTimeSlot {
    #[serde(default)]
    pub platform: Option<Platform>,
    pub hour: u8,
    #[serde(default)]
    pub engagement: i64,
}

impl BestTimeSlot {
    pub fn hour_display(&self) -> String {
        match self.hour {
            0 => "12am".to_string(),
            1..=11 => format!("{}am", self.hour),
            12 => "12pm".to_string(),
            _ => format!("{}pm", self.hour - 12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_stats() {
        let json = r#"{
            "overview": {"totalPosts": 128, "scheduledPosts": 12, "connectedAccounts": 4,
                         "totalEngagement": 55000, "avgEngagementRate": 2.7},
            "platformBreakdown": [
                {"_id": "instagram", "count": 2, "followers": 20000, "posts": 80},
                {"_id": "twitter", "count": 1, "followers": 5000, "posts": 48}
            ],
            "recentPosts": []
        }"#;

        let stats: DashboardStats =
            serde_json::from_str(json).expect("Failed to parse dashboard stats");
        assert_eq!(stats.overview.total_posts, 128);
        assert_eq!(stats.platform_breakdown.len(), 2);
        assert_eq!(stats.platform_breakdown[0].platform, Platform::Instagram);
    }

    #[test]
    fn test_best_time_hour_display() {
        let slot = |hour| BestTimeSlot {
            platform: None,
            hour,
            engagement: 0,
        };
        assert_eq!(slot(0).hour_display(), "12am");
        assert_eq!(slot(9).hour_display(), "9am");
        assert_eq!(slot(12).hour_display(), "12pm");
        assert_eq!(slot(19).hour_display(), "7pm");
    }
}
