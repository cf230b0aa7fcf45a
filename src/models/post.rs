use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::account::Platform;

/// Lifecycle status of a post (and of its per-platform copies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Pending,
    Scheduled,
    Publishing,
    Published,
    Failed,
    Cancelled,
}

impl PostStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Pending => "Pending",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Publishing => "Publishing",
            PostStatus::Published => "Published",
            PostStatus::Failed => "Failed",
            PostStatus::Cancelled => "Cancelled",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Publishing => "publishing",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
            PostStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMedia {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "altText", default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub shares: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub reach: i64,
    #[serde(default)]
    pub impressions: i64,
}

impl Engagement {
    pub fn total(&self) -> i64 {
        self.likes + self.comments + self.shares
    }
}

/// One platform-specific copy of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformPost {
    pub platform: Platform,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(rename = "platformPostId", default)]
    pub platform_post_id: Option<String>,
    #[serde(rename = "postUrl", default)]
    pub post_url: Option<String>,
    #[serde(rename = "postedAt", default)]
    pub posted_at: Option<String>,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(rename = "retryCount", default)]
    pub retry_count: i64,
    #[serde(default)]
    pub engagement: Engagement,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostAnalytics {
    #[serde(rename = "totalEngagement", default)]
    pub total_engagement: i64,
    #[serde(rename = "totalReach", default)]
    pub total_reach: i64,
    #[serde(rename = "totalImpressions", default)]
    pub total_impressions: i64,
    #[serde(rename = "totalClicks", default)]
    pub total_clicks: i64,
    #[serde(rename = "engagementRate", default)]
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub media: Vec<PostMedia>,
    #[serde(default)]
    pub platforms: Vec<PlatformPost>,
    pub status: PostStatus,
    #[serde(rename = "scheduledAt", default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "postType", default)]
    pub post_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub analytics: PostAnalytics,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// The calendar day this post is scheduled for, in UTC.
    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.scheduled_at.map(|dt| dt.date_naive())
    }

    /// Platforms this post targets, in declaration order.
    pub fn platform_tags(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|p| p.platform.tag()).collect()
    }

    /// First line of content, for list rows.
    pub fn summary(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.content.lines().next().unwrap_or(""))
    }

    pub fn scheduled_time_display(&self) -> String {
        match self.scheduled_at {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }
}

/// Body for `POST /posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub platforms: Vec<NewPlatformTarget>,
    #[serde(rename = "postType")]
    pub post_type: String,
    #[serde(rename = "scheduledAt", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlatformTarget {
    pub platform: Platform,
    pub account: String,
}

/// Paged response shape for `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub pages: i64,
    #[serde(default)]
    pub limit: i64,
}

/// Sort order for the flat post list views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortColumn {
    ScheduledAt,
    Status,
    Engagement,
}

impl PostSortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            PostSortColumn::ScheduledAt => "date",
            PostSortColumn::Status => "status",
            PostSortColumn::Engagement => "engagement",
        }
    }

    /// Ascending comparator for list rows. Unscheduled posts sort first;
    /// ties fall back to the scheduled time.
    pub fn compare(&self, a: &Post, b: &Post) -> std::cmp::Ordering {
        let time_cmp = |x: &Post, y: &Post| x.scheduled_at.cmp(&y.scheduled_at);
        match self {
            PostSortColumn::ScheduledAt => time_cmp(a, b),
            PostSortColumn::Status => a
                .status
                .display_name()
                .cmp(b.status.display_name())
                .then_with(|| time_cmp(a, b)),
            PostSortColumn::Engagement => a
                .analytics
                .total_engagement
                .cmp(&b.analytics.total_engagement)
                .then_with(|| time_cmp(a, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post_json() -> &'static str {
        r#"{
            "_id": "p1",
            "content": "Launch day!\nMore details below.",
            "media": [{"type": "image", "url": "https://cdn.example.com/1.jpg", "order": 0}],
            "platforms": [
                {"platform": "instagram", "status": "scheduled", "retryCount": 0,
                 "engagement": {"likes": 10, "comments": 2, "shares": 1}},
                {"platform": "twitter", "status": "scheduled", "retryCount": 0}
            ],
            "status": "scheduled",
            "scheduledAt": "2026-03-14T15:30:00Z",
            "postType": "post",
            "tags": ["launch"]
        }"#
    }

    #[test]
    fn test_parse_post() {
        let post: Post = serde_json::from_str(sample_post_json()).expect("Failed to parse post");
        assert_eq!(post.status, PostStatus::Scheduled);
        assert_eq!(post.summary(), "Launch day!");
        assert_eq!(post.platform_tags(), vec!["IG", "TW"]);
        assert_eq!(post.scheduled_time_display(), "15:30");
        assert_eq!(
            post.scheduled_date(),
            Some(NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"))
        );
        assert_eq!(post.platforms[0].engagement.total(), 13);
    }

    #[test]
    fn test_new_post_serialization_skips_empty_fields() {
        let body = NewPost {
            content: "hello".to_string(),
            title: None,
            platforms: vec![NewPlatformTarget {
                platform: Platform::Facebook,
                account: "a1".to_string(),
            }],
            post_type: "post".to_string(),
            scheduled_at: None,
            tags: vec![],
        };

        let json = serde_json::to_value(&body).expect("Failed to serialize NewPost");
        assert!(json.get("title").is_none());
        assert!(json.get("scheduledAt").is_none());
        assert!(json.get("tags").is_none());
        assert_eq!(json["platforms"][0]["platform"], "facebook");
    }

    fn post_with(id: &str, status: &str, scheduled_at: &str, engagement: i64) -> Post {
        serde_json::from_str(&format!(
            r#"{{
                "_id": "{id}",
                "content": "c",
                "status": "{status}",
                "scheduledAt": "{scheduled_at}",
                "analytics": {{"totalEngagement": {engagement}}}
            }}"#
        ))
        .expect("valid post JSON")
    }

    #[test]
    fn test_sort_columns_order_posts() {
        let early = post_with("p1", "scheduled", "2026-03-10T09:00:00Z", 40);
        let late = post_with("p2", "published", "2026-03-20T09:00:00Z", 5);
        let mid = post_with("p3", "failed", "2026-03-15T09:00:00Z", 80);

        let mut posts = vec![&late, &early, &mid];

        posts.sort_by(|a, b| PostSortColumn::ScheduledAt.compare(a, b));
        assert_eq!(posts[0].id, "p1");
        assert_eq!(posts[2].id, "p2");

        posts.sort_by(|a, b| PostSortColumn::Engagement.compare(a, b));
        assert_eq!(posts[0].id, "p2");
        assert_eq!(posts[2].id, "p3");

        posts.sort_by(|a, b| PostSortColumn::Status.compare(a, b));
        // Failed < Published < Scheduled alphabetically
        assert_eq!(posts[0].id, "p3");
        assert_eq!(posts[2].id, "p1");
    }
}
