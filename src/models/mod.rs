//! Data models for SocialFlow entities.
//!
//! This module contains all the data structures exchanged with the
//! SocialFlow REST API:
//!
//! - `User`: the logged-in account holder
//! - `Post`, `PlatformPost`: content items and their per-platform copies
//! - `SocialAccount`, `Platform`: connected social accounts
//! - `DashboardStats`, `AnalyticsData`: aggregated metrics
//! - `MediaItem`, `MediaFolder`: the media library
//!
//! All types use camelCase serde renames to match the wire format.

pub mod account;
pub mod analytics;
pub mod media;
pub mod post;
pub mod user;

pub use account::{AccountSortColumn, Platform, PlatformStats, SocialAccount};
pub use analytics::{
    AnalyticsData, BestTimeSlot, DashboardStats, GrowthPoint, Overview, PlatformBreakdown,
};
pub use media::{MediaFolder, MediaItem, MediaKind};
pub use post::{
    Engagement, NewPlatformTarget, NewPost, Pagination, PlatformPost, Post, PostSortColumn,
    PostStatus,
};
pub use user::User;
