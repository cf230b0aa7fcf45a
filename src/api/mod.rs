//! REST API client module for the SocialFlow backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! SocialFlow API: posts, social accounts, analytics, and the media library.
//!
//! The API uses JWT bearer token authentication with a refresh-token
//! exchange; the client handles the silent refresh-and-retry on 401.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginData, MediaFilter, MediaPage, PostFilter, PostsPage, TokenPair};
pub use error::ApiError;
