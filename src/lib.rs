//! Flowdeck - a terminal dashboard for a SocialFlow-compatible backend.
//!
//! The crate is split into:
//!
//! - `api`: HTTP client with bearer auth and silent token refresh
//! - `auth`: session persistence and OS keyring credential storage
//! - `cache`: JSON snapshots of API data for instant startup rendering
//! - `models`: serde types for the REST API payloads
//! - `app`: application state and background refresh coordination
//! - `ui`: ratatui rendering and keyboard input
//! - `utils`: formatting helpers and calendar grid math

pub mod api;
pub mod app;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod ui;
pub mod utils;
