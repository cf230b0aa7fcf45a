//! Per-tab content rendering.

pub mod accounts;
pub mod analytics;
pub mod calendar;
pub mod dashboard;
pub mod media;
