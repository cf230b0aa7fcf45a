//! Authentication module for managing user sessions and credentials.
//!
//! This module provides:
//! - `Session`: on-disk persistence of the token pair and user profile
//! - `CredentialStore`: secure OS-level password storage via keyring
//!
//! The in-memory token pair lives on the API client; `Session` is its
//! persisted mirror, written after login and after background refreshes.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionData};
