//! Credential verification, role gating, and session issuance.

pub mod password;
pub mod service;
pub mod session;

pub use service::{AuthService, IssuedSession, authorize_claim};
