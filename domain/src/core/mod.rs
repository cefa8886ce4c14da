//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question for the cooking assistant
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
