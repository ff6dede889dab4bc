//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary every backend crate agrees on:
//! - Unified error classification ([`error::kind::ErrorKind`])
//! - Unified application error type ([`error::app_error::AppError`])
//!
//! **Design Principle**: only things that are "hard to change" and mean
//! the same thing in every domain crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
