//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (CaptchaChallenge)
//! - Domain value objects (ChallengeKind)
//! - Domain services (challenge generation, answer comparison)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
