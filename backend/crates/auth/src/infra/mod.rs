//! Infrastructure Layer - Database and notification implementations

pub mod postgres;
pub mod sms;
