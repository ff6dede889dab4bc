//! SMS Notifier Implementations
//!
//! The default notifier only logs; a real gateway integration slots in
//! behind the same port.

use crate::domain::notifier::SmsNotifier;
use crate::error::AuthResult;

/// Log-only SMS notifier
#[derive(Debug, Clone, Default)]
pub struct LogSmsNotifier;

impl SmsNotifier for LogSmsNotifier {
    async fn send_verification_code(&self, phone: &str, code: &str) -> AuthResult<()> {
        tracing::info!(phone = %phone, "SMS verification code dispatched (log-only)");
        tracing::debug!(code = %code, "Verification code value");
        Ok(())
    }
}
