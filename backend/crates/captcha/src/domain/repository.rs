//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infra layer.

use crate::domain::entities::CaptchaChallenge;
use crate::error::CaptchaResult;

/// Challenge repository trait
#[trait_variant::make(ChallengeRepository: Send)]
pub trait LocalChallengeRepository {
    /// Insert a new challenge
    async fn create(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()>;

    /// Look up a challenge by its opaque key
    async fn find_by_key(&self, key: &str) -> CaptchaResult<Option<CaptchaChallenge>>;

    /// Persist a mutated challenge
    ///
    /// The update is version-checked; a concurrent writer surfaces as
    /// [`CaptchaError::ConcurrentUpdate`](crate::error::CaptchaError).
    async fn update(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()>;

    /// Invalidate all outstanding (unconsumed) challenges for a phone
    ///
    /// Returns the number of challenges invalidated.
    async fn invalidate_outstanding(&self, phone: &str) -> CaptchaResult<u64>;
}
