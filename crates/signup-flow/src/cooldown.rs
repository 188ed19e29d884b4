//! Resend cooldown as an owned timer resource.
//!
//! The cooldown is a plain deadline over the tokio clock: no background
//! task, nothing to leak when the flow is dropped, and fully
//! deterministic under `tokio::time::pause()`. It gates only the resend
//! action; code expiry itself is enforced by the OTP service.

use std::time::Duration;
use tokio::time::Instant;

/// Deadline-based cooldown for the resend action.
#[derive(Debug, Default)]
pub struct ResendCooldown {
    deadline: Option<Instant>,
}

impl ResendCooldown {
    /// Create an unarmed cooldown (resend available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the cooldown for the given duration, replacing any previous
    /// deadline.
    pub fn start(&mut self, duration: Duration) {
        self.deadline = Some(Instant::now() + duration);
    }

    /// Disarm the cooldown.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True when unarmed or the deadline has passed.
    pub fn is_ready(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => true,
        }
    }

    /// Time left until resend re-enables, `None` once ready.
    pub fn remaining(&self) -> Option<Duration> {
        let deadline = self.deadline?;
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            None
        } else {
            Some(left)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_new_cooldown_is_ready() {
        let cooldown = ResendCooldown::new();
        assert!(cooldown.is_ready());
        assert!(cooldown.remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_cooldown_blocks_until_deadline() {
        let mut cooldown = ResendCooldown::new();
        cooldown.start(Duration::from_secs(300));

        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.remaining(), Some(Duration::from_secs(300)));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(!cooldown.is_ready());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cooldown.is_ready());
        assert!(cooldown.remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_deadline() {
        let mut cooldown = ResendCooldown::new();
        cooldown.start(Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(250)).await;
        cooldown.start(Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.remaining(), Some(Duration::from_secs(240)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut cooldown = ResendCooldown::new();
        cooldown.start(Duration::from_secs(300));
        cooldown.cancel();

        assert!(cooldown.is_ready());
        assert!(cooldown.remaining().is_none());
    }
}
