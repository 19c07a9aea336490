//! Courtesy pacing between catalog round-trips
//!
//! The catalog is rate-sensitive, so the pipeline pauses after every
//! network call. The policy is injected so tests run without delay.

use async_trait::async_trait;
use std::time::Duration;

/// A pause policy awaited after each catalog round-trip.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleep for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause(pub Duration);

#[async_trait]
impl Pacer for FixedPause {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Never wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn fixed_pause_sleeps_for_duration() {
        let start = Instant::now();
        FixedPause(Duration::from_millis(20)).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn no_pause_returns_immediately() {
        let start = Instant::now();
        NoPause.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
