//! The delayed "next question" transition after an answer.
//!
//! A [`ScheduledAdvance`] carries the token of the question it was scheduled
//! for. Whoever owns the clock fires it with [`crate::Quiz::advance`] once it is
//! due. If a newer question was generated in the meantime the token is stale
//! and firing it does nothing.

use std::thread;
use std::time::{Duration, Instant};

/// Identifies the question a scheduled advance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceToken(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub token: AdvanceToken,
    pub due: Instant,
}

impl ScheduledAdvance {
    pub(crate) fn new(token: AdvanceToken, now: Instant, delay: Duration) -> Self {
        Self {
            token,
            due: now + delay,
        }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    pub fn is_due_at(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Blocks until due and hands back the token to fire.
    pub fn wait(self) -> AdvanceToken {
        let now = Instant::now();
        if !self.is_due_at(now) {
            thread::sleep(self.remaining_at(now));
        }
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_after_delay() {
        let now = Instant::now();
        let scheduled = ScheduledAdvance::new(AdvanceToken(3), now, Duration::from_secs(2));

        assert!(!scheduled.is_due_at(now));
        assert_eq!(scheduled.remaining_at(now), Duration::from_secs(2));
        assert!(scheduled.is_due_at(now + Duration::from_secs(2)));
        assert_eq!(scheduled.remaining_at(now + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_wait_without_delay_returns_token() {
        let scheduled = ScheduledAdvance::new(AdvanceToken(8), Instant::now(), Duration::ZERO);
        assert_eq!(scheduled.wait(), AdvanceToken(8));
    }
}
