//! In-process counting backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::RateDecision;

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    count: u32,
    reset_at: Instant,
}

/// Counter map shared by all clones of the limiter.
///
/// The whole check-and-increment runs under one mutex guard, which makes it
/// atomic with respect to concurrent requests in the same process. Entries
/// for expired windows are overwritten on next use.
#[derive(Clone, Default)]
pub struct MemoryLimiter {
    windows: Arc<Mutex<HashMap<String, RateWindow>>>,
}

impl MemoryLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, key: &str, ceiling: u32, window: Duration) -> RateDecision {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = windows.get(key).copied();
        match entry {
            Some(w) if now < w.reset_at => {
                if w.count < ceiling {
                    windows.insert(
                        key.to_string(),
                        RateWindow {
                            count: w.count + 1,
                            reset_at: w.reset_at,
                        },
                    );
                    RateDecision::Allowed {
                        remaining: ceiling - (w.count + 1),
                    }
                } else {
                    RateDecision::Denied {
                        retry_after: w.reset_at - now,
                    }
                }
            }
            // No window yet, or the previous one has elapsed.
            _ => {
                windows.insert(
                    key.to_string(),
                    RateWindow {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                RateDecision::Allowed {
                    remaining: ceiling.saturating_sub(1),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_allows_up_to_ceiling_then_denies() {
        let limiter = MemoryLimiter::new();

        for i in 0..5u32 {
            match limiter.try_acquire("k", 5, WINDOW) {
                RateDecision::Allowed { remaining } => assert_eq!(remaining, 4 - i),
                RateDecision::Denied { .. } => panic!("denied below the ceiling"),
            }
        }

        match limiter.try_acquire("k", 5, WINDOW) {
            RateDecision::Denied { retry_after } => {
                assert!(retry_after <= WINDOW);
                assert!(retry_after > Duration::from_secs(50));
            }
            RateDecision::Allowed { .. } => panic!("allowed above the ceiling"),
        }
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = MemoryLimiter::new();
        assert!(limiter.try_acquire("a", 1, WINDOW).is_allowed());
        assert!(!limiter.try_acquire("a", 1, WINDOW).is_allowed());
        assert!(limiter.try_acquire("b", 1, WINDOW).is_allowed());
    }

    #[test]
    fn test_fresh_window_after_expiry() {
        let limiter = MemoryLimiter::new();
        let short = Duration::from_millis(20);

        assert!(limiter.try_acquire("k", 1, short).is_allowed());
        assert!(!limiter.try_acquire("k", 1, short).is_allowed());

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire("k", 1, short).is_allowed());
    }

    #[test]
    fn test_denied_action_does_not_extend_window() {
        let limiter = MemoryLimiter::new();
        let short = Duration::from_millis(50);

        assert!(limiter.try_acquire("k", 1, short).is_allowed());
        // Repeated denied attempts must not push reset_at forward.
        for _ in 0..3 {
            assert!(!limiter.try_acquire("k", 1, short).is_allowed());
            std::thread::sleep(Duration::from_millis(5));
        }
        std::thread::sleep(Duration::from_millis(50));
        assert!(limiter.try_acquire("k", 1, short).is_allowed());
    }

    #[tokio::test]
    async fn test_concurrent_acquires_respect_ceiling() {
        let limiter = MemoryLimiter::new();
        let ceiling = 5u32;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.try_acquire("shared", ceiling, WINDOW).is_allowed()
            }));
        }

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, ceiling);
    }
}
