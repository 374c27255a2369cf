use std::time::{Duration, Instant};

/// Fixed-window request limiter.
///
/// The first request opens a window; further requests inside the window are
/// admitted until `limit` is reached. A request after the window has elapsed
/// opens a new one.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    count: u32,
    window_start: Option<Instant>,
}

impl RateLimiter {
    /// Default generation limit: five requests per minute.
    pub const GENERATE_LIMIT: u32 = 5;
    /// Default generation window.
    pub const GENERATE_WINDOW: Duration = Duration::from_secs(60);

    /// Creates a limiter admitting `limit` requests per `window`.
    #[must_use]
    pub const fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            count: 0,
            window_start: None,
        }
    }

    /// Attempts to admit a request arriving at `now`.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.window => {
                if self.count >= self.limit {
                    return false;
                }
                self.count += 1;
                true
            }
            _ => {
                self.window_start = Some(now);
                self.count = 1;
                self.limit > 0
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::GENERATE_LIMIT, Self::GENERATE_WINDOW)
    }
}
