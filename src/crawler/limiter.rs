//! Named rate limiters for upstream resources
//!
//! Each upstream (profile API, match API, banned listing) gets its own
//! fixed-window limiter: at most `limit_for_period` calls are admitted per
//! `refresh_period`. A caller that finds the window exhausted waits for the next
//! window instead of failing. The window lives behind a fair async mutex, so
//! waiting callers are admitted in arrival order.

use crate::config::LimiterConfig;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
struct Window {
    started: Instant,
    admitted: u32,
}

/// Fixed-window rate limiter tied to one upstream resource
#[derive(Debug)]
pub struct RateLimiter {
    name: String,
    limit_for_period: u32,
    refresh_period: Duration,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// Creates a limiter admitting `limit_for_period` calls per `refresh_period`
    pub fn new(name: impl Into<String>, limit_for_period: u32, refresh_period: Duration) -> Self {
        Self {
            name: name.into(),
            limit_for_period: limit_for_period.max(1),
            refresh_period,
            window: Mutex::new(Window {
                started: Instant::now(),
                admitted: 0,
            }),
        }
    }

    pub fn from_config(name: impl Into<String>, config: &LimiterConfig) -> Self {
        Self::new(
            name,
            config.limit_for_period,
            Duration::from_millis(config.refresh_period_ms),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waits until a call may proceed and consumes one permit
    pub async fn acquire(&self) {
        let mut window = self.window.lock().await;

        let now = Instant::now();
        if now.duration_since(window.started) >= self.refresh_period {
            window.started = now;
            window.admitted = 0;
        }

        if window.admitted >= self.limit_for_period {
            let next_window = window.started + self.refresh_period;
            tracing::debug!(
                "Rate limiter '{}' exhausted, waiting {:?}",
                self.name,
                next_window.saturating_duration_since(now)
            );
            // Holding the lock while sleeping keeps later callers queued behind us
            sleep_until(next_window).await;
            window.started = next_window;
            window.admitted = 0;
        }

        window.admitted += 1;
        tracing::trace!(
            "Rate limiter '{}' admitted call {}/{}",
            self.name,
            window.admitted,
            self.limit_for_period
        );
    }
}
