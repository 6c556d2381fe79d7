//! Timing utilities
//!
//! Wall-time formatting for console output and a deadline helper for the
//! coordinator's optional bounded wait.

use std::time::{Duration, Instant};

/// Absolute point in time after which a wait gives up
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    at: Instant,
}

impl Deadline {
    /// Deadline `limit` from now
    ///
    /// `None` when `limit` lies beyond what the monotonic clock can represent;
    /// such a wait is effectively unbounded.
    pub fn after(limit: Duration) -> Option<Self> {
        let started = Instant::now();
        started
            .checked_add(limit)
            .map(|at| Self { started, at })
    }

    /// Time elapsed since the deadline was set
    #[inline]
    pub fn waited(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn instant(&self) -> Instant {
        self.at
    }
}

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use walkgroup::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}us", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_deadline_pending() {
        let deadline = Deadline::after(Duration::from_secs(60)).unwrap();
        assert!(deadline.instant() > Instant::now());
    }

    #[test]
    fn test_deadline_expired() {
        let deadline = Deadline::after(Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(5));

        assert!(deadline.instant() <= Instant::now());
        assert!(deadline.waited() >= Duration::from_millis(5));
    }

    #[test]
    fn test_deadline_beyond_clock_range() {
        assert!(Deadline::after(Duration::MAX).is_none());
        assert!(Deadline::after(Duration::from_secs(u64::MAX)).is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
    }
}
