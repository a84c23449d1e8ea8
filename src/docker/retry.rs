//! Fixed-count, fixed-interval retry

use std::fmt;
use std::thread;
use std::time::Duration;

/// How restart waits for a container to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause after `docker start` before the first status poll.
    pub settle_delay: Duration,
    pub max_attempts: u32,
    /// Pause between failed polls.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(3),
            max_attempts: 5,
            interval: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Same attempt count with every delay removed.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            settle_delay: Duration::ZERO,
            max_attempts,
            interval: Duration::ZERO,
        }
    }
}

/// Every error collected while retrying, oldest first.
#[derive(Debug)]
pub struct RetryError<E> {
    pub attempts: u32,
    pub errors: Vec<E>,
}

impl<E> RetryError<E> {
    pub fn last(&self) -> Option<&E> {
        self.errors.last()
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gave up after {} attempt(s)", self.attempts)?;
        if let Some(last) = self.last() {
            write!(f, ", last error: {}", last)?;
        }
        Ok(())
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Call `callback` up to `attempts` times, sleeping `interval` after each
/// failure except the last.
pub fn retry_after<T, E, F>(
    attempts: u32,
    interval: Duration,
    mut callback: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    let mut errors = Vec::new();

    for attempt in 1..=attempts {
        match callback() {
            Ok(value) => return Ok(value),
            Err(err) => errors.push(err),
        }

        if attempt < attempts && !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    Err(RetryError { attempts, errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_on_first_attempt() {
        let mut calls = 0;
        let result: Result<u32, RetryError<String>> = retry_after(5, Duration::ZERO, || {
            calls += 1;
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_succeeds_after_failures() {
        let mut calls = 0;
        let result = retry_after(5, Duration::ZERO, || {
            calls += 1;
            if calls < 3 {
                Err(format!("attempt {}", calls))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_collects_every_error_when_exhausted() {
        let mut calls = 0;
        let err = retry_after(4, Duration::ZERO, || -> Result<(), String> {
            calls += 1;
            Err(format!("attempt {}", calls))
        })
        .unwrap_err();

        assert_eq!(calls, 4);
        assert_eq!(err.attempts, 4);
        assert_eq!(
            err.errors,
            vec!["attempt 1", "attempt 2", "attempt 3", "attempt 4"]
        );
        assert_eq!(err.last().map(String::as_str), Some("attempt 4"));
        assert_eq!(
            err.to_string(),
            "gave up after 4 attempt(s), last error: attempt 4"
        );
    }

    #[test]
    fn test_zero_attempts_never_calls() {
        let mut called = false;
        let err = retry_after(0, Duration::ZERO, || -> Result<(), String> {
            called = true;
            Ok(())
        })
        .unwrap_err();

        assert!(!called);
        assert_eq!(err.attempts, 0);
        assert!(err.errors.is_empty());
        assert_eq!(err.to_string(), "gave up after 0 attempt(s)");
    }

    #[test]
    fn test_no_sleep_after_final_attempt() {
        let interval = Duration::from_millis(50);
        let start = std::time::Instant::now();
        let _ = retry_after(1, interval, || -> Result<(), ()> { Err(()) });
        assert!(start.elapsed() < interval);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.settle_delay, Duration::from_secs(3));
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.interval, Duration::from_secs(1));
        assert_eq!(RetryPolicy::immediate(5).max_attempts, 5);
    }
}
