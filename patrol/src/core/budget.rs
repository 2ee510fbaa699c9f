//! Wall-clock deadline helpers for obstruction search.

use std::time::{Duration, Instant};

use crate::core::error::{PatrolError, PatrolResult};

/// Deadline `timeout_secs` from now; `0` means no deadline.
pub fn deadline_after(timeout_secs: u64) -> Option<Instant> {
    if timeout_secs == 0 {
        return None;
    }
    Some(Instant::now() + Duration::from_secs(timeout_secs))
}

/// Fail with [`PatrolError::DeadlineExceeded`] once `deadline` has passed.
pub fn check_deadline(deadline: Option<Instant>, completed: usize, total: usize) -> PatrolResult<()> {
    let Some(deadline) = deadline else {
        return Ok(());
    };
    let remaining = deadline
        .checked_duration_since(Instant::now())
        .unwrap_or(Duration::from_secs(0));
    if remaining.is_zero() {
        return Err(PatrolError::DeadlineExceeded { completed, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_disables_deadline() {
        assert_eq!(deadline_after(0), None);
        assert!(check_deadline(None, 0, 10).is_ok());
    }

    #[test]
    fn passed_deadline_reports_progress() {
        let past = Instant::now();
        assert_eq!(
            check_deadline(Some(past), 3, 10),
            Err(PatrolError::DeadlineExceeded {
                completed: 3,
                total: 10
            })
        );
    }

    #[test]
    fn future_deadline_passes() {
        assert!(check_deadline(deadline_after(60), 0, 1).is_ok());
    }
}
