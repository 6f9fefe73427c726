//! Session expiry bookkeeping behind the expiry warning modal. All times are
//! epoch milliseconds supplied by the caller.

/// `"{m}m {s}s"`, `"{s}s"` under a minute, `"Expired"` at or below zero
pub fn format_time_remaining(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return "Expired".to_string();
    }

    let minutes = remaining_ms / 60_000;
    let seconds = (remaining_ms % 60_000) / 1000;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// When the current session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    expires_at_ms: i64,
}

impl SessionClock {
    pub fn start(now_ms: i64, duration_secs: u64) -> Self {
        Self {
            expires_at_ms: now_ms.saturating_add(secs_to_ms(duration_secs)),
        }
    }

    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at_ms
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.expires_at_ms - now_ms).max(0)
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    /// True once the session is inside the warning window but not yet over
    pub fn needs_warning(&self, now_ms: i64, threshold_secs: u64) -> bool {
        let remaining = self.remaining_ms(now_ms);
        remaining > 0 && remaining <= secs_to_ms(threshold_secs)
    }

    pub fn extend(&mut self, now_ms: i64, duration_secs: u64) {
        *self = Self::start(now_ms, duration_secs);
    }
}

/// What a periodic session check should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    Active,
    /// Raise the expiry warning with this much time left
    Warn(i64),
    Expire,
}

impl SessionClock {
    /// Once the warning is showing its countdown owns expiry, so the check stays
    /// `Active` and logout is emitted exactly once.
    pub fn check(&self, now_ms: i64, threshold_secs: u64, warned: bool) -> SessionCheck {
        if warned {
            SessionCheck::Active
        } else if self.is_expired(now_ms) {
            SessionCheck::Expire
        } else if self.needs_warning(now_ms, threshold_secs) {
            SessionCheck::Warn(self.remaining_ms(now_ms))
        } else {
            SessionCheck::Active
        }
    }
}

/// Counts down from the time remaining when the warning opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at_ms: i64,
    time_remaining_ms: i64,
}

impl Countdown {
    pub fn new(started_at_ms: i64, time_remaining_ms: i64) -> Self {
        Self {
            started_at_ms,
            time_remaining_ms,
        }
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.time_remaining_ms - (now_ms - self.started_at_ms)).max(0)
    }

    pub fn label(&self, now_ms: i64) -> String {
        format_time_remaining(self.remaining_ms(now_ms))
    }

    pub fn is_finished(&self, now_ms: i64) -> bool {
        self.remaining_ms(now_ms) == 0
    }
}

fn secs_to_ms(secs: u64) -> i64 {
    i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_remaining() {
        assert_eq!(format_time_remaining(0), "Expired");
        assert_eq!(format_time_remaining(-5), "Expired");
        assert_eq!(format_time_remaining(999), "0s");
        assert_eq!(format_time_remaining(45_000), "45s");
        assert_eq!(format_time_remaining(60_000), "1m 0s");
        assert_eq!(format_time_remaining(299_500), "4m 59s");
    }

    #[test]
    fn test_session_clock_warning_window() {
        let clock = SessionClock::start(1_000, 600);
        assert_eq!(clock.expires_at_ms(), 601_000);

        assert!(!clock.needs_warning(1_000, 300));
        assert!(clock.needs_warning(301_000, 300));
        assert!(clock.needs_warning(600_999, 300));
        // Past expiry the warning gives way to logout
        assert!(!clock.needs_warning(601_000, 300));
        assert!(clock.is_expired(700_000));
        assert_eq!(clock.remaining_ms(700_000), 0);
    }

    #[test]
    fn test_session_clock_extend() {
        let mut clock = SessionClock::start(0, 60);
        clock.extend(50_000, 60);
        assert_eq!(clock.remaining_ms(50_000), 60_000);
    }

    #[test]
    fn test_countdown_ticks_to_expired() {
        let countdown = Countdown::new(10_000, 65_000);
        assert_eq!(countdown.label(10_000), "1m 5s");
        assert_eq!(countdown.label(20_000), "55s");
        assert!(!countdown.is_finished(74_999));
        assert!(countdown.is_finished(75_000));
        assert_eq!(countdown.label(80_000), "Expired");
    }

    #[test]
    fn test_check_hands_expiry_to_the_warning() {
        let clock = SessionClock::start(0, 600);

        assert_eq!(clock.check(1_000, 300, false), SessionCheck::Active);
        assert_eq!(clock.check(400_000, 300, false), SessionCheck::Warn(200_000));
        // The warning countdown logs out, the periodic check stays quiet
        assert_eq!(clock.check(400_000, 300, true), SessionCheck::Active);
        assert_eq!(clock.check(700_000, 300, true), SessionCheck::Active);
    }

    #[test]
    fn test_check_expires_when_no_warning_was_raised() {
        // Checks can miss the whole window, e.g. while the tab sleeps
        let clock = SessionClock::start(0, 600);
        assert_eq!(clock.check(700_000, 300, false), SessionCheck::Expire);
    }
}
