//! In-memory unlock cache.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};

/// Source of monotonic time for ttl checks.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The process monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cached master password and the moment it was last verified.
///
/// Expiry is checked lazily: nothing evicts the password until the owner
/// asks for it after the ttl has run out.
pub(crate) struct Session {
    cached_password: Option<SecretString>,
    unlocked_at: Option<Instant>,
    ttl: Duration,
}

impl Session {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            cached_password: None,
            unlocked_at: None,
            ttl,
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached password if still inside the ttl window; clears it otherwise.
    pub(crate) fn current(&mut self, now: Instant) -> Option<&str> {
        if !self.is_valid(now) {
            self.clear();
            return None;
        }
        self.cached_password.as_ref().map(|p| p.expose_secret())
    }

    pub(crate) fn is_valid(&self, now: Instant) -> bool {
        match (&self.cached_password, self.unlocked_at) {
            (Some(_), Some(at)) => now.saturating_duration_since(at) < self.ttl,
            _ => false,
        }
    }

    /// Record a successful unlock. No-op when caching is disabled.
    pub(crate) fn remember(&mut self, password: &str, now: Instant) -> bool {
        if self.ttl.is_zero() {
            return false;
        }
        self.cached_password = Some(SecretString::from(password.to_string()));
        self.unlocked_at = Some(now);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.cached_password = None;
        self.unlocked_at = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cached", &self.cached_password.is_some())
            .field("unlocked_at", &self.unlocked_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_locked() {
        let mut session = Session::new(Duration::from_secs(10));
        let now = Instant::now();
        assert!(!session.is_valid(now));
        assert!(session.current(now).is_none());
    }

    #[test]
    fn test_password_valid_inside_window() {
        let mut session = Session::new(Duration::from_secs(10));
        let start = Instant::now();

        assert!(session.remember("hunter2", start));
        assert_eq!(
            session.current(start + Duration::from_secs(9)),
            Some("hunter2")
        );
    }

    #[test]
    fn test_password_expires_at_ttl() {
        let mut session = Session::new(Duration::from_secs(10));
        let start = Instant::now();
        session.remember("hunter2", start);

        assert!(session.current(start + Duration::from_secs(10)).is_none());
        // Cleared, not merely hidden
        assert!(session.current(start).is_none());
    }

    #[test]
    fn test_zero_ttl_never_caches() {
        let mut session = Session::new(Duration::ZERO);
        let now = Instant::now();

        assert!(!session.remember("hunter2", now));
        assert!(session.current(now).is_none());
    }

    #[test]
    fn test_debug_hides_password() {
        let mut session = Session::new(Duration::from_secs(10));
        session.remember("hunter2", Instant::now());
        assert!(!format!("{:?}", session).contains("hunter2"));
    }
}
