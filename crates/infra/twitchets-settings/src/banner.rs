//! Dismissible error banner with automatic expiry.

use std::time::Duration;

use tokio::time::Instant;

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// A message raised at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    raised_at: Instant,
}

impl Notice {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn raised_at(&self) -> Instant {
        self.raised_at
    }
}

/// Holds at most one notice; a newer notice or a clear supersedes it
#[derive(Debug, Clone)]
pub struct Banner {
    notice: Option<Notice>,
    ttl: Duration,
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}

impl Banner {
    pub const fn new() -> Self {
        Self::with_ttl(NOTICE_TTL)
    }

    pub const fn with_ttl(ttl: Duration) -> Self {
        Self { notice: None, ttl }
    }

    pub fn raise(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// The visible notice, if one was raised less than the TTL ago
    pub fn current(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| n.raised_at.elapsed() < self.ttl)
    }

    pub fn is_raised(&self) -> bool {
        self.current().is_some()
    }
}
