use std::fmt;
use std::time::{Duration, Instant};

/// How long a success notice stays visible.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Short status text shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    created_at: Instant,
    ttl: Option<Duration>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        let ttl = (level == NoticeLevel::Success).then_some(SUCCESS_NOTICE_TTL);
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.ttl
            .map(|ttl| now.saturating_duration_since(self.created_at) >= ttl)
            .unwrap_or(false)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
