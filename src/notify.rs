//! User-facing notification queue.
//!
//! The interaction engine posts notices here; the UI layer drains and renders
//! them as transient toasts. Presentation lives entirely outside this module.

/// How long a notice stays visible.
pub const NOTICE_TTL_MS: f64 = 4000.0;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// One user-visible message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub posted_ms: f64,
}

/// FIFO of pending notices with time-based expiry.
#[derive(Debug, Default)]
pub struct Notices {
    queue: Vec<Notice>,
}

impl Notices {
    pub fn success(&mut self, text: impl Into<String>, now_ms: f64) {
        self.push(NoticeLevel::Success, text, now_ms);
    }

    pub fn warning(&mut self, text: impl Into<String>, now_ms: f64) {
        self.push(NoticeLevel::Warning, text, now_ms);
    }

    pub fn error(&mut self, text: impl Into<String>, now_ms: f64) {
        self.push(NoticeLevel::Error, text, now_ms);
    }

    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>, now_ms: f64) {
        self.queue.push(Notice {
            level,
            text: text.into(),
            posted_ms: now_ms,
        });
    }

    /// Drop notices older than [`NOTICE_TTL_MS`].
    pub fn expire(&mut self, now_ms: f64) {
        self.queue
            .retain(|n| now_ms - n.posted_ms < NOTICE_TTL_MS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
