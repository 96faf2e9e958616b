// User-visible message feed. The rendering layer drains this instead of
// receiving callbacks; failures never propagate as panics into it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct NoticeFeed {
    pending: Vec<Notice>,
}

impl NoticeFeed {
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.pending.push(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text);
    }

    /// Drain everything accumulated since the last call.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }
}
