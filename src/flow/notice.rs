//! Notices - what the UI would show as toasts

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), description: description.into() }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), description: description.into() }
    }

    pub fn is_error(&self) -> bool { self.level == NoticeLevel::Error }
}

/// Append-only notice log; callers drain it after each step.
#[derive(Debug, Default)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(title = %notice.title, "{}", notice.description),
            NoticeLevel::Error => tracing::warn!(title = %notice.title, "{}", notice.description),
        }
        self.0.push(notice);
    }

    pub fn last(&self) -> Option<&Notice> { self.0.last() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn drain(&mut self) -> Vec<Notice> { std::mem::take(&mut self.0) }
}
