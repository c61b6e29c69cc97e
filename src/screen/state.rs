//! Observable per-screen state.

use crate::framework::{ConsoleError, Record};

/// Where a screen is in its fetch/mutate cycle.
///
/// ```text
/// Idle -> Loading -> Loaded | LoadFailed
/// Loaded -> Mutating -> Loaded (via reload) | MutationFailed
/// ```
/// A failed load or mutation keeps the previously loaded records.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
    Mutating,
    MutationFailed(String),
}

impl Phase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Loading | Phase::Mutating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The message a toast would show for the last operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub(crate) fn from_error(error: &ConsoleError) -> Self {
        Self::error(error.to_string())
    }
}

/// Everything a view needs to render one screen.
#[derive(Debug, Clone)]
pub struct ScreenState<T> {
    pub phase: Phase,
    pub records: Vec<Record<T>>,
    pub notice: Option<Notice>,
    /// Bumped on every deactivation. Operations started under an older value are stale.
    pub generation: u64,
    /// Last load sequence number handed out.
    pub load_seq: u64,
    /// Sequence number of the load whose rows are on screen. Older results are stale.
    pub applied_seq: u64,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            records: Vec::new(),
            notice: None,
            generation: 0,
            load_seq: 0,
            applied_seq: 0,
        }
    }
}
