use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// One browser session-history record.
///
/// `path` is always site-relative with a leading slash; `title` is the
/// document title for fragment navigations, the anchor's `title` attribute
/// otherwise. Hosts serialize this into `history.pushState` state objects,
/// so the wire field names (`title`, `path`) must stay stable: pages
/// rendered before this engine took over wrote the same shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub path: String,
}

impl HistoryEntry {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}
