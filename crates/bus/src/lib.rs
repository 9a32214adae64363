use core_types::{HistoryEntry, RequestId};
use std::sync::mpsc::{Receiver, Sender};

/// Effects the navigation controller asks its collaborators to perform.
///
/// The host owning the real document applies the DOM-facing variants;
/// `FetchFragment`/`CancelFetch` are routed to the network runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    // Network
    FetchFragment {
        request_id: RequestId,
        /// Absolute URL, already carrying the `?ajax=true` marker.
        url: String,
    },
    CancelFetch {
        request_id: RequestId,
    },

    // History
    PushHistory {
        entry: HistoryEntry,
    },
    /// Full page navigation (search results, canonicalized directory URLs).
    NavigateFull {
        url: String,
    },
    Reload,
    /// Re-assign `location.hash`; engines that re-scroll on a same-value
    /// hash assignment need only this.
    ReassignHash {
        hash: String,
    },
    /// Re-assign the full `location.href`. Emitted twice in a row on
    /// engines that ignore a same-value assignment.
    ReassignHref {
        href: String,
    },

    // Document
    ReplaceContent {
        html: String,
    },
    SetTitle {
        title: String,
    },
    /// Re-run the syntax highlighter over the current document.
    HighlightAll,
    /// Scroll the element whose `name` attribute equals `name` into view.
    /// Best-effort: hosts must no-op when no such element exists.
    ScrollToAnchor {
        name: String,
    },
    /// Scroll the inner content container to the top.
    ScrollContentTop,
    /// Scroll the main container to the top.
    ScrollMainTop,

    // Sidebar
    /// Mark exactly `active` (when set) with the active class and give the
    /// listed groups, by index in the ready-time snapshot, the open class;
    /// every other link/group loses those classes.
    ApplySidebar {
        active: Option<String>,
        open_groups: Vec<usize>,
    },

    // Failure surface
    ShowError {
        message: String,
    },
}

/// Completions delivered back into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    FragmentLoaded {
        request_id: RequestId,
        html: String,
    },
    FragmentFailed {
        request_id: RequestId,
        error: String,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<NavCommand>,
    pub evt_rx: Receiver<NavEvent>,
    pub evt_tx: Sender<NavEvent>, // shareable for runtimes
}

impl Bus {
    pub fn new() -> (Self, Receiver<NavCommand>) {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::channel();
        (
            Self {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }
}
