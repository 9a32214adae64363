//! Navigation controller for a pre-rendered documentation site.
//!
//! The controller never touches a document directly. The embedding host
//! (wasm shim, webview bridge, test harness) forwards UI events to the
//! methods on [`NavController`] and applies the [`bus::NavCommand`]s it
//! emits; fetch commands go to the `runtime_net` loop, which reports back
//! as [`bus::NavEvent`]s.
//!
//! Invariants:
//! - `nav_gen` is the navigation/request generation counter. Fetch
//!   completions are gated through it so a stale response never overwrites
//!   content belonging to a later navigation.
//! - At most one sidebar expansion marker is persisted at a time; it is
//!   overwritten on every navigation.
//! - Browser differences live entirely in the injected [`Quirks`] value;
//!   the controller itself holds no engine detection.

mod config;
mod controller;
mod dispatch;
mod location;
mod quirks;
mod session;
mod sidebar;

pub use config::NavConfig;
pub use controller::{NavController, PageContext};
pub use dispatch::{ClickAction, ClickOutcome};
pub use location::{LinkTarget, normalize};
pub use quirks::{BrowserFamily, Quirks};
pub use session::{InMemorySession, SIDEBAR_KEY, SessionStore};
pub use sidebar::{SidebarGroup, SidebarModel, SidebarSnapshot};
