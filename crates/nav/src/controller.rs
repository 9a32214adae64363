use std::sync::mpsc::Sender;

use bus::{NavCommand, NavEvent};
use core_types::{HistoryEntry, RequestId};
use url::Url;

use crate::config::NavConfig;
use crate::dispatch::{ClickAction, ClickOutcome, classify};
use crate::location::{self, LinkTarget};
use crate::quirks::Quirks;
use crate::session::{SIDEBAR_KEY, SessionStore};
use crate::sidebar::{SidebarModel, SidebarSnapshot};

/// Everything the host knows about the document at ready time.
pub struct PageContext {
    /// Absolute `location.href`.
    pub href: String,
    pub title: String,
    /// State already attached to the current history entry, if any.
    pub history_state: Option<HistoryEntry>,
    pub sidebar: SidebarSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PopPhase {
    InitialUnpopped,
    Popped,
}

struct PendingSwap {
    request_id: RequestId,
    fragment: Option<String>,
    // Revert point for the optimistic title/sidebar updates.
    revert_title: String,
    revert_marker: Option<String>,
}

pub struct NavController {
    config: NavConfig,
    quirks: Quirks,
    session: Box<dyn SessionStore>,

    cmd_tx: Option<Sender<NavCommand>>,

    base: Option<Url>,
    initial_href: String,
    had_initial_state: bool,
    pushed_any: bool,
    phase: PopPhase,

    title: String,
    /// Site-relative current location: path plus query plus fragment.
    current_path: String,
    nav_gen: RequestId,
    pending: Option<PendingSwap>,
    sidebar: SidebarModel,
    last_status: Option<String>,
}

impl NavController {
    pub fn new(config: NavConfig, quirks: Quirks, session: Box<dyn SessionStore>) -> Self {
        Self {
            config,
            quirks,
            session,
            cmd_tx: None,
            base: None,
            initial_href: String::new(),
            had_initial_state: false,
            pushed_any: false,
            phase: PopPhase::InitialUnpopped,
            title: String::new(),
            current_path: String::new(),
            nav_gen: 0,
            pending: None,
            sidebar: SidebarModel::default(),
            last_status: None,
        }
    }

    pub fn set_command_sender(&mut self, tx: Sender<NavCommand>) {
        self.cmd_tx = Some(tx);
    }

    pub fn status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    // -- Lifecycle ---

    /// Run once when the document is ready: seed the pop-phase, mark the
    /// sidebar link matching the landing URL, and resolve the initial
    /// hash/URL (canonicalization, marker restore, baseline entry).
    pub fn on_ready(&mut self, ctx: PageContext) -> Result<(), &'static str> {
        let base = Url::parse(&ctx.href).map_err(|_| "invalid document URL")?;
        self.current_path = base[url::Position::BeforePath..].to_string();
        self.initial_href = ctx.href;
        self.title = ctx.title;
        self.had_initial_state = ctx.history_state.is_some();
        // A load already carrying state for a different URL came in via
        // back/forward; its first popstate is a real one.
        self.phase = match &ctx.history_state {
            Some(state) if state.path != self.current_path => PopPhase::Popped,
            _ => PopPhase::InitialUnpopped,
        };
        self.sidebar = SidebarModel::new(ctx.sidebar);
        self.base = Some(base);

        let (path, fragment) = location::split_fragment(&self.current_path);
        let mut landing = location::normalize(location::path_only(path));
        if let Some(fragment) = fragment {
            landing = format!("{landing}#{fragment}");
        }
        if self.sidebar.contains_link(&landing) {
            self.set_sidebar(&landing);
        }

        self.resolve_initial_location();
        Ok(())
    }

    // -- UI events ---

    /// Delegated anchor-click handler. `href` is as written in the
    /// document (absolute or relative); `link_title` is the anchor's
    /// `title` attribute. `NotHandled` means the browser's own navigation
    /// must proceed.
    pub fn on_anchor_click(&mut self, href: &str, link_title: Option<&str>) -> ClickOutcome {
        let Some(base) = &self.base else {
            return ClickOutcome::NotHandled;
        };
        let target = match LinkTarget::resolve(base, href) {
            Ok(target) => target,
            Err(_) => return ClickOutcome::NotHandled,
        };

        let title = match classify(&target) {
            ClickAction::Ignore => return ClickOutcome::NotHandled,
            // Fragment navigation stays on the same page; keep its title.
            ClickAction::FragmentNav => self.title.clone(),
            ClickAction::ContentNav => link_title.unwrap_or_default().to_string(),
        };

        let path = target.path;
        log::debug!("intercepted click on {path}");
        self.push_history(HistoryEntry::new(title.clone(), path.clone()));
        self.fetch_and_swap(&title, &path);
        ClickOutcome::Handled
    }

    /// Search form submission. The query is percent-encoded; search always
    /// takes a full navigation, never a fragment swap.
    pub fn on_search_submit(&mut self, query: &str) {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let path = format!("{}?q={}", self.config.search_prefix, encoded);
        self.push_history(HistoryEntry::new("Search", path.clone()));
        self.search_swap(&path, false);
    }

    /// Host-invoked search navigation, e.g. a "view all results" control
    /// in rendered markup. `store_session` persists the current path as
    /// the expansion marker before leaving, so the sidebar context can be
    /// restored on the way back from the results page.
    pub fn on_search_navigate(&mut self, url: &str, store_session: bool) {
        self.search_swap(url, store_session);
    }

    pub fn on_sidebar_group_toggled(&mut self, group: usize) {
        self.sidebar.toggle_group(group);
        self.apply_sidebar();
    }

    /// Back/forward navigation. `current_href` is `location.href` at event
    /// time (the browser has already moved).
    pub fn on_popstate(&mut self, state: Option<HistoryEntry>, current_href: &str) {
        let initial_pop =
            self.phase == PopPhase::InitialUnpopped && current_href == self.initial_href;
        self.phase = PopPhase::Popped;

        if self.quirks.spurious_popstate_on_load && initial_pop {
            // Load-time popstate with no actual navigation; give the page
            // a real entry instead of acting on it.
            let pathname = location::path_only(&self.current_path).to_string();
            self.push_history(HistoryEntry::new(self.title.clone(), pathname));
            return;
        }

        match state {
            Some(entry) => {
                if location::is_search_path(&entry.path, &self.config.search_prefix) {
                    self.search_swap(&entry.path, false);
                } else {
                    let title = entry.title.clone();
                    self.fetch_and_swap(&title, &entry.path);
                }
            }
            None => {
                let pathname = Url::parse(current_href)
                    .map(|url| url.path().to_string())
                    .unwrap_or_default();
                if self.quirks.loses_search_history_state
                    && location::is_search_path(&pathname, &self.config.search_prefix)
                {
                    self.send(NavCommand::Reload);
                }
            }
        }
    }

    // -- Fetch completions ---

    pub fn on_net_event(&mut self, evt: NavEvent) {
        match evt {
            NavEvent::FragmentLoaded { request_id, html } if self.is_current(request_id) => {
                let pending = self.pending.take();
                self.send(NavCommand::ReplaceContent { html });
                self.send(NavCommand::HighlightAll);
                match pending.and_then(|p| p.fragment) {
                    Some(name) => self.send(NavCommand::ScrollToAnchor { name }),
                    None => self.send(NavCommand::ScrollContentTop),
                }
                self.last_status = Some(format!("loaded {}", self.current_path));
            }
            NavEvent::FragmentFailed { request_id, error } if self.is_current(request_id) => {
                log::warn!("navigation fetch failed: {error}");
                if let Some(pending) = self.pending.take() {
                    let revert_title = pending.revert_title;
                    self.set_title(&revert_title);
                    match pending.revert_marker {
                        Some(marker) => self.set_sidebar(&marker),
                        None => {
                            self.session.remove(SIDEBAR_KEY);
                            self.sidebar.deactivate();
                            self.apply_sidebar();
                        }
                    }
                }
                self.send(NavCommand::ShowError {
                    message: format!("navigation failed: {error}"),
                });
                self.last_status = Some(format!("error: {error}"));
            }
            // Stale generation: a newer navigation superseded this one.
            _ => {}
        }
    }

    fn is_current(&self, request_id: RequestId) -> bool {
        request_id == self.nav_gen
            && self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.request_id == request_id)
    }

    // -- Internal helpers ---

    /// Issue the fragment fetch for `path` and optimistically move the
    /// title and sidebar; both are rolled back if the fetch fails.
    fn fetch_and_swap(&mut self, title: &str, path: &str) {
        let Some(origin) = self.origin() else { return };
        let (base_path, fragment) = location::split_fragment(path);

        if self.nav_gen > 0 {
            self.send(NavCommand::CancelFetch {
                request_id: self.nav_gen,
            });
        }
        self.nav_gen = self.nav_gen.wrapping_add(1);
        let request_id = self.nav_gen;

        self.pending = Some(PendingSwap {
            request_id,
            fragment: fragment.map(str::to_string),
            revert_title: self.title.clone(),
            revert_marker: self.session.get(SIDEBAR_KEY),
        });
        self.send(NavCommand::FetchFragment {
            request_id,
            url: format!("{origin}{base_path}?ajax=true"),
        });

        let base_path = base_path.to_string();
        self.set_title(title);
        self.set_sidebar(&base_path);
        self.current_path = path.to_string();
        self.last_status = Some(format!("fetching {base_path}"));
    }

    /// Search results replace the sidebar context entirely, so this is a
    /// full navigation. `store_session` persists the pre-navigation path
    /// first so the sidebar can be restored on the way back.
    fn search_swap(&mut self, url: &str, store_session: bool) {
        if store_session {
            let current = location::path_only(&self.current_path).to_string();
            self.set_sidebar(&current);
        }
        self.send(NavCommand::NavigateFull {
            url: url.to_string(),
        });
        self.set_title("Search");
    }

    /// The `goToHash` step: force a re-scroll to the landing fragment, or
    /// canonicalize a directory URL to its `index.html` form, then restore
    /// the persisted sidebar marker and lay down a baseline history entry
    /// where the engine tolerates one.
    fn resolve_initial_location(&mut self) {
        let (path, fragment) = {
            let (p, f) = location::split_fragment(&self.current_path);
            (p.to_string(), f.map(str::to_string))
        };

        match fragment {
            Some(fragment) => {
                if self.quirks.rescrolls_hash_via_href {
                    let href = self.initial_href.clone();
                    self.send(NavCommand::ReassignHref { href: href.clone() });
                    self.send(NavCommand::ReassignHref { href });
                } else {
                    self.send(NavCommand::ReassignHash { hash: fragment });
                }
            }
            None => {
                if !location::is_search_path(&path, &self.config.search_prefix) {
                    let pathname = location::path_only(&path).to_string();
                    let normalized = location::normalize(&pathname);
                    if normalized != pathname {
                        self.push_history(HistoryEntry::new(
                            self.config.site_name.clone(),
                            normalized.clone(),
                        ));
                        if let Some(origin) = self.origin() {
                            let href = format!("{origin}{normalized}");
                            self.send(NavCommand::ReassignHref { href: href.clone() });
                            self.send(NavCommand::ReassignHref { href });
                        }
                        self.current_path = normalized;
                    }
                }
                self.send(NavCommand::ScrollMainTop);
            }
        }

        self.expand_sidebar_from_session();

        if self.quirks.tolerates_baseline_push && !self.had_initial_state && !self.pushed_any {
            let pathname = location::path_only(&self.current_path).to_string();
            if !location::is_search_path(&pathname, &self.config.search_prefix) {
                self.push_history(HistoryEntry::new(self.config.site_name.clone(), pathname));
            }
        }
    }

    fn expand_sidebar_from_session(&mut self) {
        if let Some(marker) = self.session.get(SIDEBAR_KEY) {
            let href = location::normalize(&marker);
            self.sidebar.activate(&href);
            self.apply_sidebar();
        }
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.pushed_any = true;
        self.current_path = entry.path.clone();
        self.send(NavCommand::PushHistory { entry });
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.send(NavCommand::SetTitle {
            title: title.to_string(),
        });
    }

    /// Activate `href`, persist it as the expansion marker, and push the
    /// class changes out to the host.
    fn set_sidebar(&mut self, href: &str) {
        self.sidebar.activate(href);
        self.session.set(SIDEBAR_KEY, href);
        self.apply_sidebar();
    }

    fn apply_sidebar(&self) {
        self.send(NavCommand::ApplySidebar {
            active: self.sidebar.active().map(str::to_string),
            open_groups: self.sidebar.open_groups(),
        });
    }

    fn origin(&self) -> Option<String> {
        self.base
            .as_ref()
            .map(|base| base.origin().ascii_serialization())
    }

    fn send(&self, cmd: NavCommand) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(cmd);
        }
    }
}
