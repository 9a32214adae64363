/// The host's one-time description of the sidebar tree: collapsible groups
/// of links, in document order. Group indices in commands refer back to
/// this snapshot.
#[derive(Clone, Debug, Default)]
pub struct SidebarSnapshot {
    pub groups: Vec<SidebarGroup>,
}

#[derive(Clone, Debug, Default)]
pub struct SidebarGroup {
    /// Site-relative hrefs, possibly carrying a fragment.
    pub links: Vec<String>,
}

impl SidebarSnapshot {
    pub fn from_groups<I, L, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|links| SidebarGroup {
                    links: links.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }
}

/// Active/expanded state of the sidebar tree.
///
/// At most one link is active. Groups open and close independently;
/// activating a link opens its containing group without closing others.
#[derive(Debug, Default)]
pub struct SidebarModel {
    groups: Vec<SidebarGroup>,
    active: Option<String>,
    open: Vec<bool>,
}

impl SidebarModel {
    pub fn new(snapshot: SidebarSnapshot) -> Self {
        let open = vec![false; snapshot.groups.len()];
        Self {
            groups: snapshot.groups,
            active: None,
            open,
        }
    }

    pub fn contains_link(&self, href: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.links.iter().any(|link| link == href))
    }

    /// Make `href` the single active link and open its group. A href not
    /// present in the tree clears the active link, same as the class sweep
    /// the host performs.
    pub fn activate(&mut self, href: &str) -> bool {
        let group = self
            .groups
            .iter()
            .position(|group| group.links.iter().any(|link| link == href));
        match group {
            Some(index) => {
                self.active = Some(href.to_string());
                self.open[index] = true;
                true
            }
            None => {
                self.active = None;
                false
            }
        }
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn toggle_group(&mut self, index: usize) {
        if let Some(open) = self.open.get_mut(index) {
            *open = !*open;
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn open_groups(&self) -> Vec<usize> {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(index, open)| open.then_some(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SidebarModel {
        SidebarModel::new(SidebarSnapshot::from_groups([
            vec!["/guide/index.html", "/guide/install.html"],
            vec!["/api/index.html"],
        ]))
    }

    #[test]
    fn activation_is_exclusive_and_opens_the_containing_group() {
        let mut sidebar = model();
        assert!(sidebar.activate("/guide/install.html"));
        assert!(sidebar.activate("/api/index.html"));
        assert_eq!(sidebar.active(), Some("/api/index.html"));
        // group 0 stays open from the earlier activation
        assert_eq!(sidebar.open_groups(), vec![0, 1]);
    }

    #[test]
    fn activating_an_unknown_href_clears_the_active_link() {
        let mut sidebar = model();
        sidebar.activate("/guide/index.html");
        assert!(!sidebar.activate("/missing.html"));
        assert_eq!(sidebar.active(), None);
    }

    #[test]
    fn groups_toggle_independently() {
        let mut sidebar = model();
        sidebar.toggle_group(0);
        sidebar.toggle_group(1);
        assert_eq!(sidebar.open_groups(), vec![0, 1]);
        sidebar.toggle_group(0);
        assert_eq!(sidebar.open_groups(), vec![1]);
        // out-of-range toggle is a no-op
        sidebar.toggle_group(9);
        assert_eq!(sidebar.open_groups(), vec![1]);
    }
}
