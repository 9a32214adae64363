/// Engine family, as detected by the host at startup.
///
/// `Webkit` covers the Blink/Chrome lineage whose user agent still carries
/// the AppleWebKit marker; `Legacy` is everything with none of the sniffed
/// markers (old IE/Edge lines).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserFamily {
    Gecko,
    Safari,
    Webkit,
    Legacy,
}

/// Capability table for history/hash behavior that differs per engine.
///
/// The controller branches only on these flags, never on the family
/// itself, so the navigation logic stays a function of (quirks, event).
#[derive(Clone, Copy, Debug)]
pub struct Quirks {
    pub family: BrowserFamily,
    /// Fires a popstate right after load with no actual navigation.
    pub spurious_popstate_on_load: bool,
    /// Ignores a same-value `location.hash` write; re-scrolling needs the
    /// full href reassigned (twice, the first write is dropped).
    pub rescrolls_hash_via_href: bool,
    /// Arrives with null history state when navigating back into a search
    /// results page; the only recovery is a full reload.
    pub loses_search_history_state: bool,
    /// Safe to push a baseline history entry at load. Safari miscounts
    /// the session stack when a script pushes before any user navigation.
    pub tolerates_baseline_push: bool,
}

impl Quirks {
    pub fn for_family(family: BrowserFamily) -> Self {
        match family {
            BrowserFamily::Gecko => Self {
                family,
                spurious_popstate_on_load: false,
                rescrolls_hash_via_href: false,
                loses_search_history_state: true,
                tolerates_baseline_push: true,
            },
            BrowserFamily::Safari => Self {
                family,
                spurious_popstate_on_load: true,
                rescrolls_hash_via_href: true,
                loses_search_history_state: false,
                tolerates_baseline_push: false,
            },
            BrowserFamily::Webkit => Self {
                family,
                spurious_popstate_on_load: true,
                rescrolls_hash_via_href: true,
                loses_search_history_state: false,
                tolerates_baseline_push: true,
            },
            BrowserFamily::Legacy => Self {
                family,
                spurious_popstate_on_load: true,
                rescrolls_hash_via_href: false,
                loses_search_history_state: false,
                tolerates_baseline_push: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gecko_is_the_only_family_without_the_load_time_popstate() {
        for family in [
            BrowserFamily::Gecko,
            BrowserFamily::Safari,
            BrowserFamily::Webkit,
            BrowserFamily::Legacy,
        ] {
            let quirks = Quirks::for_family(family);
            assert_eq!(
                quirks.spurious_popstate_on_load,
                family != BrowserFamily::Gecko
            );
        }
    }

    #[test]
    fn safari_is_the_only_family_refusing_the_baseline_push() {
        assert!(!Quirks::for_family(BrowserFamily::Safari).tolerates_baseline_push);
        assert!(Quirks::for_family(BrowserFamily::Webkit).tolerates_baseline_push);
        assert!(Quirks::for_family(BrowserFamily::Gecko).tolerates_baseline_push);
    }

    #[test]
    fn only_gecko_loses_search_history_state() {
        assert!(Quirks::for_family(BrowserFamily::Gecko).loses_search_history_state);
        assert!(!Quirks::for_family(BrowserFamily::Legacy).loses_search_history_state);
    }
}
