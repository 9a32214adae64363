use crate::location::LinkTarget;

/// What an intercepted click should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Leave the click to the browser (cross-origin, media downloads).
    Ignore,
    /// Swap content and scroll to the named anchor; the history entry
    /// keeps the current document title.
    FragmentNav,
    /// Swap content using the link's own title.
    ContentNav,
}

/// Whether the host should suppress the browser's default navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Handled,
    NotHandled,
}

struct Rule {
    name: &'static str,
    applies: fn(&LinkTarget) -> bool,
    action: ClickAction,
}

// Evaluated top to bottom, first match wins; anything that falls through
// is an ordinary in-site document link.
const RULES: &[Rule] = &[
    Rule {
        name: "cross-origin",
        applies: |target| !target.same_origin,
        action: ClickAction::Ignore,
    },
    Rule {
        name: "media",
        applies: LinkTarget::is_media,
        action: ClickAction::Ignore,
    },
    Rule {
        name: "fragment",
        applies: |target| target.fragment().is_some(),
        action: ClickAction::FragmentNav,
    },
];

pub fn classify(target: &LinkTarget) -> ClickAction {
    for rule in RULES {
        if (rule.applies)(target) {
            log::debug!("click rule '{}' matched {}", rule.name, target.path);
            return rule.action;
        }
    }
    ClickAction::ContentNav
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn target(href: &str) -> LinkTarget {
        let base = Url::parse("https://docs.example.com/guide/index.html").unwrap();
        LinkTarget::resolve(&base, href).unwrap()
    }

    #[test]
    fn cross_origin_links_are_ignored() {
        assert_eq!(
            classify(&target("https://other.example.com/page.html")),
            ClickAction::Ignore
        );
    }

    #[test]
    fn media_links_are_ignored_even_cross_origin() {
        assert_eq!(classify(&target("/download/manual.pdf")), ClickAction::Ignore);
        assert_eq!(
            classify(&target("https://other.example.com/manual.pdf")),
            ClickAction::Ignore
        );
    }

    #[test]
    fn fragment_links_keep_the_page_title() {
        assert_eq!(classify(&target("/guide#section2")), ClickAction::FragmentNav);
    }

    #[test]
    fn plain_document_links_fall_through_to_content_navigation() {
        assert_eq!(classify(&target("/api/index.html")), ClickAction::ContentNav);
    }
}
