use url::{Position, Url};

/// Suffixes the server serves as raw media; links to these always take the
/// normal full-navigation path.
pub const MEDIA_SUFFIXES: &[&str] = &[".png", ".jpeg", ".pptx", ".pdf", ".xml"];

/// Canonicalize a directory path to its `index.html` form.
///
/// A path without a dot has no file extension and is served as a
/// directory; the sidebar and history entries need the literal resolved
/// file path, so `index.html` is appended (with a joining slash when the
/// path does not already end in one). Paths with an extension pass
/// through unchanged, which makes this idempotent.
pub fn normalize(path: &str) -> String {
    if path.contains('.') {
        return path.to_string();
    }
    if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        format!("{path}/index.html")
    }
}

/// Split `"/guide#section2"` into `("/guide", Some("section2"))`.
pub fn split_fragment(path: &str) -> (&str, Option<&str>) {
    match path.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (path, None),
    }
}

/// The pathname portion: everything before the first query or fragment
/// delimiter.
pub fn path_only(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

pub fn is_search_path(path: &str, search_prefix: &str) -> bool {
    path.contains(search_prefix)
}

pub fn is_media_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    MEDIA_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// A clicked link resolved against the document base.
#[derive(Clone, Debug)]
pub struct LinkTarget {
    pub absolute: Url,
    /// Site-relative form: path plus query plus fragment.
    pub path: String,
    pub same_origin: bool,
}

impl LinkTarget {
    pub fn resolve(base: &Url, href: &str) -> Result<Self, url::ParseError> {
        let absolute = base.join(href)?;
        let same_origin = absolute.origin() == base.origin();
        let path = absolute[Position::BeforePath..].to_string();
        Ok(Self {
            absolute,
            path,
            same_origin,
        })
    }

    pub fn fragment(&self) -> Option<&str> {
        self.absolute.fragment()
    }

    pub fn is_media(&self) -> bool {
        is_media_path(self.absolute.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_index_html_to_directory_paths() {
        assert_eq!(normalize("/docs/"), "/docs/index.html");
        assert_eq!(normalize("/docs"), "/docs/index.html");
    }

    #[test]
    fn normalize_leaves_file_paths_alone() {
        assert_eq!(normalize("/docs/page.html"), "/docs/page.html");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("/docs");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn split_fragment_handles_both_shapes() {
        assert_eq!(split_fragment("/guide#section2"), ("/guide", Some("section2")));
        assert_eq!(split_fragment("/guide"), ("/guide", None));
    }

    #[test]
    fn path_only_strips_query_and_fragment() {
        assert_eq!(path_only("/search?q=x"), "/search");
        assert_eq!(path_only("/guide#s"), "/guide");
        assert_eq!(path_only("/guide/index.html"), "/guide/index.html");
    }

    #[test]
    fn media_suffix_check_is_case_insensitive() {
        assert!(is_media_path("/assets/Diagram.PNG"));
        assert!(is_media_path("/download/slides.pptx"));
        assert!(!is_media_path("/guide/index.html"));
    }

    #[test]
    fn resolve_marks_cross_origin_links() {
        let base = Url::parse("https://docs.example.com/guide/index.html").unwrap();
        let target = LinkTarget::resolve(&base, "https://other.example.com/x").unwrap();
        assert!(!target.same_origin);

        let target = LinkTarget::resolve(&base, "/api/index.html").unwrap();
        assert!(target.same_origin);
        assert_eq!(target.path, "/api/index.html");
    }

    #[test]
    fn resolve_keeps_query_and_fragment_in_the_relative_path() {
        let base = Url::parse("https://docs.example.com/").unwrap();
        let target = LinkTarget::resolve(&base, "/guide#section2").unwrap();
        assert_eq!(target.path, "/guide#section2");
        assert_eq!(target.fragment(), Some("section2"));
    }
}
