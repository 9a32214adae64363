/// Site-level settings injected at construction.
#[derive(Clone, Debug)]
pub struct NavConfig {
    /// Title used for baseline and canonicalization history entries.
    pub site_name: String,
    /// Path prefix identifying search result pages.
    pub search_prefix: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            site_name: "Docs".to_string(),
            search_prefix: "/search".to_string(),
        }
    }
}
