use std::collections::HashMap;

/// Key under which the sidebar expansion marker is persisted.
pub const SIDEBAR_KEY: &str = "sidebar-expanded";

/// Page-session-scoped key-value persistence. Hosts back this with the
/// browser's sessionStorage; tests use [`InMemorySession`].
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySession {
    values: HashMap<String, String>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(key: &str, value: &str) -> Self {
        let mut session = Self::default();
        session.set(key, value);
        session
    }
}

impl SessionStore for InMemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_overwritten_not_accumulated() {
        let mut session = InMemorySession::new();
        session.set(SIDEBAR_KEY, "/guide/index.html");
        session.set(SIDEBAR_KEY, "/api/index.html");
        assert_eq!(session.get(SIDEBAR_KEY).as_deref(), Some("/api/index.html"));
        session.remove(SIDEBAR_KEY);
        assert_eq!(session.get(SIDEBAR_KEY), None);
    }
}
