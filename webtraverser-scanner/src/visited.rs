use std::collections::HashSet;

/// URLs already fetched during one traversal.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Test-and-set. Returns `true` only for the first insertion of `url`.
    pub fn mark(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_only_succeeds_once() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.mark("http://example.com"));
        assert!(!visited.mark("http://example.com"));
        assert!(visited.contains("http://example.com"));
        assert!(!visited.contains("http://example.com/"));
        assert_eq!(visited.len(), 1);
    }
}
