use std::collections::HashMap;

/// Flat string key-value startup configuration, as handed over by whatever
/// loads the deployment config. Typed interpretation happens in the sink's
/// configuration layer.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    inner: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_reads_back() {
        let props: Properties = [("table", "t"), ("batchSize", "25")].into_iter().collect();
        assert!(!props.is_empty());
        assert_eq!(props.get("table"), Some("t"));
        assert_eq!(props.get_string("batchSize"), Some("25".to_string()));
        assert_eq!(props.get("missing"), None);
        assert_eq!(props.len(), 2);
    }
}
