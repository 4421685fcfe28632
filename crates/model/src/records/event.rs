use std::collections::HashMap;

/// One record drained from the upstream channel.
///
/// Headers carry transport metadata as string pairs; the body is an opaque
/// byte payload expected to decode as a JSON object. Events are read-only
/// once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Event {
    pub fn new(headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Event { headers, body }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup() {
        let mut headers = HashMap::new();
        headers.insert("host".to_string(), "h1".to_string());
        let event = Event::new(headers, br#"{"id":1}"#.to_vec());

        assert_eq!(event.header("host"), Some("h1"));
        assert_eq!(event.header("missing"), None);
        assert_eq!(event.headers().len(), 1);
        assert_eq!(event.body(), br#"{"id":1}"#);
    }
}
