use serde::Serialize;
use std::fmt;

/// Deterministic identifier of a logical request: operation name plus its
/// parameters serialized as a JSON object with sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(operation: &str, params: serde_json::Value) -> Self {
        // serde_json's default Map is a BTreeMap, so object keys serialize
        // in sorted order regardless of insertion order.
        let params = match params {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        CacheKey(format!("{operation}_{params}"))
    }

    pub fn bare(operation: &str) -> Self {
        Self::new(operation, serde_json::Value::Null)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_order_does_not_matter() {
        let a = CacheKey::new("coins", json!({"page": 1, "perPage": 10}));
        let b = CacheKey::new("coins", json!({"perPage": 10, "page": 1}));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), r#"coins_{"page":1,"perPage":10}"#);
    }

    #[test]
    fn test_distinct_params_distinct_keys() {
        let a = CacheKey::new("history", json!({"coinId": "bitcoin", "days": 7}));
        let b = CacheKey::new("history", json!({"coinId": "bitcoin", "days": 30}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_bare_key() {
        assert_eq!(CacheKey::bare("global").as_str(), "global_{}");
    }
}
