use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A provider's response body, kept exactly as the provider shaped it
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload(Arc<Value>);

impl RawPayload {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `null`, `{}` and `[]` carry no market data
    pub fn is_empty(&self) -> bool {
        match self.0.as_ref() {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Walk `path` one object key at a time
    pub fn field(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self.0.as_ref(), |value, key| value.get(*key))
    }

    /// Numeric value at `path`. Numeric strings are accepted since some
    /// explorers quote their numbers.
    pub fn field_f64(&self, path: &[&str]) -> Option<f64> {
        let number = match self.field(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        number.is_finite().then_some(number)
    }

    /// Keys of the object at `path`. Empty if absent.
    pub fn keys_at(&self, path: &[&str]) -> Vec<String> {
        match self.field(path) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub payload: RawPayload,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.fetched_at
    }
}

/// Most recent successful payload of one market source. In-memory only.
///
/// The entry is replaced wholesale on every store and never cleared, so a
/// failed fetch leaves the previous data in place.
#[derive(Debug, Default)]
pub struct PriceCache {
    entry: RwLock<Option<CacheEntry>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Option<CacheEntry> {
        self.entry.read().await.clone()
    }

    pub async fn payload(&self) -> Option<RawPayload> {
        self.entry
            .read()
            .await
            .as_ref()
            .map(|entry| entry.payload.clone())
    }

    pub async fn is_empty(&self) -> bool {
        self.entry
            .read()
            .await
            .as_ref()
            .map_or(true, |entry| entry.payload.is_empty())
    }

    pub async fn store(&self, payload: RawPayload) -> CacheEntry {
        let entry = CacheEntry {
            payload,
            fetched_at: Utc::now(),
        };
        *self.entry.write().await = Some(entry.clone());
        entry
    }

    pub async fn age(&self) -> Option<chrono::Duration> {
        self.entry.read().await.as_ref().map(CacheEntry::age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_emptiness() {
        assert!(RawPayload::new(Value::Null).is_empty());
        assert!(RawPayload::new(json!({})).is_empty());
        assert!(RawPayload::new(json!([])).is_empty());
        assert!(!RawPayload::new(json!({ "a": 1 })).is_empty());
        assert!(!RawPayload::new(json!(0)).is_empty());
    }

    #[test]
    fn test_field_lookup() {
        let payload = RawPayload::new(json!({
            "market_data": { "current_price": { "usd": 0.0123, "btc": "0.0000002" } },
            "name": "AI Power Grid"
        }));

        assert_eq!(payload.field_f64(&["market_data", "current_price", "usd"]), Some(0.0123));
        assert_eq!(payload.field_f64(&["market_data", "current_price", "btc"]), Some(0.0000002));
        assert_eq!(payload.field_f64(&["market_data", "current_price", "eur"]), None);
        assert_eq!(payload.field_f64(&["name"]), None);
        assert_eq!(
            payload.keys_at(&["market_data", "current_price"]),
            vec!["btc".to_string(), "usd".to_string()]
        );
        assert!(payload.keys_at(&["missing"]).is_empty());
    }

    #[tokio::test]
    async fn test_store_replaces_entry() {
        let cache = PriceCache::new();
        assert!(cache.is_empty().await);
        assert!(cache.age().await.is_none());

        cache.store(RawPayload::new(json!({ "a": 1 }))).await;
        cache.store(RawPayload::new(json!({ "b": 2 }))).await;

        let payload = cache.payload().await.unwrap();
        assert_eq!(payload.as_value(), &json!({ "b": 2 }));
        assert!(!cache.is_empty().await);
        assert!(cache.age().await.unwrap() >= chrono::Duration::zero());
    }
}
