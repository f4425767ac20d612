//! Named in-memory sample buffers.

use indexmap::IndexMap;

/// Insertion-ordered store of named `f64` sample series.
///
/// Detector timestreams and derived quantities are stored under keys of
/// the form `"<prefix>_<detector>"`.
///
/// # Examples
///
/// ```
/// use tod_core::Cache;
///
/// let mut cache = Cache::new();
/// cache.put("total_detA", vec![1.0, 2.0, 3.0]);
/// assert!(cache.exists("total_detA"));
/// assert_eq!(cache.reference("total_detA"), Some(&[1.0, 2.0, 3.0][..]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cache {
    buffers: IndexMap<String, Vec<f64>>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `name`, returning the buffer it replaced.
    pub fn put(&mut self, name: impl Into<String>, data: Vec<f64>) -> Option<Vec<f64>> {
        self.buffers.insert(name.into(), data)
    }

    /// Borrow the buffer stored under `name`.
    pub fn reference(&self, name: &str) -> Option<&[f64]> {
        self.buffers.get(name).map(|v| v.as_slice())
    }

    /// Whether a buffer is stored under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.buffers.contains_key(name)
    }

    /// Remove and return the buffer stored under `name`.
    pub fn destroy(&mut self, name: &str) -> Option<Vec<f64>> {
        self.buffers.shift_remove(name)
    }

    /// Buffer names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buffers.keys().map(|k| k.as_str())
    }

    /// Number of stored buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether the cache holds no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_and_returns_previous() {
        let mut cache = Cache::new();
        assert!(cache.put("a", vec![1.0]).is_none());
        assert_eq!(cache.put("a", vec![2.0]), Some(vec![1.0]));
        assert_eq!(cache.reference("a"), Some(&[2.0][..]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn destroy_preserves_order_of_the_rest() {
        let mut cache = Cache::new();
        cache.put("a", vec![]);
        cache.put("b", vec![]);
        cache.put("c", vec![]);
        assert!(cache.destroy("b").is_some());
        assert!(!cache.exists("b"));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn missing_reference_is_none() {
        let cache = Cache::new();
        assert!(cache.is_empty());
        assert!(cache.reference("total_detA").is_none());
    }
}
