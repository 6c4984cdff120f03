//! Local cart persistence
//!
//! One JSON file holding the serialized cart lines, read once at session
//! start and rewritten after every cart mutation. Strictly best-effort: a
//! missing or corrupt file falls back to an empty cart, and write failures
//! are logged and swallowed. No versioning, no migration.

use std::path::{Path, PathBuf};

use crate::domain::aggregates::CartItem;

pub const DEFAULT_CART_FILE: &str = "b2b_cart.json";

#[derive(Clone, Debug)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Read the stored cart. Never errors: a missing file is an empty cart,
    /// and unreadable or malformed content is discarded with a warning.
    pub fn load(&self) -> Vec<CartItem> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return vec![],
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "could not read stored cart, starting empty");
                return vec![];
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "stored cart is corrupt, discarding");
                vec![]
            }
        }
    }

    /// Write the cart. Failures are logged, never propagated.
    pub fn save(&self, items: &[CartItem]) {
        let payload = match serde_json::to_string(items) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "could not serialize cart, skipping save");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, payload) {
            tracing::warn!(path = %self.path.display(), error = %err, "could not persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;
    use rust_decimal::Decimal;

    fn item(id: &str, qty: u32) -> CartItem {
        CartItem {
            product_id: id.into(),
            name: format!("Item {id}"),
            category: "Test".into(),
            unit_price: Money::brl(Decimal::new(100, 0)),
            quantity: qty,
        }
    }

    #[test]
    fn test_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join(DEFAULT_CART_FILE));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CART_FILE);
        std::fs::write(&path, "{not json").unwrap();
        let store = CartStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join(DEFAULT_CART_FILE));
        store.save(&[item("p1", 2), item("p2", 1)]);
        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].product_id, "p1");
        assert_eq!(loaded[0].quantity, 2);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = CartStore::new("/nonexistent-dir/b2b_cart.json");
        store.save(&[item("p1", 1)]); // must not panic
    }
}
