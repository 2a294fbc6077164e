// ── Entity store ──
//
// In-memory cache of the two server-owned collections. The backend is
// the single source of truth: a collection only ever changes by being
// replaced wholesale with a fresh server snapshot, never by local
// patching. Consumers either grab the current snapshot or subscribe to
// the watch channel and re-render on change.

use std::cmp::Ordering;
use std::sync::Arc;

use strum::Display;
use tokio::sync::watch;
use tracing::debug;

use crate::model::{Product, Purchase};

/// One cached collection behind a watch channel. Snapshots are `Arc`ed
/// so readers never block writers and vice versa.
#[derive(Debug)]
struct Collection<T> {
    tx: watch::Sender<Arc<Vec<T>>>,
}

impl<T> Collection<T> {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx }
    }

    fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.tx.borrow())
    }

    fn replace(&self, items: Vec<T>) {
        // send_replace never fails: the sender keeps the channel alive
        // even with zero receivers.
        self.tx.send_replace(Arc::new(items));
    }

    fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.tx.subscribe()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort key for product views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    Name,
    Quantity,
    Price,
}

/// Sort direction for product views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// The client-side cache of products and purchases.
///
/// Derived views ([`filtered_by`](Self::filtered_by),
/// [`sorted_by`](Self::sorted_by)) are pure functions over the current
/// snapshot, recomputed per call and never stored.
#[derive(Debug, Default)]
pub struct EntityStore {
    products: Collection<Product>,
    purchases: Collection<Purchase>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn products(&self) -> Arc<Vec<Product>> {
        self.products.snapshot()
    }

    pub fn purchases(&self) -> Arc<Vec<Purchase>> {
        self.purchases.snapshot()
    }

    pub fn product_by_id(&self, id: i64) -> Option<Product> {
        self.products().iter().find(|p| p.id == id).cloned()
    }

    // ── Watch subscriptions ──────────────────────────────────────────

    pub fn watch_products(&self) -> watch::Receiver<Arc<Vec<Product>>> {
        self.products.subscribe()
    }

    pub fn watch_purchases(&self) -> watch::Receiver<Arc<Vec<Purchase>>> {
        self.purchases.subscribe()
    }

    // ── Replacement (fetch results only) ─────────────────────────────

    pub(crate) fn replace_products(&self, items: Vec<Product>) {
        debug!(count = items.len(), "products snapshot replaced");
        self.products.replace(items);
    }

    pub(crate) fn replace_purchases(&self, items: Vec<Purchase>) {
        debug!(count = items.len(), "purchases snapshot replaced");
        self.purchases.replace(items);
    }

    /// Drop both collections. Runs on logout so no stale authenticated
    /// data survives the session.
    pub(crate) fn clear(&self) {
        self.products.replace(Vec::new());
        self.purchases.replace(Vec::new());
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Products whose name contains `query`, case-insensitively. An
    /// empty query matches everything.
    pub fn filtered_by(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.products()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Products ordered by `field` in `order`. The sort is stable, so
    /// rows comparing equal keep their server-reported order.
    pub fn sorted_by(&self, field: SortField, order: SortOrder) -> Vec<Product> {
        let mut items: Vec<Product> = self.products().iter().cloned().collect();
        sort_products(&mut items, field, order);
        items
    }
}

/// Order a product slice by `field` in `order`, in place. Used by
/// [`EntityStore::sorted_by`] and by views that filter before sorting.
pub fn sort_products(items: &mut [Product], field: SortField, order: SortOrder) {
    let compare = |a: &Product, b: &Product| -> Ordering {
        match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
            // NaN prices cannot be constructed through validation,
            // but an unvalidated server value still must not panic.
            SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        }
    };
    items.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b),
        // Reverse only strict orderings; ties stay Equal so the
        // sort remains stable in both directions.
        SortOrder::Desc => compare(a, b).reverse(),
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(id: i64, name: &str, quantity: u32, price: f64) -> Product {
        Product {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    fn seeded_store() -> EntityStore {
        let store = EntityStore::new();
        store.replace_products(vec![
            product(1, "Widget", 5, 9.99),
            product(2, "Gadget", 2, 24.50),
            product(3, "widget pro", 0, 49.99),
        ]);
        store
    }

    #[test]
    fn replace_is_wholesale_not_a_merge() {
        let store = seeded_store();
        store.replace_products(vec![product(9, "Sprocket", 1, 3.0)]);

        let snapshot = store.products();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Sprocket");
    }

    #[test]
    fn watch_sees_replacement() {
        let store = EntityStore::new();
        let mut rx = store.watch_products();
        assert!(rx.borrow_and_update().is_empty());

        store.replace_products(vec![product(1, "Widget", 5, 9.99)]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let store = seeded_store();

        let hits = store.filtered_by("WIDG");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Widget");
        assert_eq!(hits[1].name, "widget pro");

        assert_eq!(store.filtered_by("").len(), 3);
        assert!(store.filtered_by("nothing").is_empty());
    }

    #[test]
    fn sort_by_each_field() {
        let store = seeded_store();

        let by_name: Vec<i64> = store
            .sorted_by(SortField::Name, SortOrder::Asc)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_name, vec![2, 1, 3]);

        let by_qty: Vec<i64> = store
            .sorted_by(SortField::Quantity, SortOrder::Desc)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_qty, vec![1, 2, 3]);

        let by_price: Vec<i64> = store
            .sorted_by(SortField::Price, SortOrder::Asc)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_price, vec![1, 2, 3]);
    }

    #[test]
    fn filter_then_sort_composes() {
        let store = seeded_store();

        let mut hits = store.filtered_by("widg");
        sort_products(&mut hits, SortField::Price, SortOrder::Desc);

        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["widget pro", "Widget"]);
    }

    #[test]
    fn equal_keys_keep_server_order_in_both_directions() {
        let store = EntityStore::new();
        store.replace_products(vec![
            product(10, "first", 7, 1.0),
            product(11, "second", 7, 1.0),
            product(12, "third", 7, 1.0),
        ]);

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let ids: Vec<i64> = store
                .sorted_by(SortField::Quantity, order)
                .iter()
                .map(|p| p.id)
                .collect();
            assert_eq!(ids, vec![10, 11, 12], "order {order}");
        }
    }

    #[test]
    fn clear_empties_both_collections() {
        let store = seeded_store();
        store.clear();
        assert!(store.products().is_empty());
        assert!(store.purchases().is_empty());
    }
}
