//! Portal session
//!
//! Owns all per-session state: the catalog, the cart, the order ledger, the
//! credit account and the active view. Views only read this state; every
//! mutation goes through the session so the cart can be persisted after
//! each change.

use std::str::FromStr;

use crate::chat::ChatSession;
use crate::domain::aggregates::{Cart, CreditAccount, Order, OrderLedger};
use crate::domain::catalog::Catalog;
use crate::domain::events::DomainEvent;
use crate::storage::CartStore;
use crate::{PortalError, Result};

/// The active top-level view. Switching is an unconditional assignment;
/// there is no history stack and no deep linking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Catalog,
    Cart,
    Orders,
    Assistant,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Catalog => "catalog",
            Self::Cart => "cart",
            Self::Orders => "orders",
            Self::Assistant => "assistant",
        }
    }
}

impl FromStr for View {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "catalog" => Ok(Self::Catalog),
            "cart" => Ok(Self::Cart),
            "orders" => Ok(Self::Orders),
            "assistant" | "chat" => Ok(Self::Assistant),
            other => Err(PortalError::UnknownView(other.to_string())),
        }
    }
}

pub struct PortalSession {
    account: CreditAccount,
    catalog: Catalog,
    cart: Cart,
    orders: OrderLedger,
    chat: ChatSession,
    view: View,
    store: Option<CartStore>,
}

impl PortalSession {
    pub fn new(account: CreditAccount, catalog: Catalog, orders: OrderLedger) -> Self {
        let chat = ChatSession::for_account(&account);
        Self {
            account,
            catalog,
            cart: Cart::new(),
            orders,
            chat,
            view: View::default(),
            store: None,
        }
    }

    /// Attach cart persistence: loads whatever the store holds (possibly
    /// nothing) and writes back after every cart mutation from here on.
    pub fn with_store(mut self, store: CartStore) -> Self {
        self.cart = Cart::from_items(store.load());
        self.store = Some(store);
        self
    }

    pub fn account(&self) -> &CreditAccount { &self.account }
    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn orders(&self) -> &OrderLedger { &self.orders }
    pub fn chat(&self) -> &ChatSession { &self.chat }
    pub fn view(&self) -> View { self.view }

    /// Drain the domain events raised since the last call, across the cart,
    /// the ledger and the chat transcript. Observers poll this instead of
    /// hooking into the mutations themselves.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        let mut events = self.cart.take_events();
        events.extend(self.orders.take_events());
        events.extend(self.chat.take_events());
        events
    }

    pub fn go_to(&mut self, view: View) { self.view = view; }

    /// Forward a question to the purchasing assistant with the session's
    /// current catalog and credit profile as context.
    pub async fn ask<C: crate::chat::CompletionClient>(&mut self, client: &C, input: &str) {
        self.chat.send(client, &self.catalog, &self.account, input).await;
    }

    /// Add one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| PortalError::ProductNotFound(product_id.to_string()))?
            .clone();
        self.cart.add(&product);
        self.persist_cart();
        Ok(())
    }

    pub fn update_quantity(&mut self, product_id: &str, delta: i32) {
        self.cart.update_quantity(product_id, delta);
        self.persist_cart();
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
        self.persist_cart();
    }

    /// Place an order from the current cart.
    ///
    /// Rejects an empty cart. Does NOT enforce the credit ceiling: an
    /// over-limit order goes through and the available credit goes negative.
    pub fn checkout(&mut self) -> Result<&Order> {
        if self.cart.is_empty() {
            return Err(PortalError::EmptyCart);
        }
        let order = Order::place(self.cart.snapshot());
        tracing::info!(order_id = %order.id(), total = %order.total(), "order placed");
        self.account.consume(order.total());
        self.orders.record(order);
        self.cart.clear();
        self.persist_cart();
        self.view = View::Orders;
        self.orders.latest().ok_or(PortalError::EmptyCart)
    }

    fn persist_cart(&self) {
        if let Some(store) = &self.store {
            store.save(self.cart.items());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Product;
    use crate::domain::value_objects::Money;
    use crate::storage::DEFAULT_CART_FILE;
    use rust_decimal::Decimal;

    fn session() -> PortalSession {
        let catalog = Catalog::new(vec![
            Product::new("p1", "Widget", "Test", Money::brl(Decimal::new(100, 0)), "", "", 10),
            Product::new("p2", "Gadget", "Test", Money::brl(Decimal::new(50, 0)), "", "", 10),
        ]);
        let account = CreditAccount::new(
            "u1",
            "Roberto Silva",
            "Mercado Tech",
            Money::brl(Decimal::new(15_000, 0)),
            Money::brl(Decimal::ZERO),
        );
        PortalSession::new(account, catalog, OrderLedger::new())
    }

    #[test]
    fn test_checkout_worked_example() {
        // cart of 100x2 + 50x1: subtotal 250.00, total 262.50
        let mut s = session();
        s.add_to_cart("p1").unwrap();
        s.update_quantity("p1", 1);
        s.add_to_cart("p2").unwrap();

        let total = {
            let order = s.checkout().unwrap();
            assert_eq!(order.subtotal().amount(), Decimal::new(250, 0));
            assert_eq!(order.total().amount(), Decimal::new(26250, 2));
            order.total().clone()
        };

        assert!(s.cart().is_empty());
        assert_eq!(s.orders().len(), 1);
        assert_eq!(s.account().used_credit(), &total);
        assert_eq!(s.view(), View::Orders);
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let mut s = session();
        assert!(matches!(s.checkout(), Err(PortalError::EmptyCart)));
        assert!(s.orders().is_empty());
    }

    #[test]
    fn test_checkout_over_limit_still_succeeds() {
        let mut s = session();
        for _ in 0..200 {
            s.add_to_cart("p1").unwrap(); // 200 x 100 = 20_000 > 15_000 ceiling
        }
        s.checkout().unwrap();
        assert!(s.account().available().amount() < Decimal::ZERO);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut s = session();
        assert!(matches!(
            s.add_to_cart("missing"),
            Err(PortalError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_view_switching_unconditional() {
        let mut s = session();
        assert_eq!(s.view(), View::Dashboard);
        s.go_to(View::Assistant);
        assert_eq!(s.view(), View::Assistant);
        s.go_to(View::Cart);
        assert_eq!(s.view(), View::Cart);
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("Orders".parse::<View>().unwrap(), View::Orders);
        assert_eq!("chat".parse::<View>().unwrap(), View::Assistant);
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn test_cart_persisted_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CART_FILE);

        let mut s = session().with_store(CartStore::new(&path));
        s.add_to_cart("p1").unwrap();
        s.add_to_cart("p1").unwrap();
        drop(s);

        let restored = session().with_store(CartStore::new(&path));
        assert_eq!(restored.cart().item_count(), 1);
        assert_eq!(restored.cart().items()[0].quantity, 2);
    }

    #[test]
    fn test_take_events_aggregates_across_aggregates() {
        let mut s = session();
        s.add_to_cart("p1").unwrap();
        s.checkout().unwrap();
        let events = s.take_events();
        // chat welcome + cart add + order placed + cart cleared
        assert_eq!(events.len(), 4);
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CART_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let s = session().with_store(CartStore::new(&path));
        assert!(s.cart().is_empty());
    }
}
