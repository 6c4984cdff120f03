//! Product catalog
//!
//! The catalog is a static, immutable list loaded once at session start.
//! Nothing in here mutates: filtering is a pure function over the list,
//! and stock counts are display-only (orders never decrement them).

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    category: String,
    price: Money,
    image: String,
    description: String,
    stock: u32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        description: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            image: image.into(),
            description: description.into(),
            stock,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn category(&self) -> &str { &self.category }
    pub fn price(&self) -> &Money { &self.price }
    pub fn image(&self) -> &str { &self.image }
    pub fn description(&self) -> &str { &self.description }
    pub fn stock(&self) -> u32 { self.stock }
    pub fn is_in_stock(&self) -> bool { self.stock > 0 }
}

/// Category predicate for [`Catalog::filter`]. `All` bypasses the category test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self { Self { products } }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for p in &self.products {
            if !seen.contains(&p.category.as_str()) {
                seen.push(&p.category);
            }
        }
        seen
    }

    /// Case-insensitive substring match against name or description,
    /// conjoined with the category predicate. Source order is preserved.
    pub fn filter<'a>(&'a self, search: &str, category: &CategoryFilter) -> Vec<&'a Product> {
        let needle = search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                let matches_search = needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle);
                matches_search && category.matches(&p.category)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Product::new("p1", "Notebook Pro X1", "Computers", Money::brl(Decimal::new(4500, 0)), "", "i7, 16GB RAM, 512GB SSD", 25),
            Product::new("p2", "UltraWide Monitor 29\"", "Peripherals", Money::brl(Decimal::new(1200, 0)), "", "IPS, HDR10", 50),
            Product::new("p3", "RGB Mechanical Keyboard", "Peripherals", Money::brl(Decimal::new(350, 0)), "", "Blue switches, detachable cable", 100),
        ])
    }

    #[test]
    fn test_filter_matches_name_or_description() {
        let catalog = sample();
        let hits = catalog.filter("notebook", &CategoryFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "p1");

        // description hit, case-insensitive
        let hits = catalog.filter("HDR", &CategoryFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "p2");
    }

    #[test]
    fn test_filter_category_conjoined() {
        let catalog = sample();
        let hits = catalog.filter("", &CategoryFilter::Named("Peripherals".into()));
        assert_eq!(hits.len(), 2);

        let hits = catalog.filter("monitor", &CategoryFilter::Named("Computers".into()));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_all_equals_no_category_filter() {
        let catalog = sample();
        let all = catalog.filter("", &CategoryFilter::All);
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_filter_idempotent() {
        let catalog = sample();
        let once = catalog.filter("board", &CategoryFilter::Named("Peripherals".into()));
        let refiltered = Catalog::new(once.iter().map(|p| (*p).clone()).collect());
        let twice = refiltered.filter("board", &CategoryFilter::Named("Peripherals".into()));
        let once_ids: Vec<&str> = once.iter().map(|p| p.id()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|p| p.id()).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = sample();
        assert_eq!(catalog.categories(), vec!["Computers", "Peripherals"]);
    }
}
