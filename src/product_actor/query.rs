//! Catalog search: filter, sort by name, paginate.

use crate::model::{Page, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filters for a catalog listing. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: usize,
    pub page_size: usize,
}

impl ProductQuery {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn price_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = match self.name.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        };
        name_ok
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
    }

    /// Runs the query over a catalog snapshot.
    pub fn run(self, products: Vec<Product>, default_page_size: usize) -> CatalogPage {
        let mut hits: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.0.cmp(&b.id.0)));

        let page = Page::paginate(hits, self.page, self.page_size, default_page_size);
        let query = Self {
            page: page.page,
            page_size: page.page_size,
            ..self
        };
        CatalogPage { query, page }
    }
}

/// A page of products together with the effective query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub query: ProductQuery,
    pub page: Page<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use rust_decimal_macros::dec;

    fn product(id: u32, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId(id),
            name: name.into(),
            description: String::new(),
            price,
            stock: 1,
            reserved: 0,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Teclado", dec!(25)),
            product(2, "Monitor", dec!(180)),
            product(3, "Ratón", dec!(12.5)),
            product(4, "Teclado mecánico", dec!(90)),
        ]
    }

    #[test]
    fn test_sorted_by_name() {
        let result = ProductQuery::default().run(catalog(), 10);
        let names: Vec<_> = result.page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Monitor", "Ratón", "Teclado", "Teclado mecánico"]);
        assert_eq!(result.query.page, 1);
        assert_eq!(result.query.page_size, 10);
    }

    #[test]
    fn test_name_and_price_filters() {
        let result = ProductQuery::named("teclado")
            .price_between(Some(dec!(50)), None)
            .run(catalog(), 10);
        assert_eq!(result.page.total_items, 1);
        assert_eq!(result.page.items[0].id, ProductId(4));

        let cheap = ProductQuery::default()
            .price_between(None, Some(dec!(25)))
            .run(catalog(), 10);
        assert_eq!(cheap.page.total_items, 2);
    }

    #[test]
    fn test_paging_echoes_effective_query() {
        let result = ProductQuery::default().page(2, 0).run(catalog(), 3);
        assert_eq!(result.query.page_size, 3);
        assert_eq!(result.page.items.len(), 1);
        assert_eq!(result.page.total_pages, 2);
    }
}
