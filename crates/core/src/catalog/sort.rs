//! Price ordering for the catalog view.

use std::str::FromStr;

use crate::types::Product;

/// Direction requested by the storefront's price filter.
///
/// The filter sends `"asc"` or `"des"`; any other value means "no ordering"
/// and shows the products in server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unsorted,
}

impl SortDirection {
    /// Parse the filter value. Unrecognized values map to `Unsorted`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "asc" => Self::Ascending,
            "des" => Self::Descending,
            _ => Self::Unsorted,
        }
    }
}

impl FromStr for SortDirection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Order `products` by local price.
///
/// Uses a stable sort so products with equal prices keep their relative
/// server order in both directions.
#[must_use]
pub fn by_price(products: &[Product], direction: SortDirection) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| a.price_local.cmp(&b.price_local)),
        SortDirection::Descending => sorted.sort_by(|a, b| b.price_local.cmp(&a.price_local)),
        SortDirection::Unsorted => {}
    }
    sorted
}
