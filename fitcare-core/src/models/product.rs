use serde::{Deserialize, Serialize};
use std::fmt;

/// Products per search page on the remote service.
pub const PRODUCTS_PER_PAGE: usize = 50;

/// Nutrition data for a product, keyed by barcode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub barcode: i64,
    pub product_name: String,
    #[serde(rename = "kcal_100g")]
    pub kcal_per_100g: i64,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
}

impl Product {
    pub fn new(barcode: i64, product_name: impl Into<String>, kcal_per_100g: i64) -> Self {
        Self {
            barcode,
            product_name: product_name.into(),
            kcal_per_100g,
            origin_country: None,
            ingredients: None,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} kcal/100g)",
            self.barcode, self.product_name, self.kcal_per_100g
        )
    }
}

/// One page of a product search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub content: Vec<Product>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl ProductPage {
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }

    /// Picks the product with the given barcode, or the first result.
    pub fn pick(&self, barcode: Option<i64>) -> Option<&Product> {
        match barcode {
            Some(code) => self.content.iter().find(|p| p.barcode == code),
            None => self.content.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parses_server_field_names() {
        let json = r#"{
            "barcode": 4001,
            "productName": "Apple",
            "kcal_100g": 52,
            "originCountry": "AT",
            "ingredients": "apple"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.kcal_per_100g, 52);
        assert_eq!(product.origin_country.as_deref(), Some("AT"));
    }

    #[test]
    fn test_page_parses_spring_page() {
        let json = r#"{
            "content": [{"barcode": 1, "productName": "Apple", "kcal_100g": 52}],
            "totalPages": 3,
            "totalElements": 120,
            "number": 0,
            "size": 50,
            "pageable": {"pageNumber": 0}
        }"#;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert!(!page.is_last());
    }

    #[test]
    fn test_page_pick() {
        let page = ProductPage {
            content: vec![Product::new(1, "Apple", 52), Product::new(2, "Apple juice", 46)],
            ..Default::default()
        };
        assert_eq!(page.pick(None).unwrap().barcode, 1);
        assert_eq!(page.pick(Some(2)).unwrap().product_name, "Apple juice");
        assert!(page.pick(Some(3)).is_none());
    }

    #[test]
    fn test_empty_page_is_last() {
        assert!(ProductPage::default().is_last());
    }
}
