use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::product::Product;

/// One food-logging event against a goal.
///
/// The id is `<unix-millis>-<barcode>`. It only needs to be unique within a
/// goal's local list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub product_name: String,
    pub kcal: i64,
    pub grams: u32,
}

impl ConsumedItem {
    pub fn new(product: &Product, grams: u32, kcal: i64, at: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}-{}", at.timestamp_millis(), product.barcode),
            date: at,
            product_name: product.product_name.clone(),
            kcal,
            grams,
        }
    }
}

impl fmt::Display for ConsumedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}g  {} kcal",
            self.date.format("%Y-%m-%d %H:%M"),
            self.product_name,
            self.grams,
            self.kcal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_combines_timestamp_and_barcode() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let item = ConsumedItem::new(&Product::new(4001, "Apple", 52), 150, 78, at);

        assert_eq!(item.id, format!("{}-4001", at.timestamp_millis()));
        assert_eq!(item.product_name, "Apple");
        assert_eq!(item.kcal, 78);
        assert_eq!(item.grams, 150);
    }

    #[test]
    fn test_parses_stored_item() {
        let json = r#"{
            "id": "1717243200000-4001",
            "date": "2025-06-01T12:00:00.000Z",
            "productName": "Apple",
            "kcal": 78,
            "grams": 150
        }"#;
        let item: ConsumedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.date, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        assert_eq!(item.kcal, 78);
    }

    #[test]
    fn test_display() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        let item = ConsumedItem::new(&Product::new(1, "Oats", 370), 50, 185, at);
        let output = format!("{}", item);
        assert!(output.contains("2025-06-01 08:30"));
        assert!(output.contains("Oats"));
        assert!(output.contains("50g"));
        assert!(output.contains("185 kcal"));
    }
}
