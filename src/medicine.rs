use serde::{Deserialize, Serialize};

/// Column names every dataset must provide, in table display order
pub const REQUIRED_COLUMNS: [&str; 5] = ["Medicine", "Price", "Dosage", "Quantity", "Category"];

/// One row of the medicine dataset
///
/// Field names serialize to the CSV column names so a record round-trips
/// through both the loader and the table export unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// Medicine name
    #[serde(rename = "Medicine")]
    pub name: String,

    /// Unit price
    #[serde(rename = "Price")]
    pub price: f64,

    /// Dosage (unit is whatever the source file uses, typically mg)
    #[serde(rename = "Dosage")]
    pub dosage: f64,

    /// Units in stock
    #[serde(rename = "Quantity")]
    pub quantity: i64,

    /// Therapeutic category
    #[serde(rename = "Category")]
    pub category: String,
}

impl MedicineRecord {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        dosage: f64,
        quantity: i64,
        category: impl Into<String>,
    ) -> Self {
        MedicineRecord {
            name: name.into(),
            price,
            dosage,
            quantity,
            category: category.into(),
        }
    }

    /// Inclusive price-range check used by the filter
    pub fn price_within(&self, min: f64, max: f64) -> bool {
        min <= self.price && self.price <= max
    }
}
