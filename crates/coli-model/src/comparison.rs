use serde::{Deserialize, Serialize};

/// One row of the cost-of-living index table.
///
/// Field order is the CSV column order:
/// `metro_name, index_category, index_value, note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    pub metro_name: String,
    pub index_category: String,
    pub index_value: String,
    pub note: String,
}

/// One row of the average price table.
///
/// `avg_value` is `None` when the page has no price cell for the category,
/// which happens for metros without average price data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvgPriceRow {
    pub metro_name: String,
    pub avg_category: String,
    pub avg_value: Option<String>,
    pub note: String,
}

/// Everything extracted from a single comparison results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub note: String,
    pub index_rows: Vec<IndexRow>,
    pub avg_rows: Vec<AvgPriceRow>,
}

impl Comparison {
    /// Number of average price rows with no price cell.
    pub fn missing_prices(&self) -> usize {
        self.avg_rows.iter().filter(|r| r.avg_value.is_none()).count()
    }
}
