//! Renderer-agnostic chart descriptors.
//!
//! A descriptor carries everything needed to draw one dashboard chart (kind,
//! title, axis labels and the data series) without committing to an output
//! format. The page can draw them itself from JSON, or ask the server for the
//! SVG produced by [`crate::graph`].

use serde::{Deserialize, Serialize};

/// The four chart slots of the dashboard, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    CategoryDist,
    PriceDist,
    DosagePrice,
    Quantity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CategoryDist,
        ChartKind::PriceDist,
        ChartKind::DosagePrice,
        ChartKind::Quantity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::CategoryDist => "category_dist",
            ChartKind::PriceDist => "price_dist",
            ChartKind::DosagePrice => "dosage_price",
            ChartKind::Quantity => "quantity",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        ChartKind::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::CategoryDist => "Distribution of Medicines by Category",
            ChartKind::PriceDist => "Price Distribution per Category",
            ChartKind::DosagePrice => "Dosage vs Price of Medicines",
            ChartKind::Quantity => "Total Quantity of Medicines by Category",
        }
    }
}

/// One value per chart slot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSlots<T> {
    pub category_dist: T,
    pub price_dist: T,
    pub dosage_price: T,
    pub quantity: T,
}

impl<T> ChartSlots<T> {
    pub fn get(&self, kind: ChartKind) -> &T {
        match kind {
            ChartKind::CategoryDist => &self.category_dist,
            ChartKind::PriceDist => &self.price_dist,
            ChartKind::DosagePrice => &self.dosage_price,
            ChartKind::Quantity => &self.quantity,
        }
    }

    pub fn set(&mut self, kind: ChartKind, value: T) {
        match kind {
            ChartKind::CategoryDist => self.category_dist = value,
            ChartKind::PriceDist => self.price_dist = value,
            ChartKind::DosagePrice => self.dosage_price = value,
            ChartKind::Quantity => self.quantity = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartKind, &T)> {
        ChartKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Description of one chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Series,
}

/// Data series of a chart, one shape per chart kind
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    /// Number of medicines per category
    Bar { bars: Vec<CategoryCount> },
    /// Price values per category with their five-number summary
    Box { groups: Vec<PriceGroup> },
    /// One point per medicine
    Scatter { points: Vec<ScatterPoint> },
    /// Total quantity per category
    Pie { slices: Vec<QuantitySlice> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceGroup {
    pub category: String,
    /// Prices in dataset order
    pub values: Vec<f64>,
    pub summary: QuartileSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub dosage: f64,
    pub price: f64,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuantitySlice {
    pub category: String,
    pub quantity: i64,
    /// Fraction of the total quantity, 0.0 when the total is zero
    pub share: f64,
}

/// Five-number summary used to draw a box
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuartileSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl QuartileSummary {
    /// Summarize a non-empty set of values
    ///
    /// Quartiles use linear interpolation between the closest ranks.
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(QuartileSummary {
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate() {
        let s = QuartileSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn single_value_summary_is_flat() {
        let s = QuartileSummary::from_values(&[7.0]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (7.0, 7.0, 7.0, 7.0, 7.0));
        assert!(QuartileSummary::from_values(&[]).is_none());
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ChartKind::parse("histogram"), None);
        assert_eq!(
            serde_json::to_string(&ChartKind::DosagePrice).unwrap(),
            "\"dosage_price\""
        );
    }
}
