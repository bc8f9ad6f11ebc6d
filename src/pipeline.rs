//! The filter-and-render pass behind every control change.
//!
//! [`render`] is a pure function of the dataset and the current control
//! values: it filters the rows, derives the four aggregate views, builds the
//! chart descriptors for the selected graph type and projects the table.

use serde::Serialize;

use crate::chart::{
    CategoryCount, ChartDescriptor, ChartKind, ChartSlots, PriceGroup, QuantitySlice,
    QuartileSummary, ScatterPoint, Series,
};
use crate::criteria::FilterCriteria;
use crate::dataset::{Dataset, distinct_categories};
use crate::medicine::MedicineRecord;

/// Output of one filter/render pass
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderResult {
    /// Chart descriptor per slot, `None` for a blank slot
    pub charts: ChartSlots<Option<ChartDescriptor>>,
    /// Whether each slot is shown
    pub visibility: ChartSlots<bool>,
    /// Filtered rows, in dataset order
    pub table_rows: Vec<MedicineRecord>,
}

impl RenderResult {
    /// All slots blank and hidden, no rows
    pub fn empty() -> Self {
        RenderResult::default()
    }

    /// True when the filter matched nothing
    pub fn is_empty(&self) -> bool {
        self.table_rows.is_empty()
    }

    pub fn visible_kinds(&self) -> Vec<ChartKind> {
        self.visibility
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(kind, _)| kind)
            .collect()
    }

    /// The descriptor for a slot if it is both visible and populated
    pub fn visible_chart(&self, kind: ChartKind) -> Option<&ChartDescriptor> {
        if *self.visibility.get(kind) {
            self.charts.get(kind).as_ref()
        } else {
            None
        }
    }
}

/// Run one filter/render pass
///
/// # Arguments
/// * `dataset` - The loaded medicine table
/// * `criteria` - Current graph type, category and price range
///
/// # Returns
/// * `RenderResult` - Chart descriptors and visibility for the selected graph
///   type, plus the filtered table rows
///
/// When nothing matches the filter every slot is blank and hidden and the
/// table is empty, whatever the graph type.
///
/// # Examples
/// ```
/// use medicine_dashboard::{Dataset, FilterCriteria, MedicineRecord, render};
///
/// let data = Dataset::from_records(vec![
///     MedicineRecord::new("A", 10.0, 5.0, 2, "Pain"),
///     MedicineRecord::new("B", 50.0, 10.0, 1, "Fever"),
/// ]);
/// let result = render(&data, &FilterCriteria::new("all", "All", 0.0, 100.0));
/// assert_eq!(result.table_rows.len(), 2);
/// assert_eq!(result.visible_kinds().len(), 4);
/// ```
pub fn render(dataset: &Dataset, criteria: &FilterCriteria) -> RenderResult {
    let rows = filter_records(dataset.records(), criteria);
    log::debug!(
        "graph_type={} category={:?} price=[{}, {}] matched {} of {} rows",
        criteria.graph_type.as_str(),
        criteria.category,
        criteria.price_min,
        criteria.price_max,
        rows.len(),
        dataset.len()
    );

    if rows.is_empty() {
        log::info!("no data for this selection");
        return RenderResult::empty();
    }

    let mut result = RenderResult {
        table_rows: rows.iter().map(|r| (*r).clone()).collect(),
        ..RenderResult::default()
    };
    for &kind in criteria.graph_type.visible_kinds() {
        result.charts.set(kind, Some(build_chart(kind, &rows)));
        result.visibility.set(kind, true);
    }
    result
}

/// Keep records inside the price range and, unless the filter is `All`, in
/// the selected category. Order is preserved.
pub fn filter_records<'a>(
    records: &'a [MedicineRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a MedicineRecord> {
    records
        .iter()
        .filter(|r| r.price_within(criteria.price_min, criteria.price_max))
        .filter(|r| criteria.category.matches(&r.category))
        .collect()
}

/// Build the descriptor for one slot from a non-empty filtered subset
pub fn build_chart(kind: ChartKind, rows: &[&MedicineRecord]) -> ChartDescriptor {
    let (x_label, y_label, series) = match kind {
        ChartKind::CategoryDist => (
            "Category",
            "count",
            Series::Bar {
                bars: category_counts(rows),
            },
        ),
        ChartKind::PriceDist => (
            "Category",
            "Price",
            Series::Box {
                groups: price_groups(rows),
            },
        ),
        ChartKind::DosagePrice => (
            "Dosage",
            "Price",
            Series::Scatter {
                points: dosage_price_points(rows),
            },
        ),
        ChartKind::Quantity => (
            "Category",
            "Quantity",
            Series::Pie {
                slices: quantity_slices(rows),
            },
        ),
    };

    ChartDescriptor {
        kind,
        title: kind.title().to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        series,
    }
}

fn categories_of(rows: &[&MedicineRecord]) -> Vec<String> {
    distinct_categories(rows.iter().copied())
}

/// Number of medicines per category
pub fn category_counts(rows: &[&MedicineRecord]) -> Vec<CategoryCount> {
    categories_of(rows)
        .into_iter()
        .map(|category| CategoryCount {
            count: rows.iter().filter(|r| r.category == category).count(),
            category,
        })
        .collect()
}

/// Prices grouped by category with their quartile summary
pub fn price_groups(rows: &[&MedicineRecord]) -> Vec<PriceGroup> {
    categories_of(rows)
        .into_iter()
        .filter_map(|category| {
            let values: Vec<f64> = rows
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.price)
                .collect();
            let summary = QuartileSummary::from_values(&values)?;
            Some(PriceGroup {
                category,
                values,
                summary,
            })
        })
        .collect()
}

/// Raw (dosage, price, category) points, unaggregated
pub fn dosage_price_points(rows: &[&MedicineRecord]) -> Vec<ScatterPoint> {
    rows.iter()
        .map(|r| ScatterPoint {
            name: r.name.clone(),
            dosage: r.dosage,
            price: r.price,
            category: r.category.clone(),
        })
        .collect()
}

/// Total quantity per category and each category's share of the total
pub fn quantity_slices(rows: &[&MedicineRecord]) -> Vec<QuantitySlice> {
    let total: i64 = rows.iter().map(|r| r.quantity).sum();
    categories_of(rows)
        .into_iter()
        .map(|category| {
            let quantity: i64 = rows
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.quantity)
                .sum();
            let share = if total == 0 {
                0.0
            } else {
                quantity as f64 / total as f64
            };
            QuantitySlice {
                category,
                quantity,
                share,
            }
        })
        .collect()
}
