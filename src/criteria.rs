use serde::{Deserialize, Serialize};

use crate::chart::ChartKind;
use crate::dataset::Dataset;

/// Value of the "category" control meaning no category restriction
pub const ALL_CATEGORIES: &str = "All";

/// Graph-type selector value
///
/// Wire names match the dropdown values of the dashboard page. Anything else
/// is kept as `Unrecognized` instead of failing the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GraphType {
    #[default]
    All,
    CategoryDist,
    PriceDist,
    DosagePrice,
    Quantity,
    Unrecognized(String),
}

impl GraphType {
    /// The options offered by the graph-type dropdown, in display order
    pub const OPTIONS: [GraphType; 5] = [
        GraphType::CategoryDist,
        GraphType::PriceDist,
        GraphType::DosagePrice,
        GraphType::Quantity,
        GraphType::All,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            GraphType::All => "all",
            GraphType::CategoryDist => "category_dist",
            GraphType::PriceDist => "price_dist",
            GraphType::DosagePrice => "dosage_price",
            GraphType::Quantity => "quantity",
            GraphType::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GraphType::All => "All",
            GraphType::CategoryDist => "Medicine Category Distribution",
            GraphType::PriceDist => "Price Distribution per Category",
            GraphType::DosagePrice => "Dosage vs Price",
            GraphType::Quantity => "Quantity per Category",
            GraphType::Unrecognized(_) => "Unknown",
        }
    }

    /// Chart slots shown for this selection
    ///
    /// A single chart type shows exactly its own slot. `All` and unrecognized
    /// values show all four.
    pub fn visible_kinds(&self) -> &'static [ChartKind] {
        match self {
            GraphType::CategoryDist => &[ChartKind::CategoryDist],
            GraphType::PriceDist => &[ChartKind::PriceDist],
            GraphType::DosagePrice => &[ChartKind::DosagePrice],
            GraphType::Quantity => &[ChartKind::Quantity],
            GraphType::All | GraphType::Unrecognized(_) => &ChartKind::ALL,
        }
    }
}

impl From<&str> for GraphType {
    fn from(value: &str) -> Self {
        match value {
            "all" => GraphType::All,
            "category_dist" => GraphType::CategoryDist,
            "price_dist" => GraphType::PriceDist,
            "dosage_price" => GraphType::DosagePrice,
            "quantity" => GraphType::Quantity,
            other => GraphType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for GraphType {
    fn from(value: String) -> Self {
        GraphType::from(value.as_str())
    }
}

impl From<GraphType> for String {
    fn from(value: GraphType) -> Self {
        value.as_str().to_string()
    }
}

/// Category selector value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

/// Current values of the three dashboard controls
///
/// `price_min <= price_max` is expected; the range slider guarantees it and
/// the HTTP layer reorders bounds before building a criteria value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub graph_type: GraphType,
    pub category: CategoryFilter,
    pub price_min: f64,
    pub price_max: f64,
}

impl FilterCriteria {
    pub fn new(
        graph_type: impl Into<GraphType>,
        category: impl Into<CategoryFilter>,
        price_min: f64,
        price_max: f64,
    ) -> Self {
        FilterCriteria {
            graph_type: graph_type.into(),
            category: category.into(),
            price_min,
            price_max,
        }
    }

    /// The initial control state for a dataset: every graph, every category,
    /// full price range
    pub fn initial(dataset: &Dataset) -> Self {
        let (min, max) = dataset.price_bounds().unwrap_or((0.0, 0.0));
        FilterCriteria::new(GraphType::All, CategoryFilter::All, min, max)
    }
}

/// One entry of a dropdown
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Configuration of the price range slider
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Labelled ticks every 10 price units
    pub marks: Vec<i64>,
    /// Initial selection, the full range
    pub value: [f64; 2],
}

/// Everything the page needs to populate its controls
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlOptions {
    pub graph_types: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub price: PriceSlider,
}

impl ControlOptions {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let graph_types = GraphType::OPTIONS
            .iter()
            .map(|g| SelectOption {
                label: g.label().to_string(),
                value: g.as_str().to_string(),
            })
            .collect();

        let categories = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(dataset.distinct_categories())
            .map(|c| SelectOption {
                label: c.clone(),
                value: c,
            })
            .collect();

        let (min, max) = dataset.price_bounds().unwrap_or((0.0, 0.0));
        ControlOptions {
            graph_types,
            categories,
            price: PriceSlider {
                min,
                max,
                step: 1.0,
                marks: price_marks(min, max),
                value: [min, max],
            },
        }
    }
}

/// Tick positions from the truncated minimum, every 10 units, below the
/// truncated maximum
pub fn price_marks(min: f64, max: f64) -> Vec<i64> {
    let start = min.trunc() as i64;
    let end = max.trunc() as i64;
    (start..end).step_by(10).collect()
}
