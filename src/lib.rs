/*!
# Medicine Dashboard

A single-page interactive dashboard over a CSV table of medicines, served by
a Rust web server.

## Overview

The dataset (name, price, dosage, quantity, category) is loaded once at
startup. Three controls drive the page: a graph-type selector, a category
selector and a price range slider. Every change runs one pure filter/render
pass that returns chart descriptors, visibility flags and the filtered table.

## Architecture

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript
- **Key Components**:
  - Control panel - graph type, category and price range inputs
  - Chart slots - four SVG charts, shown or hidden per selection
  - Data table - the filtered rows

### Backend Layer
- **Technologies**: Rust, axum, plotters
- **Core Components**:
  - Dataset Loader - Reads and validates the CSV once
  - Filter/Render Pipeline - Filters rows and builds chart descriptors
  - Chart Renderer - Draws a descriptor as SVG
  - Table Export - CSV and XLSX downloads of the filtered table

## Modules

- **medicine**: MedicineRecord and the required column names
- **dataset**: CSV loading, price bounds and distinct categories
- **criteria**: Control values (graph type, category, price range) and control options
- **chart**: Renderer-agnostic chart descriptors
- **pipeline**: The filter/render pass
- **graph**: SVG rendering of chart descriptors
- **downloader**: Table export (CSV, XLSX)
- **config**: Server startup settings
- **app**: Routing and handlers

## REST API Endpoints

- `/` - The dashboard page
- `/api/options` - Values to populate the controls
- `/api/render` - Render result for the given control values (GET query or POST JSON)
- `/api/chart/{kind}` - One chart as SVG
- `/api/export/csv`, `/api/export/xlsx` - Filtered table downloads
*/

pub mod chart;
pub mod config;
pub mod criteria;
pub mod dataset;
pub mod downloader;
pub mod error;
pub mod medicine;
pub mod pipeline;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;

pub use criteria::{CategoryFilter, FilterCriteria, GraphType};
pub use dataset::{Dataset, load_dataset};
pub use error::{DashboardError, Result};
pub use medicine::MedicineRecord;
pub use pipeline::{RenderResult, render};
