use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::chart::ChartKind;
use crate::criteria::{CategoryFilter, ControlOptions, FilterCriteria, GraphType};
use crate::dataset::Dataset;
use crate::downloader;
use crate::error::DashboardError;
use crate::graph::{ChartOptions, render_svg};
use crate::pipeline::{RenderResult, render};

/// Shared server state; the dataset is read-only after load
pub struct AppState {
    dataset: Dataset,
    options: ControlOptions,
}

/// Control values as sent by the page
///
/// Every field is optional; missing values fall back to the initial control
/// state for the loaded dataset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CriteriaQuery {
    pub graph_type: Option<GraphType>,
    pub category: Option<CategoryFilter>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl CriteriaQuery {
    /// Fill in defaults and order the price bounds
    pub fn resolve(self, dataset: &Dataset) -> FilterCriteria {
        let initial = FilterCriteria::initial(dataset);
        let mut min = self.price_min.unwrap_or(initial.price_min);
        let mut max = self.price_max.unwrap_or(initial.price_max);
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        FilterCriteria {
            graph_type: self.graph_type.unwrap_or(initial.graph_type),
            category: self.category.unwrap_or(initial.category),
            price_min: min,
            price_max: max,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SizeQuery {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        log::error!("request failed: {}", self);
        let status = match self {
            DashboardError::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(StatusResponse {
                status: "error".to_string(),
                message: Some(self.to_string()),
            }),
        )
            .into_response()
    }
}

/// Build the dashboard router around a loaded dataset
pub fn router(dataset: Dataset) -> Router {
    let options = ControlOptions::for_dataset(&dataset);
    let app_state = Arc::new(AppState { dataset, options });

    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/options", get(get_options))
        .route("/api/render", get(get_render).post(post_render))
        .route("/api/chart/:kind", get(get_chart))
        .route("/api/export/csv", get(export_csv))
        .route("/api/export/xlsx", get(export_xlsx))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Serve the dashboard until the process is stopped
pub async fn run(dataset: Dataset, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(dataset);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn get_options(State(state): State<Arc<AppState>>) -> Json<ControlOptions> {
    Json(state.options.clone())
}

async fn get_render(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CriteriaQuery>,
) -> Json<RenderResult> {
    let criteria = query.resolve(&state.dataset);
    Json(render(&state.dataset, &criteria))
}

async fn post_render(
    State(state): State<Arc<AppState>>,
    Json(query): Json<CriteriaQuery>,
) -> Json<RenderResult> {
    let criteria = query.resolve(&state.dataset);
    Json(render(&state.dataset, &criteria))
}

async fn get_chart(
    Path(kind): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<CriteriaQuery>,
    Query(size): Query<SizeQuery>,
) -> Result<Response, DashboardError> {
    let Some(kind) = ChartKind::parse(&kind) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let criteria = query.resolve(&state.dataset);
    let result = render(&state.dataset, &criteria);
    let Some(chart) = result.visible_chart(kind) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let defaults = ChartOptions::default();
    let options = ChartOptions {
        width: size.width.unwrap_or(defaults.width),
        height: size.height.unwrap_or(defaults.height),
    };
    let svg = render_svg(chart, &options)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CriteriaQuery>,
) -> Result<Response, DashboardError> {
    let criteria = query.resolve(&state.dataset);
    let result = render(&state.dataset, &criteria);
    let body = downloader::to_csv(&result.table_rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"medicines.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

async fn export_xlsx(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CriteriaQuery>,
) -> Result<Response, DashboardError> {
    let criteria = query.resolve(&state.dataset);
    let result = render(&state.dataset, &criteria);
    let body = downloader::to_xlsx(&result.table_rows)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"medicines.xlsx\"",
            ),
        ],
        body,
    )
        .into_response())
}
