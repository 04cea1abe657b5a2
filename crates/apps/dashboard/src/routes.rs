use axum::body::Body;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use runtime::{
    ControlError, ControlEvent, ControlState, Dashboard, ProtocolError, Revision,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::ws_session::handle_ws_connection;

const SHELL_HTML: &str = include_str!("shell.html");

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/controls", get(get_controls))
        .route("/api/views", get(get_views))
        .route("/api/chart.svg", get(get_chart_svg))
        .route("/ws", get(ws_upgrade))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Control inputs for the stateless endpoints. Missing values keep the
/// dashboard defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub species: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub page: Option<usize>,
}

impl ViewQuery {
    /// Replays the query as control events so it is validated and clamped
    /// exactly like a live session.
    pub fn to_state(&self, dashboard: &Dashboard) -> Result<ControlState, ControlError> {
        let spec = dashboard.control_spec();
        let mut state = ControlState::initial(spec);
        if let Some(species) = &self.species {
            state = state.apply(
                spec,
                &ControlEvent::SelectSpecies {
                    species: species.clone(),
                },
            )?;
        }
        if self.year_min.is_some() || self.year_max.is_some() {
            let min = self.year_min.unwrap_or(state.years.min);
            let max = self.year_max.unwrap_or(state.years.max);
            state = state.apply(spec, &ControlEvent::SetYearRange { min, max })?;
        }
        if let Some(page) = self.page {
            state = state.apply(spec, &ControlEvent::SetPage { page })?;
        }
        Ok(state)
    }
}

async fn index() -> Html<&'static str> {
    Html(SHELL_HTML)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_controls(State(state): State<AppState>) -> Response {
    Json(state.dashboard.control_spec().clone()).into_response()
}

async fn get_views(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Response {
    match query.to_state(&state.dashboard) {
        Ok(controls) => Json(state.dashboard.render(&controls, Revision::INITIAL)).into_response(),
        Err(err) => bad_request(err),
    }
}

async fn get_chart_svg(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Response {
    let controls = match query.to_state(&state.dashboard) {
        Ok(c) => c,
        Err(err) => return bad_request(err),
    };
    let views = state.dashboard.render(&controls, Revision::INITIAL);

    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("image/svg+xml"),
    );
    (StatusCode::OK, headers, Body::from(views.chart_svg)).into_response()
}

async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state.dashboard))
}

fn bad_request(err: ControlError) -> Response {
    warn!("rejected view query: {err}");
    let err = ProtocolError::from(err);
    let body = json!({ "code": err.code(), "message": err.to_string() });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
