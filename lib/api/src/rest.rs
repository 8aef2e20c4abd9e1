//! REST surface for the interactive table and the prediction proxy.
//!
//! All table state lives in one [`TableSession`] behind a `RwLock`; every
//! handler is a short synchronous critical section, so events are applied
//! strictly one at a time (last submit wins). Errors come back as
//! `{"error": "..."}` bodies with a status per the taxonomy: 400 for
//! rejected queries, 503 while the dataset is unavailable, 502 when the
//! prediction collaborator fails.

use crate::predict::PredictClient;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use cookielab_core::{Error, Record};
use cookielab_search::SearchMode;
use cookielab_table::{PageAction, SearchRequest, SortSpec, TableSession};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// The table is served even when the CSV could not be loaded; endpoints
/// then answer 503 with the load failure instead of crashing.
pub enum TableState {
    Ready(TableSession),
    Unavailable(String),
}

pub struct AppState {
    table: RwLock<TableState>,
    predict: PredictClient,
}

impl AppState {
    #[must_use]
    pub fn new(table: TableState, predict: PredictClient) -> Self {
        Self {
            table: RwLock::new(table),
            predict,
        }
    }
}

#[derive(Deserialize)]
struct ModeRequest {
    mode: SearchMode,
}

#[derive(Deserialize)]
struct FilterRequest {
    column: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRequest {
    Action { action: PageAction },
    Index { index: usize },
    Size { size: usize },
}

#[derive(Deserialize)]
struct PredictRequest {
    features: HashMap<String, f64>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .route("/", web::get().to(info))
                .route("/api/v1/table", web::get().to(get_table))
                .route("/api/v1/types", web::get().to(get_types))
                .route("/api/v1/table/search", web::post().to(search))
                .route("/api/v1/table/clear", web::post().to(clear))
                .route("/api/v1/table/mode", web::post().to(set_mode))
                .route("/api/v1/table/sort", web::post().to(set_sort))
                .route("/api/v1/table/filter", web::post().to(set_filter))
                .route("/api/v1/table/page", web::post().to(page))
                .route("/api/v1/features", web::get().to(features))
                .route("/api/v1/predict", web::post().to(predict))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

fn error_response(err: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        Error::DataUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn unavailable(reason: &str) -> HttpResponse {
    error_response(&Error::DataUnavailable(reason.to_string()))
}

/// Flatten one record into the display row shape: `_id`, `matchScore`, and
/// one entry per CSV header.
fn row_json(record: &Record, headers: &[String]) -> serde_json::Value {
    let mut row = serde_json::Map::new();
    row.insert("_id".to_string(), serde_json::json!(record.id));
    row.insert(
        "matchScore".to_string(),
        serde_json::to_value(record.match_score).unwrap_or(serde_json::Value::Null),
    );
    for header in headers {
        let cell = record.cell(header);
        row.insert(
            header.clone(),
            serde_json::to_value(cell).unwrap_or(serde_json::Value::Null),
        );
    }
    serde_json::Value::Object(row)
}

fn table_payload(session: &TableSession) -> serde_json::Value {
    let page = session.current_page();
    let headers = session.dataset().headers();
    let rows: Vec<serde_json::Value> = page.rows.iter().map(|r| row_json(r, headers)).collect();

    serde_json::json!({
        "columns": session.columns(),
        "rows": rows,
        "page": page.info,
        "mode": session.mode(),
        "sort": session.view().sort(),
        "filters": session.view().filters(),
    })
}

async fn info(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let loaded = matches!(&*state.table.read(), TableState::Ready(_));
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "cookielab",
        "version": env!("CARGO_PKG_VERSION"),
        "dataset_loaded": loaded,
    })))
}

async fn get_table(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match &*state.table.read() {
        TableState::Ready(session) => Ok(HttpResponse::Ok().json(table_payload(session))),
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn get_types(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match &*state.table.read() {
        TableState::Ready(session) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "types": session.dataset().category_options(),
        }))),
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn search(
    state: web::Data<Arc<AppState>>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => match session.submit_search(req.into_inner()) {
            Ok(()) => Ok(HttpResponse::Ok().json(table_payload(session))),
            Err(e) => Ok(error_response(&e)),
        },
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn clear(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => {
            session.clear_search();
            Ok(HttpResponse::Ok().json(table_payload(session)))
        }
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn set_mode(
    state: web::Data<Arc<AppState>>,
    req: web::Json<ModeRequest>,
) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => {
            session.select_mode(req.mode);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "mode": session.mode() })))
        }
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn set_sort(
    state: web::Data<Arc<AppState>>,
    req: web::Json<Option<SortSpec>>,
) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => match session.set_sort(req.into_inner()) {
            Ok(()) => Ok(HttpResponse::Ok().json(table_payload(session))),
            Err(e) => Ok(error_response(&e)),
        },
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn set_filter(
    state: web::Data<Arc<AppState>>,
    req: web::Json<FilterRequest>,
) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => match session.set_filter(&req.column, &req.value) {
            Ok(()) => Ok(HttpResponse::Ok().json(table_payload(session))),
            Err(e) => Ok(error_response(&e)),
        },
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn page(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PageRequest>,
) -> ActixResult<HttpResponse> {
    match &mut *state.table.write() {
        TableState::Ready(session) => {
            match req.into_inner() {
                PageRequest::Action { action } => session.page(action),
                PageRequest::Index { index } => session.set_page_index(index),
                PageRequest::Size { size } => session.set_page_size(size),
            }
            Ok(HttpResponse::Ok().json(table_payload(session)))
        }
        TableState::Unavailable(reason) => Ok(unavailable(reason)),
    }
}

async fn features(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match state.predict.expected_features().await {
        Ok(features) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "expected_features": features,
        }))),
        Err(e) => {
            warn!("features request failed: {}", e);
            Ok(HttpResponse::BadGateway().json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

async fn predict(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> ActixResult<HttpResponse> {
    match state.predict.predict(&req.features).await {
        Ok(prediction) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "prediction": prediction,
        }))),
        Err(e) => {
            warn!("predict request failed: {}", e);
            Ok(HttpResponse::BadGateway().json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}
