pub mod model;

use crate::AppState;
use crate::database::StoreError;
use crate::domain::Record;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use futures::TryStreamExt;
use model::{AffectedRows, CreateRecordRequest, CreatedRecord, RenameRecordRequest};
use tracing::{error, warn};

pub fn records_router() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records_handler).post(create_record_handler))
        .route(
            "/records/{id}",
            put(rename_record_handler).delete(delete_record_handler),
        )
}

async fn list_records_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, StatusCode> {
    let records: Vec<Record> = state
        .store
        .list()
        .try_collect()
        .await
        .map_err(store_error_status)?;

    Ok(Json(records))
}

async fn create_record_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<CreatedRecord>), StatusCode> {
    let id = state
        .store
        .create(request.id, &request.name)
        .await
        .map_err(store_error_status)?;

    Ok((StatusCode::CREATED, Json(CreatedRecord { id })))
}

async fn rename_record_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RenameRecordRequest>,
) -> Result<Json<AffectedRows>, StatusCode> {
    let affected = state
        .store
        .update(id, &request.name)
        .await
        .map_err(store_error_status)?;

    Ok(Json(AffectedRows { affected }))
}

async fn delete_record_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AffectedRows>, StatusCode> {
    let affected = state
        .store
        .delete(id)
        .await
        .map_err(store_error_status)?;

    Ok(Json(AffectedRows { affected }))
}

pub(crate) fn store_error_status(err: StoreError) -> StatusCode {
    match err {
        StoreError::ConstraintViolation(reason) => {
            warn!("Rejected record write: {}", reason);
            StatusCode::CONFLICT
        }
        StoreError::Connection(e) => {
            error!("Record store unavailable: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
        StoreError::Timeout(limit) => {
            error!("Record store round trip exceeded {:?}", limit);
            StatusCode::GATEWAY_TIMEOUT
        }
        other => {
            error!("Record store failure: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
