use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::time_entry::{Model, TimeEntryInput};
use service::Lookup;

use crate::{errors::JsonApiError, state::ServerState};

type EntryId = Result<Path<i32>, PathRejection>;
type EntryBody = Result<Json<TimeEntryInput>, JsonRejection>;

/// `GET /time-entries`, newest date first.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, JsonApiError> {
    let rows = state.time_entries.list().await?;
    Ok(Json(rows))
}

pub async fn get(State(state): State<ServerState>, id: EntryId) -> Result<Json<Model>, JsonApiError> {
    let Path(id) = id?;
    match state.time_entries.get(id).await? {
        Lookup::Found(m) => Ok(Json(m)),
        Lookup::NotFound => Err(JsonApiError::not_found(id)),
    }
}

/// `POST /time-entries`: 201 with a `Location` pointing at the new entry.
pub async fn create(State(state): State<ServerState>, body: EntryBody) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = body?;
    let created = state.time_entries.create(input).await?;
    let location = format!("/time-entries/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// `PUT /time-entries/:id`: full replacement, omitted optional fields reset to defaults.
pub async fn update(
    State(state): State<ServerState>,
    id: EntryId,
    body: EntryBody,
) -> Result<Json<Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    match state.time_entries.update(id, input).await? {
        Lookup::Found(m) => Ok(Json(m)),
        Lookup::NotFound => Err(JsonApiError::not_found(id)),
    }
}

pub async fn delete(State(state): State<ServerState>, id: EntryId) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    match state.time_entries.delete(id).await? {
        Lookup::Found(_) => Ok(StatusCode::NO_CONTENT),
        Lookup::NotFound => Err(JsonApiError::not_found(id)),
    }
}
