//! Request/response DTOs and handler bodies shared by the tag and category
//! routes.
//!
//! The route modules ([`super::tags`], [`super::categories`]) only bind paths
//! and OpenAPI metadata; everything else funnels through here with the
//! collection's [`EntityKind`].

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BatchCreateOutcome, EntityId, EntityKind, EntityName, Error, NamedEntity, NamedEntityFilter,
    NamedEntityPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::name_format::format_name;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_entity_id, parse_name, parse_name_list};

const NAMES_FIELD: FieldName = FieldName::new("names");
const NAME_FIELD: FieldName = FieldName::new("name");
const ID_FIELD: FieldName = FieldName::new("id");

/// Request payload for the deduplicating batch create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamesRequest {
    #[schema(example = json!(["Electronics", "Books"]))]
    pub names: Option<Vec<String>>,
}

/// Request payload for a partial update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNameRequest {
    pub name: Option<String>,
}

/// Query parameters for listing records.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring to match against names.
    pub name_contains: Option<String>,
}

/// Response payload for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntityResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Electronics")]
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<NamedEntity> for NamedEntityResponse {
    fn from(value: NamedEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into_inner(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for the batch create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    pub existing_records: Vec<NamedEntityResponse>,
    pub new_records: Vec<NamedEntityResponse>,
}

impl From<BatchCreateOutcome> for BatchCreateResponse {
    fn from(value: BatchCreateOutcome) -> Self {
        Self {
            existing_records: value.existing_records.into_iter().map(Into::into).collect(),
            new_records: value.new_records.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response payload for a delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    #[schema(example = "Tag deleted successfully")]
    pub message: String,
    pub record: NamedEntityResponse,
}

fn parse_names(kind: EntityKind, payload: CreateNamesRequest) -> Result<Vec<EntityName>, Error> {
    let formatted = payload
        .names
        .map(|names| names.into_iter().map(|raw| format_name(kind, raw)).collect());
    parse_name_list(formatted, NAMES_FIELD)
}

fn parse_patch(kind: EntityKind, payload: UpdateNameRequest) -> Result<NamedEntityPatch, Error> {
    let name = payload
        .name
        .map(|raw| parse_name(format_name(kind, raw), NAME_FIELD))
        .transpose()?;
    Ok(NamedEntityPatch { name })
}

fn parse_filter(query: ListQuery) -> NamedEntityFilter {
    match query.name_contains {
        Some(fragment) if !fragment.trim().is_empty() => NamedEntityFilter::name_contains(fragment),
        _ => NamedEntityFilter::default(),
    }
}

fn parse_id(raw: &str) -> Result<EntityId, Error> {
    parse_entity_id(raw, ID_FIELD)
}

pub(crate) async fn create_batch(
    state: &HttpState,
    kind: EntityKind,
    payload: CreateNamesRequest,
) -> ApiResult<HttpResponse> {
    let names = parse_names(kind, payload)?;
    let outcome = state.ports(kind).command.create_batch(names).await?;
    Ok(HttpResponse::Created().json(BatchCreateResponse::from(outcome)))
}

pub(crate) async fn list(
    state: &HttpState,
    kind: EntityKind,
    query: ListQuery,
) -> ApiResult<web::Json<Vec<NamedEntityResponse>>> {
    let records = state.ports(kind).query.find_all(parse_filter(query)).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

pub(crate) async fn fetch(
    state: &HttpState,
    kind: EntityKind,
    id: &str,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    let id = parse_id(id)?;
    let record = state.ports(kind).query.find_by_id(id).await?;
    Ok(web::Json(record.into()))
}

pub(crate) async fn update(
    state: &HttpState,
    kind: EntityKind,
    id: &str,
    payload: UpdateNameRequest,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    let id = parse_id(id)?;
    let patch = parse_patch(kind, payload)?;
    let record = state.ports(kind).command.update(id, patch).await?;
    Ok(web::Json(record.into()))
}

pub(crate) async fn delete(
    state: &HttpState,
    kind: EntityKind,
    id: &str,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_id(id)?;
    let record = state.ports(kind).command.delete(id).await?;
    Ok(web::Json(DeleteResponse {
        message: format!("{} deleted successfully", kind.title()),
        record: record.into(),
    }))
}

#[cfg(test)]
#[path = "named_entities_tests.rs"]
mod tests;
