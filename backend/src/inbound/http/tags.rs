//! Tag HTTP handlers.
//!
//! ```text
//! POST   /api/v1/tags
//! GET    /api/v1/tags
//! GET    /api/v1/tags/{id}
//! PUT    /api/v1/tags/{id}
//! DELETE /api/v1/tags/{id}
//! ```
//!
//! Tag names are stored exactly as submitted.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::EntityKind;
use crate::inbound::http::ApiResult;
use crate::inbound::http::named_entities::{
    self, BatchCreateResponse, CreateNamesRequest, DeleteResponse, ListQuery,
    NamedEntityResponse, UpdateNameRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const KIND: EntityKind = EntityKind::Tag;

/// Create the tags that do not exist yet.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateNamesRequest,
    responses(
        (status = 201, description = "Existing and newly created tags", body = BatchCreateResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Every tag already exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTags"
)]
#[post("/tags")]
pub async fn create_tags(
    state: web::Data<HttpState>,
    payload: web::Json<CreateNamesRequest>,
) -> ApiResult<HttpResponse> {
    named_entities::create_batch(&state, KIND, payload.into_inner()).await
}

/// List tags, optionally filtered by a name fragment.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching tags", body = [NamedEntityResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<NamedEntityResponse>>> {
    named_entities::list(&state, KIND, query.into_inner()).await
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = String, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Tag", body = NamedEntityResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Tag not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "getTag"
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    named_entities::fetch(&state, KIND, &path.into_inner()).await
}

/// Rename a tag.
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = String, Path, description = "Tag identifier")),
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "Updated tag", body = NamedEntityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Tag not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "updateTag"
)]
#[put("/tags/{id}")]
pub async fn update_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateNameRequest>,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    named_entities::update(&state, KIND, &path.into_inner(), payload.into_inner()).await
}

/// Delete a tag.
#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = String, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Deleted tag", body = DeleteResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Tag not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    named_entities::delete(&state, KIND, &path.into_inner()).await
}

/// Register the tag routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_tags)
        .service(list_tags)
        .service(get_tag)
        .service(update_tag)
        .service(delete_tag);
}
