//! Category HTTP handlers.
//!
//! ```text
//! POST   /api/v1/categories
//! GET    /api/v1/categories
//! GET    /api/v1/categories/{id}
//! PUT    /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```
//!
//! Incoming category names are title-cased per word, so "home improvement"
//! is stored as "Home Improvement".

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::EntityKind;
use crate::inbound::http::ApiResult;
use crate::inbound::http::named_entities::{
    self, BatchCreateResponse, CreateNamesRequest, DeleteResponse, ListQuery,
    NamedEntityResponse, UpdateNameRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const KIND: EntityKind = EntityKind::Category;

/// Create the categories that do not exist yet.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateNamesRequest,
    responses(
        (status = 201, description = "Existing and newly created categories", body = BatchCreateResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Every category already exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategories"
)]
#[post("/categories")]
pub async fn create_categories(
    state: web::Data<HttpState>,
    payload: web::Json<CreateNamesRequest>,
) -> ApiResult<HttpResponse> {
    named_entities::create_batch(&state, KIND, payload.into_inner()).await
}

/// List categories, optionally filtered by a name fragment.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching categories", body = [NamedEntityResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<NamedEntityResponse>>> {
    named_entities::list(&state, KIND, query.into_inner()).await
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = NamedEntityResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    named_entities::fetch(&state, KIND, &path.into_inner()).await
}

/// Rename a category.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "Updated category", body = NamedEntityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateNameRequest>,
) -> ApiResult<web::Json<NamedEntityResponse>> {
    named_entities::update(&state, KIND, &path.into_inner(), payload.into_inner()).await
}

/// Delete a category.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Deleted category", body = DeleteResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    named_entities::delete(&state, KIND, &path.into_inner()).await
}

/// Register the category routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_categories)
        .service(list_categories)
        .service(get_category)
        .service(update_category)
        .service(delete_category);
}
