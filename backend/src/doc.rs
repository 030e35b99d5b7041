//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the tag, category and health endpoints together with
//! the wrapper schemas for the domain error envelope. The document backs
//! Swagger UI in debug builds and is exported by the `openapi-dump` binary.

use crate::inbound::http::named_entities::{
    BatchCreateResponse, CreateNamesRequest, DeleteResponse, NamedEntityResponse,
    UpdateNameRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Magazine backend API",
        description = "Tag and category management with deduplicating batch creation.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tags::create_tags,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::get_tag,
        crate::inbound::http::tags::update_tag,
        crate::inbound::http::tags::delete_tag,
        crate::inbound::http::categories::create_categories,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateNamesRequest,
        UpdateNameRequest,
        NamedEntityResponse,
        BatchCreateResponse,
        DeleteResponse,
    )),
    tags(
        (name = "tags", description = "Free-form article tags"),
        (name = "categories", description = "Editorial categories"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
