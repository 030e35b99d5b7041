//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod error;
pub mod health;
pub(crate) mod name_format;
pub mod named_entities;
pub mod schemas;
pub mod state;
pub mod tags;
pub(crate) mod validation;

use actix_web::web;
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor configuration that reports malformed bodies as domain
/// errors, so clients always receive the same error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}"))
            .with_details(json!({ "code": "invalid_json" }))
            .into()
    })
}

/// Register every `/api/v1` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(tags::configure)
        .configure(categories::configure);
}
