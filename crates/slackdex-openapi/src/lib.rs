//! # slackdex-openapi
//!
//! Reads the archived Slack Web API OpenAPI document and builds a
//! method catalog grouped by category. The catalog backs the `api`
//! inspection subcommand and supplies the method universe for API
//! coverage reporting.
//!
//! Slack method names are the URL paths without the leading slash
//! (`/chat.postMessage` is the method `chat.postMessage`), and the
//! category is the segment before the first dot (`chat`). Paths with
//! no dot fall into the `other` category.

pub mod catalog;

pub use catalog::{
    ApiCatalog, ApiMethod, ApiParameter, CatalogSummary, CategorySummary, OpenApiError,
    SpecExport, SpecInfo,
};
