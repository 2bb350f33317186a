//! # slackdex-report
//!
//! Renders the markdown comparison reports: the overview and grouped
//! tables, the capability matrices, summary statistics, and the Slack
//! API coverage tables that join descriptors against the OpenAPI
//! method catalog.
//!
//! ## Design Principles
//!
//! - **Pure rendering.** Every generator takes loaded data
//!   (`&[Descriptor]`, `&ApiCatalog`) and returns a `String`. No file
//!   or terminal I/O happens here; the CLI owns that.
//! - **Deterministic output.** Rows sort by stars descending with file
//!   order breaking ties, count rankings break ties by name, and the
//!   report timestamp is injected by the caller. The same inputs
//!   always produce byte-identical reports.
//! - **Total over all inputs.** Missing fields render as placeholders
//!   (`Unknown`, `#`, `N/A`, `-`); no descriptor can make a generator
//!   fail.

pub mod coverage;
pub mod markdown;
pub mod tables;
