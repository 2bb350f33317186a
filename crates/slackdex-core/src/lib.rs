#![deny(missing_docs)]

//! # slackdex-core — Foundational Types for slackdex
//!
//! This crate defines the types that every other crate in the workspace
//! depends on. It performs no I/O and has no internal crate dependencies,
//! only `serde`, `serde_json`, `thiserror`, and `chrono` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **The descriptor view is lenient and total.** [`Descriptor::from_value`]
//!    never fails: wrongly typed or missing fields become `None`, so report
//!    generation degrades to placeholders instead of refusing a file.
//!    Flagging bad input is the job of `slackdex-schema`, not of this crate.
//!
//! 2. **Closed taxonomies are enums.** [`Language`], [`Category`],
//!    [`MaintenanceTier`], and [`CommitFrequency`] each carry their wire
//!    strings and an ordered `all()` slice. There are no stringly-typed
//!    duplicate lists that can diverge.
//!
//! 3. **Format newtypes validate at construction.** [`DescriptorDate`],
//!    [`RepoUrl`], and [`CommitHash`] reject malformed input with a
//!    [`ValidationError`] that carries the offending value.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod descriptor;
pub mod error;
pub mod origin;
pub mod taxonomy;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use descriptor::{ApiCoverage, Descriptor, FlagMap, FlagValue, Support};
pub use error::ValidationError;
pub use origin::{CommitHash, RepoUrl};
pub use taxonomy::{Category, CommitFrequency, Language, MaintenanceTier};
pub use temporal::DescriptorDate;
