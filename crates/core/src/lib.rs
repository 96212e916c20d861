//! # CDM Core
//!
//! Core query and aggregation logic for the CDM Insights analytics API.
//!
//! This crate contains the data access layer over the observational-data
//! schema and the pure computations built on top of it:
//! - Row types for the six persisted tables (`entities`)
//! - The closed vocabulary-domain enumeration (`domain`)
//! - Static reference tables for gender, race and visit type (`categories`)
//! - Age and age-decade bucketing arithmetic (`age`)
//! - Repositories issuing the actual SQL (`repositories`)
//! - Per-category count aggregation and statistics assembly (`stats`)
//!
//! **No API concerns**: HTTP routing, OpenAPI documentation and process
//! lifecycle belong in `api-rest`.

#![warn(rust_2018_idioms)]

pub mod age;
pub mod categories;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod stats;

pub use categories::Category;
pub use config::CoreConfig;
pub use domain::DomainId;
pub use error::{CdmError, CdmResult};
pub use stats::{PersonStats, StatsService, VisitStats};
