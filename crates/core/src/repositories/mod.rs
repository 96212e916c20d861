//! The query layer.
//!
//! One repository per fact/dimension area, each a thin wrapper around the
//! connection pool. Repositories are constructed per request from the pool
//! held in application state; the pool hands out a connection per query and
//! returns it when the guard drops, so nothing here holds a connection
//! across requests.

pub mod concepts;
pub mod people;
pub mod visits;

pub use concepts::ConceptRepository;
pub use people::{PersonDimension, PersonRepository};
pub use visits::VisitRepository;
