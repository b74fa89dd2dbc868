//! Translation of listing search criteria into store queries.
//!
//! [`compile`] is pure: it turns a [`SearchParams`] bag into a
//! [`CompiledQuery`] holding a [`Predicate`] tree, a result limit and the
//! fixed newest-first sort. Stores evaluate or translate the tree; nothing in
//! this module performs I/O.

pub mod compiler;
pub mod params;
pub mod predicate;

pub use compiler::{
    compile, CompiledQuery, CriteriaError, SortDirection, SortKey, SortOrder, DEFAULT_LIMIT,
};
pub use params::{Criterion, SearchParams};
pub use predicate::{Comparison, Field, Predicate, PredicateBuilder, Value};
