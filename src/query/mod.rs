//! Query subsystem
//!
//! Composes filter, count, sort and paginate over a row slice and shapes
//! the output, optionally wrapped in a meta envelope.
//!
//! # Invariants
//!
//! - The table is always fully scanned; there are no indexes
//! - Sorting is stable, so equal keys keep table order across pages
//! - `totalCount` is measured after filtering and before pagination

mod paginator;
mod pipeline;
mod request;
mod result;
mod sorter;

pub use paginator::Pagination;
pub use pipeline::{PipelineResult, QueryPipeline};
pub use request::QueryRequest;
pub use result::{QueryMeta, QueryOutput};
pub use sorter::{RowSorter, SortDirection, SortKeys, SortSpec};
