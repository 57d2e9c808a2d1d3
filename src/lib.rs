//! mocktable - an in-memory, schema-less table for tests and mock servers
//!
//! Rows are arbitrary JSON records. Queries evaluate a nested AND/OR
//! condition tree, then sort, paginate and optionally wrap the page with
//! count metadata. Mutations locate their target row with the same
//! condition trees.
//!
//! ```
//! use mocktable::condition::ConditionItem;
//! use mocktable::query::QueryRequest;
//! use mocktable::table::Table;
//! use serde_json::json;
//!
//! let table = Table::new(vec![
//!     json!({"id": 1, "name": "User1"}),
//!     json!({"id": 2, "name": "User2"}),
//! ]);
//!
//! let request = QueryRequest::new()
//!     .conditions(vec![ConditionItem::like("name", "user2")])
//!     .with_meta();
//! let output = table.get_rows(&request).unwrap();
//! assert_eq!(output.meta().unwrap().total_count, 1);
//! ```

pub mod cli;
pub mod condition;
pub mod observability;
pub mod query;
pub mod table;

pub use condition::{Condition, ConditionError, ConditionItem, FieldType, Logic};
pub use query::{Pagination, QueryMeta, QueryOutput, QueryRequest, SortKeys, SortSpec};
pub use table::{Table, TableConfig, TableError, TableOptions, TableResult};
