mod error;
mod traits;
mod types;
mod validation;

pub use error::{Result, StoreError};
pub use traits::ReportRepository;
pub use types::{
    timestamp_or_sentinel, Limit, OrderBy, ReportFilter, ReportQuery, SortColumn, SortDirection,
    NO_TIMESTAMP,
};
pub use validation::ensure_insertable;
