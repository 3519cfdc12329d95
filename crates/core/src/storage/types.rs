use crate::report::SendStatus;

/// Legacy "no data" marker for the latest-timestamp lookup.
pub const NO_TIMESTAMP: i64 = -1;

/// Collapses an optional timestamp into the numeric `-1` contract.
pub fn timestamp_or_sentinel(timestamp: Option<i64>) -> i64 {
    timestamp.unwrap_or(NO_TIMESTAMP)
}

/// Column-level predicate for report queries.
///
/// Every field that is set must match; an empty filter matches every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub id: Option<i64>,
    pub incident_id: Option<i64>,
    pub send_status: Option<SendStatus>,
}

impl ReportFilter {
    /// A filter that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_incident(incident_id: i64) -> Self {
        Self {
            incident_id: Some(incident_id),
            ..Self::default()
        }
    }

    pub fn by_status(status: SendStatus) -> Self {
        Self {
            send_status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_incident(mut self, incident_id: i64) -> Self {
        self.incident_id = Some(incident_id);
        self
    }

    pub fn with_status(mut self, status: SendStatus) -> Self {
        self.send_status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.incident_id.is_none() && self.send_status.is_none()
    }
}

/// Columns a report query can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    SeqTime,
    SeqNum,
    Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Ordering for a report query. Ties are broken by id in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderBy {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl OrderBy {
    /// Newest first: `seq_time` descending.
    pub fn newest_first() -> Self {
        Self::default()
    }

    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Maximum number of rows a query may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Limit {
    #[default]
    Unbounded,
    At(u32),
}

/// A complete report query: filter, order and limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub filter: ReportFilter,
    pub order: OrderBy,
    pub limit: Limit,
}

impl ReportQuery {
    /// Creates a query with the default newest-first order and no limit.
    pub fn new(filter: ReportFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn ordered_by(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Limit::At(limit);
        self
    }
}
