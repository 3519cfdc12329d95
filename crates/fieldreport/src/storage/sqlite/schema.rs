//! SQLite schema descriptor and SQL statement builders.
//!
//! Pure data and string building, no I/O. The table name is chosen at
//! runtime, so statements are built from the descriptor instead of being
//! stored as constants.

use fieldreport_core::storage::{Limit, ReportQuery, SortColumn, SortDirection};

/// Default table name for weather reports.
pub const DEFAULT_TABLE_NAME: &str = "weather_reports";

/// One column of the report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn column(name: &'static str, sql_type: &'static str) -> ColumnDef {
    ColumnDef { name, sql_type }
}

/// Ordered column set of the report table.
///
/// `id` is store-assigned; every other column is written on insert, in this
/// order. `json` holds the canonical payload, the rest mirror its fields.
pub const COLUMNS: &[ColumnDef] = &[
    column("id", "INTEGER PRIMARY KEY AUTOINCREMENT"),
    column("is_draft", "INTEGER NOT NULL"),
    column("is_new", "INTEGER NOT NULL"),
    column("seq_num", "INTEGER NOT NULL"),
    column("seq_time", "INTEGER NOT NULL"),
    column("incident_id", "INTEGER NOT NULL"),
    column("user", "TEXT NOT NULL"),
    column("data_source", "INTEGER NOT NULL"),
    column("latitude", "REAL NOT NULL"),
    column("longitude", "REAL NOT NULL"),
    column("elevation", "REAL"),
    column("dry_bulb_temp", "REAL"),
    column("wet_bulb_temp", "REAL"),
    column("relative_humidity", "REAL"),
    column("wind_direction", "INTEGER NOT NULL"),
    column("wind_speed", "REAL"),
    column("aspect", "INTEGER NOT NULL"),
    column("physical_location", "TEXT"),
    column("time_taken", "TEXT"),
    column("status", "TEXT"),
    column("send_status", "INTEGER NOT NULL"),
    column("json", "TEXT NOT NULL"),
];

/// Columns read back for hydration, in the order `row_to_report` expects.
pub const HYDRATION_COLUMNS: &str = "id, is_draft, is_new, send_status, json";

/// Returns true if `name` is a plain SQL identifier safe to splice into a statement.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// SQL to create the table.
pub fn create_table_sql(table: &str) -> String {
    let columns = COLUMNS
        .iter()
        .map(|c| format!("    {} {}", c.name, c.sql_type))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("CREATE TABLE IF NOT EXISTS {table} (\n{columns}\n);")
}

/// SQL to create the indexes backing the status and incident queries.
pub fn create_indexes_sql(table: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_status_incident ON {table}(send_status, incident_id, seq_time);\n\
         CREATE INDEX IF NOT EXISTS idx_{table}_incident ON {table}(incident_id, seq_time);"
    )
}

/// SQL listing the existing table's columns (name is the second field).
pub fn table_info_sql(table: &str) -> String {
    format!("PRAGMA table_info({table})")
}

/// SQL to insert one row, binding every column but `id` positionally.
pub fn insert_sql(table: &str) -> String {
    let writable: Vec<&str> = COLUMNS
        .iter()
        .filter(|c| c.name != "id")
        .map(|c| c.name)
        .collect();
    let placeholders = (1..=writable.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        writable.join(", ")
    )
}

pub fn update_send_status_sql(table: &str) -> String {
    format!("UPDATE {table} SET send_status = ?2 WHERE id = ?1")
}

pub fn delete_sql(table: &str) -> String {
    format!("DELETE FROM {table} WHERE id = ?1")
}

/// Builds the SELECT for a report query along with its positional parameters.
pub fn select_sql(table: &str, query: &ReportQuery) -> (String, Vec<i64>) {
    let mut predicates = Vec::new();
    let mut params = Vec::new();

    if let Some(id) = query.filter.id {
        params.push(id);
        predicates.push(format!("id = ?{}", params.len()));
    }
    if let Some(status) = query.filter.send_status {
        params.push(status.id());
        predicates.push(format!("send_status = ?{}", params.len()));
    }
    if let Some(incident_id) = query.filter.incident_id {
        params.push(incident_id);
        predicates.push(format!("incident_id = ?{}", params.len()));
    }

    let mut sql = format!("SELECT {HYDRATION_COLUMNS} FROM {table}");
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    let direction = match query.order.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    match query.order.column {
        SortColumn::SeqTime => sql.push_str(&format!(" ORDER BY seq_time {direction}")),
        SortColumn::SeqNum => sql.push_str(&format!(" ORDER BY seq_num {direction}")),
        SortColumn::Id => sql.push_str(&format!(" ORDER BY id {direction}")),
    }
    // seq_time and seq_num are not unique
    if query.order.column != SortColumn::Id {
        sql.push_str(&format!(", id {direction}"));
    }

    if let Limit::At(max) = query.limit {
        sql.push_str(&format!(" LIMIT {max}"));
    }

    (sql, params)
}
