//! fieldreport_core - domain types and storage contracts for the local
//! weather-report store.

pub mod report;
pub mod storage;
