//! Business logic services

pub mod ingestion;
