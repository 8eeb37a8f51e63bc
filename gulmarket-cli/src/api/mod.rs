//! HTTP clients for external services

pub mod sheets;

pub use sheets::SheetsClient;
