//! Atlas admin backend: recruitment status tracking, event administration with QR
//! attendance, and an append-only failure log.

pub mod audit;
pub mod config;
pub mod error;
pub mod events;
pub mod persistence;
pub mod recruitment;
pub mod telemetry;
