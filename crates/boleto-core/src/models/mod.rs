//! Data models.

pub mod boleto;
pub mod config;
