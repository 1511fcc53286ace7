//! Core types, configuration, and utilities for CroweCode Intelligence.

pub mod config;
pub mod types;
pub mod utils;
