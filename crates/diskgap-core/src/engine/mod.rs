//! # Engine Module
//!
//! Evaluation-time concerns shared by the workflows.
//!
//! - **Configuration** ([`config`]) - Smoothing and time-domain settings, builder and TOML loading
//! - **Error Handling** ([`error`]) - The [`ModelError`](error::ModelError) taxonomy
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for interactive callers

pub mod config;
pub mod error;
pub mod progress;
