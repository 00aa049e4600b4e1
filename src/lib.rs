// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub use crate::config::RecommenderConfig;
pub use crate::core::engine::Recommender;
pub use crate::error::{RecommendError, Result};
