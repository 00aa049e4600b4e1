// src/core/mod.rs

pub mod combinations;
pub mod concepts;
pub mod engine;
pub mod knowledge;
pub mod types;
pub mod vocabulary;
