// src/core/mod.rs

pub mod data;
pub mod dictionary;
pub mod diminutives;
pub mod engine;
pub mod loader;
pub mod names;
pub mod tables;
pub mod translit;
pub mod types;
pub mod weights;
