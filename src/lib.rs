// src/lib.rs

pub mod c_api;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::data::{DataConfig, NameData};
pub use crate::core::engine::{GenderResolver, ResolverOptions};
pub use crate::core::types::GenderLabel;
pub use crate::error::{GenderError, Result};
