#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod plan;
pub mod resolver;

pub use config::NamingRules;
pub use error::{NamingError, NamingResult};
pub use models::{AssetCategory, AssetDescriptor, AssetRole, AssetType, BundleName};
pub use plan::{BundlePlan, PlanInput, PlanOptions};
pub use resolver::{Resolver, resolve};
