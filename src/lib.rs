pub mod config;
pub mod core;
pub mod domain;
pub mod encoders;
pub mod utils;

pub use config::catalog::{builtin_catalog, CatalogFile};
pub use config::{cli::LocalStorage, CliConfig};
pub use core::builder::{BuilderState, ProposalBuilder};
pub use core::engine::ExportEngine;
pub use core::pipeline::ProposalPipeline;
pub use domain::model::{Catalog, Category, ExportFormat};
pub use utils::error::{DealError, Result};
