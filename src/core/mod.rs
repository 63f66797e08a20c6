pub mod builder;
pub mod engine;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{Block, Catalog, Category, DocumentBody, ExportFormat};
pub use crate::domain::ports::{ConfigProvider, Encoder, Pipeline, Storage};
pub use crate::utils::error::Result;
