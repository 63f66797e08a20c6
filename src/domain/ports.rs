use crate::domain::model::{DocumentBody, ExportFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn format(&self) -> ExportFormat;
    fn logo_url(&self) -> Option<&str>;
    fn logo_timeout_seconds(&self) -> u64;
}

/// Turns the rendered body into one concrete output representation.
/// Async because the PDF encoder may fetch a logo before layout.
#[async_trait]
pub trait Encoder: Send + Sync {
    fn format(&self) -> ExportFormat;
    async fn encode(&self, body: &DocumentBody) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn render(&self) -> Result<DocumentBody>;
    async fn encode(&self, body: DocumentBody) -> Result<Vec<u8>>;
    async fn save(&self, data: Vec<u8>) -> Result<String>;
}
