use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one export attempt through its three stages. All failures are
/// scoped to the attempt; nothing here is fatal to the host process.
pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting proposal export...");

        tracing::info!("Rendering letter body...");
        let body = self.pipeline.render().await?;
        tracing::info!("Rendered {} blocks", body.blocks.len());

        tracing::info!("Encoding document...");
        let data = self.pipeline.encode(body).await?;
        tracing::info!("Encoded {} bytes", data.len());

        tracing::info!("Saving document...");
        let output_path = self.pipeline.save(data).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Block, DocumentBody};
    use crate::utils::error::DealError;
    use async_trait::async_trait;

    struct StubPipeline {
        ready: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn render(&self) -> Result<DocumentBody> {
            if !self.ready {
                return Err(DealError::invalid_input("institution name is blank"));
            }
            let mut body = DocumentBody::default();
            body.push(Block::Title("Letter".to_string()));
            Ok(body)
        }

        async fn encode(&self, body: DocumentBody) -> Result<Vec<u8>> {
            Ok(format!("{} blocks", body.blocks.len()).into_bytes())
        }

        async fn save(&self, data: Vec<u8>) -> Result<String> {
            Ok(format!("out/letter ({} bytes)", data.len()))
        }
    }

    #[tokio::test]
    async fn test_engine_runs_all_three_stages() {
        let engine = ExportEngine::new(StubPipeline { ready: true });
        let output = engine.run().await.unwrap();
        assert!(output.contains("letter"));
    }

    #[tokio::test]
    async fn test_engine_surfaces_render_failure() {
        let engine = ExportEngine::new(StubPipeline { ready: false });
        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, DealError::InvalidInput { .. }));
    }
}
