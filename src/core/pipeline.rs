use crate::core::builder::ProposalBuilder;
use crate::core::render::{derive_filename, render_body};
use crate::domain::model::{DocumentBody, ExportFormat};
use crate::domain::ports::{ConfigProvider, Encoder, Pipeline, Storage};
use crate::encoders::{DocxEncoder, PdfEncoder, TextEncoder};
use crate::utils::error::Result;
use reqwest::Client;

/// Standard pipeline: readiness check + body rendering, then encoding with
/// the configured format, then a filesystem save through the storage port.
pub struct ProposalPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    builder: ProposalBuilder,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ProposalPipeline<S, C> {
    pub fn new(storage: S, config: C, builder: ProposalBuilder) -> Self {
        Self {
            storage,
            config,
            builder,
            client: Client::new(),
        }
    }

    fn encoder(&self) -> Box<dyn Encoder> {
        match self.config.format() {
            ExportFormat::Text => Box::new(TextEncoder),
            ExportFormat::Pdf => Box::new(PdfEncoder::new(
                self.client.clone(),
                self.config.logo_url().map(str::to_string),
                self.config.logo_timeout_seconds(),
            )),
            ExportFormat::Docx => Box::new(DocxEncoder),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProposalPipeline<S, C> {
    async fn render(&self) -> Result<DocumentBody> {
        self.builder.ensure_ready()?;

        let prepared_on = chrono::Local::now().date_naive();
        tracing::debug!(
            "Rendering letter for '{}' with {} selected offerings",
            self.builder.metadata().institution.trim(),
            self.builder.selection().total()
        );

        Ok(render_body(
            self.builder.catalog(),
            self.builder.selection(),
            self.builder.metadata(),
            prepared_on,
        ))
    }

    async fn encode(&self, body: DocumentBody) -> Result<Vec<u8>> {
        let encoder = self.encoder();
        tracing::debug!("Encoding letter as {}", encoder.format());
        encoder.encode(&body).await
    }

    async fn save(&self, data: Vec<u8>) -> Result<String> {
        let filename = derive_filename(
            &self.builder.metadata().institution,
            self.config.format(),
        );

        tracing::debug!("Writing {} bytes to {}", data.len(), filename);
        self.storage.write_file(&filename, &data).await?;

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}
