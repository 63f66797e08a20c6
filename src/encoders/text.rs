use crate::domain::model::{Block, DocumentBody, ExportFormat};
use crate::domain::ports::Encoder;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Plain-text rendition: UTF-8, one block per line, sections separated by
/// blank lines, bullets prefixed with `- `.
pub struct TextEncoder;

fn push_separator(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
}

#[async_trait]
impl Encoder for TextEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    async fn encode(&self, body: &DocumentBody) -> Result<Vec<u8>> {
        let mut lines: Vec<String> = Vec::new();

        for block in &body.blocks {
            match block {
                Block::Title(text) => {
                    lines.push(text.clone());
                    lines.push(String::new());
                }
                Block::Paragraph(text) => {
                    push_separator(&mut lines);
                    lines.push(text.clone());
                    lines.push(String::new());
                }
                Block::Heading(text) => {
                    push_separator(&mut lines);
                    lines.push(text.clone());
                }
                Block::Bullet(text) => {
                    lines.push(format!("- {}", text));
                }
            }
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.push(String::new());

        Ok(lines.join("\n").into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> DocumentBody {
        DocumentBody {
            blocks: vec![
                Block::Title("AWS Research Partnership Letter".to_string()),
                Block::Paragraph("To: Acme U".to_string()),
                Block::Heading("Infra".to_string()),
                Block::Bullet("SRE".to_string()),
                Block::Bullet("LZA".to_string()),
                Block::Heading("Talent".to_string()),
                Block::Bullet("Pairing".to_string()),
                Block::Paragraph("Closing line.".to_string()),
            ],
        }
    }

    #[tokio::test]
    async fn test_bullets_are_dash_prefixed() {
        let bytes = TextEncoder.encode(&body()).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("- SRE\n- LZA"));
        assert!(text.contains("- Pairing"));
    }

    #[tokio::test]
    async fn test_sections_are_blank_line_separated() {
        let bytes = TextEncoder.encode(&body()).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("To: Acme U\n\nInfra\n- SRE"));
        assert!(text.contains("- LZA\n\nTalent\n- Pairing\n\nClosing line.\n"));
    }

    #[tokio::test]
    async fn test_output_ends_with_single_newline() {
        let bytes = TextEncoder.encode(&body()).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with("Closing line.\n"));
        assert!(!text.ends_with("\n\n"));
    }
}
