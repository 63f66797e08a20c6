use crate::domain::model::{Block, DocumentBody, ExportFormat};
use crate::domain::ports::Encoder;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::Write as _;
use zip::write::{FileOptions, ZipWriter};

// Run sizes are half-points; colors are RRGGBB hex.
const TITLE_HALF_POINTS: u32 = 36; // 18pt
const HEADING_HALF_POINTS: u32 = 28; // 14pt
const BODY_HALF_POINTS: u32 = 24; // 12pt
const ORANGE_HEX: &str = "FF9900";
const NAVY_HEX: &str = "232F3E";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>
"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>
"#;

/// Word-processor rendition: the intermediate markup becomes a minimal
/// WordprocessingML document inside the OPC zip container.
pub struct DocxEncoder;

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn run_properties(bold: bool, half_points: u32, color: Option<&str>) -> String {
    let mut props = String::from("<w:rPr>");
    if bold {
        props.push_str("<w:b/>");
    }
    if let Some(color) = color {
        let _ = write!(props, r#"<w:color w:val="{}"/>"#, color);
    }
    let _ = write!(
        props,
        r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#,
        half_points, half_points
    );
    props.push_str("</w:rPr>");
    props
}

fn paragraph(text: &str, bold: bool, half_points: u32, color: Option<&str>, indent: bool) -> String {
    let mut para = String::from("<w:p>");
    if indent {
        para.push_str(r#"<w:pPr><w:ind w:left="720"/></w:pPr>"#);
    }
    let _ = write!(
        para,
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        run_properties(bold, half_points, color),
        xml_escape(text)
    );
    para
}

fn document_xml(body: &DocumentBody) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for block in &body.blocks {
        let rendered = match block {
            Block::Title(text) => paragraph(text, true, TITLE_HALF_POINTS, Some(ORANGE_HEX), false),
            Block::Heading(text) => {
                paragraph(text, true, HEADING_HALF_POINTS, Some(NAVY_HEX), false)
            }
            Block::Paragraph(text) => paragraph(text, false, BODY_HALF_POINTS, None, false),
            Block::Bullet(text) => {
                paragraph(&format!("\u{2022} {}", text), false, BODY_HALF_POINTS, None, true)
            }
        };
        xml.push_str(&rendered);
    }

    xml.push_str("</w:body></w:document>\n");
    xml
}

#[async_trait]
impl Encoder for DocxEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    async fn encode(&self, body: &DocumentBody) -> Result<Vec<u8>> {
        let document = document_xml(body);
        tracing::debug!("Packing {} bytes of WordprocessingML", document.len());

        let data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
            zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

            zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
            zip.write_all(RELS_XML.as_bytes())?;

            zip.start_file::<_, ()>("word/document.xml", FileOptions::default())?;
            zip.write_all(document.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        Ok(data)
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
                Block::Heading("Events & Seminars".to_string()),
                Block::Bullet("AWS Immersion Day".to_string()),
            ],
        }
    }

    fn read_document_xml(data: Vec<u8>) -> String {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    }

    #[tokio::test]
    async fn test_container_has_required_parts() {
        let data = DocxEncoder.encode(&body()).await.unwrap();
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec!["[Content_Types].xml", "_rels/.rels", "word/document.xml"]
        );
    }

    #[tokio::test]
    async fn test_document_contains_text_with_escaping() {
        let data = DocxEncoder.encode(&body()).await.unwrap();
        let xml = read_document_xml(data);

        assert!(xml.contains("To: Acme U"));
        assert!(xml.contains("Events &amp; Seminars"));
        assert!(xml.contains("\u{2022} AWS Immersion Day"));
        assert!(!xml.contains("Events & Seminars"));
    }

    #[tokio::test]
    async fn test_title_and_heading_formatting() {
        let data = DocxEncoder.encode(&body()).await.unwrap();
        let xml = read_document_xml(data);

        assert!(xml.contains(r#"<w:color w:val="FF9900"/><w:sz w:val="36"/>"#));
        assert!(xml.contains(r#"<w:color w:val="232F3E"/><w:sz w:val="28"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="720"/>"#));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a & b < c > \"d\""), "a &amp; b &lt; c &gt; &quot;d&quot;");
    }
}
