use crate::domain::model::{Block, DocumentBody, ExportFormat};
use crate::domain::ports::Encoder;
use crate::utils::error::{DealError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Write as _;
use std::time::Duration;

// Layout runs in millimetres from the top of an A4 page, converted to PDF
// points only when an operator is emitted.
const MM_TO_PT: f64 = 72.0 / 25.4;
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const PAGE_BREAK_MM: f64 = 270.0;
const TOP_MARGIN_MM: f64 = 20.0;
const LEFT_MARGIN_MM: f64 = 20.0;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 12.0;

const ORANGE: (f64, f64, f64) = (1.0, 0.6, 0.0); // #FF9900
const NAVY: (f64, f64, f64) = (0.137, 0.184, 0.243); // #232F3E
const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);

const LOGO_WIDTH_MM: f64 = 40.0;

struct LogoImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Paged PDF rendition. The file is built object by object (no compression,
/// Type1 base fonts) so the content streams stay byte-inspectable.
pub struct PdfEncoder {
    client: Client,
    logo_url: Option<String>,
    logo_timeout_seconds: u64,
}

impl PdfEncoder {
    pub fn new(client: Client, logo_url: Option<String>, logo_timeout_seconds: u64) -> Self {
        Self {
            client,
            logo_url,
            logo_timeout_seconds,
        }
    }

    /// Fetches the configured logo under an explicit deadline. The original
    /// front end waited on an image callback that could fire never; here a
    /// slow or broken logo fails the export with a typed error instead.
    async fn fetch_logo(&self) -> Result<Option<LogoImage>> {
        let Some(url) = &self.logo_url else {
            return Ok(None);
        };

        tracing::debug!("Fetching logo from {}", url);
        let fetch = async {
            let response = self.client.get(url).send().await?;
            let response = response.error_for_status()?;
            let bytes = response.bytes().await?;
            Ok::<Vec<u8>, DealError>(bytes.to_vec())
        };

        let data = tokio::time::timeout(Duration::from_secs(self.logo_timeout_seconds), fetch)
            .await
            .map_err(|_| DealError::AssetTimeout {
                seconds: self.logo_timeout_seconds,
            })??;

        let (width, height) = jpeg_dimensions(&data)?;
        tracing::debug!("Logo loaded: {}x{} px, {} bytes", width, height, data.len());

        Ok(Some(LogoImage {
            data,
            width,
            height,
        }))
    }
}

#[async_trait]
impl Encoder for PdfEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    async fn encode(&self, body: &DocumentBody) -> Result<Vec<u8>> {
        let logo = self.fetch_logo().await?;

        let mut composer = PageComposer::new(logo.as_ref());
        for block in &body.blocks {
            match block {
                Block::Title(text) => composer.title(text),
                Block::Paragraph(text) => composer.paragraph(text),
                Block::Heading(text) => composer.heading(text),
                Block::Bullet(text) => composer.bullet(text),
            }
        }

        Ok(assemble(&composer.finish(), logo.as_ref()))
    }
}

/// Accumulates one content stream per page, advancing a top-down cursor and
/// starting a fresh page whenever the cursor passes the break threshold.
struct PageComposer {
    pages: Vec<String>,
    current: String,
    y_mm: f64,
}

impl PageComposer {
    fn new(logo: Option<&LogoImage>) -> Self {
        let mut composer = Self {
            pages: Vec::new(),
            current: String::new(),
            y_mm: TOP_MARGIN_MM,
        };

        // Logo only decorates the first page, top-right
        if let Some(logo) = logo {
            let display_h_mm = LOGO_WIDTH_MM * f64::from(logo.height) / f64::from(logo.width);
            let x_mm = PAGE_WIDTH_MM - LEFT_MARGIN_MM - LOGO_WIDTH_MM;
            let bottom_mm = 12.0 + display_h_mm;
            let _ = writeln!(
                composer.current,
                "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im1 Do Q",
                LOGO_WIDTH_MM * MM_TO_PT,
                display_h_mm * MM_TO_PT,
                x_mm * MM_TO_PT,
                (PAGE_HEIGHT_MM - bottom_mm) * MM_TO_PT,
            );
        }
        composer
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y_mm = TOP_MARGIN_MM;
    }

    fn line(&mut self, bold: bool, size: f64, color: (f64, f64, f64), indent_mm: f64, text: &str) {
        if self.y_mm > PAGE_BREAK_MM {
            self.new_page();
        }

        let font = if bold { "F1" } else { "F2" };
        let x_pt = (LEFT_MARGIN_MM + indent_mm) * MM_TO_PT;
        let y_pt = (PAGE_HEIGHT_MM - self.y_mm) * MM_TO_PT;
        let _ = writeln!(
            self.current,
            "BT /{} {:.0} Tf {:.3} {:.3} {:.3} rg 1 0 0 1 {:.2} {:.2} Tm ({}) Tj ET",
            font,
            size,
            color.0,
            color.1,
            color.2,
            x_pt,
            y_pt,
            escape_pdf_text(text),
        );
    }

    fn title(&mut self, text: &str) {
        self.line(true, TITLE_SIZE, ORANGE, 0.0, text);
        self.y_mm += 14.0;
    }

    fn heading(&mut self, text: &str) {
        if self.y_mm > TOP_MARGIN_MM {
            self.y_mm += 4.0;
        }
        self.line(true, HEADING_SIZE, NAVY, 0.0, text);
        self.y_mm += 9.0;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap(text, 80) {
            self.line(false, BODY_SIZE, BLACK, 0.0, &line);
            self.y_mm += 7.0;
        }
        self.y_mm += 3.0;
    }

    fn bullet(&mut self, text: &str) {
        for (i, line) in wrap(text, 74).into_iter().enumerate() {
            let rendered = if i == 0 {
                format!("- {}", line)
            } else {
                format!("  {}", line)
            };
            self.line(false, BODY_SIZE, BLACK, 5.0, &rendered);
            self.y_mm += 7.0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.pages.push(self.current);
        self.pages
    }
}

fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_pdf_text(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x80 => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

/// Reads the pixel dimensions out of a JPEG's SOF marker. Anything that is
/// not a baseline or progressive JPEG is rejected.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(DealError::encoding("logo is not a JPEG image"));
    }

    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            return Err(DealError::encoding("malformed JPEG marker stream"));
        }
        let marker = data[i + 1];
        match marker {
            // fill bytes
            0xFF => i += 1,
            // standalone markers
            0x01 | 0xD0..=0xD9 => i += 2,
            // SOF0..SOF15, minus the huffman/arithmetic table markers
            0xC0..=0xCF if marker != 0xC4 && marker != 0xC8 && marker != 0xCC => {
                let height = u32::from(u16::from_be_bytes([data[i + 5], data[i + 6]]));
                let width = u32::from(u16::from_be_bytes([data[i + 7], data[i + 8]]));
                if width == 0 || height == 0 {
                    return Err(DealError::encoding("JPEG reports zero dimensions"));
                }
                return Ok((width, height));
            }
            _ => {
                let len = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
                i += 2 + len;
            }
        }
    }

    Err(DealError::encoding("no SOF marker found in JPEG"))
}

fn assemble(pages: &[String], logo: Option<&LogoImage>) -> Vec<u8> {
    let mut objects: Vec<Vec<u8>> = Vec::new();

    let first_page_id = if logo.is_some() { 6 } else { 5 };
    let kids = pages
        .iter()
        .enumerate()
        .map(|(i, _)| format!("{} 0 R", first_page_id + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    if let Some(logo) = logo {
        let mut obj = format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
/ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream\n",
            logo.width,
            logo.height,
            logo.data.len()
        )
        .into_bytes();
        obj.extend_from_slice(&logo.data);
        obj.extend_from_slice(b"\nendstream");
        objects.push(obj);
    }

    let mut resources = String::from("/Font << /F1 3 0 R /F2 4 0 R >>");
    if logo.is_some() {
        resources.push_str(" /XObject << /Im1 5 0 R >>");
    }

    for content in pages {
        let contents_id = objects.len() + 2;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595.28 841.89] \
/Resources << {} >> /Contents {} 0 R >>",
                resources, contents_id
            )
            .into_bytes(),
        );

        let mut obj = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        obj.extend_from_slice(content.as_bytes());
        obj.extend_from_slice(b"\nendstream");
        objects.push(obj);
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}
