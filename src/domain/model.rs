use crate::utils::error::{DealError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One selectable group of offerings. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub offerings: Vec<String>,
}

/// Ordered set of categories; declaration order is display and export order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate category names and duplicate
    /// offering names within a category.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category.name.as_str()) {
                return Err(DealError::CatalogInvalid {
                    message: format!("duplicate category '{}'", category.name),
                });
            }

            let mut seen_offerings = HashSet::new();
            for offering in &category.offerings {
                if !seen_offerings.insert(offering.as_str()) {
                    return Err(DealError::CatalogInvalid {
                        message: format!(
                            "duplicate offering '{}' in category '{}'",
                            offering, category.name
                        ),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DealError::not_found("category", name))
    }

    pub fn offerings(&self, category: &str) -> Result<&[String]> {
        Ok(&self.category(category)?.offerings)
    }

    pub fn contains(&self, category: &str, offering: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.name == category && c.offerings.iter().any(|o| o == offering))
    }
}

/// Runtime record of chosen offerings, keyed by category (multi-select).
/// Order is irrelevant here; rendering always follows catalog order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    chosen: HashMap<String, HashSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `offering` within `category`. Returns whether the
    /// offering is selected after the flip.
    pub fn toggle(&mut self, category: &str, offering: &str) -> bool {
        let entry = self.chosen.entry(category.to_string()).or_default();
        let now_selected = if entry.remove(offering) {
            false
        } else {
            entry.insert(offering.to_string());
            true
        };

        if entry.is_empty() {
            self.chosen.remove(category);
        }

        now_selected
    }

    pub fn is_selected(&self, category: &str, offering: &str) -> bool {
        self.chosen
            .get(category)
            .is_some_and(|set| set.contains(offering))
    }

    pub fn chosen_in(&self, category: &str) -> Option<&HashSet<String>> {
        self.chosen.get(category)
    }

    pub fn total(&self) -> usize {
        self.chosen.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }
}

/// Free-text fields attached to the proposal. Institution is required
/// before export; focus area is optional.
#[derive(Debug, Clone, Default)]
pub struct ProposalMetadata {
    pub institution: String,
    pub focus_area: Option<String>,
}

/// Intermediate markup shared by all encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Paragraph(String),
    Heading(String),
    Bullet(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBody {
    pub blocks: Vec<Block>,
}

impl DocumentBody {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Docx => write!(f, "docx"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = DealError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(DealError::InvalidConfigValue {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "supported formats: text, pdf, docx".to_string(),
            }),
        }
    }
}
