use crate::domain::model::{Block, Catalog, DocumentBody, ExportFormat, ProposalMetadata, Selection};
use chrono::NaiveDate;

pub const LETTER_TITLE: &str = "AWS Research Partnership Letter";

pub const FILENAME_SUFFIX: &str = "AWS_Research_Partnership_Letter";

const INTRO: &str = "AWS proposes the following tailored research engagement framework \
to support innovation, security, and scalability for your institution.";

fn closing(institution: &str) -> String {
    format!(
        "AWS will work in partnership with {} to enable best-in-class research, \
accelerate time to insight, and prepare researchers with compliant and \
cost-effective cloud resources.",
        institution
    )
}

/// Reduces catalog × selection into the format-independent letter body.
///
/// Categories are walked in catalog declaration order; within a category the
/// chosen offerings keep the catalog's offering order no matter in which
/// order they were toggled. Categories with nothing chosen are skipped.
pub fn render_body(
    catalog: &Catalog,
    selection: &Selection,
    metadata: &ProposalMetadata,
    prepared_on: NaiveDate,
) -> DocumentBody {
    let institution = metadata.institution.trim();
    let mut body = DocumentBody::default();

    body.push(Block::Title(LETTER_TITLE.to_string()));
    body.push(Block::Paragraph(format!("To: {}", institution)));
    body.push(Block::Paragraph(format!(
        "Prepared: {}",
        prepared_on.format("%Y-%m-%d")
    )));
    if let Some(focus_area) = &metadata.focus_area {
        body.push(Block::Paragraph(format!("Focus Area: {}", focus_area)));
    }
    body.push(Block::Paragraph(INTRO.to_string()));

    for category in catalog.categories() {
        let Some(chosen) = selection.chosen_in(&category.name) else {
            continue;
        };
        if chosen.is_empty() {
            continue;
        }

        body.push(Block::Heading(category.name.clone()));
        for offering in &category.offerings {
            if chosen.contains(offering) {
                body.push(Block::Bullet(offering.clone()));
            }
        }
    }

    body.push(Block::Paragraph(closing(institution)));
    body
}

/// `"Acme  U"` and `"Acme U"` both become `Acme_U_<suffix>.<ext>`; runs of
/// whitespace collapse to a single underscore and the result is stable under
/// a second pass.
pub fn derive_filename(institution: &str, format: ExportFormat) -> String {
    let collapsed = institution.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}.{}", collapsed, FILENAME_SUFFIX, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Category {
                name: "Infra".to_string(),
                description: None,
                offerings: vec!["SRE".to_string(), "LZA".to_string()],
            },
            Category {
                name: "Talent".to_string(),
                description: None,
                offerings: vec!["Pairing".to_string()],
            },
        ])
        .unwrap()
    }

    fn metadata(institution: &str) -> ProposalMetadata {
        ProposalMetadata {
            institution: institution.to_string(),
            focus_area: None,
        }
    }

    #[test]
    fn test_chosen_offerings_appear_exactly_once() {
        let mut selection = Selection::new();
        selection.toggle("Infra", "LZA");

        let body = render_body(&catalog(), &selection, &metadata("Acme U"), date());

        let bullets: Vec<&str> = body
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bullets, vec!["LZA"]);
    }

    #[test]
    fn test_empty_categories_produce_no_heading() {
        let mut selection = Selection::new();
        selection.toggle("Infra", "LZA");

        let body = render_body(&catalog(), &selection, &metadata("Acme U"), date());

        let headings: Vec<&str> = body
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["Infra"]);
    }

    #[test]
    fn test_bullets_follow_catalog_order_not_toggle_order() {
        let mut selection = Selection::new();
        selection.toggle("Infra", "LZA");
        selection.toggle("Infra", "SRE");

        let body = render_body(&catalog(), &selection, &metadata("Acme U"), date());

        let bullets: Vec<&str> = body
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bullets, vec!["SRE", "LZA"]);
    }

    #[test]
    fn test_body_references_institution_and_date() {
        let mut selection = Selection::new();
        selection.toggle("Talent", "Pairing");

        let body = render_body(&catalog(), &selection, &metadata("Acme U"), date());

        let paragraphs: Vec<&str> = body
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert!(paragraphs.contains(&"To: Acme U"));
        assert!(paragraphs.contains(&"Prepared: 2026-08-24"));
        assert!(paragraphs.iter().any(|p| p.starts_with("AWS will work in partnership with Acme U")));
    }

    #[test]
    fn test_focus_area_renders_only_when_set() {
        let mut selection = Selection::new();
        selection.toggle("Infra", "SRE");

        let without = render_body(&catalog(), &selection, &metadata("Acme U"), date());
        assert!(!without
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Paragraph(p) if p.starts_with("Focus Area:"))));

        let meta = ProposalMetadata {
            institution: "Acme U".to_string(),
            focus_area: Some("Genomics".to_string()),
        };
        let with = render_body(&catalog(), &selection, &meta, date());
        assert!(with
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Paragraph(p) if p == "Focus Area: Genomics")));
    }

    #[test]
    fn test_filename_collapses_whitespace() {
        assert_eq!(
            derive_filename("Acme U", ExportFormat::Text),
            "Acme_U_AWS_Research_Partnership_Letter.txt"
        );
        assert_eq!(
            derive_filename("Acme  U", ExportFormat::Text),
            derive_filename("Acme U", ExportFormat::Text)
        );
        assert_eq!(
            derive_filename("  Acme\tU ", ExportFormat::Pdf),
            "Acme_U_AWS_Research_Partnership_Letter.pdf"
        );
    }

    #[test]
    fn test_filename_derivation_is_idempotent() {
        // Underscores are not whitespace, so deriving from an already-collapsed
        // name changes nothing
        assert_eq!(
            derive_filename("University_of_Somewhere", ExportFormat::Docx),
            "University_of_Somewhere_AWS_Research_Partnership_Letter.docx"
        );
        assert_eq!(
            derive_filename("University of Somewhere", ExportFormat::Docx),
            "University_of_Somewhere_AWS_Research_Partnership_Letter.docx"
        );
    }
}
