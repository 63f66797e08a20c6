use crate::domain::model::{Catalog, ProposalMetadata, Selection};
use crate::utils::error::{DealError, Result};

/// Lifecycle of a proposal session. Export is only permitted in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    Editing,
    Ready,
}

/// Owns the selection state and metadata for one proposal session.
/// Created empty, mutated by discrete user actions, never persisted.
#[derive(Debug, Clone)]
pub struct ProposalBuilder {
    catalog: Catalog,
    selection: Selection,
    metadata: ProposalMetadata,
}

impl ProposalBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            metadata: ProposalMetadata::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn metadata(&self) -> &ProposalMetadata {
        &self.metadata
    }

    pub fn set_institution_name(&mut self, name: impl Into<String>) {
        self.metadata.institution = name.into();
    }

    pub fn set_focus_area(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.metadata.focus_area = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
    }

    /// Flips the selection state of one catalog entry. References that do not
    /// exist in the catalog are rejected, so the selection can never dangle.
    pub fn toggle(&mut self, category: &str, offering: &str) -> Result<bool> {
        if !self.catalog.contains(category, offering) {
            self.catalog.category(category)?;
            return Err(DealError::not_found("offering", offering));
        }
        Ok(self.selection.toggle(category, offering))
    }

    pub fn reset(&mut self) {
        self.selection.clear();
        self.metadata = ProposalMetadata::default();
    }

    pub fn state(&self) -> BuilderState {
        let has_institution = !self.metadata.institution.trim().is_empty();
        let has_selection = !self.selection.is_empty();

        let touched = !self.metadata.institution.is_empty()
            || self.metadata.focus_area.is_some()
            || has_selection;

        if has_institution && has_selection {
            BuilderState::Ready
        } else if touched {
            BuilderState::Editing
        } else {
            BuilderState::Empty
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == BuilderState::Ready
    }

    /// Programmatic guard for the export path. A UI would instead disable the
    /// export action while this would fail.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.metadata.institution.trim().is_empty() {
            return Err(DealError::invalid_input(
                "institution name is blank or whitespace-only",
            ));
        }
        if self.selection.is_empty() {
            return Err(DealError::invalid_input("no offerings selected"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    fn test_catalog() -> Catalog {
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

    #[test]
    fn test_starts_empty() {
        let builder = ProposalBuilder::new(test_catalog());
        assert_eq!(builder.state(), BuilderState::Empty);
        assert!(!builder.is_ready());
    }

    #[test]
    fn test_institution_alone_is_editing() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.set_institution_name("Acme U");
        assert_eq!(builder.state(), BuilderState::Editing);
    }

    #[test]
    fn test_selection_alone_is_editing() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.toggle("Infra", "LZA").unwrap();
        assert_eq!(builder.state(), BuilderState::Editing);
    }

    #[test]
    fn test_institution_plus_selection_is_ready() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.set_institution_name("Acme U");
        builder.toggle("Infra", "LZA").unwrap();
        assert_eq!(builder.state(), BuilderState::Ready);
        assert!(builder.ensure_ready().is_ok());
    }

    #[test]
    fn test_whitespace_institution_is_not_ready() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.set_institution_name("   ");
        builder.toggle("Infra", "LZA").unwrap();
        assert_ne!(builder.state(), BuilderState::Ready);
        assert!(matches!(
            builder.ensure_ready(),
            Err(DealError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_toggle_unknown_category_fails() {
        let mut builder = ProposalBuilder::new(test_catalog());
        let err = builder.toggle("Nope", "SRE").unwrap_err();
        assert!(matches!(err, DealError::NotFound { .. }));
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_toggle_unknown_offering_fails() {
        let mut builder = ProposalBuilder::new(test_catalog());
        let err = builder.toggle("Infra", "Pairing").unwrap_err();
        assert!(matches!(err, DealError::NotFound { .. }));
        assert!(err.to_string().contains("offering"));
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.toggle("Infra", "SRE").unwrap();
        builder.toggle("Infra", "SRE").unwrap();
        assert!(builder.selection().is_empty());
        assert_eq!(builder.state(), BuilderState::Empty);
    }

    #[test]
    fn test_reset_disallows_export() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.set_institution_name("Acme U");
        builder.set_focus_area("AI");
        builder.toggle("Infra", "LZA").unwrap();
        assert!(builder.is_ready());

        builder.reset();
        assert_eq!(builder.state(), BuilderState::Empty);
        assert!(matches!(
            builder.ensure_ready(),
            Err(DealError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_blank_focus_area_clears_field() {
        let mut builder = ProposalBuilder::new(test_catalog());
        builder.set_focus_area("Life Sciences");
        assert_eq!(builder.metadata().focus_area.as_deref(), Some("Life Sciences"));
        builder.set_focus_area("  ");
        assert_eq!(builder.metadata().focus_area, None);
    }
}
