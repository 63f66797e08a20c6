pub mod catalog;
pub mod cli;

use crate::domain::model::ExportFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DealError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "deal-builder")]
#[command(about = "Builds a tailored research partnership letter from a fixed offering catalog")]
pub struct CliConfig {
    #[arg(long, help = "Institution the letter is addressed to")]
    pub institution: Option<String>,

    #[arg(long, help = "Optional focus area (AI, Life Sciences, Compliance, ...)")]
    pub focus_area: Option<String>,

    #[arg(
        long = "select",
        value_name = "CATEGORY=OFFERING",
        help = "Toggle one catalog offering; repeatable"
    )]
    pub select: Vec<String>,

    #[arg(long, default_value = "text", help = "Output format: text, pdf or docx")]
    pub format: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Catalog file (.toml or .json) overriding the built-in catalog")]
    pub catalog: Option<String>,

    #[arg(long, help = "JPEG logo to embed in the PDF header")]
    pub logo_url: Option<String>,

    #[arg(long, default_value = "10")]
    pub logo_timeout_seconds: u64,

    #[arg(long, help = "Print the catalog and exit")]
    pub list: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Splits each `--select CATEGORY=OFFERING` argument into its pair.
    pub fn parse_selection(&self) -> Result<Vec<(String, String)>> {
        self.select
            .iter()
            .map(|raw| {
                raw.split_once('=')
                    .map(|(category, offering)| {
                        (category.trim().to_string(), offering.trim().to_string())
                    })
                    .filter(|(category, offering)| !category.is_empty() && !offering.is_empty())
                    .ok_or_else(|| DealError::InvalidConfigValue {
                        field: "select".to_string(),
                        value: raw.clone(),
                        reason: "expected CATEGORY=OFFERING".to_string(),
                    })
            })
            .collect()
    }

    pub fn export_format(&self) -> Result<ExportFormat> {
        self.format.parse()
    }
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn format(&self) -> ExportFormat {
        // validate() has already rejected unparsable formats
        self.format.parse().unwrap_or(ExportFormat::Text)
    }

    fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    fn logo_timeout_seconds(&self) -> u64 {
        self.logo_timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.list {
            return Ok(());
        }

        let institution = self
            .institution
            .as_deref()
            .ok_or_else(|| DealError::MissingConfig {
                field: "institution".to_string(),
            })?;
        validate_non_empty_string("institution", institution)?;

        self.export_format()?;
        validate_path("output_path", &self.output_path)?;

        if let Some(catalog) = &self.catalog {
            validate_file_extension("catalog", catalog, &["toml", "json"])?;
        }
        if let Some(url) = &self.logo_url {
            validate_url("logo_url", url)?;
        }
        validate_positive_number("logo_timeout_seconds", self.logo_timeout_seconds, 1)?;

        self.parse_selection()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            institution: Some("Acme U".to_string()),
            focus_area: None,
            select: vec!["Infra=SRE".to_string()],
            format: "text".to_string(),
            output_path: "./output".to_string(),
            catalog: None,
            logo_url: None,
            logo_timeout_seconds: 10,
            list: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_parse_selection_pairs() {
        let mut config = base_config();
        config.select = vec![
            "Infra=SRE".to_string(),
            "Events & Seminars = AWS Immersion Day".to_string(),
        ];
        let pairs = config.parse_selection().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Infra".to_string(), "SRE".to_string()),
                (
                    "Events & Seminars".to_string(),
                    "AWS Immersion Day".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_parse_selection_rejects_missing_separator() {
        let mut config = base_config();
        config.select = vec!["InfraSRE".to_string()];
        assert!(matches!(
            config.parse_selection(),
            Err(DealError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_parse_selection_rejects_empty_sides() {
        let mut config = base_config();
        config.select = vec!["=SRE".to_string()];
        assert!(config.parse_selection().is_err());

        config.select = vec!["Infra=".to_string()];
        assert!(config.parse_selection().is_err());
    }

    #[test]
    fn test_missing_institution_fails_validation() {
        let mut config = base_config();
        config.institution = None;
        assert!(matches!(
            config.validate(),
            Err(DealError::MissingConfig { .. })
        ));
    }

    #[test]
    fn test_blank_institution_fails_validation() {
        let mut config = base_config();
        config.institution = Some("   ".to_string());
        assert!(matches!(
            config.validate(),
            Err(DealError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_unknown_format_fails_validation() {
        let mut config = base_config();
        config.format = "odt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_list_mode_skips_export_validation() {
        let mut config = base_config();
        config.institution = None;
        config.list = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_logo_url_fails_validation() {
        let mut config = base_config();
        config.logo_url = Some("ftp://example.com/logo.jpg".to_string());
        assert!(config.validate().is_err());
    }
}
