use crate::domain::model::{Catalog, Category};
use crate::utils::error::{DealError, Result};
use crate::utils::validation::validate_file_extension;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk catalog shape, loadable from TOML or JSON:
///
/// ```toml
/// [[categories]]
/// name = "Research Infrastructure"
/// description = "..."
/// offerings = ["HPC Cluster On Demand", "Research Data Repository"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<Category>,
}

impl CatalogFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path_display = path.as_ref().to_string_lossy().to_string();
        validate_file_extension("catalog", &path_display, &["toml", "json"])?;

        let content = std::fs::read_to_string(&path)?;
        let is_json = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "json");

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Catalog> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| DealError::InvalidConfigValue {
                field: "catalog".to_string(),
                value: "<toml>".to_string(),
                reason: format!("TOML parsing error: {}", e),
            })?;
        Catalog::new(file.categories)
    }

    pub fn from_json_str(content: &str) -> Result<Catalog> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Catalog::new(file.categories)
    }
}

fn category(name: &str, description: &str, offerings: &[&str]) -> Category {
    Category {
        name: name.to_string(),
        description: Some(description.to_string()),
        offerings: offerings.iter().map(|s| s.to_string()).collect(),
    }
}

/// The fixed research-engagement catalog shipped with the binary. Declaration
/// order is the export order.
pub fn builtin_catalog() -> Catalog {
    Catalog::new(vec![
        category(
            "Compliance Readiness",
            "Support for institutional compliance with cybersecurity frameworks such as CMMC, FedRAMP, and HIPAA/NIST.",
            &[
                "CMMC/NIST Documentation Support",
                "Certification Eligibility (FedRAMP, CMMC, HIPAA/NIST)",
            ],
        ),
        category(
            "Events & Seminars",
            "AWS-hosted training and research-focused events to promote cloud fluency and academic collaboration.",
            &[
                "AWS Immersion Day",
                "AWS Research Seminar Series",
                "Annual AWS Sponsored Research Conference",
            ],
        ),
        category(
            "Faculty Incentives",
            "Onboarding and enablement resources tailored to support faculty researchers at all stages.",
            &[
                "New Faculty Onboarding Package",
                "Executive Credit Program for Existing Faculty/Researchers",
            ],
        ),
        category(
            "Grant Support",
            "Official AWS collaboration and endorsement documentation to strengthen research funding proposals.",
            &[
                "Letter of Support for Proposal",
                "AWS Letter of Collaboration for Grant Submissions",
            ],
        ),
        category(
            "Research Commercialization",
            "Programs to transition academic research into startup pathways or commercial ventures.",
            &[
                "Startup Collaboration Program",
                "AWS Credits for Startups",
                "Startup Immersion Days",
                "Joint Steering Committee (JSC)",
                "AWS BD Liaison Assignment",
                "Working Backwards Sessions",
                "Innovation Enablement",
                "Case Study Development",
            ],
        ),
        category(
            "Research Enablement",
            "Cloud credits, guidance, and tools that directly accelerate academic research outcomes.",
            &[
                "Cloud Credit for Research",
                "Amazon Research Awards",
                "Published Blogs and Case Studies",
                "Research Office Hours with AWS Experts",
                "Development of Center of Excellence for Research in the Cloud",
            ],
        ),
        category(
            "Research Infrastructure",
            "Access to scalable compute, storage, and governance tooling for research workloads.",
            &[
                "HPC Cluster On Demand",
                "Landing Zone/Control Tower Creation",
                "Business Operations Setup (Account vending, billing, budgeting)",
                "Research Data Repository",
                "Hybrid Storage and File Caching",
                "Access to Accelerated Computing (GPU, FPGA, Quantum)",
                "Quantum Computing @ AWS",
            ],
        ),
        category(
            "Secure Research Environment (SRE)",
            "Turnkey AWS-native environments for secure data analysis, enclave research, and compliance-aligned science.",
            &[
                "SRE Deployment (AWS Native)",
                "Research Data Governance",
            ],
        ),
        category(
            "Student/University Engagement",
            "Hands-on programs to involve students, track on-prem usage, and encourage cloud experimentation.",
            &[
                "Cloud Trained Student Pairing",
                "Analysis of On-Prem Cluster Utilization",
                "Waiving Indirect Costs for Cloud Research",
            ],
        ),
    ])
    .expect("built-in catalog satisfies the uniqueness invariants")
}
