//! Configuration for the SafeScan pipeline.
//!
//! Every section has defaults matching the built-in behavior, so an empty
//! JSON object is a valid configuration and partial files only override
//! what they name. Per-category sections are read as overrides and merged
//! onto that category's own defaults.

use crate::core::FileCategory;
use crate::error::{Result, SafescanError};
use crate::indicators::rules::{KeywordRules, RuleOverrides};
use crate::logging::LoggingConfig;
use crate::scoring::{WeightOverrides, WeightTable};
use crate::timeout::{DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration for the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafescanConfig {
    /// Limits for indicator extraction.
    pub extraction: ExtractionConfig,
    /// Thresholds for parsing single-blob console output.
    pub console: ConsoleConfig,
    /// Keyword membership sets per category.
    pub rules: RulesConfig,
    /// Score weights per category.
    pub scoring: ScoringConfig,
    /// Generator call limits and error classification.
    pub summarizer: SummarizerConfig,
    /// Prompt parameters per category.
    pub prompts: PromptConfig,
    /// Subscriber settings for [`crate::logging::init_tracing`].
    pub logging: LoggingConfig,
}

impl SafescanConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.sections.is_empty() && !self.extraction.scan_script_output {
            return Err(SafescanError::Config(
                "no console sections selected for scanning".into(),
            ));
        }
        if self.summarizer.timeout_seconds == 0 {
            return Err(SafescanError::Config("timeout_seconds must be positive".into()));
        }
        if self.summarizer.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(SafescanError::Config(format!(
                "timeout_seconds must not exceed {MAX_TIMEOUT_SECONDS}"
            )));
        }
        if !self.console.pe_entropy_threshold.is_finite()
            || !self.console.zip_ratio_threshold.is_finite()
        {
            return Err(SafescanError::Config("console thresholds must be finite".into()));
        }
        Ok(())
    }
}

/// Limits applied while deriving an indicator set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Tool sections scanned for free text, in order
    pub sections: Vec<String>,
    /// Whether the single `script_output` blob is scanned as well
    pub scan_script_output: bool,
    /// Section holding embedded-object listings
    pub embedded_section: String,
    /// Characters of each section scanned (default: 50000)
    pub max_section_chars: usize,
    pub max_urls: usize,
    pub max_base64: usize,
    pub max_embedded_lines: usize,
    pub max_obfuscation_signals: usize,
    pub top_keywords: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sections: ["oledir", "oleobj", "olemap", "oletimes"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan_script_output: true,
            embedded_section: "oleobj".to_string(),
            max_section_chars: 50_000,
            max_urls: 10,
            max_base64: 5,
            max_embedded_lines: 8,
            max_obfuscation_signals: 10,
            top_keywords: 10,
        }
    }
}

/// Thresholds for the table-printing console tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Section entropy above which a PE section counts as packed (default: 7.0)
    pub pe_entropy_threshold: f64,
    /// Compression ratio above which a ZIP entry is suspicious (default: 100.0)
    pub zip_ratio_threshold: f64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            pe_entropy_threshold: 7.0,
            zip_ratio_threshold: 100.0,
        }
    }
}

/// Partial settings for one category, applied over that category's defaults.
pub trait CategoryOverride: Default {
    type Target;

    fn merge_onto(self, base: Self::Target) -> Self::Target;
}

/// One override per category, as read from a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct CategoryOverrides<T> {
    pub office_hwp: T,
    pub pdf: T,
    pub pe: T,
    pub zip: T,
    pub other: T,
}

macro_rules! merge_categories {
    ($target:ty, $partial:ty) => {
        impl From<CategoryOverrides<$partial>> for $target {
            fn from(partial: CategoryOverrides<$partial>) -> Self {
                let base = Self::default();
                Self {
                    office_hwp: partial.office_hwp.merge_onto(base.office_hwp),
                    pdf: partial.pdf.merge_onto(base.pdf),
                    pe: partial.pe.merge_onto(base.pe),
                    zip: partial.zip.merge_onto(base.zip),
                    other: partial.other.merge_onto(base.other),
                }
            }
        }
    };
}

merge_categories!(RulesConfig, RuleOverrides);
merge_categories!(ScoringConfig, WeightOverrides);
merge_categories!(PromptConfig, PromptOverrides);

/// Keyword rule sets, one per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryOverrides<RuleOverrides>")]
pub struct RulesConfig {
    pub office_hwp: KeywordRules,
    pub pdf: KeywordRules,
    pub pe: KeywordRules,
    pub zip: KeywordRules,
    pub other: KeywordRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            office_hwp: KeywordRules::for_category(FileCategory::OfficeHwp),
            pdf: KeywordRules::for_category(FileCategory::Pdf),
            pe: KeywordRules::for_category(FileCategory::Pe),
            zip: KeywordRules::for_category(FileCategory::Zip),
            other: KeywordRules::for_category(FileCategory::Other),
        }
    }
}

impl RulesConfig {
    pub fn for_category(&self, category: FileCategory) -> &KeywordRules {
        match category {
            FileCategory::OfficeHwp => &self.office_hwp,
            FileCategory::Pdf => &self.pdf,
            FileCategory::Pe => &self.pe,
            FileCategory::Zip => &self.zip,
            FileCategory::Other => &self.other,
        }
    }
}

/// Score weights, one table per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryOverrides<WeightOverrides>")]
pub struct ScoringConfig {
    pub office_hwp: WeightTable,
    pub pdf: WeightTable,
    pub pe: WeightTable,
    pub zip: WeightTable,
    pub other: WeightTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            office_hwp: WeightTable::for_category(FileCategory::OfficeHwp),
            pdf: WeightTable::for_category(FileCategory::Pdf),
            pe: WeightTable::for_category(FileCategory::Pe),
            zip: WeightTable::for_category(FileCategory::Zip),
            other: WeightTable::for_category(FileCategory::Other),
        }
    }
}

impl ScoringConfig {
    pub fn for_category(&self, category: FileCategory) -> &WeightTable {
        match category {
            FileCategory::OfficeHwp => &self.office_hwp,
            FileCategory::Pdf => &self.pdf,
            FileCategory::Pe => &self.pe,
            FileCategory::Zip => &self.zip,
            FileCategory::Other => &self.other,
        }
    }
}

/// Limits and error classification for the generator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Seconds before the call is abandoned (default: 60)
    pub timeout_seconds: u64,
    /// Characters of an error message quoted in the fallback (default: 100)
    pub error_excerpt_chars: usize,
    /// Case-insensitive substrings marking a quota or rate-limit failure
    pub quota_markers: Vec<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            error_excerpt_chars: 100,
            quota_markers: ["429", "RESOURCE_EXHAUSTED", "quota", "rate limit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

const RESPONSE_CONTRACT: &str = "Respond with a single JSON object only:\n\
{\n\
  \"summary\": \"one to three sentence summary\",\n\
  \"risk_score\": number between 0 and 100,\n\
  \"risk_level\": \"low\" | \"medium\" | \"high\",\n\
  \"reasons\": [\"at most three findings actually observed\"],\n\
  \"recommended_actions\": [\"at least two concrete actions\"]\n\
}\n\
risk_level must be low below 40, medium from 40 to 69 and high from 70.";

/// Generation parameters for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrompt {
    pub system_instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Guidance placed in the payload next to the indicators
    pub summary_hint: String,
}

impl Default for CategoryPrompt {
    fn default() -> Self {
        Self::with_role(
            "You are a file security analyst. The input is the static analysis of an uploaded file.",
            "Judge conservatively; treat the precomputed risk as a baseline.",
        )
    }
}

impl CategoryPrompt {
    fn with_role(role: &str, hint: &str) -> Self {
        Self {
            system_instruction: format!("{role}\n\n{RESPONSE_CONTRACT}"),
            temperature: 0.2,
            max_output_tokens: 2048,
            summary_hint: hint.to_string(),
        }
    }
}

/// Prompt fields to replace for one category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PromptOverrides {
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub summary_hint: Option<String>,
}

impl CategoryOverride for PromptOverrides {
    type Target = CategoryPrompt;

    fn merge_onto(self, base: CategoryPrompt) -> CategoryPrompt {
        CategoryPrompt {
            system_instruction: self.system_instruction.unwrap_or(base.system_instruction),
            temperature: self.temperature.unwrap_or(base.temperature),
            max_output_tokens: self.max_output_tokens.unwrap_or(base.max_output_tokens),
            summary_hint: self.summary_hint.unwrap_or(base.summary_hint),
        }
    }
}

/// Prompt parameters, one set per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryOverrides<PromptOverrides>")]
pub struct PromptConfig {
    pub office_hwp: CategoryPrompt,
    pub pdf: CategoryPrompt,
    pub pe: CategoryPrompt,
    pub zip: CategoryPrompt,
    pub other: CategoryPrompt,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            office_hwp: CategoryPrompt::with_role(
                "You are an expert in malicious Office and HWP documents. The input lists VBA \
                 macros, keyword hits and OLE structure indicators.",
                "Macros that run on open and start processes are the strongest signal.",
            ),
            pdf: CategoryPrompt::with_role(
                "You are a PDF security analyst. The input is keyword counts from a PDF scanner.",
                "One or two script or action keywords are common in benign files; \
                 six or more with auto-actions are not.",
            ),
            pe: CategoryPrompt::with_role(
                "You are a malware analyst for Windows executables. The input lists suspicious \
                 imports and section entropy.",
                "Section entropy above 7.5 together with injection APIs suggests packing.",
            ),
            zip: CategoryPrompt::with_role(
                "You are an archive security analyst. The input lists archive entries, their \
                 compression ratios and extensions.",
                "Executable or script entries and extreme compression ratios matter most.",
            ),
            other: CategoryPrompt::default(),
        }
    }
}

impl PromptConfig {
    pub fn for_category(&self, category: FileCategory) -> &CategoryPrompt {
        match category {
            FileCategory::OfficeHwp => &self.office_hwp,
            FileCategory::Pdf => &self.pdf,
            FileCategory::Pe => &self.pe,
            FileCategory::Zip => &self.zip,
            FileCategory::Other => &self.other,
        }
    }
}
