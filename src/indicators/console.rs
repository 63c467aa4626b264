//! Keyword harvesting from table-style console output.
//!
//! The PDF, PE and ZIP tools print one text blob with `|`-separated rows
//! instead of structured keyword lists. Rows that do not parse, including
//! headers and separators, are skipped.

use crate::config::ConsoleConfig;
use crate::core::{FileCategory, KeywordObservation};
use crate::indicators::rules::{KeywordRules, EXCESSIVE_COMPRESSION_RATIO, HIGH_ENTROPY_SECTION};

/// Turns console tables into keyword observations for one category.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHarvester {
    config: ConsoleConfig,
}

impl ConsoleHarvester {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// Observations for `category`; categories with structured keyword
    /// lists yield nothing.
    pub fn harvest(
        &self,
        category: FileCategory,
        text: &str,
        rules: &KeywordRules,
    ) -> Vec<KeywordObservation> {
        match category {
            FileCategory::Pdf => harvest_pdf(text),
            FileCategory::Pe => harvest_pe(text, &rules.external_exec, self.config.pe_entropy_threshold),
            FileCategory::Zip => {
                harvest_zip(text, &rules.external_exec, self.config.zip_ratio_threshold)
            }
            FileCategory::OfficeHwp | FileCategory::Other => Vec::new(),
        }
    }
}

fn columns(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Rows `<keyword> | <count> | <description>` with a `/Name` keyword.
pub fn harvest_pdf(text: &str) -> Vec<KeywordObservation> {
    text.lines()
        .filter_map(|line| {
            let cols = columns(line);
            if cols.len() < 2 {
                return None;
            }
            let keyword = cols[0];
            if !keyword.starts_with('/') || keyword.len() < 2 {
                return None;
            }
            let count = cols[1].parse::<u64>().ok()?;
            let description = cols.get(2).copied().unwrap_or_default();
            Some(KeywordObservation::new(keyword, count).with_description(description))
        })
        .collect()
}

/// Suspicious API lines and high-entropy section rows.
pub fn harvest_pe(text: &str, apis: &[String], entropy_threshold: f64) -> Vec<KeywordObservation> {
    let mut out = Vec::new();
    for line in text.lines() {
        let cols = columns(line);
        if cols.len() >= 4 {
            if let Ok(entropy) = cols[2].parse::<f64>() {
                if entropy > entropy_threshold {
                    out.push(
                        KeywordObservation::new(HIGH_ENTROPY_SECTION, 1)
                            .with_description(format!("section {} entropy {:.4}", cols[0], entropy)),
                    );
                }
                continue;
            }
        }
        for api in apis.iter().filter(|api| !api.is_empty()) {
            if line.contains(api.as_str()) {
                out.push(
                    KeywordObservation::new(api.clone(), 1).with_description(line.trim().to_string()),
                );
            }
        }
    }
    out
}

/// Rows `<entry> | <ratio>x | <status>`.
pub fn harvest_zip(
    text: &str,
    extensions: &[String],
    ratio_threshold: f64,
) -> Vec<KeywordObservation> {
    let mut out = Vec::new();
    for line in text.lines() {
        let cols = columns(line);
        if cols.len() < 2 {
            continue;
        }
        let Some(ratio) = parse_ratio(cols[1]) else {
            continue;
        };
        let entry = cols[0];
        if ratio > ratio_threshold {
            out.push(
                KeywordObservation::new(EXCESSIVE_COMPRESSION_RATIO, 1)
                    .with_description(format!("{entry} ratio {ratio:.1}x")),
            );
        }
        if let Some(ext) = entry_extension(entry) {
            if let Some(hit) = extensions.iter().find(|e| e.eq_ignore_ascii_case(&ext)) {
                out.push(KeywordObservation::new(hit.clone(), 1).with_description(entry.to_string()));
            }
        }
    }
    out
}

fn parse_ratio(col: &str) -> Option<f64> {
    let digits = col.trim().strip_suffix('x')?.trim();
    digits.parse::<f64>().ok().filter(|r| r.is_finite())
}

fn entry_extension(entry: &str) -> Option<String> {
    let name = entry.rsplit(['/', '\\']).next()?;
    let dot = name.rfind('.')?;
    if dot + 1 == name.len() {
        return None;
    }
    Some(name[dot..].to_ascii_lowercase())
}
