//! Indicator extraction from one file's raw tool output.

use crate::config::{ExtractionConfig, RulesConfig, SafescanConfig};
use crate::core::{FileCategory, IndicatorSet, KeywordObservation, RawAnalysisResult};
use crate::indicators::console::ConsoleHarvester;
use crate::indicators::keywords::rank_keywords;
use crate::indicators::patterns::{has_embedded_marker, truncate_chars, RE_BASE64, RE_URL};
use crate::indicators::rules::KeywordRules;
use tracing::debug;

/// Derives bounded [`IndicatorSet`]s using injected limits and rule sets.
#[derive(Debug, Clone, Default)]
pub struct IndicatorExtractor {
    limits: ExtractionConfig,
    rules: RulesConfig,
    harvester: ConsoleHarvester,
}

impl IndicatorExtractor {
    pub fn new(config: &SafescanConfig) -> Self {
        Self {
            limits: config.extraction.clone(),
            rules: config.rules.clone(),
            harvester: ConsoleHarvester::new(config.console.clone()),
        }
    }

    pub fn rules(&self, category: FileCategory) -> &KeywordRules {
        self.rules.for_category(category)
    }

    /// Structured keyword rows plus those harvested from console tables,
    /// without blank keywords. Zero counts are kept for classification.
    pub fn observations(&self, raw: &RawAnalysisResult) -> Vec<KeywordObservation> {
        let mut all: Vec<KeywordObservation> = raw.keywords.clone();
        if let Some(text) = raw.script_output.as_deref() {
            let text = truncate_chars(text, self.limits.max_section_chars);
            all.extend(
                self.harvester
                    .harvest(raw.category, text, self.rules(raw.category)),
            );
        }
        all.retain(|o| !o.keyword.trim().is_empty());
        all
    }

    pub fn extract(&self, raw: &RawAnalysisResult) -> IndicatorSet {
        let rules = self.rules(raw.category);
        let observations = self.observations(raw);

        let macro_count = raw.macros.len() as u64;
        let total_code_bytes = raw
            .macros
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.code_size));
        let active_rows = observations.iter().any(|o| o.count > 0);
        let has_macros =
            macro_count > 0 || (harvests_console_tables(raw.category) && active_rows);

        let mut indicators = IndicatorSet {
            has_macros,
            macro_count,
            total_code_bytes,
            top_keywords: rank_keywords(&observations, self.limits.top_keywords),
            ..IndicatorSet::default()
        };

        if has_macros {
            for obs in &observations {
                let keyword = obs.keyword.trim();
                let class = rules.classify(keyword);
                indicators.autoexec_detected |= class.autoexec;
                indicators.external_exec_detected |= class.external_exec;
                if class.obfuscation {
                    push_unique(
                        &mut indicators.obfuscation_signals,
                        keyword,
                        self.limits.max_obfuscation_signals,
                    );
                }
            }
        }

        for text in self.scan_texts(raw) {
            for m in RE_URL.find_iter(text) {
                if !push_unique(&mut indicators.urls, m.as_str(), self.limits.max_urls) {
                    break;
                }
            }
            for m in RE_BASE64.find_iter(text) {
                if !push_unique(&mut indicators.base64_suspects, m.as_str(), self.limits.max_base64)
                {
                    break;
                }
            }
        }

        if let Some(text) = raw.tool_stdout(&self.limits.embedded_section) {
            indicators.embedded_object_lines = text
                .lines()
                .filter(|line| has_embedded_marker(line))
                .map(|line| line.trim().to_string())
                .take(self.limits.max_embedded_lines)
                .collect();
        }

        debug!(
            file = %raw.file_name,
            category = %raw.category,
            has_macros = indicators.has_macros,
            keywords = indicators.top_keywords.len(),
            urls = indicators.urls.len(),
            base64 = indicators.base64_suspects.len(),
            embedded = indicators.embedded_object_lines.len(),
            "Extracted indicators"
        );

        indicators
    }

    /// Console sections in configured order, each cut to the section limit.
    fn scan_texts<'a>(&self, raw: &'a RawAnalysisResult) -> Vec<&'a str> {
        let mut texts: Vec<&'a str> = self
            .limits
            .sections
            .iter()
            .filter_map(|name| raw.tool_stdout(name))
            .collect();
        if self.limits.scan_script_output {
            texts.extend(raw.script_output.as_deref());
        }
        texts
            .into_iter()
            .map(|t| truncate_chars(t, self.limits.max_section_chars))
            .collect()
    }
}

fn harvests_console_tables(category: FileCategory) -> bool {
    matches!(
        category,
        FileCategory::Pdf | FileCategory::Pe | FileCategory::Zip
    )
}

/// Push `item` unless present; returns false once `list` is full.
fn push_unique(list: &mut Vec<String>, item: &str, cap: usize) -> bool {
    if list.len() >= cap {
        return false;
    }
    if !list.iter().any(|x| x == item) {
        list.push(item.to_string());
    }
    list.len() < cap
}
