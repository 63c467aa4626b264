//! Keyword membership sets used to classify scanner keywords.
//!
//! Names are matched exactly: the scanners report canonical spellings, so
//! `Shell` and `shell` are different keywords.

use crate::config::CategoryOverride;
use crate::core::FileCategory;
use serde::{Deserialize, Serialize};

/// Auto-execution triggers reported by the VBA keyword scanner.
const DOCUMENT_AUTOEXEC: &[&str] = &[
    "AutoOpen",
    "Document_Open",
    "Workbook_Open",
    "AutoExec",
    "AutoExit",
];

/// Primitives that start processes or automation objects.
const DOCUMENT_EXTERNAL: &[&str] = &["Shell", "WScript.Shell", "CreateObject", "Run", "Exec"];

/// String-building primitives common in obfuscated macros.
const DOCUMENT_OBFUSCATION: &[&str] = &[
    "Chr",
    "Val",
    "String$",
    "Replace",
    "Xor",
    "StrReverse",
    "Split",
    "Join",
];

const PDF_AUTOEXEC: &[&str] = &["/OpenAction", "/AA"];
const PDF_EXTERNAL: &[&str] = &["/JS", "/JavaScript", "/Launch", "/SubmitForm"];
const PDF_OBFUSCATION: &[&str] = &["/ObjStm"];

const PE_EXTERNAL: &[&str] = &[
    // Process injection
    "VirtualAlloc",
    "WriteProcessMemory",
    "CreateRemoteThread",
    // Process launch
    "ShellExecute",
    "WinExec",
    "CreateProcess",
    // Network
    "URLDownloadToFile",
    "InternetOpen",
    // Persistence
    "RegOpenKey",
    "RegSetValue",
];

/// Synthetic keyword emitted for sections above the entropy threshold.
pub const HIGH_ENTROPY_SECTION: &str = "HighEntropySection";

/// Synthetic keyword emitted for entries above the compression-ratio threshold.
pub const EXCESSIVE_COMPRESSION_RATIO: &str = "ExcessiveCompressionRatio";

const ZIP_EXTERNAL: &[&str] = &[".exe", ".bat", ".cmd", ".scr", ".vbs", ".js", ".wsf", ".ps1"];

/// Classification of a single keyword against a rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordClass {
    pub autoexec: bool,
    pub external_exec: bool,
    pub obfuscation: bool,
}

/// Immutable membership sets for one file category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRules {
    /// Keywords that run code without user action
    pub autoexec: Vec<String>,
    /// Keywords that launch external processes or objects
    pub external_exec: Vec<String>,
    /// Keywords typical of obfuscated payloads
    pub obfuscation: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl KeywordRules {
    pub fn new(autoexec: &[&str], external_exec: &[&str], obfuscation: &[&str]) -> Self {
        Self {
            autoexec: owned(autoexec),
            external_exec: owned(external_exec),
            obfuscation: owned(obfuscation),
        }
    }

    /// Office and HWP documents (VBA keyword scanner).
    pub fn documents() -> Self {
        Self::new(DOCUMENT_AUTOEXEC, DOCUMENT_EXTERNAL, DOCUMENT_OBFUSCATION)
    }

    /// PDF name objects reported by the PDF keyword scanner.
    pub fn pdf() -> Self {
        Self::new(PDF_AUTOEXEC, PDF_EXTERNAL, PDF_OBFUSCATION)
    }

    /// Windows executables: imported APIs and packed sections.
    pub fn pe() -> Self {
        Self::new(&[], PE_EXTERNAL, &[HIGH_ENTROPY_SECTION])
    }

    /// Archives: dangerous entry extensions and zip-bomb ratios.
    pub fn zip() -> Self {
        Self::new(&[], ZIP_EXTERNAL, &[EXCESSIVE_COMPRESSION_RATIO])
    }

    /// Default rule set for a category.
    pub fn for_category(category: FileCategory) -> Self {
        match category {
            FileCategory::OfficeHwp => Self::documents(),
            FileCategory::Pdf => Self::pdf(),
            FileCategory::Pe => Self::pe(),
            FileCategory::Zip => Self::zip(),
            FileCategory::Other => Self::default(),
        }
    }

    pub fn is_autoexec(&self, keyword: &str) -> bool {
        self.autoexec.iter().any(|k| k == keyword)
    }

    pub fn is_external_exec(&self, keyword: &str) -> bool {
        self.external_exec.iter().any(|k| k == keyword)
    }

    pub fn is_obfuscation(&self, keyword: &str) -> bool {
        self.obfuscation.iter().any(|k| k == keyword)
    }

    pub fn classify(&self, keyword: &str) -> KeywordClass {
        KeywordClass {
            autoexec: self.is_autoexec(keyword),
            external_exec: self.is_external_exec(keyword),
            obfuscation: self.is_obfuscation(keyword),
        }
    }
}

/// Replacement sets for one category; sets left out keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub autoexec: Option<Vec<String>>,
    pub external_exec: Option<Vec<String>>,
    pub obfuscation: Option<Vec<String>>,
}

impl CategoryOverride for RuleOverrides {
    type Target = KeywordRules;

    fn merge_onto(self, base: KeywordRules) -> KeywordRules {
        KeywordRules {
            autoexec: self.autoexec.unwrap_or(base.autoexec),
            external_exec: self.external_exec.unwrap_or(base.external_exec),
            obfuscation: self.obfuscation.unwrap_or(base.obfuscation),
        }
    }
}
