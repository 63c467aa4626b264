//! Raw per-file tool output as handed over by the tool-invocation layer.
//!
//! Ingestion is total: [`RawAnalysisResult::from_value`] never fails, it
//! falls back to empty defaults for anything absent or malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Coarse file category, selecting keyword rules, weights and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// MS Office and HWP documents inspected with the OLE/VBA tool family
    OfficeHwp,
    Pdf,
    /// Windows executables (EXE/DLL/SYS)
    Pe,
    Zip,
    #[default]
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 5] = [
        FileCategory::OfficeHwp,
        FileCategory::Pdf,
        FileCategory::Pe,
        FileCategory::Zip,
        FileCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::OfficeHwp => "office_hwp",
            FileCategory::Pdf => "pdf",
            FileCategory::Pe => "pe",
            FileCategory::Zip => "zip",
            FileCategory::Other => "other",
        }
    }

    /// Parse the `file_type` label used by the tool-invocation layer.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "office_hwp" | "office" | "hwp" | "ms" => Some(FileCategory::OfficeHwp),
            "pdf" => Some(FileCategory::Pdf),
            "pe" | "exe" | "executable" => Some(FileCategory::Pe),
            "zip" => Some(FileCategory::Zip),
            "other" => Some(FileCategory::Other),
            _ => None,
        }
    }

    /// Infer the category from a file name extension.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => FileCategory::Pdf,
            "exe" | "dll" | "sys" => FileCategory::Pe,
            "zip" => FileCategory::Zip,
            "doc" | "docx" | "docm" | "xls" | "xlsx" | "xlsm" | "ppt" | "pptx" | "pptm"
            | "hwp" => FileCategory::OfficeHwp,
            _ => FileCategory::Other,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured console output of one inspection tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: Option<i64>,
}

impl ToolOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            returncode: Some(0),
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            stdout: str_field(value, "stdout").unwrap_or_default().to_string(),
            stderr: str_field(value, "stderr").unwrap_or_default().to_string(),
            returncode: value.get("returncode").and_then(Value::as_i64),
        }
    }
}

/// One extracted VBA module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroEntry {
    pub filename: String,
    pub stream_path: String,
    pub module_name: String,
    pub code_size: u64,
}

impl MacroEntry {
    pub fn new(module_name: impl Into<String>, code_size: u64) -> Self {
        Self {
            module_name: module_name.into(),
            code_size,
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            filename: str_field(value, "filename").unwrap_or_default().to_string(),
            stream_path: str_field(value, "stream_path").unwrap_or_default().to_string(),
            module_name: str_field(value, "module_name")
                .or_else(|| str_field(value, "vba_filename"))
                .unwrap_or_default()
                .to_string(),
            code_size: coerce_size(value.get("code_size")),
        }
    }
}

/// A `(keyword, description, count)` row reported by a keyword scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordObservation {
    pub keyword: String,
    pub description: String,
    pub count: u64,
}

impl KeywordObservation {
    pub fn new(keyword: impl Into<String>, count: u64) -> Self {
        Self {
            keyword: keyword.into(),
            description: String::new(),
            count,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn from_value(value: &Value) -> Self {
        Self {
            keyword: str_field(value, "keyword").unwrap_or_default().to_string(),
            description: str_field(value, "description").unwrap_or_default().to_string(),
            count: coerce_count(value.get("count")),
        }
    }
}

/// Everything the inspection tools reported for one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnalysisResult {
    pub file_name: String,
    pub category: FileCategory,
    /// Single free-text blob, used by the one-tool categories
    pub script_output: Option<String>,
    /// Per-tool console output keyed by tool name
    pub tools: BTreeMap<String, ToolOutput>,
    pub macros: Vec<MacroEntry>,
    pub keywords: Vec<KeywordObservation>,
}

impl RawAnalysisResult {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            category: FileCategory::from_file_name(&file_name),
            file_name,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_script_output(mut self, output: impl Into<String>) -> Self {
        self.script_output = Some(output.into());
        self
    }

    pub fn with_tool(mut self, name: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.tools.insert(name.into(), ToolOutput::from_stdout(stdout));
        self
    }

    pub fn with_macro(mut self, entry: MacroEntry) -> Self {
        self.macros.push(entry);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>, count: u64) -> Self {
        self.keywords.push(KeywordObservation::new(keyword, count));
        self
    }

    /// Stdout of a named tool section, if present.
    pub fn tool_stdout(&self, name: &str) -> Option<&str> {
        self.tools.get(name).map(|t| t.stdout.as_str())
    }

    /// Parse a JSON document from the tool-invocation layer.
    ///
    /// Only syntactically invalid JSON is an error; shape problems are not.
    pub fn from_json_str(text: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Build a result from either the flat record shape or the nested
    /// `{"ok": .., "analysis": {..}}` shape emitted by the OLE tool runner.
    pub fn from_value(value: &Value) -> Self {
        let root = match value.get("analysis") {
            Some(inner) if inner.is_object() => inner,
            _ => value,
        };

        let file_name = str_field(root, "file_name")
            .or_else(|| str_field(root, "file"))
            .or_else(|| str_field(value, "file_name"))
            .or_else(|| str_field(value, "file"))
            .unwrap_or("unknown")
            .to_string();

        let category = str_field(root, "file_type")
            .or_else(|| str_field(value, "file_type"))
            .and_then(FileCategory::parse)
            .unwrap_or_else(|| FileCategory::from_file_name(&file_name));

        let script_output = str_field(root, "script_output")
            .or_else(|| str_field(value, "script_output"))
            .map(str::to_string);

        let vba = root.get("olevba").filter(|v| v.is_object());
        let list = |key: &str| -> Vec<Value> {
            vba.and_then(|v| v.get(key))
                .or_else(|| root.get(key))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        let macros = list("macros")
            .iter()
            .filter(|v| v.is_object())
            .map(MacroEntry::from_value)
            .collect();
        let keywords = list("keywords")
            .iter()
            .filter(|v| v.is_object())
            .map(KeywordObservation::from_value)
            .collect();

        let tools = root
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter(|(_, v)| v.get("stdout").is_some())
                    .map(|(name, v)| (name.clone(), ToolOutput::from_value(v)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            file_name,
            category,
            script_output,
            tools,
            macros,
            keywords,
        }
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Keyword counts: absent or non-numeric values count as one occurrence.
pub(crate) fn coerce_count(value: Option<&Value>) -> u64 {
    coerce_non_negative(value).unwrap_or(1)
}

/// Byte sizes: absent or malformed values count as zero.
pub(crate) fn coerce_size(value: Option<&Value>) -> u64 {
    coerce_non_negative(value).unwrap_or(0)
}

fn coerce_non_negative(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
        }
        _ => None,
    }
}
