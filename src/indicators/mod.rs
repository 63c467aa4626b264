//! Indicator extraction: keyword classification, console harvesting and
//! bounded free-text scanning of tool output.

pub mod console;
pub mod extract;
pub mod keywords;
pub mod patterns;
pub mod rules;

pub use console::ConsoleHarvester;
pub use extract::IndicatorExtractor;
pub use keywords::{rank_keywords, DEFAULT_TOP_KEYWORDS};
pub use rules::{KeywordClass, KeywordRules};
