//! Style source backed by stylesheet text parsed with `css_syntax`.

use super::{SourceRule, SourceRuleKind, SourceSheet, StyleSource};
use anyhow::{Result, anyhow};
use css_syntax::{CssRule, Stylesheet, parse_stylesheet};

impl SourceRule for CssRule {
    fn kind(&self) -> SourceRuleKind {
        match self {
            Self::Style(_) => SourceRuleKind::Style,
            Self::Media(_) => SourceRuleKind::Conditional,
            Self::Other(_) => SourceRuleKind::Other,
        }
    }

    fn selector_text(&self) -> &str {
        match self {
            Self::Style(rule) => &rule.prelude,
            Self::Media(_) | Self::Other(_) => "",
        }
    }

    fn property_value(&self, property: &str) -> Option<&str> {
        match self {
            Self::Style(rule) => rule.property_value(property),
            Self::Media(_) | Self::Other(_) => None,
        }
    }

    fn condition_text(&self) -> &str {
        match self {
            Self::Media(rule) => &rule.condition,
            Self::Style(_) | Self::Other(_) => "",
        }
    }

    fn child_rules(&self) -> &[Self] {
        match self {
            Self::Media(rule) => &rule.rules,
            Self::Style(_) | Self::Other(_) => &[],
        }
    }
}

/// A stylesheet that was either parsed or could not be obtained.
#[derive(Clone, Debug)]
pub enum TextSheet {
    /// Parsed stylesheet text.
    Parsed {
        /// Where the text came from, if known (file path, URL, ...).
        location: Option<String>,
        /// Parsed rule tree.
        sheet: Stylesheet,
    },
    /// A sheet whose rules cannot be read.
    Unavailable {
        /// Where the sheet was expected to come from.
        location: String,
        /// Why it could not be read.
        reason: String,
    },
}

impl TextSheet {
    /// Parse stylesheet text without a known location.
    pub fn parse(css: &str) -> Self {
        Self::Parsed {
            location: None,
            sheet: parse_stylesheet(css),
        }
    }

    /// Parse stylesheet text read from `location`.
    pub fn parse_at(location: impl Into<String>, css: &str) -> Self {
        Self::Parsed {
            location: Some(location.into()),
            sheet: parse_stylesheet(css),
        }
    }
}

impl SourceSheet for TextSheet {
    type Rule = CssRule;

    fn css_rules(&self) -> Result<&[Self::Rule]> {
        match self {
            Self::Parsed { sheet, .. } => Ok(&sheet.rules),
            Self::Unavailable { location, reason } => Err(anyhow!(
                "stylesheet '{location}' is not accessible: {reason}"
            )),
        }
    }

    fn location(&self) -> Option<&str> {
        match self {
            Self::Parsed { location, .. } => location.as_deref(),
            Self::Unavailable { location, .. } => Some(location),
        }
    }
}

/// A document made of text stylesheets, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TextDocument {
    sheets: Vec<TextSheet>,
}

impl TextDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from stylesheet texts, one sheet per text.
    pub fn from_css<'text>(texts: impl IntoIterator<Item = &'text str>) -> Self {
        Self {
            sheets: texts.into_iter().map(TextSheet::parse).collect(),
        }
    }

    /// Append a sheet.
    pub fn push(&mut self, sheet: TextSheet) {
        self.sheets.push(sheet);
    }

    /// Append a sheet that will refuse rule enumeration.
    pub fn push_unavailable(&mut self, location: impl Into<String>, reason: impl Into<String>) {
        self.sheets.push(TextSheet::Unavailable {
            location: location.into(),
            reason: reason.into(),
        });
    }
}

impl StyleSource for TextDocument {
    type Sheet = TextSheet;

    fn style_sheets(&self) -> &[Self::Sheet] {
        &self.sheets
    }
}
