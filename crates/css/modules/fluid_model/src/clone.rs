//! Clone tree produced by style extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property name to resolved value. Keys are lowercase hyphenated CSS identifiers,
/// including custom properties such as `--fluid-bg-size`.
pub type Declarations = BTreeMap<String, String>;

/// A style rule reduced to its normalized selector and allowlisted declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRuleClone {
    /// Normalized selector list.
    pub selector_text: String,
    /// Allowlisted declarations with shorthands expanded and zeros normalized.
    pub declarations: Declarations,
}

/// A `(min-width: <n>px)` conditional rule and the style rules inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRuleClone {
    /// Activation width in CSS pixels.
    pub min_width: u32,
    /// Contained style rules in source order.
    pub children: Vec<StyleRuleClone>,
}

impl ConditionalRuleClone {
    /// A conditional rule without children only declares its stylesheet's baseline width.
    pub fn is_baseline_indicator(&self) -> bool {
        self.children.is_empty()
    }
}

/// One rule of a stylesheet clone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleClone {
    /// An un-conditioned style rule.
    Style(StyleRuleClone),
    /// A width-conditional rule.
    Conditional(ConditionalRuleClone),
}

impl RuleClone {
    /// Borrow the style rule, if this is one.
    pub fn as_style(&self) -> Option<&StyleRuleClone> {
        match self {
            Self::Style(rule) => Some(rule),
            Self::Conditional(_) => None,
        }
    }

    /// Borrow the conditional rule, if this is one.
    pub fn as_conditional(&self) -> Option<&ConditionalRuleClone> {
        match self {
            Self::Conditional(rule) => Some(rule),
            Self::Style(_) => None,
        }
    }
}

impl From<StyleRuleClone> for RuleClone {
    fn from(rule: StyleRuleClone) -> Self {
        Self::Style(rule)
    }
}

impl From<ConditionalRuleClone> for RuleClone {
    fn from(rule: ConditionalRuleClone) -> Self {
        Self::Conditional(rule)
    }
}

/// Rules of one readable stylesheet, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSheetClone {
    /// Extracted rules; unrecognized source rules are absent, never holes.
    pub rules: Vec<RuleClone>,
}

/// Every readable stylesheet of a style source, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentClone {
    /// Stylesheet clones; inaccessible sheets are left out.
    pub style_sheets: Vec<StyleSheetClone>,
}
