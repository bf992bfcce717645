//! Batching results handed to the interpolation engine.

use crate::clone::StyleRuleClone;
use serde::{Deserialize, Serialize};

/// A contiguous run of style rules sharing one activation width.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBatch {
    /// Rules in encounter order.
    pub rules: Vec<StyleRuleClone>,
    /// Width at which the rules become active.
    pub width: u32,
    /// `false` for un-conditioned baseline batches.
    pub is_media_query: bool,
}

/// Document-wide breakpoints, distinct, in first-encounter order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub breakpoints: Vec<u32>,
}

/// Outcome of the document initialization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBaseline {
    /// Distinct conditional widths in first-encounter order.
    pub breakpoints: Vec<u32>,
    /// Width of the last baseline-indicator rule in the document, or the configured default.
    pub global_baseline_width: u32,
}

/// Batches of a single stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSheetBatches {
    /// Width used for this sheet's un-conditioned rules.
    pub baseline_width: u32,
    /// Batches in the order they were opened.
    pub batches: Vec<RuleBatch>,
}

/// Everything batching produces for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchedDocument {
    pub parse_result: ParseResult,
    pub global_baseline_width: u32,
    /// One entry per stylesheet clone, in source order.
    pub style_sheets: Vec<StyleSheetBatches>,
}
