//! Breakpoint batching: groups a clone tree's rules by activation width.
//!
//! Un-conditioned style rules become active at the stylesheet's baseline width;
//! rules inside a `(min-width: <n>px)` block become active at `n`. A conditional
//! block without children is a baseline indicator: it only moves the baseline.

#![forbid(unsafe_code)]

mod batcher;
pub mod observer;
mod state;

use css_fluid_model::{BatchedDocument, DocumentBaseline, DocumentClone, RuleBatch, RuleClone, StyleSheetClone};
use serde::{Deserialize, Serialize};

pub use batcher::{Batcher, style_sheet_baseline};
pub use observer::{BatchEvent, BatchObserver, BatchTrace, NoopObserver};
pub use state::BatchState;

/// Baseline width used when no baseline indicator exists anywhere in the document.
pub const DEFAULT_BASELINE_WIDTH: u32 = 375;

/// Batcher settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatcherConfig {
    /// Document baseline width when no baseline indicator rule is present.
    pub default_baseline_width: u32,
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self {
            default_baseline_width: DEFAULT_BASELINE_WIDTH,
        }
    }
}

/// Batch every stylesheet of `document` with the default configuration.
pub fn parse_document(document: &DocumentClone) -> BatchedDocument {
    Batcher::new(BatcherConfig::default()).parse_document(document)
}

/// Collect breakpoints and the document baseline width with the default configuration.
pub fn compute_document_baseline(style_sheets: &[StyleSheetClone]) -> DocumentBaseline {
    Batcher::new(BatcherConfig::default()).compute_document_baseline(style_sheets)
}

/// Batch one stylesheet's rules, falling back to `fallback_baseline_width`.
pub fn batch_style_sheet(rules: &[RuleClone], fallback_baseline_width: u32) -> Vec<RuleBatch> {
    Batcher::new(BatcherConfig::default()).batch_style_sheet(rules, fallback_baseline_width)
}
