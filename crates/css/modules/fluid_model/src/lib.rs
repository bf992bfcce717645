//! Plain-data snapshot types shared by the cloner and the batcher.
//!
//! The clone tree (`DocumentClone` → `StyleSheetClone` → `RuleClone`) is what
//! extraction produces; the batch types are what breakpoint batching produces from
//! it. Everything here is an immutable snapshot once built and serialises with
//! serde so it can be shipped to the interpolation engine unchanged.

#![forbid(unsafe_code)]

mod batch;
mod clone;

pub use batch::{BatchedDocument, DocumentBaseline, ParseResult, RuleBatch, StyleSheetBatches};
pub use clone::{
    ConditionalRuleClone, Declarations, DocumentClone, RuleClone, StyleRuleClone,
    StyleSheetClone,
};
