//! Fluid style extraction: structural snapshots of a style source.
//!
//! Walks a style source (document → stylesheets → rules), keeps plain style rules
//! and `(min-width: <n>px)` conditional rules, and reduces every style rule to the
//! allowlisted fluid properties with shorthands expanded and zeros normalized.
//! Unreadable stylesheets, unsupported rules and unsupported conditions are dropped
//! rather than reported as errors.

#![forbid(unsafe_code)]

mod extract;
pub mod normalize;
pub mod observer;
pub mod registry;
pub mod shorthand;
pub mod source;

use anyhow::Result;
use css_fluid_model::DocumentClone;

pub use extract::Cloner;
pub use normalize::{normalize_selector, normalize_zero};
pub use observer::{ExtractEvent, ExtractObserver, ExtractTrace, NoopObserver};
pub use registry::{FluidProperties, PropertyRegistry, ShorthandTable};
pub use shorthand::{expand_shorthand, tokenize_shorthand};
pub use source::text::{TextDocument, TextSheet};
pub use source::{SourceRule, SourceRuleKind, SourceSheet, StyleSource};

/// Extract `source` with the built-in property registry.
///
/// # Errors
/// Returns an error only when a source rule contradicts its own kind.
pub fn extract_document<S: StyleSource>(source: &S) -> Result<DocumentClone> {
    let registry = PropertyRegistry::default();
    Cloner::new(&registry).extract_document(source)
}
