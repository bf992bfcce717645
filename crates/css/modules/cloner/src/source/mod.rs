//! The live style source the cloner reads from.
//!
//! A source is an ordered list of stylesheets; each stylesheet may refuse to
//! enumerate its rules (for example a cross-origin sheet), which the cloner treats
//! as "skip this sheet" rather than as a failure of the whole extraction.

use anyhow::Result;

pub mod text;

/// Discriminant of a source rule, mirroring the CSSOM rule types the cloner cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceRuleKind {
    /// A plain style rule (`CSSStyleRule`).
    Style,
    /// A width-conditional group rule (`CSSMediaRule`).
    Conditional,
    /// Anything else: keyframes, imports, font faces, ...
    Other,
}

/// Read access to a single rule of a style source.
pub trait SourceRule: Sized {
    /// Which kind of rule this is.
    fn kind(&self) -> SourceRuleKind;

    /// Selector text of a style rule; empty for other kinds.
    fn selector_text(&self) -> &str;

    /// Declared value of `property` on a style rule. `None` (or an empty string)
    /// means the property is not declared.
    fn property_value(&self, property: &str) -> Option<&str>;

    /// Condition text of a conditional rule; empty for other kinds.
    fn condition_text(&self) -> &str;

    /// Rules nested in a conditional rule, in source order; empty for other kinds.
    fn child_rules(&self) -> &[Self];
}

/// One stylesheet of a style source.
pub trait SourceSheet {
    /// Rule type exposed by this sheet.
    type Rule: SourceRule;

    /// Enumerate the sheet's rules in source order.
    ///
    /// # Errors
    /// Returns an error when the sheet's rules cannot be read, e.g. an access
    /// violation for a cross-origin sheet.
    fn css_rules(&self) -> Result<&[Self::Rule]>;

    /// Where the sheet came from (file path, URL, ...), if known.
    fn location(&self) -> Option<&str> {
        None
    }
}

/// A document-like style source.
pub trait StyleSource {
    /// Stylesheet type exposed by this source.
    type Sheet: SourceSheet;

    /// All stylesheets in source order.
    fn style_sheets(&self) -> &[Self::Sheet];
}
