//! Hooks into each extraction step.
//!
//! A `Cloner` reports every result it produces to its observer. Production code
//! uses [`NoopObserver`]; tests and tooling use [`ExtractTrace`] to collect the
//! results of one extraction run and assert on them afterwards.

use anyhow::Error;
use css_fluid_model::{
    ConditionalRuleClone, Declarations, DocumentClone, RuleClone, StyleRuleClone,
    StyleSheetClone,
};

/// Receives the result of every traced extraction operation.
pub trait ExtractObserver {
    /// A whole document was extracted.
    fn document(&mut self, _document: &DocumentClone) {}

    /// A readable stylesheet was extracted.
    fn style_sheet(&mut self, _sheet: &StyleSheetClone) {}

    /// The stylesheet at `index` could not be read and was left out.
    fn skipped_style_sheet(&mut self, _index: usize, _error: &Error) {}

    /// A source rule was extracted (`Some`) or dropped (`None`).
    fn rule(&mut self, _rule: Option<&RuleClone>) {}

    /// A style rule was extracted.
    fn style_rule(&mut self, _rule: &StyleRuleClone) {}

    /// A conditional rule was recognized (`Some`) or dropped (`None`).
    fn conditional_rule(&mut self, _rule: Option<&ConditionalRuleClone>) {}

    /// A shorthand value was expanded.
    fn shorthand(&mut self, _name: &str, _value: &str, _expanded: &Declarations) {}
}

impl<O: ExtractObserver + ?Sized> ExtractObserver for &mut O {
    fn document(&mut self, document: &DocumentClone) {
        (**self).document(document);
    }

    fn style_sheet(&mut self, sheet: &StyleSheetClone) {
        (**self).style_sheet(sheet);
    }

    fn skipped_style_sheet(&mut self, index: usize, error: &Error) {
        (**self).skipped_style_sheet(index, error);
    }

    fn rule(&mut self, rule: Option<&RuleClone>) {
        (**self).rule(rule);
    }

    fn style_rule(&mut self, rule: &StyleRuleClone) {
        (**self).style_rule(rule);
    }

    fn conditional_rule(&mut self, rule: Option<&ConditionalRuleClone>) {
        (**self).conditional_rule(rule);
    }

    fn shorthand(&mut self, name: &str, value: &str, expanded: &Declarations) {
        (**self).shorthand(name, value, expanded);
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ExtractObserver for NoopObserver {}

/// One recorded extraction result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractEvent {
    Document(DocumentClone),
    StyleSheet(StyleSheetClone),
    SkippedStyleSheet {
        /// Position of the sheet in the source.
        index: usize,
        /// Rendered access error.
        reason: String,
    },
    Rule(Option<RuleClone>),
    StyleRule(StyleRuleClone),
    ConditionalRule(Option<ConditionalRuleClone>),
    Shorthand {
        name: String,
        value: String,
        expanded: Declarations,
    },
}

/// Sink recording every extraction result of one run, in the order produced.
#[derive(Clone, Debug, Default)]
pub struct ExtractTrace {
    events: Vec<ExtractEvent>,
}

impl ExtractTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in order.
    pub fn events(&self) -> &[ExtractEvent] {
        &self.events
    }

    /// Take the recorded events.
    pub fn into_events(self) -> Vec<ExtractEvent> {
        self.events
    }

    /// Style rules recorded so far, in extraction order.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRuleClone> {
        self.events.iter().filter_map(|event| match event {
            ExtractEvent::StyleRule(rule) => Some(rule),
            _ => None,
        })
    }
}

impl ExtractObserver for ExtractTrace {
    fn document(&mut self, document: &DocumentClone) {
        self.events.push(ExtractEvent::Document(document.clone()));
    }

    fn style_sheet(&mut self, sheet: &StyleSheetClone) {
        self.events.push(ExtractEvent::StyleSheet(sheet.clone()));
    }

    fn skipped_style_sheet(&mut self, index: usize, error: &Error) {
        self.events.push(ExtractEvent::SkippedStyleSheet {
            index,
            reason: format!("{error:#}"),
        });
    }

    fn rule(&mut self, rule: Option<&RuleClone>) {
        self.events.push(ExtractEvent::Rule(rule.cloned()));
    }

    fn style_rule(&mut self, rule: &StyleRuleClone) {
        self.events.push(ExtractEvent::StyleRule(rule.clone()));
    }

    fn conditional_rule(&mut self, rule: Option<&ConditionalRuleClone>) {
        self.events.push(ExtractEvent::ConditionalRule(rule.cloned()));
    }

    fn shorthand(&mut self, name: &str, value: &str, expanded: &Declarations) {
        self.events.push(ExtractEvent::Shorthand {
            name: name.to_owned(),
            value: value.to_owned(),
            expanded: expanded.clone(),
        });
    }
}
