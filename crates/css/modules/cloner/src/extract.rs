//! Walks a style source and builds the clone tree.

use crate::normalize::{normalize_selector, normalize_zero};
use crate::observer::{ExtractObserver, NoopObserver};
use crate::registry::PropertyRegistry;
use crate::shorthand;
use crate::source::{SourceRule, SourceRuleKind, SourceSheet as _, StyleSource};
use anyhow::{Result, bail};
use css_fluid_model::{
    ConditionalRuleClone, Declarations, DocumentClone, RuleClone, StyleRuleClone,
    StyleSheetClone,
};
use css_media_queries::parse_min_width;
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Treat empty or blank values the way the CSSOM reports undeclared properties.
fn declared(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Extracts clone trees from style sources using one property registry.
///
/// Every produced value is also reported to the observer `O`.
pub struct Cloner<'registry, O = NoopObserver> {
    registry: &'registry PropertyRegistry,
    observer: O,
}

impl<'registry> Cloner<'registry, NoopObserver> {
    /// Create a cloner that reports to nobody.
    pub const fn new(registry: &'registry PropertyRegistry) -> Self {
        Self {
            registry,
            observer: NoopObserver,
        }
    }
}

impl<'registry, O: ExtractObserver> Cloner<'registry, O> {
    /// Create a cloner reporting every result to `observer`.
    pub const fn with_observer(registry: &'registry PropertyRegistry, observer: O) -> Self {
        Self { registry, observer }
    }

    /// Borrow the observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Give back the observer, e.g. to read a trace.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Extract every readable stylesheet of `source`, in order.
    ///
    /// Sheets whose rules cannot be enumerated are skipped without a trace in the
    /// result.
    ///
    /// # Errors
    /// Returns an error only when a source rule contradicts its own kind (see
    /// [`Self::extract_style_rule`]).
    pub fn extract_document<S: StyleSource>(&mut self, source: &S) -> Result<DocumentClone> {
        let mut document = DocumentClone::default();
        for (index, sheet) in source.style_sheets().iter().enumerate() {
            let location = sheet.location().unwrap_or("<inline>");
            match sheet.css_rules() {
                Ok(rules) => {
                    debug!("extracting stylesheet {index} ({location}): {} rules", rules.len());
                    document.style_sheets.push(self.extract_style_sheet(rules)?);
                }
                Err(error) => {
                    warn!("skipping stylesheet {index} ({location}): {error:#}");
                    self.observer.skipped_style_sheet(index, &error);
                }
            }
        }
        self.observer.document(&document);
        Ok(document)
    }

    /// Extract the rules of one stylesheet, dropping unrecognized ones.
    ///
    /// # Errors
    /// Propagates contract errors from [`Self::extract_rule`].
    pub fn extract_style_sheet<R: SourceRule>(&mut self, rules: &[R]) -> Result<StyleSheetClone> {
        let mut sheet = StyleSheetClone::default();
        for rule in rules {
            if let Some(clone) = self.extract_rule(rule)? {
                sheet.rules.push(clone);
            }
        }
        self.observer.style_sheet(&sheet);
        Ok(sheet)
    }

    /// Extract a style rule or a recognized conditional rule; anything else is `None`.
    ///
    /// # Errors
    /// Propagates contract errors from [`Self::extract_style_rule`].
    pub fn extract_rule<R: SourceRule>(&mut self, rule: &R) -> Result<Option<RuleClone>> {
        let clone = match rule.kind() {
            SourceRuleKind::Style => Some(RuleClone::Style(self.extract_style_rule(rule)?)),
            SourceRuleKind::Conditional => self
                .extract_conditional_rule(rule)?
                .map(RuleClone::Conditional),
            SourceRuleKind::Other => {
                trace!("dropping unsupported rule");
                None
            }
        };
        self.observer.rule(clone.as_ref());
        Ok(clone)
    }

    /// Collect the allowlisted declarations of a style rule.
    ///
    /// A property declared directly wins; otherwise its shorthand, if declared, is
    /// expanded once per rule and the longhand taken from the expansion. Properties
    /// with neither are simply absent.
    ///
    /// # Errors
    /// Returns an error when `rule` is not a style rule.
    pub fn extract_style_rule<R: SourceRule>(&mut self, rule: &R) -> Result<StyleRuleClone> {
        let kind = rule.kind();
        if kind != SourceRuleKind::Style {
            bail!("expected a style rule, got a {kind:?} rule");
        }
        let registry = self.registry;
        let mut declarations = Declarations::new();
        let mut expansions: HashMap<&str, Declarations> = HashMap::new();
        for property in registry.properties() {
            if let Some(value) = declared(rule.property_value(property)) {
                declarations.insert(property.clone(), normalize_zero(value));
                continue;
            }
            let Some(shorthand_name) = registry.shorthand_for(property) else {
                continue;
            };
            let Some(shorthand_value) = declared(rule.property_value(shorthand_name)) else {
                continue;
            };
            let expanded = expansions
                .entry(shorthand_name)
                .or_insert_with(|| self.expand_shorthand(shorthand_name, shorthand_value));
            if let Some(value) = expanded.get(property) {
                declarations.insert(property.clone(), value.clone());
            }
        }
        let clone = StyleRuleClone {
            selector_text: normalize_selector(rule.selector_text()),
            declarations,
        };
        self.observer.style_rule(&clone);
        Ok(clone)
    }

    /// Extract a `(min-width: <n>px)` rule; any other condition yields `None`.
    ///
    /// Only style-rule children are kept. Nested conditional rules and other
    /// non-style children are dropped.
    ///
    /// # Errors
    /// Returns an error when `rule` is not a conditional rule.
    pub fn extract_conditional_rule<R: SourceRule>(
        &mut self,
        rule: &R,
    ) -> Result<Option<ConditionalRuleClone>> {
        let kind = rule.kind();
        if kind != SourceRuleKind::Conditional {
            bail!("expected a conditional rule, got a {kind:?} rule");
        }
        let condition = rule.condition_text();
        let Some(min_width) = parse_min_width(condition) else {
            debug!("dropping conditional rule with unsupported condition {condition:?}");
            self.observer.conditional_rule(None);
            return Ok(None);
        };
        let mut children = Vec::new();
        for child in rule.child_rules() {
            match child.kind() {
                SourceRuleKind::Style => children.push(self.extract_style_rule(child)?),
                SourceRuleKind::Conditional => debug!(
                    "dropping conditional rule nested in (min-width: {min_width}px): {:?}",
                    child.condition_text()
                ),
                SourceRuleKind::Other => {
                    debug!("dropping non-style rule nested in (min-width: {min_width}px)");
                }
            }
        }
        let clone = ConditionalRuleClone {
            min_width,
            children,
        };
        self.observer.conditional_rule(Some(&clone));
        Ok(Some(clone))
    }

    /// Expand a shorthand with this cloner's registry and report the expansion.
    pub fn expand_shorthand(&mut self, name: &str, value: &str) -> Declarations {
        let expanded = shorthand::expand_shorthand(self.registry, name, value);
        self.observer.shorthand(name, value, &expanded);
        expanded
    }
}
