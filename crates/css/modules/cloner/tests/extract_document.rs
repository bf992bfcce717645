#![cfg(test)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Test helpers return Result for clear propagation"
)]

use anyhow::{Result, anyhow};
use css_cloner::{
    Cloner, ExtractEvent, ExtractTrace, PropertyRegistry, SourceRule, SourceRuleKind,
    SourceSheet, StyleSource, TextDocument, TextSheet, extract_document,
};
use css_fluid_model::{ConditionalRuleClone, DocumentClone, RuleClone, StyleRuleClone};

/// Minimal hand-built rule, independent of any parser.
struct MockRule {
    kind: SourceRuleKind,
    selector: &'static str,
    properties: Vec<(&'static str, &'static str)>,
    condition: &'static str,
    children: Vec<MockRule>,
}

impl MockRule {
    fn style(selector: &'static str, properties: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            kind: SourceRuleKind::Style,
            selector,
            properties,
            condition: "",
            children: Vec::new(),
        }
    }

    fn conditional(condition: &'static str, children: Vec<Self>) -> Self {
        Self {
            kind: SourceRuleKind::Conditional,
            selector: "",
            properties: Vec::new(),
            condition,
            children,
        }
    }

    fn other() -> Self {
        Self {
            kind: SourceRuleKind::Other,
            selector: "",
            properties: Vec::new(),
            condition: "",
            children: Vec::new(),
        }
    }
}

impl SourceRule for MockRule {
    fn kind(&self) -> SourceRuleKind {
        self.kind
    }

    fn selector_text(&self) -> &str {
        self.selector
    }

    fn property_value(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| *value)
    }

    fn condition_text(&self) -> &str {
        self.condition
    }

    fn child_rules(&self) -> &[Self] {
        &self.children
    }
}

/// A sheet that either has rules or throws on enumeration like a cross-origin sheet.
struct MockSheet(Option<Vec<MockRule>>);

impl SourceSheet for MockSheet {
    type Rule = MockRule;

    fn css_rules(&self) -> Result<&[Self::Rule]> {
        self.0
            .as_deref()
            .ok_or_else(|| anyhow!("SecurityError: cannot access rules"))
    }
}

struct MockDocument(Vec<MockSheet>);

impl StyleSource for MockDocument {
    type Sheet = MockSheet;

    fn style_sheets(&self) -> &[Self::Sheet] {
        &self.0
    }
}

fn style_rule(document: &DocumentClone, sheet: usize, rule: usize) -> Result<&StyleRuleClone> {
    document
        .style_sheets
        .get(sheet)
        .and_then(|style_sheet| style_sheet.rules.get(rule))
        .and_then(RuleClone::as_style)
        .ok_or_else(|| anyhow!("no style rule at {sheet}/{rule}"))
}

fn conditional_rule(
    document: &DocumentClone,
    sheet: usize,
    rule: usize,
) -> Result<&ConditionalRuleClone> {
    document
        .style_sheets
        .get(sheet)
        .and_then(|style_sheet| style_sheet.rules.get(rule))
        .and_then(RuleClone::as_conditional)
        .ok_or_else(|| anyhow!("no conditional rule at {sheet}/{rule}"))
}

fn value<'rule>(rule: &'rule StyleRuleClone, property: &str) -> Option<&'rule str> {
    rule.declarations.get(property).map(String::as_str)
}

#[test]
fn keeps_style_and_min_width_rules_in_source_order() -> Result<()> {
    let source = TextDocument::from_css([r"
        @import url(fonts.css);
        h1 { font-size: 2rem; color: red; }
        @keyframes spin { from { top: 0 } to { top: 10px } }
        @media (min-width: 600px) { h1 { font-size: 3rem } }
        @media (max-width: 600px) { h1 { font-size: 1rem } }
        @media screen and (min-width: 900px) { h1 { font-size: 4rem } }
        @media (min-width: 375px) {}
    "]);
    let document = extract_document(&source)?;
    let rules = &document.style_sheets[0].rules;
    assert_eq!(rules.len(), 3);

    let heading = style_rule(&document, 0, 0)?;
    assert_eq!(heading.selector_text, "h1");
    assert_eq!(value(heading, "font-size"), Some("2rem"));
    assert_eq!(value(heading, "color"), None);

    let wide = conditional_rule(&document, 0, 1)?;
    assert_eq!(wide.min_width, 600);
    assert_eq!(value(&wide.children[0], "font-size"), Some("3rem"));

    let baseline = conditional_rule(&document, 0, 2)?;
    assert_eq!(baseline.min_width, 375);
    assert!(baseline.is_baseline_indicator());
    Ok(())
}

#[test]
fn inaccessible_sheets_are_skipped_in_order() -> Result<()> {
    let mut source = TextDocument::new();
    source.push(TextSheet::parse(".first { width: 1px }"));
    source.push_unavailable("https://cdn.example/site.css", "cross-origin");
    source.push(TextSheet::parse_at("second.css", ".second { width: 2px }"));

    let registry = PropertyRegistry::default();
    let mut cloner = Cloner::with_observer(&registry, ExtractTrace::new());
    let document = cloner.extract_document(&source)?;

    assert_eq!(document.style_sheets.len(), 2);
    assert_eq!(style_rule(&document, 0, 0)?.selector_text, ".first");
    assert_eq!(style_rule(&document, 1, 0)?.selector_text, ".second");

    let trace = cloner.into_observer();
    let skipped: Vec<usize> = trace
        .events()
        .iter()
        .filter_map(|event| match event {
            ExtractEvent::SkippedStyleSheet { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, [1]);
    assert!(matches!(trace.events().last(), Some(ExtractEvent::Document(_))));
    Ok(())
}

#[test]
fn throwing_sheets_of_a_custom_source_are_skipped() -> Result<()> {
    let source = MockDocument(vec![
        MockSheet(Some(vec![MockRule::style(".a", vec![("top", "0")])])),
        MockSheet(None),
        MockSheet(Some(vec![MockRule::other(), MockRule::style(".b", Vec::new())])),
    ]);
    let document = extract_document(&source)?;
    assert_eq!(document.style_sheets.len(), 2);
    assert_eq!(value(style_rule(&document, 0, 0)?, "top"), Some("0px"));
    assert_eq!(document.style_sheets[1].rules.len(), 1);
    assert_eq!(style_rule(&document, 1, 0)?.selector_text, ".b");
    Ok(())
}

#[test]
fn shorthands_expand_once_per_rule_and_longhands_win() -> Result<()> {
    let source = TextDocument::from_css([
        ".card { padding: 0 min(2rem, 0) 1rem; padding-top: 5px; margin: 0; gap: 1rem 0 }",
    ]);
    let registry = PropertyRegistry::default();
    let mut cloner = Cloner::with_observer(&registry, ExtractTrace::new());
    let document = cloner.extract_document(&source)?;
    let card = style_rule(&document, 0, 0)?;

    assert_eq!(value(card, "padding-top"), Some("5px"));
    assert_eq!(value(card, "padding-right"), Some("min(2rem, 0px)"));
    assert_eq!(value(card, "padding-left"), Some("min(2rem, 0px)"));
    assert_eq!(value(card, "padding-bottom"), Some("1rem"));
    assert_eq!(value(card, "margin-left"), Some("0px"));
    assert_eq!(value(card, "row-gap"), Some("1rem"));
    assert_eq!(value(card, "column-gap"), Some("0px"));
    assert_eq!(value(card, "padding"), None);

    let expanded: Vec<&str> = cloner
        .observer()
        .events()
        .iter()
        .filter_map(|event| match event {
            ExtractEvent::Shorthand { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(expanded, ["padding", "margin", "gap"]);
    Ok(())
}

#[test]
fn unsupported_shorthand_arity_leaves_longhands_absent() -> Result<()> {
    let source = TextDocument::from_css([".a { margin: 1px 2px 3px 4px 5px; gap: 1px 2px 3px }"]);
    let document = extract_document(&source)?;
    assert!(style_rule(&document, 0, 0)?.declarations.is_empty());
    Ok(())
}

#[test]
fn selectors_are_normalized() -> Result<()> {
    let source = TextDocument::from_css(["*::before,\n*::after { width: 0 }"]);
    let document = extract_document(&source)?;
    let rule = style_rule(&document, 0, 0)?;
    assert_eq!(rule.selector_text, "::before, ::after");
    assert_eq!(value(rule, "width"), Some("0px"));
    Ok(())
}

#[test]
fn nested_conditionals_are_dropped_but_siblings_kept() -> Result<()> {
    let source = TextDocument::from_css([r"
        @media (min-width: 600px) {
            .a { width: 1px }
            @media (min-width: 900px) { .b { width: 2px } }
            .c { width: 3px }
        }
    "]);
    let document = extract_document(&source)?;
    let conditional = conditional_rule(&document, 0, 0)?;
    let selectors: Vec<&str> = conditional
        .children
        .iter()
        .map(|child| child.selector_text.as_str())
        .collect();
    assert_eq!(selectors, [".a", ".c"]);
    Ok(())
}

#[test]
fn calling_helpers_with_the_wrong_rule_kind_is_an_error() {
    let registry = PropertyRegistry::default();
    let mut cloner = Cloner::new(&registry);
    assert!(cloner.extract_style_rule(&MockRule::other()).is_err());
    assert!(
        cloner
            .extract_style_rule(&MockRule::conditional("(min-width: 1px)", Vec::new()))
            .is_err()
    );
    assert!(
        cloner
            .extract_conditional_rule(&MockRule::style("p", Vec::new()))
            .is_err()
    );
}

#[test]
fn unrecognized_conditions_are_dropped_silently() -> Result<()> {
    let registry = PropertyRegistry::default();
    let mut cloner = Cloner::with_observer(&registry, ExtractTrace::new());
    let rule = MockRule::conditional(
        "(min-width: 40em)",
        vec![MockRule::style("p", vec![("width", "1px")])],
    );
    assert_eq!(cloner.extract_rule(&rule)?, None);
    assert_eq!(
        cloner.into_observer().into_events(),
        [ExtractEvent::ConditionalRule(None), ExtractEvent::Rule(None)]
    );
    Ok(())
}

#[test]
fn custom_registry_controls_the_allowlist() -> Result<()> {
    let registry = PropertyRegistry::from_json(
        r#"{ "version": 7, "properties": ["width", "inset-top"], "shorthands": {} }"#,
    )?;
    let source = TextDocument::from_css([".a { width: 2px; inset-top: 0; font-size: 1rem }"]);
    let document = Cloner::new(&registry).extract_document(&source)?;
    let rule = style_rule(&document, 0, 0)?;
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(value(rule, "inset-top"), Some("0px"));
    Ok(())
}

#[test]
fn later_shorthand_overrides_earlier_longhand() -> Result<()> {
    let source = TextDocument::from_css([
        ".a { padding-top: 5px; padding: 0 } .b { padding: 0; padding-top: 5px }",
    ]);
    let document = extract_document(&source)?;
    let reset = style_rule(&document, 0, 0)?;
    assert_eq!(value(reset, "padding-top"), Some("0px"));
    assert_eq!(value(reset, "padding-left"), Some("0px"));
    let kept = style_rule(&document, 0, 1)?;
    assert_eq!(value(kept, "padding-top"), Some("5px"));
    assert_eq!(value(kept, "padding-bottom"), Some("0px"));
    Ok(())
}

#[test]
fn important_shorthand_beats_later_normal_longhand() -> Result<()> {
    let source = TextDocument::from_css([concat!(
        ".b { margin: 1px !important; margin-top: 9px } ",
        ".c { margin: 1px !important; margin-top: 9px !important }",
    )]);
    let document = extract_document(&source)?;
    assert_eq!(value(style_rule(&document, 0, 0)?, "margin-top"), Some("1px"));
    assert_eq!(value(style_rule(&document, 0, 1)?, "margin-top"), Some("9px"));
    Ok(())
}

#[test]
fn text_sheets_report_their_location() {
    assert_eq!(TextSheet::parse_at("site.css", "").location(), Some("site.css"));
    assert_eq!(TextSheet::parse("").location(), None);
    let mut source = TextDocument::new();
    source.push_unavailable("https://cdn.example/site.css", "cross-origin");
    assert_eq!(
        source.style_sheets()[0].location(),
        Some("https://cdn.example/site.css")
    );
}
