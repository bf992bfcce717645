//! CSS Syntax Module Level 3: Parsing and tokenization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Produces a small rule tree: style rules with their declarations, `@media`
//! blocks carrying their raw condition text and nested rules, and every other
//! at-rule as an opaque entry so callers can see (and drop) it.
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
}

/// A single style rule with a raw prelude and parsed declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub prelude: String,
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
}

/// Shorthands whose declaration resets the longhand, per CSS longhand name.
const SHORTHANDS_OF: &[(&str, &[&str])] = &[
    ("padding-top", &["padding"]),
    ("padding-right", &["padding"]),
    ("padding-bottom", &["padding"]),
    ("padding-left", &["padding"]),
    ("margin-top", &["margin"]),
    ("margin-right", &["margin"]),
    ("margin-bottom", &["margin"]),
    ("margin-left", &["margin"]),
    ("border-top-left-radius", &["border-radius"]),
    ("border-top-right-radius", &["border-radius"]),
    ("border-bottom-right-radius", &["border-radius"]),
    ("border-bottom-left-radius", &["border-radius"]),
    ("row-gap", &["gap", "grid-gap"]),
    ("column-gap", &["gap", "grid-gap"]),
    ("background-position-x", &["background-position", "background"]),
    ("background-position-y", &["background-position", "background"]),
    ("top", &["inset"]),
    ("right", &["inset"]),
    ("bottom", &["inset"]),
    ("left", &["inset"]),
    ("font-size", &["font"]),
    ("line-height", &["font"]),
    ("letter-spacing", &["font"]),
    ("word-spacing", &["font"]),
    ("grid-template-columns", &["grid-template", "grid"]),
    ("grid-template-rows", &["grid-template", "grid"]),
];

/// Shorthands that reset `longhand` when declared after it (or with higher importance).
pub fn shorthands_of(longhand: &str) -> &'static [&'static str] {
    SHORTHANDS_OF
        .iter()
        .find(|(name, _)| longhand.eq_ignore_ascii_case(name))
        .map(|&(_, shorthands)| shorthands)
        .unwrap_or_default()
}

/// Cascade rank of a declaration within its block: importance first, then position.
type Rank = (bool, usize);

impl StyleRule {
    /// The winning declaration for `name` by exact name, with its rank.
    fn winning(&self, name: &str) -> Option<(Rank, &str)> {
        self.declarations
            .iter()
            .enumerate()
            .filter(|(_, decl)| decl.name.eq_ignore_ascii_case(name))
            .map(|(index, decl)| ((decl.important, index), decl.value.as_str()))
            .max_by_key(|(rank, _)| *rank)
    }

    /// Look up the winning value for `name` within this block.
    ///
    /// The last `!important` declaration wins; without one, the last declaration wins.
    /// A longhand outranked by one of its shorthands is reported as undeclared.
    pub fn property_value(&self, name: &str) -> Option<&str> {
        let (rank, value) = self.winning(name)?;
        let applies = shorthands_of(name)
            .iter()
            .filter_map(|shorthand| self.winning(shorthand))
            .all(|(shorthand_rank, _)| shorthand_rank < rank);
        applies.then_some(value)
    }
}

/// A `@media` block: raw condition text plus the rules nested inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRule {
    /// Condition text as written after `@media`, trimmed.
    pub condition: String,
    /// Nested rules in source order.
    pub rules: Vec<CssRule>,
}

/// Any at-rule other than `@media` (`@import`, `@keyframes`, `@font-face`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    /// Lowercased at-keyword without the leading `@`.
    pub name: String,
    /// Raw prelude text, trimmed.
    pub prelude: String,
}

/// One top-level or nested rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssRule {
    /// A qualified rule with a declaration block.
    Style(StyleRule),
    /// A `@media` conditional group rule.
    Media(MediaRule),
    /// Any other at-rule; its block (if any) is not interpreted.
    Other(AtRule),
}

/// A parsed stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<CssRule>,
}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(pos) = trimmed.rfind("!important")
        && let Some(prefix) = trimmed.get(..pos)
    {
        let head = prefix.trim_end();
        return (head.to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// Consume the rest of `input` and return the raw text that was consumed, trimmed.
fn consume_raw(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// A declaration parser that records property name and its raw value.
struct BodyDeclParser;

impl<'input> CssDeclarationParser<'input> for BodyDeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let raw = consume_raw(input);
        let (value, important) = split_important_tail(&raw);
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'input> CssAtRuleParser<'input> for BodyDeclParser {
    type Prelude = ();
    type AtRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        _name: CowRcStr<'input>,
        _input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(())
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        // Not produced by this parser
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Err(())
    }
}

impl<'input> CssQualifiedRuleParser<'input> for BodyDeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for BodyDeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Prelude of an at-rule, split by whether we interpret its block.
enum AtRulePrelude {
    /// `@media <condition>`.
    Media(String),
    /// Anything else, kept by name only.
    Other {
        /// Lowercased at-keyword.
        name: String,
        /// Raw prelude text.
        prelude: String,
    },
}

/// Rule-list parser used for the top level and for `@media` bodies.
struct RuleListParser;

impl<'input> CssAtRuleParser<'input> for RuleListParser {
    type Prelude = AtRulePrelude;
    type AtRule = CssRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let prelude = consume_raw(input);
        if name.eq_ignore_ascii_case("media") {
            return Ok(AtRulePrelude::Media(prelude));
        }
        Ok(AtRulePrelude::Other {
            name: name.to_ascii_lowercase(),
            prelude,
        })
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        match prelude {
            AtRulePrelude::Media(condition) => Ok(CssRule::Media(MediaRule {
                condition,
                rules: parse_rule_list(input),
            })),
            AtRulePrelude::Other { name, prelude: text } => {
                // Block contents of unknown at-rules are not interpreted.
                consume_raw(input);
                Ok(CssRule::Other(AtRule {
                    name,
                    prelude: text,
                }))
            }
        }
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        match prelude {
            // `@media` without a block is invalid.
            AtRulePrelude::Media(_) => Err(()),
            AtRulePrelude::Other { name, prelude: text } => Ok(CssRule::Other(AtRule {
                name,
                prelude: text,
            })),
        }
    }
}

impl<'input> CssQualifiedRuleParser<'input> for RuleListParser {
    type Prelude = String; // raw selector/prelude
    type QualifiedRule = CssRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(consume_raw(input))
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let declarations = parse_declarations_from_block(input);
        Ok(CssRule::Style(StyleRule {
            prelude,
            declarations,
        }))
    }
}

/// Parse declarations from a rule block using `cssparser` body parser.
fn parse_declarations_from_block(block: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut body = BodyDeclParser;
    CssRuleBodyParser::new(block, &mut body).flatten().collect()
}

/// Parse a list of rules (top level or inside a `@media` block), skipping invalid ones.
fn parse_rule_list(input: &mut Parser<'_, '_>) -> Vec<CssRule> {
    let mut rules = RuleListParser;
    StyleSheetParser::new(input, &mut rules).flatten().collect()
}

/// Parse a full stylesheet into a `Stylesheet` using cssparser.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    Stylesheet {
        rules: parse_rule_list(&mut parser),
    }
}
