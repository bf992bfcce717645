//! Media Queries Level 4: width lower bounds.
//! Spec: <https://www.w3.org/TR/mediaqueries-4/#width>
//!
//! Only one condition shape is recognised: a single `(min-width: <integer>px)`
//! feature making up the whole condition. Everything else (other features,
//! media types, `and`/`or`/`not` combinations, non-px units, fractional
//! widths) yields `None`.

#![forbid(unsafe_code)]

use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::Token;

/// Parse the body of a `(min-width: ...)` feature after its opening parenthesis.
///
/// # Errors
/// Returns a parse error when the feature is not `min-width` or its value is not a
/// non-negative integer followed by `px`.
fn parse_min_width_feature<'input>(
    input: &mut Parser<'input, '_>,
) -> Result<u32, ParseError<'input, ()>> {
    input.expect_ident_matching("min-width")?;
    input.expect_colon()?;
    let location = input.current_source_location();
    let token = input.next()?.clone();
    if let Token::Dimension {
        int_value: Some(value),
        ref unit,
        ..
    } = token
        && unit.eq_ignore_ascii_case("px")
        && let Ok(width) = u32::try_from(value)
    {
        return Ok(width);
    }
    Err(location.new_unexpected_token_error(token))
}

/// Extract the pixel width from a condition of the exact shape `(min-width: <integer>px)`.
///
/// Whitespace and comments around the tokens are tolerated and the feature name is
/// matched ASCII case-insensitively; anything else in the condition rejects it.
pub fn parse_min_width(condition: &str) -> Option<u32> {
    let mut input = ParserInput::new(condition);
    let mut parser = Parser::new(&mut input);
    parser
        .parse_entirely(|outer| {
            outer.expect_parenthesis_block()?;
            outer.parse_nested_block(parse_min_width_feature)
        })
        .ok()
}
