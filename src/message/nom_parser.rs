//! Nom-based IRC line parser.
//!
//! This module splits a raw line into borrowed pieces. It does not allocate
//! beyond the argument vector and performs no validation of argument
//! contents.

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::char,
    combinator::{all_consuming, opt},
    error::{context, VerboseError},
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Separator that ends the argument list. Only its first occurrence counts.
const TRAILING_SEPARATOR: &str = " :";

/// Parse message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        preceded(char(':'), take_while1(|c| c != ' ')),
    )(input)
}

/// Split off everything before the first `" :"`.
fn parse_middle(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing command and arguments",
        take_until(TRAILING_SEPARATOR),
    )(input)
}

/// Parse the command name (alphanumeric characters).
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing IRC command",
        all_consuming(take_while1(|c: char| c.is_alphanumeric())),
    )(input)
}

/// Parse a line into its components.
///
/// IRC line format:
/// ```text
/// [:prefix SP] <command> [args...] [SP :trailing]
/// ```
///
/// The trailing payload starts after the first `" :"` and runs to the end
/// of the line, colons and spaces included.
pub fn parse_line(input: &str) -> Result<ParsedLine<'_>, MessageParseError> {
    if input.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let (input, prefix) = opt(parse_prefix)(input).map_err(|_| MessageParseError::EmptyMessage)?;
    let input = match prefix {
        Some(_) => input
            .strip_prefix(' ')
            .ok_or(MessageParseError::MissingCommand)?,
        None => input,
    };

    let (middle, trailing) = match parse_middle(input) {
        Ok((after, middle)) => (middle, Some(&after[TRAILING_SEPARATOR.len()..])),
        Err(_) => (input, None),
    };

    let mut tokens = middle.split(' ').filter(|t| !t.is_empty());
    let command = tokens.next().ok_or(MessageParseError::MissingCommand)?;
    parse_command(command).map_err(|_| MessageParseError::InvalidCommand)?;

    Ok(ParsedLine {
        prefix,
        command,
        args: tokens.collect(),
        trailing,
    })
}

/// A parsed IRC line with borrowed string slices.
///
/// This is the intermediate representation produced by the nom parser.
/// It holds references into the original input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Raw prefix string (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command name as written on the wire.
    pub command: &'a str,
    /// Space-delimited arguments before the trailing payload.
    pub args: Vec<&'a str>,
    /// Everything after the first `" :"`, if present.
    pub trailing: Option<&'a str>,
}
