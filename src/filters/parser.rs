//! Filter expression parser for the command-line front end.
//!
//! Turns a textual filter selection into [`SearchFilters`].
//!
//! # Syntax
//!
//! ```text
//! filter_expr  := field_filter*
//! field_filter := field_name:value | field_name:"quoted value"
//! field_name   := category | jurisdiction | court | judge
//!               | status | analysis | from | to   (case-insensitive)
//! ```
//!
//! # Supported Fields
//!
//! - `category`, `jurisdiction`, `court`, `judge` - add a label to the matching
//!   multi-select field; repeating a field selects several labels
//! - `status:all|pending|decided`
//! - `analysis:yes|no|any` (also `true`/`false`)
//! - `from:YYYY-MM-DD`, `to:YYYY-MM-DD` - inclusive date bounds
//!
//! # Examples
//!
//! ```rust
//! # use legal_case_explorer::filters::parser::parse_filter;
//! let filters = parse_filter("category:Employment court:\"District Court\" status:pending").unwrap();
//! assert_eq!(filters.categories, vec!["Employment"]);
//! assert_eq!(filters.courts, vec!["District Court"]);
//! ```

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use super::model::{FilterCollection, SearchFilters, StatusFilter};

/// A single `field:value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    field: String,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    Collection(FilterCollection),
    Status,
    Analysis,
    From,
    To,
}

/// Tokenize filter input into `field:value` pairs
///
/// Supports:
/// - field:value patterns
/// - field:"quoted value" with spaces
/// - Whitespace separation
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);
        let Some(colon_pos) = word.find(':') else {
            return Err(anyhow!("Invalid token: '{}' (expected field:value)", word));
        };

        let field = word[..colon_pos].to_string();
        let mut value = word[colon_pos + 1..].to_string();
        if value.starts_with('"') {
            value = read_quoted_value(&mut chars, &value)?;
        }

        if field.is_empty() || value.is_empty() {
            return Err(anyhow!("Invalid field:value format: {}", word));
        }

        tokens.push(Token { field, value });
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value; `initial` already holds the opening quote and possibly more
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "category" => Ok(FilterField::Collection(FilterCollection::Categories)),
        "jurisdiction" => Ok(FilterField::Collection(FilterCollection::Jurisdictions)),
        "court" => Ok(FilterField::Collection(FilterCollection::Courts)),
        "judge" => Ok(FilterField::Collection(FilterCollection::Judges)),
        "status" => Ok(FilterField::Status),
        "analysis" => Ok(FilterField::Analysis),
        "from" => Ok(FilterField::From),
        "to" => Ok(FilterField::To),
        _ => Err(anyhow!(
            "Unknown field: '{}' (valid fields: category, jurisdiction, court, judge, status, analysis, from, to)",
            field
        )),
    }
}

fn parse_status(value: &str) -> Result<StatusFilter> {
    match value.to_lowercase().as_str() {
        "all" => Ok(StatusFilter::All),
        "pending" => Ok(StatusFilter::Pending),
        "decided" => Ok(StatusFilter::Decided),
        _ => Err(anyhow!("Invalid status value: '{}' (must be all, pending or decided)", value)),
    }
}

fn parse_analysis(value: &str) -> Result<Option<bool>> {
    match value.to_lowercase().as_str() {
        "yes" | "true" => Ok(Some(true)),
        "no" | "false" => Ok(Some(false)),
        "any" => Ok(None),
        _ => Err(anyhow!("Invalid analysis value: '{}' (must be yes, no or any)", value)),
    }
}

/// Parse a strict YYYY-MM-DD date
fn parse_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 10 {
        return Err(anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value))
}

/// Parse filter string into SearchFilters
///
/// Examples:
/// - "category:Civil" → one category
/// - "category:Civil category:Tax" → two categories (either may match)
/// - "court:\"Tax Court\" status:decided" → court and status
/// - "from:2024-01-01 to:2024-06-30" → inclusive date range
pub fn parse_filter(input: &str) -> Result<SearchFilters> {
    let mut filters = SearchFilters::new();
    if input.trim().is_empty() {
        return Ok(filters);
    }

    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    for Token { field, value } in tokens {
        match parse_field(&field)? {
            FilterField::Collection(collection) => {
                if !filters.collection(collection).contains(&value) {
                    filters.toggle(collection, &value);
                }
            }
            FilterField::Status => filters.status = parse_status(&value)?,
            FilterField::Analysis => filters.has_analysis = parse_analysis(&value)?,
            FilterField::From => filters.date_range.start = Some(parse_date(&value)?),
            FilterField::To => filters.date_range.end = Some(parse_date(&value)?),
        }
    }

    Ok(filters)
}
