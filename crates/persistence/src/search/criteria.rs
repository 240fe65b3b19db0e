//! Parser for the flexible-search criteria language.
//!
//! A criteria string is a list of `field<op>value` clauses joined by `&`:
//!
//! ```text
//! weight>=10&item_type=weapon&affects=INT by 1,WIS by 1
//! ```
//!
//! Validation is all-or-nothing: one malformed clause or unknown field rejects
//! the whole string.

use std::sync::LazyLock;

use regex::Regex;

use super::fields::{self, FieldSpec};
use super::sql::Operator;
use crate::error::CriteriaError;

static CLAUSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+)(=|>|<|>=|<=)([^&=<>]+)$").expect("clause pattern is valid")
});

/// One validated `field<op>value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The whitelisted field the clause targets.
    pub field: &'static FieldSpec,
    /// The comparison operator.
    pub operator: Operator,
    /// The trimmed value text, not yet coerced.
    pub value: String,
}

/// Parses a criteria string into clauses, in input order.
pub fn parse_criteria(criteria: &str) -> Result<Vec<Clause>, CriteriaError> {
    if criteria.trim().is_empty() {
        return Err(CriteriaError::Empty);
    }

    let mut clauses = Vec::new();
    for segment in criteria.split('&') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        clauses.push(parse_clause(segment)?);
    }

    if clauses.is_empty() {
        return Err(CriteriaError::Empty);
    }

    Ok(clauses)
}

/// Returns true if the criteria string parses.
pub fn is_valid_criteria(criteria: &str) -> bool {
    parse_criteria(criteria).is_ok()
}

fn parse_clause(segment: &str) -> Result<Clause, CriteriaError> {
    let malformed = || CriteriaError::MalformedClause {
        clause: segment.to_string(),
    };

    let caps = CLAUSE_PATTERN.captures(segment).ok_or_else(malformed)?;
    let operator = Operator::parse(&caps[2]).ok_or_else(malformed)?;
    let name = &caps[1];
    let field = fields::lookup(name).ok_or_else(|| CriteriaError::UnknownField {
        field: name.to_string(),
    })?;

    Ok(Clause {
        field,
        operator,
        value: caps[3].trim().to_string(),
    })
}
