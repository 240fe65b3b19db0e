//! Compiles parsed criteria clauses into parametrized predicates.
//!
//! Unlike parsing, compilation is tolerant: a clause whose value cannot be
//! coerced for its field is logged and skipped while the rest still compile.

use tracing::{debug, warn};

use super::affects;
use super::criteria::{Clause, parse_criteria};
use super::fields::FieldKind;
use super::sql::{CompiledFilter, Predicate, SqlParam};
use crate::error::{CriteriaError, UnsupportedFieldValue};

/// Compiles clauses into a filter, preserving clause order.
pub fn compile(clauses: &[Clause]) -> CompiledFilter {
    let mut filter = CompiledFilter::match_all();

    for clause in clauses {
        match compile_clause(clause) {
            Ok(predicates) => predicates.into_iter().for_each(|p| filter.push(p)),
            Err(reason) => warn!(
                field = clause.field.name,
                %reason,
                "Skipping criteria clause"
            ),
        }
    }

    debug!(predicates = filter.len(), "Compiled criteria");
    filter
}

/// Parses and compiles a criteria string.
pub fn compile_criteria(criteria: &str) -> Result<CompiledFilter, CriteriaError> {
    parse_criteria(criteria).map(|clauses| compile(&clauses))
}

fn compile_clause(clause: &Clause) -> Result<Vec<Predicate>, UnsupportedFieldValue> {
    let column = clause.field.column;

    match clause.field.kind {
        FieldKind::Integer => {
            let value = clause.value.parse::<i64>().map_err(|_| {
                UnsupportedFieldValue::NotAnInteger {
                    field: clause.field.name.to_string(),
                    value: clause.value.clone(),
                }
            })?;
            Ok(vec![Predicate::compare(
                column,
                clause.operator,
                SqlParam::integer(value),
            )])
        }
        // Text and affects clauses match the same way under every operator
        FieldKind::Text => Ok(vec![Predicate::contains(column, &clause.value)]),
        FieldKind::Affects => Ok(affects::compile_affects(column, &clause.value)),
    }
}
