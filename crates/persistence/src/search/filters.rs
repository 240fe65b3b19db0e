//! Filters for the listing queries that do not use the criteria language.

use super::sql::{CompiledFilter, Operator, Predicate, SqlParam};
use crate::types::PersonFilter;

/// Object-name filter of the lore listings.
///
/// The token is lower-cased and split on `.`; every non-empty piece must
/// appear in `OBJECT_NAME`. No token means no filter.
pub fn object_name_filter(search_token: Option<&str>) -> CompiledFilter {
    let Some(token) = search_token else {
        return CompiledFilter::match_all();
    };

    let predicates = token
        .to_lowercase()
        .split('.')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| Predicate::contains("OBJECT_NAME", piece))
        .collect();

    CompiledFilter::new(predicates)
}

/// Adds a `SUBMITTER LIKE %submitter%` predicate when a submitter is given.
pub fn with_submitter(mut filter: CompiledFilter, submitter: Option<&str>) -> CompiledFilter {
    if let Some(submitter) = submitter.map(str::trim).filter(|s| !s.is_empty()) {
        filter.push(Predicate::contains("SUBMITTER", submitter));
    }
    filter
}

/// Compiles a person filter. Blank strings are ignored.
pub fn person_filter(filter: Option<&PersonFilter>) -> CompiledFilter {
    let mut compiled = CompiledFilter::match_all();
    let Some(filter) = filter else {
        return compiled;
    };

    if let Some(charname) = non_blank(&filter.charname) {
        compiled.push(Predicate::contains("CHARNAME", charname));
    }
    if let Some(submitter) = non_blank(&filter.submitter) {
        compiled.push(Predicate::contains("SUBMITTER", submitter));
    }
    if let Some(clan_id) = filter.clan_id {
        compiled.push(Predicate::compare(
            "CLAN_ID",
            Operator::Eq,
            SqlParam::integer(clan_id),
        ));
    }

    compiled
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
