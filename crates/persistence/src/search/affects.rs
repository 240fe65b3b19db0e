//! The `affects` sub-grammar.
//!
//! An affects value is a comma-separated list of descriptors such as
//! `INT by 1` or `HITROLL by +2 (worn)`. Each descriptor that matches
//! `<label> by <signed int>` becomes one regex predicate; anything after the
//! magnitude is ignored and segments that do not match are dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::sql::Predicate;

static DESCRIPTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+by\s+([+-]?)(\d+)").expect("descriptor pattern is valid")
});

/// A parsed `<label> by <magnitude>` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectDescriptor {
    /// Attribute label, e.g. `INT` or `HITROLL`.
    pub label: String,
    /// Whether the magnitude carried a `-` sign.
    pub negative: bool,
    /// Magnitude digits as written.
    pub magnitude: String,
}

impl AffectDescriptor {
    /// Parses one descriptor segment.
    pub fn parse(segment: &str) -> Option<Self> {
        let caps = DESCRIPTOR_PATTERN.captures(segment.trim())?;
        Some(Self {
            label: caps[1].trim().to_string(),
            negative: &caps[2] == "-",
            magnitude: caps[3].to_string(),
        })
    }

    /// Regex matching this descriptor in a stored `AFFECTS` value.
    ///
    /// The label is matched literally. A positive magnitude matches with or
    /// without an explicit `+`.
    pub fn pattern(&self) -> String {
        let sign = if self.negative { "-" } else { r"\+?" };
        format!("{} by {}{}", regex::escape(&self.label), sign, self.magnitude)
    }
}

/// Parses every matching descriptor of an affects value.
pub fn parse_affects(value: &str) -> Vec<AffectDescriptor> {
    value.split(',').filter_map(AffectDescriptor::parse).collect()
}

/// Compiles an affects value into one `REGEXP` predicate per descriptor.
pub fn compile_affects(column: &'static str, value: &str) -> Vec<Predicate> {
    parse_affects(value)
        .iter()
        .map(|d| Predicate::regexp(column, d.pattern()))
        .collect()
}
