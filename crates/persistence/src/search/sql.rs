//! SQL building blocks shared by the criteria compiler and the query builder.
//!
//! A [`Predicate`] renders to a single `COLUMN <op> ?` fragment; values never
//! appear in the rendered text and always travel as [`SqlParam`]s, in the same
//! order the predicates are emitted.

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

/// Comparison operators of the criteria language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
}

impl Operator {
    /// Parses an operator token.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Operator::Eq),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Ge),
            "<=" => Some(Operator::Le),
            _ => None,
        }
    }

    /// Returns the SQL token for this operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
        }
    }
}

/// How a predicate compares its column against the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Direct comparison with the given operator.
    Compare(Operator),
    /// `LIKE` against a wildcard pattern.
    Like,
    /// `REGEXP` against a regular expression.
    Regexp,
}

impl Comparison {
    /// Returns the SQL token placed between column and placeholder.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Compare(op) => op.as_sql(),
            Comparison::Like => "LIKE",
            Comparison::Regexp => "REGEXP",
        }
    }
}

/// A compiled, parametrized comparison against one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The column the predicate applies to. Only ever a whitelisted name.
    pub column: &'static str,
    /// The comparison strategy.
    pub comparison: Comparison,
    /// Values bound to the placeholders of [`Predicate::to_sql`], in order.
    pub params: Vec<SqlParam>,
}

impl Predicate {
    /// `column <op> ?`
    pub fn compare(column: &'static str, op: Operator, value: SqlParam) -> Self {
        Self {
            column,
            comparison: Comparison::Compare(op),
            params: vec![value],
        }
    }

    /// `column LIKE ?` bound to `%value%`.
    pub fn contains(column: &'static str, value: &str) -> Self {
        Self {
            column,
            comparison: Comparison::Like,
            params: vec![SqlParam::string(format!("%{}%", value))],
        }
    }

    /// `column REGEXP ?` bound to the given pattern.
    pub fn regexp(column: &'static str, pattern: impl Into<String>) -> Self {
        Self {
            column,
            comparison: Comparison::Regexp,
            params: vec![SqlParam::string(pattern)],
        }
    }

    /// Renders the predicate as a SQL condition with `?` placeholders.
    pub fn to_sql(&self) -> String {
        format!("{} {} ?", self.column, self.comparison.as_sql())
    }
}

/// An ordered list of predicates ANDed together, plus their flattened params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    /// Predicates in emission order.
    pub predicates: Vec<Predicate>,
    /// All bound values, in the order their placeholders appear.
    pub params: Vec<SqlParam>,
}

impl CompiledFilter {
    /// Creates a filter from predicates, collecting their parameters.
    pub fn new(predicates: Vec<Predicate>) -> Self {
        let params = predicates
            .iter()
            .flat_map(|p| p.params.iter().cloned())
            .collect();
        Self { predicates, params }
    }

    /// A filter with no predicates (matches every row).
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Appends a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.params.extend(predicate.params.iter().cloned());
        self.predicates.push(predicate);
    }

    /// Returns true if there are no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Renders the predicates as SQL conditions, in order.
    pub fn conditions(&self) -> Vec<String> {
        self.predicates.iter().map(Predicate::to_sql).collect()
    }
}
