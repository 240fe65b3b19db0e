//! Renders compiled filters into count, page and list queries.

use super::sql::{CompiledFilter, Operator, Predicate, SqlParam};
use crate::types::Record;

/// What a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `COUNT(*) AS total`
    Count,
    /// Every column.
    Rows,
}

/// A fully described SELECT against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Target table.
    pub table: &'static str,
    /// Count or rows.
    pub projection: Projection,
    /// Filter predicates, ANDed.
    pub predicates: Vec<Predicate>,
    /// Keyset predicate on the order column, page queries only.
    pub cursor_predicate: Option<Predicate>,
    /// Column the rows are ordered by, ascending.
    pub order_column: &'static str,
    /// Row limit, rendered inline as a computed integer.
    pub limit: Option<usize>,
}

/// Column aliased by count queries.
pub const COUNT_COLUMN: &str = "total";

impl CompiledQuery {
    /// Counts the rows matching the filter. Never includes a cursor.
    pub fn count<R: Record>(filter: &CompiledFilter) -> Self {
        Self {
            table: R::TABLE,
            projection: Projection::Count,
            predicates: filter.predicates.clone(),
            cursor_predicate: None,
            order_column: R::ID_COLUMN,
            limit: None,
        }
    }

    /// Selects one page after `after`, overfetching by one row.
    pub fn page<R: Record>(filter: &CompiledFilter, after: Option<i64>, page_size: usize) -> Self {
        Self {
            cursor_predicate: after
                .map(|id| Predicate::compare(R::ID_COLUMN, Operator::Gt, SqlParam::integer(id))),
            limit: Some(page_size.saturating_add(1)),
            ..Self::list::<R>(filter)
        }
    }

    /// Selects every matching row in id order.
    pub fn list<R: Record>(filter: &CompiledFilter) -> Self {
        Self {
            table: R::TABLE,
            projection: Projection::Rows,
            predicates: filter.predicates.clone(),
            cursor_predicate: None,
            order_column: R::ID_COLUMN,
            limit: None,
        }
    }

    /// Selects the single record with the given id.
    pub fn by_id<R: Record>(id: i64) -> Self {
        let filter = CompiledFilter::new(vec![Predicate::compare(
            R::ID_COLUMN,
            Operator::Eq,
            SqlParam::integer(id),
        )]);
        Self {
            limit: Some(1),
            ..Self::list::<R>(&filter)
        }
    }

    /// Parameters in placeholder order: filter first, then the cursor.
    pub fn params(&self) -> Vec<SqlParam> {
        self.predicates
            .iter()
            .chain(self.cursor_predicate.iter())
            .flat_map(|p| p.params.iter().cloned())
            .collect()
    }

    /// Renders the query with `?` placeholders.
    pub fn to_sql(&self) -> String {
        let mut sql = match self.projection {
            Projection::Count => format!("SELECT COUNT(*) AS {} FROM {}", COUNT_COLUMN, self.table),
            Projection::Rows => format!("SELECT * FROM {}", self.table),
        };

        let conditions: Vec<String> = self
            .predicates
            .iter()
            .chain(self.cursor_predicate.iter())
            .map(Predicate::to_sql)
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if self.projection == Projection::Rows {
            sql.push_str(&format!(" ORDER BY {} ASC", self.order_column));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}
