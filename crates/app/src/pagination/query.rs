//! SQL generation and execution for list queries.

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, QueryBuilder, Transaction, postgres::PgRow};

use crate::pagination::{
    FilterOperator, FilterTerm, FilterValue, ListParameters, ListQueryError, ListSource, Page,
    SortTerm, parse_filters, parse_sort_order,
};

/// A validated list query over one table.
#[derive(Debug, Clone)]
pub(crate) struct ListQuery {
    source: ListSource,
    filters: Vec<FilterTerm>,
    sorts: Vec<SortTerm>,
    page_number: u32,
    page_size: u32,
    offset: i64,
}

impl ListQuery {
    pub(crate) fn parse(
        source: ListSource,
        params: &ListParameters,
    ) -> Result<Self, ListQueryError> {
        let filters = params
            .filters
            .as_deref()
            .map(|filters| parse_filters(&source, filters))
            .transpose()?
            .unwrap_or_default();

        let sorts = params
            .sort_order
            .as_deref()
            .map(|sort_order| parse_sort_order(&source, sort_order))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            source,
            filters,
            sorts,
            page_number: params.page_number(),
            page_size: params.page_size(),
            offset: params.offset(),
        })
    }

    /// Count matching rows, then fetch the requested page of them.
    pub(crate) async fn fetch<T>(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Page<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut count = self.count_query();

        let total: i64 = count.build_query_scalar().fetch_one(&mut **tx).await?;

        let items = if total <= self.offset {
            Vec::new()
        } else {
            let mut page = self.page_query();

            page.build_query_as::<T>().fetch_all(&mut **tx).await?
        };

        Ok(Page {
            items,
            total_count: u64::try_from(total).unwrap_or_default(),
            page_number: self.page_number,
            page_size: self.page_size,
        })
    }

    fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.source.table));

        self.push_conditions(&mut qb);

        qb
    }

    fn page_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", self.source.table));

        self.push_conditions(&mut qb);

        qb.push(" ORDER BY ");

        for sort in &self.sorts {
            qb.push(sort.field.column)
                .push(" ")
                .push(sort.direction.as_sql())
                .push(", ");
        }

        qb.push("created_at ASC, uuid ASC LIMIT ");
        qb.push_bind(i64::from(self.page_size));
        qb.push(" OFFSET ");
        qb.push_bind(self.offset);

        qb
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(" WHERE deleted_at IS NULL");

        for term in &self.filters {
            let joiner = if term.operator.is_negated() {
                " AND "
            } else {
                " OR "
            };

            qb.push(" AND (");

            for (index, value) in term.values.iter().enumerate() {
                if index > 0 {
                    qb.push(joiner);
                }

                push_condition(qb, term, value);
            }

            qb.push(")");
        }
    }
}

fn push_condition(qb: &mut QueryBuilder<'static, Postgres>, term: &FilterTerm, value: &FilterValue) {
    let column = term.field.column;
    let like = if term.case_insensitive {
        " ILIKE "
    } else {
        " LIKE "
    };

    match term.operator {
        FilterOperator::Equals | FilterOperator::NotEquals => {
            let comparison = if term.operator == FilterOperator::Equals {
                " = "
            } else {
                " IS DISTINCT FROM "
            };

            if term.case_insensitive {
                qb.push("lower(")
                    .push(column)
                    .push(")")
                    .push(comparison)
                    .push("lower(");
                push_value(qb, value);
                qb.push(")");
            } else {
                qb.push(column).push(comparison);
                push_value(qb, value);
            }
        }
        FilterOperator::GreaterThan => {
            qb.push(column).push(" > ");
            push_value(qb, value);
        }
        FilterOperator::LessThan => {
            qb.push(column).push(" < ");
            push_value(qb, value);
        }
        FilterOperator::GreaterThanOrEqual => {
            qb.push(column).push(" >= ");
            push_value(qb, value);
        }
        FilterOperator::LessThanOrEqual => {
            qb.push(column).push(" <= ");
            push_value(qb, value);
        }
        FilterOperator::Contains | FilterOperator::StartsWith => {
            qb.push(column).push(like);
            qb.push_bind(like_pattern(term.operator, value));
            qb.push(" ESCAPE '\\'");
        }
        FilterOperator::NotContains | FilterOperator::NotStartsWith => {
            qb.push("(")
                .push(column)
                .push(" IS NULL OR ")
                .push(column)
                .push(" NOT")
                .push(like);
            qb.push_bind(like_pattern(term.operator, value));
            qb.push(" ESCAPE '\\')");
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Text(text) => qb.push_bind(text.clone()),
        FilterValue::Integer(integer) => qb.push_bind(*integer),
        FilterValue::Boolean(boolean) => qb.push_bind(*boolean),
        FilterValue::Date(date) => qb.push_bind(SqlxDate::from(*date)),
        FilterValue::Uuid(uuid) => qb.push_bind(*uuid),
    };
}

fn like_pattern(operator: FilterOperator, value: &FilterValue) -> String {
    let escaped = value
        .to_string()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    match operator {
        FilterOperator::StartsWith | FilterOperator::NotStartsWith => format!("{escaped}%"),
        _ => format!("%{escaped}%"),
    }
}
