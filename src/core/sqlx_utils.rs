use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    Postgres,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum SqlxBinds {
    String(String),
    StringArray(Vec<String>),
    Uuid(Uuid),
    UuidArray(Vec<Uuid>),
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds.into_iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val),
            SqlxBinds::StringArray(val) => q.bind(val),
            SqlxBinds::Uuid(val) => q.bind(val),
            SqlxBinds::UuidArray(val) => q.bind(val),
        };
    }
    q
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// Renders a join clause, `on` conditions are combined with AND.
pub fn join_clause(kind: JoinKind, table_name: &str, on: &[String]) -> String {
    format!("{} {} ON {}", kind.keyword(), table_name, on.join(" AND "))
}

/// The FROM/JOIN/WHERE part of a select, with its bind values.
///
/// Placeholders are numbered in push order, so binds must be added through
/// [`QueryParts::push_bind`] and never reordered.
#[derive(Clone, Debug, Default)]
pub struct QueryParts {
    pub joins: Vec<String>,
    pub wheres: Vec<String>,
    pub binds: Vec<SqlxBinds>,
}

impl QueryParts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bind value and returns its placeholder (`$n`).
    pub fn push_bind(&mut self, bind: SqlxBinds) -> String {
        self.binds.push(bind);
        format!("${}", self.binds.len())
    }

    pub fn push_join(&mut self, join: String) {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }

    pub fn push_where(&mut self, filter: String) {
        self.wheres.push(filter);
    }
}

pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    joins: &[String],
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> String {
    // Select
    let mut stmt = "SELECT ".to_string();
    if let Some(val) = select {
        stmt.push_str(&val);
    } else {
        stmt.push('*');
    }

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Join
    for join in joins.iter() {
        stmt.push_str(format!(" {}", join).as_str());
    }

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE ");
        stmt.push_str(&wheres.join(" AND "));
    }

    // order by
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY ");
        stmt.push_str(&order_by.join(", "));
    }

    // Limit
    if let Some(val) = limit {
        stmt.push_str(format!(" LIMIT {}", val).as_str());
    }

    // Offset
    if let Some(val) = offset {
        stmt.push_str(format!(" OFFSET {}", val).as_str());
    }
    stmt
}
