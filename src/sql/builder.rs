//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the artisans table.

use crate::model::{ArtisanPatch, Field, NewArtisan};
use serde_json::Value;

pub const TABLE: &str = "artisans";

/// Read-back column list shared by SELECT and RETURNING. Casts pin the wire
/// types so rows decode into `Artisan` whatever integer/numeric width the table uses.
const COLUMNS: &str = "\"id\"::bigint AS \"id\", \"nom\", \"profession\", \"telephone\", \"adresse\", \"note\"::double precision AS \"note\"";

/// Quote identifier for PostgreSQL (safe: only from constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        Self::default()
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Push a value and return its cast placeholder, e.g. `$3::text`.
    fn placeholder(&mut self, v: Value, pg_type: &str) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, pg_type)
    }
}

/// Full-table read, rows in whatever order storage yields.
pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", COLUMNS, quoted(TABLE));
    q
}

/// Point lookup by primary key.
pub fn select_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::from(id), "bigint");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        COLUMNS,
        quoted(TABLE),
        quoted("id"),
        ph
    );
    q
}

/// INSERT all five writable columns; storage assigns `id`.
pub fn insert(new: &NewArtisan) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(Field::ALL.len());
    let mut placeholders = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        cols.push(quoted(field.column()));
        placeholders.push(q.placeholder(new.value(field).clone(), field.pg_type()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(TABLE),
        cols.join(", "),
        placeholders.join(", "),
        COLUMNS
    );
    q
}

/// UPDATE by id: SET only the fields in the patch, numbered from $1 in patch
/// order; the id placeholder comes last. Returns None for an empty patch.
pub fn update(id: i64, patch: &ArtisanPatch) -> Option<QueryBuf> {
    if patch.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(patch.len());
    for (field, value) in patch.iter() {
        let rhs = q.placeholder(value.clone(), field.pg_type());
        sets.push(format!("{} = {}", quoted(field.column()), rhs));
    }
    let id_ph = q.placeholder(Value::from(id), "bigint");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(TABLE),
        sets.join(", "),
        quoted("id"),
        id_ph,
        COLUMNS
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::from(id), "bigint");
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(TABLE), quoted("id"), ph);
    q
}
