use crate::{Argument, Statement, separated_by, util::write_integer};
use std::collections::BTreeMap;

/// Renders statement text for a dialect.
///
/// Every method has a default producing the generic `?` placeholder syntax.
/// A dialect overrides only what differs. The statement helpers (`insert`,
/// `update`, `delete`, `with_ttl`) pair the rendered text with arguments in the
/// exact order the placeholders are written.
///
/// Column/value pairs are collected into a sorted map first: columns are
/// always emitted in lexicographic order, a repeated column keeps its last
/// value.
pub trait SqlWriter {
    fn write_identifier(&self, out: &mut String, value: &str) {
        out.push_str(value);
    }

    fn write_placeholder(&self, out: &mut String) {
        out.push('?');
    }

    /// `column = ?`
    fn write_assignment(&self, out: &mut String, column: &str) {
        self.write_identifier(out, column);
        out.push_str(" = ");
        self.write_placeholder(out);
    }

    fn write_conditions(&self, out: &mut String, conditions: &[&str]) {
        if conditions.is_empty() {
            return;
        }
        out.push_str(" WHERE ");
        separated_by(
            out,
            conditions,
            |out, v| self.write_assignment(out, v),
            " AND ",
        );
    }

    fn write_insert(&self, out: &mut String, table: &str, columns: &[&str]) {
        out.push_str("INSERT INTO ");
        self.write_identifier(out, table);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier(out, v),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(out, columns, |out, _| self.write_placeholder(out), ", ");
        out.push(')');
    }

    fn write_update(&self, out: &mut String, table: &str, updates: &[&str], conditions: &[&str]) {
        out.push_str("UPDATE ");
        self.write_identifier(out, table);
        out.push_str(" SET ");
        separated_by(
            out,
            updates,
            |out, v| self.write_assignment(out, v),
            ", ",
        );
        self.write_conditions(out, conditions);
    }

    /// Conjunction of equalities only.
    fn write_delete(&self, out: &mut String, table: &str, conditions: &[&str]) {
        out.push_str("DELETE FROM ");
        self.write_identifier(out, table);
        self.write_conditions(out, conditions);
    }

    fn write_ttl(&self, out: &mut String, seconds: u32) {
        out.push_str(" USING TTL ");
        write_integer!(out, seconds);
    }

    fn insert<K, A>(&self, table: &str, values: impl IntoIterator<Item = (K, A)>) -> Statement
    where
        Self: Sized,
        K: Into<String>,
        A: Into<Argument>,
    {
        let values = sorted(values);
        let columns = values.keys().map(String::as_str).collect::<Vec<_>>();
        let mut text = String::new();
        self.write_insert(&mut text, table, &columns);
        Statement::new(text, values.into_values())
    }

    /// Arguments hold the `SET` values followed by the `WHERE` values.
    fn update<K1, A1, K2, A2>(
        &self,
        table: &str,
        updates: impl IntoIterator<Item = (K1, A1)>,
        conditions: impl IntoIterator<Item = (K2, A2)>,
    ) -> Statement
    where
        Self: Sized,
        K1: Into<String>,
        A1: Into<Argument>,
        K2: Into<String>,
        A2: Into<Argument>,
    {
        let updates = sorted(updates);
        let conditions = sorted(conditions);
        if conditions.is_empty() {
            log::warn!("Update on table `{table}` has no conditions, it will target every row");
        }
        let mut text = String::new();
        self.write_update(
            &mut text,
            table,
            &updates.keys().map(String::as_str).collect::<Vec<_>>(),
            &conditions.keys().map(String::as_str).collect::<Vec<_>>(),
        );
        Statement::new(text, updates.into_values().chain(conditions.into_values()))
    }

    fn delete<K, A>(&self, table: &str, conditions: impl IntoIterator<Item = (K, A)>) -> Statement
    where
        Self: Sized,
        K: Into<String>,
        A: Into<Argument>,
    {
        let conditions = sorted(conditions);
        if conditions.is_empty() {
            log::warn!("Delete on table `{table}` has no conditions, it will target every row");
        }
        let mut text = String::new();
        self.write_delete(
            &mut text,
            table,
            &conditions.keys().map(String::as_str).collect::<Vec<_>>(),
        );
        Statement::new(text, conditions.into_values())
    }

    /// Appends the time to live clause, arguments are untouched. Meant for
    /// INSERT and UPDATE, the text is not inspected.
    fn with_ttl(&self, statement: Statement, seconds: u32) -> Statement
    where
        Self: Sized,
    {
        let (mut text, arguments) = statement.into_parts();
        self.write_ttl(&mut text, seconds);
        Statement::new(text, arguments)
    }
}

fn sorted<K, A>(values: impl IntoIterator<Item = (K, A)>) -> BTreeMap<String, Argument>
where
    K: Into<String>,
    A: Into<Argument>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[derive(Default, Clone, Copy, Debug)]
pub struct GenericSqlWriter;
impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}
impl SqlWriter for GenericSqlWriter {}
