use crate::{Argument, GenericSqlWriter, SqlWriter, truncate_long};
use std::fmt::{self, Display, Formatter};

/// Statement text with `?` placeholders and the arguments bound to them, in
/// placeholder order.
///
/// The number of placeholders is expected to match the number of arguments,
/// this is not checked.
///
/// ```rust
/// use batchbuilder_core::{Statement, Value};
/// let statement = Statement::delete("users", [("id", 5)]);
/// assert_eq!(statement.text(), "DELETE FROM users WHERE id = ?");
/// assert_eq!(statement.arguments()[0].resolve().unwrap(), Value::Int32(Some(5)));
/// ```
#[derive(Default, Debug, Clone)]
pub struct Statement {
    text: String,
    arguments: Vec<Argument>,
}

impl Statement {
    pub fn new(text: impl Into<String>, arguments: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            text: text.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Statement without arguments.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument.
    ///
    /// ```rust
    /// use batchbuilder_core::Statement;
    /// let statement = Statement::raw("SELECT * FROM t WHERE a = ? AND b = ?")
    ///     .bind(1)
    ///     .bind("two");
    /// assert_eq!(statement.argument_count(), 2);
    /// ```
    pub fn bind(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn insert<K, A>(table: &str, values: impl IntoIterator<Item = (K, A)>) -> Self
    where
        K: Into<String>,
        A: Into<Argument>,
    {
        GenericSqlWriter::new().insert(table, values)
    }

    pub fn update<K1, A1, K2, A2>(
        table: &str,
        updates: impl IntoIterator<Item = (K1, A1)>,
        conditions: impl IntoIterator<Item = (K2, A2)>,
    ) -> Self
    where
        K1: Into<String>,
        A1: Into<Argument>,
        K2: Into<String>,
        A2: Into<Argument>,
    {
        GenericSqlWriter::new().update(table, updates, conditions)
    }

    pub fn delete<K, A>(table: &str, conditions: impl IntoIterator<Item = (K, A)>) -> Self
    where
        K: Into<String>,
        A: Into<Argument>,
    {
        GenericSqlWriter::new().delete(table, conditions)
    }

    /// See [`SqlWriter::with_ttl`], only INSERT and UPDATE accept it.
    pub fn with_ttl(self, seconds: u32) -> Self {
        GenericSqlWriter::new().with_ttl(self, seconds)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn into_parts(self) -> (String, Vec<Argument>) {
        (self.text, self.arguments)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.text))
    }
}
