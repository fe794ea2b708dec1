use crate::{DeferredArgumentFailed, Result, Statement, Value};
use anyhow::Context;
use std::{
    error,
    fmt::{self, Display, Formatter},
    iter,
};

/// Default ceiling on the cumulative number of arguments of a [`BasicBatch`].
pub const DEFAULT_MAX_ARGUMENTS: usize = 65536;

/// Accumulates statements and joins them into a single query.
///
/// Dialects wrap a batch and pick the separator and the markers passed to
/// [`Batch::join`].
pub trait Batch {
    /// Append a statement, rejecting it with [`TooManyArguments`] when the
    /// argument ceiling would be exceeded. A rejected statement leaves the
    /// batch untouched.
    fn push(&mut self, statement: Statement) -> Result<()>;

    /// Join the statements into one query text and the flattened list of
    /// arguments.
    ///
    /// Deferred arguments are resolved here, once per call. The first one failing
    /// aborts the join with a [`DeferredArgumentFailed`] context, no partial
    /// result is returned. Non empty `start` and `end` become the first and the
    /// last fragment.
    fn join(&self, separator: &str, start: &str, end: &str) -> Result<(String, Vec<Value>)>;

    /// Statements in insertion order. Drivers able to receive a list of
    /// statements can use them directly instead of joining.
    fn statements(&self) -> &[Statement];

    fn len(&self) -> usize {
        self.statements().len()
    }

    fn is_empty(&self) -> bool {
        self.statements().is_empty()
    }
}

/// Error returned when a statement would push the batch past its argument ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooManyArguments {
    /// Arguments of the rejected statement.
    pub adding: usize,
    /// Arguments already in the batch.
    pub current: usize,
    pub max: usize,
}

impl Display for TooManyArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Can't add a statement with {} arguments, the batch already has {} (max {})",
            self.adding, self.current, self.max
        )
    }
}

impl error::Error for TooManyArguments {}

/// In memory [`Batch`] with an argument ceiling.
#[derive(Debug, Clone)]
pub struct BasicBatch {
    statements: Vec<Statement>,
    max_arguments: usize,
    total_arguments: usize,
}

impl BasicBatch {
    /// Empty batch limited to [`DEFAULT_MAX_ARGUMENTS`].
    pub fn new() -> Self {
        Self::with_max_arguments(DEFAULT_MAX_ARGUMENTS)
    }

    /// Empty batch limited to `max_arguments`, zero means unlimited.
    pub fn with_max_arguments(max_arguments: usize) -> Self {
        Self {
            statements: Vec::new(),
            max_arguments,
            total_arguments: 0,
        }
    }

    pub fn max_arguments(&self) -> usize {
        self.max_arguments
    }

    /// Sum of the arguments of every statement in the batch.
    pub fn total_arguments(&self) -> usize {
        self.total_arguments
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl Default for BasicBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Batch for BasicBatch {
    fn push(&mut self, statement: Statement) -> Result<()> {
        let adding = statement.argument_count();
        if self.max_arguments > 0 && self.total_arguments + adding > self.max_arguments {
            let error = TooManyArguments {
                adding,
                current: self.total_arguments,
                max: self.max_arguments,
            };
            log::debug!("{error}: {statement}");
            return Err(error.into());
        }
        self.statements.push(statement);
        self.total_arguments += adding;
        Ok(())
    }

    fn join(&self, separator: &str, start: &str, end: &str) -> Result<(String, Vec<Value>)> {
        let mut arguments = Vec::with_capacity(self.total_arguments);
        for (s, statement) in self.statements.iter().enumerate() {
            for (a, argument) in statement.arguments().iter().enumerate() {
                let value = argument
                    .resolve()
                    .with_context(|| DeferredArgumentFailed {
                        statement: s,
                        argument: a,
                    })
                    .inspect_err(|e| log::error!("{e:#}"))?;
                arguments.push(value);
            }
        }
        let text = iter::once(start)
            .filter(|v| !v.is_empty())
            .chain(self.statements.iter().map(Statement::text))
            .chain(iter::once(end).filter(|v| !v.is_empty()))
            .collect::<Vec<_>>()
            .join(separator);
        log::trace!(
            "Joined {} statements with {} arguments",
            self.statements.len(),
            arguments.len()
        );
        Ok((text, arguments))
    }

    fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
