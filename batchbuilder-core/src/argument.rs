use crate::{AsValue, Result, Value};
use std::{
    error,
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

/// Value computed when the batch is joined rather than when the statement is built.
///
/// Useful for identifiers or timestamps that must reflect the moment the batch
/// is assembled. The closure runs once per [`Batch::join`](crate::Batch::join).
#[derive(Clone)]
pub struct Deferred(Arc<dyn Fn() -> Result<Value> + Send + Sync>);

impl Deferred {
    pub fn new<T, F>(f: F) -> Self
    where
        T: AsValue,
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self(Arc::new(move || f().map(AsValue::as_value)))
    }

    pub fn call(&self) -> Result<Value> {
        (self.0)()
    }
}

impl Debug for Deferred {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

/// A single positional argument of a [`Statement`](crate::Statement).
#[derive(Debug, Clone)]
pub enum Argument {
    /// Known when the statement is built.
    Value(Value),
    /// Resolved during the join.
    Deferred(Deferred),
}

impl Argument {
    /// Shortcut for `Argument::Deferred(Deferred::new(f))`.
    ///
    /// ```rust
    /// use batchbuilder_core::{Argument, Value};
    /// let argument = Argument::deferred(|| Ok(42));
    /// assert_eq!(argument.resolve().unwrap(), Value::Int32(Some(42)));
    /// ```
    pub fn deferred<T, F>(f: F) -> Self
    where
        T: AsValue,
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Argument::Deferred(Deferred::new(f))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Argument::Deferred(..))
    }

    /// Produce the concrete value, invoking the closure of a deferred argument.
    pub fn resolve(&self) -> Result<Value> {
        match self {
            Argument::Value(v) => Ok(v.clone()),
            Argument::Deferred(f) => f.call(),
        }
    }
}

impl<T: AsValue> From<T> for Argument {
    fn from(value: T) -> Self {
        Argument::Value(value.as_value())
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<Deferred> for Argument {
    fn from(value: Deferred) -> Self {
        Argument::Deferred(value)
    }
}

/// Context attached to the error of a deferred argument that failed to resolve.
///
/// Recover it with `error.downcast_ref::<DeferredArgumentFailed>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredArgumentFailed {
    /// Index of the statement in the batch.
    pub statement: usize,
    /// Index of the argument in the statement.
    pub argument: usize,
}

impl Display for DeferredArgumentFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to generate query argument {} of statement {} at runtime",
            self.argument, self.statement
        )
    }
}

impl error::Error for DeferredArgumentFailed {}
