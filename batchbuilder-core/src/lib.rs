mod argument;
mod as_value;
mod batch;
mod executor;
mod sql_writer;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use argument::*;
pub use as_value::*;
pub use batch::*;
pub use executor::*;
pub use sql_writer::*;
pub use statement::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
