mod batch;
mod sql_writer;

pub use batch::*;
pub use sql_writer::*;
