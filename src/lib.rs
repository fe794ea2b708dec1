pub use batchbuilder_core::*;
