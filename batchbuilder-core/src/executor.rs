use crate::{Batch, Error, Result, Value};
use std::future::Future;

/// The database driver side: receives a query and its positional arguments.
pub trait Executor: Send {
    /// Execute one parameterized query.
    fn execute(
        &mut self,
        query: String,
        arguments: Vec<Value>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Join the batch and execute it as a single query. Nothing is sent when
    /// the join fails or the batch is empty.
    fn execute_batch<B: Batch>(
        &mut self,
        batch: &B,
        separator: &str,
        start: &str,
        end: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let joined = if batch.is_empty() {
            Err(Error::msg("Cannot execute an empty batch"))
        } else {
            batch.join(separator, start, end)
        };
        async move {
            let (query, arguments) = joined?;
            log::debug!(
                "Executing a batch of {} arguments:\n{}",
                arguments.len(),
                crate::truncate_long!(query)
            );
            self.execute(query, arguments).await
        }
    }
}
