use crate::{CqlBatchKind, CqlSqlWriter};
use batchbuilder_core::{BasicBatch, Batch, Executor, Result, Statement, Value};
use time::OffsetDateTime;

/// CQL `BEGIN BATCH ... APPLY BATCH` around any [`Batch`].
///
/// The statements are joined one per line:
/// ```text
/// BEGIN BATCH USING TIMESTAMP 1700000000000000
/// INSERT INTO users (id, name) VALUES (?, ?)
/// DELETE FROM sessions WHERE id = ?
/// APPLY BATCH
/// ```
#[derive(Debug, Clone)]
pub struct CqlBatch<B: Batch = BasicBatch> {
    batch: B,
    kind: CqlBatchKind,
    // Zero is a valid timestamp
    timestamp: Option<i64>,
    writer: CqlSqlWriter,
}

impl CqlBatch<BasicBatch> {
    pub fn new() -> Self {
        Self::from_batch(BasicBatch::new())
    }
}

impl Default for CqlBatch<BasicBatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Batch> CqlBatch<B> {
    pub fn from_batch(batch: B) -> Self {
        Self {
            batch,
            kind: CqlBatchKind::Logged,
            timestamp: None,
            writer: CqlSqlWriter::new(),
        }
    }

    /// Write timestamp of the whole batch, in microseconds since the epoch.
    pub fn using_timestamp(mut self, microseconds: i64) -> Self {
        self.timestamp = Some(microseconds);
        self
    }

    pub fn using_time(self, time: OffsetDateTime) -> Self {
        self.using_timestamp((time.unix_timestamp_nanos() / 1_000) as i64)
    }

    pub fn kind(mut self, kind: CqlBatchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn push(&mut self, statement: Statement) -> Result<()> {
        self.batch.push(statement)
    }

    pub fn batch(&self) -> &B {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut B {
        &mut self.batch
    }

    pub fn into_inner(self) -> B {
        self.batch
    }

    pub fn writer(&self) -> &CqlSqlWriter {
        &self.writer
    }

    pub fn begin_marker(&self) -> String {
        let mut out = String::new();
        self.writer
            .write_begin_batch(&mut out, self.kind, self.timestamp);
        out
    }

    pub fn end_marker(&self) -> String {
        let mut out = String::new();
        self.writer.write_apply_batch(&mut out);
        out
    }

    /// The batch query and its arguments, without executing it.
    pub fn query(&self) -> Result<(String, Vec<Value>)> {
        self.batch
            .join("\n", &self.begin_marker(), &self.end_marker())
    }

    /// Join and execute the batch. Nothing reaches the executor when a deferred
    /// argument fails or the batch is empty.
    pub async fn apply<E: Executor>(&self, executor: &mut E) -> Result<()> {
        log::debug!(
            "Applying a {:?} CQL batch of {} statements",
            self.kind,
            self.batch.len()
        );
        executor
            .execute_batch(&self.batch, "\n", &self.begin_marker(), &self.end_marker())
            .await
    }
}
