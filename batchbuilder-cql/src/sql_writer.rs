use batchbuilder_core::SqlWriter;

/// Logged batches are atomic, unlogged skip the batch log, counter batches
/// may only contain counter updates.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CqlBatchKind {
    #[default]
    Logged,
    Unlogged,
    Counter,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct CqlSqlWriter;

impl CqlSqlWriter {
    pub const fn new() -> Self {
        Self
    }

    /// `BEGIN [UNLOGGED |COUNTER ]BATCH[ USING TIMESTAMP <microseconds>]`
    pub fn write_begin_batch(&self, out: &mut String, kind: CqlBatchKind, timestamp: Option<i64>) {
        out.push_str("BEGIN ");
        match kind {
            CqlBatchKind::Logged => {}
            CqlBatchKind::Unlogged => out.push_str("UNLOGGED "),
            CqlBatchKind::Counter => out.push_str("COUNTER "),
        }
        out.push_str("BATCH");
        if let Some(timestamp) = timestamp {
            out.push_str(" USING TIMESTAMP ");
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(timestamp));
        }
    }

    pub fn write_apply_batch(&self, out: &mut String) {
        out.push_str("APPLY BATCH");
    }
}

impl SqlWriter for CqlSqlWriter {}
