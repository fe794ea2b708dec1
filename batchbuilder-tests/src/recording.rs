use batchbuilder_core::{Error, Executor, Result, Value};

/// Executor keeping every query it receives instead of sending it anywhere.
#[derive(Default, Debug)]
pub struct RecordingExecutor {
    pub executed: Vec<(String, Vec<Value>)>,
    /// When set, `execute` fails with this message and records nothing.
    pub fail_with: Option<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            executed: Vec::new(),
            fail_with: Some(message.into()),
        }
    }

    pub fn last(&self) -> Option<&(String, Vec<Value>)> {
        self.executed.last()
    }
}

impl Executor for RecordingExecutor {
    async fn execute(&mut self, query: String, arguments: Vec<Value>) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(Error::msg(message.clone()));
        }
        log::trace!("Recorded query with {} arguments", arguments.len());
        self.executed.push((query, arguments));
        Ok(())
    }
}
