//! Where transcripts go.
//!
//! Each transcript is handed over as one block so that concurrent requests
//! never interleave inside a single transcript.

use std::sync::Mutex;

/// Destination for transcript blocks. Shared by every request task.
pub trait TranscriptSink: Send + Sync {
    fn write(&self, block: &str);
}

/// Emits each block as one `tracing` event on the `corgi::transcript` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TranscriptSink for TracingSink {
    fn write(&self, block: &str) {
        tracing::info!(target: "corgi::transcript", "\n{}", block);
    }
}

/// Keeps blocks in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> Vec<String> {
        match self.blocks.lock() {
            Ok(blocks) => blocks.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TranscriptSink for MemorySink {
    fn write(&self, block: &str) {
        let mut blocks = match self.blocks.lock() {
            Ok(blocks) => blocks,
            Err(poisoned) => poisoned.into_inner(),
        };
        blocks.push(block.to_string());
    }
}
