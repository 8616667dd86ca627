//! In-memory record sink

use crate::extract::Credit;
use crate::sink::traits::{RecordSink, SinkResult};
use std::sync::Mutex;

/// Collects credits in memory, in emission order
///
/// Used by tests; a real run writes JSON lines.
#[derive(Debug, Default)]
pub struct MemorySink {
    credits: Mutex<Vec<Credit>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything accepted so far
    pub fn credits(&self) -> Vec<Credit> {
        self.credits.lock().unwrap().clone()
    }
}

impl RecordSink for MemorySink {
    fn accept(&self, credit: &Credit) -> SinkResult<()> {
        self.credits.lock().unwrap().push(credit.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let sink = MemorySink::new();

        sink.accept(&Credit {
            actor: "Tim Robbins".to_string(),
            title: "The Shawshank Redemption".to_string(),
        })
        .unwrap();
        sink.accept(&Credit {
            actor: "Tim Robbins".to_string(),
            title: "Mystic River".to_string(),
        })
        .unwrap();

        let credits = sink.credits();
        assert_eq!(credits.len(), 2);
        assert_eq!(credits[0].title, "The Shawshank Redemption");
        assert_eq!(credits[1].title, "Mystic River");
    }
}
