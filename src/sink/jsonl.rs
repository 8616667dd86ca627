//! JSON-lines record sink

use crate::extract::Credit;
use crate::sink::traits::{RecordSink, SinkResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Writes one JSON object per line to a file
///
/// The writer is buffered; [`RecordSink::finalize`] flushes it when the run
/// finishes. Output order is emission order, which across actors depends on
/// fetch completion order.
pub struct JsonLinesSink {
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesSink {
    /// Creates the output file, truncating any previous run's records
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn accept(&self, credit: &Credit) -> SinkResult<()> {
        let line = serde_json::to_string(credit)?;
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn finalize(&self) -> SinkResult<()> {
        self.writer.lock().unwrap().flush()?;
        Ok(())
    }
}
