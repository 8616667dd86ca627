//! Output sinks and run reporting
//!
//! This module defines where extracted records go and what a finished run
//! reports back to the operator.

mod jsonl;
mod memory;
mod report;
mod traits;

pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;
pub use report::{print_report, RunReport};
pub use traits::{RecordSink, SinkError, SinkResult};
