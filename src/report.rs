//! Renders the outcome of a run as the JSON document the calling tool reads.
//!
//! A completed exchange goes to stdout, anything else goes to stderr with
//! `status: 0`. Both are pretty-printed with two-space indentation.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::{RequestError, Result};
use crate::http::response::{HttpResult, timestamp_now};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Status reported when no HTTP response was received.
const TRANSPORT_FAILURE_STATUS: u16 = 0;

#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub error: String,
    pub status: u16,
    pub timestamp: String,
}

impl FailureReport {
    pub fn new(err: &RequestError) -> Self {
        Self {
            error: err.to_string(),
            status: TRANSPORT_FAILURE_STATUS,
            timestamp: timestamp_now(),
        }
    }
}

/// Write the outcome to the matching stream and return the exit status.
pub fn emit(outcome: Result<HttpResult>, out: &mut impl Write, err: &mut impl Write) -> io::Result<u8> {
    match outcome {
        Ok(result) => {
            write_pretty(out, &result)?;
            Ok(EXIT_SUCCESS)
        }
        Err(error) => {
            write_pretty(err, &FailureReport::new(&error))?;
            Ok(EXIT_FAILURE)
        }
    }
}

fn write_pretty<T: Serialize>(writer: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()
}
