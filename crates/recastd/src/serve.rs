//! Line-oriented request loop.
//!
//! Each input line holds one JSON request and is answered by one JSON reply
//! line. Protocol errors become Error replies; only a failure of the
//! underlying streams stops the loop early.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::dispatch::{
    CommandError, CommandRequest, DISPATCH_TARGET, Reply, ReplyWriter, Session,
};

/// Errors that stop the serve loop.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Reading the next request failed.
    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),
    /// Writing a reply failed.
    #[error("failed to write reply: {0}")]
    Write(#[source] io::Error),
}

/// Counts of requests handled by a completed serve loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    succeeded: usize,
    failed: usize,
}

impl ServeSummary {
    /// Requests answered with an OK reply.
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Requests answered with an Error reply.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    fn record(&mut self, reply: &Reply) {
        if reply.is_ok() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Serves `session` until `reader` reaches end of input.
///
/// Blank lines are skipped. Lines longer than `max_request_bytes` (including
/// the newline) are discarded and answered with an Error reply.
///
/// # Errors
///
/// Returns [`ServeError`] when reading from `reader` or writing to `writer`
/// fails.
pub fn serve<R, W>(
    session: &mut Session,
    mut reader: R,
    writer: W,
    max_request_bytes: usize,
) -> Result<ServeSummary, ServeError>
where
    R: BufRead,
    W: Write,
{
    let mut replies = ReplyWriter::new(writer);
    let mut summary = ServeSummary::default();

    while let Some(line) =
        read_request_line(&mut reader, max_request_bytes).map_err(ServeError::Read)?
    {
        let reply = match line {
            RequestLine::TooLarge(size) => {
                rejected(&CommandError::request_too_large(size, max_request_bytes))
            }
            RequestLine::Complete(bytes) if bytes.trim_ascii().is_empty() => continue,
            RequestLine::Complete(bytes) => match CommandRequest::parse(&bytes) {
                Ok(request) => session.execute(&request),
                Err(error) => rejected(&error),
            },
        };
        summary.record(&reply);
        replies.write_reply(&reply).map_err(ServeError::Write)?;
    }

    debug!(
        target: DISPATCH_TARGET,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "input closed"
    );
    Ok(summary)
}

fn rejected(error: &CommandError) -> Reply {
    warn!(target: DISPATCH_TARGET, %error, "request rejected");
    Reply::error(error.to_string())
}

/// One line read from the input.
#[derive(Debug, PartialEq, Eq)]
enum RequestLine {
    /// The line's bytes, including any newline.
    Complete(Vec<u8>),
    /// The line exceeded the limit; holds its full length.
    TooLarge(usize),
}

/// Reads the next line without buffering more than `max` bytes of it.
///
/// Returns `Ok(None)` at end of input. A final line without a trailing
/// newline is still returned.
fn read_request_line<R: BufRead>(reader: &mut R, max: usize) -> io::Result<Option<RequestLine>> {
    let mut line = Vec::new();
    let mut size = 0_usize;

    loop {
        let available = match reader.fill_buf() {
            Ok(buffer) => buffer,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        if available.is_empty() {
            return Ok((size > 0).then(|| finish(line, size, max)));
        }

        let newline = available.iter().position(|byte| *byte == b'\n');
        let chunk = match newline {
            Some(position) => available.split_at(position + 1).0,
            None => available,
        };
        size = size.saturating_add(chunk.len());
        if size <= max {
            line.extend_from_slice(chunk);
        }
        let consumed = chunk.len();
        reader.consume(consumed);

        if newline.is_some() {
            return Ok(Some(finish(line, size, max)));
        }
    }
}

fn finish(line: Vec<u8>, size: usize, max: usize) -> RequestLine {
    if size > max {
        RequestLine::TooLarge(size)
    } else {
        RequestLine::Complete(line)
    }
}
