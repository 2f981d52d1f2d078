//! Session driver
//!
//! Reads command lines, dispatches them, and writes one response per command.

use std::io::{BufRead, ErrorKind, Write};

use crate::engine::Engine;
use crate::error::{KvError, Result};
use crate::protocol::Response;

use super::{Dispatcher, Reply};

/// Outcome of reading one line from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A line, terminator included if one was present
    Line(String),

    /// A line whose bytes are not valid UTF-8
    NotUtf8(Vec<u8>),

    /// The input stream has no more data
    EndOfInput,
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// An `EXIT` command was received
    Exit,

    /// The input stream ended
    EndOfInput,

    /// The output stream went away
    OutputClosed,
}

/// Drives the command loop over a reader/writer pair
pub struct Session<R, W> {
    /// Command input (e.g. locked stdin)
    reader: R,

    /// Response output (e.g. locked stdout)
    writer: W,

    /// Routes commands to the engine
    dispatcher: Dispatcher,

    /// Non-blank lines processed so far
    commands_handled: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a new session around an engine
    pub fn new(reader: R, writer: W, engine: Engine) -> Self {
        Self {
            reader,
            writer,
            dispatcher: Dispatcher::new(engine),
            commands_handled: 0,
        }
    }

    /// Read the next line
    ///
    /// Invalid UTF-8 is reported as `NotUtf8` rather than as a stream failure.
    pub fn read_line(&mut self) -> Result<LineRead> {
        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(KvError::Stream)?;

        if read == 0 {
            return Ok(LineRead::EndOfInput);
        }

        match String::from_utf8(buf) {
            Ok(line) => Ok(LineRead::Line(line)),
            Err(e) => Ok(LineRead::NotUtf8(e.into_bytes())),
        }
    }

    /// Run the loop until EXIT or end of input
    ///
    /// Command failures are answered inline and never end the loop. A closed
    /// output ends the session quietly; any other stream failure is returned
    /// as an error.
    pub fn run(&mut self) -> Result<ExitReason> {
        loop {
            let reply = match self.read_line() {
                Ok(LineRead::Line(line)) => self.dispatcher.handle_line(&line),
                Ok(LineRead::NotUtf8(bytes)) => {
                    tracing::debug!("Rejected {}-byte line that is not valid UTF-8", bytes.len());
                    let error =
                        KvError::InvalidArgument("command line is not valid UTF-8".to_string());
                    Some(Reply::Respond(Response::from_error(&error)))
                }
                Ok(LineRead::EndOfInput) => {
                    tracing::debug!("End of input after {} commands", self.commands_handled);
                    return Ok(ExitReason::EndOfInput);
                }
                Err(e) => {
                    tracing::warn!("Error reading command: {}", e);
                    return Err(e);
                }
            };

            let Some(reply) = reply else {
                continue;
            };
            self.commands_handled += 1;

            let response = match reply {
                Reply::Exit => {
                    tracing::debug!("EXIT after {} commands", self.commands_handled);
                    return Ok(ExitReason::Exit);
                }
                Reply::Respond(response) => response,
            };

            if let Err(e) = self.send_response(&response) {
                match e.kind() {
                    ErrorKind::BrokenPipe
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted => {
                        tracing::debug!("Output closed before response could be written: {}", e);
                        return Ok(ExitReason::OutputClosed);
                    }
                    _ => {
                        tracing::warn!("Error writing response: {}", e);
                        return Err(KvError::Stream(e));
                    }
                }
            }
        }
    }

    /// Write one response line and flush it
    fn send_response(&mut self, response: &Response) -> std::io::Result<()> {
        writeln!(self.writer, "{}", response)?;
        self.writer.flush()
    }

    /// Non-blank lines processed so far
    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    pub fn engine(&self) -> &Engine {
        self.dispatcher.engine()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Tear the session down, returning the engine and the writer
    pub fn into_parts(self) -> (Engine, W) {
        (self.dispatcher.into_engine(), self.writer)
    }
}
