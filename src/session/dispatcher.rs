//! Command Dispatcher
//!
//! Routes parsed command lines to the engine and renders the outcome.

use crate::engine::Engine;
use crate::protocol::{parse, Command, Response};

/// What the session should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Write this response line and keep going
    Respond(Response),

    /// Stop the session without output
    Exit,
}

/// Routes commands to the engine it owns
///
/// Holds no state of its own between calls; everything persistent lives in
/// the engine.
pub struct Dispatcher {
    engine: Engine,
}

impl Dispatcher {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Parse and dispatch one raw input line
    ///
    /// Returns `None` for a blank line, which produces no output.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let parsed = parse(line)?;
        Some(self.dispatch(&parsed.command, parsed.args))
    }

    /// Dispatch a command token and its argument string
    ///
    /// Every failure is turned into a response here; none of them end the
    /// session.
    pub fn dispatch(&mut self, name: &str, args: &str) -> Reply {
        let command = match Command::from_parts(name, args) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Rejected command {:?}: {}", name, e);
                return Reply::Respond(Response::from_error(&e));
            }
        };

        if command == Command::Exit {
            return Reply::Exit;
        }

        tracing::trace!("Dispatching {:?}", command.command_type());

        let response = match self.engine.execute(command) {
            Ok(Some(value)) => Response::Value(value),
            Ok(None) => Response::Ok,
            Err(e) => Response::from_error(&e),
        };

        Reply::Respond(response)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Give the engine back (e.g. to close it)
    pub fn into_engine(self) -> Engine {
        self.engine
    }
}
