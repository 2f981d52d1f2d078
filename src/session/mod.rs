//! Session Module
//!
//! Connects a line-oriented input/output stream to the engine.
//!
//! ## Architecture
//! - `Dispatcher`: stateless routing of one parsed line to the engine
//! - `Session`: the read → dispatch → respond loop over any `BufRead`/`Write`

mod dispatcher;
mod driver;

pub use dispatcher::{Dispatcher, Reply};
pub use driver::{ExitReason, LineRead, Session};
