//! Command dispatch for the protocol engine.
//!
//! Requests arrive as [`CommandRequest`] envelopes. The [`Session`] resolves
//! the command name to a [`CommandKind`], validates the input into a typed
//! envelope and only then runs the command. Every failure is reported to the
//! client as a [`Reply`] with `reply` set to `"Error"`.

mod commands;
mod errors;
mod handler;
mod input;
mod reply;
mod request;
mod router;
mod translate;

pub use errors::CommandError;
pub use handler::Session;
pub use reply::{
    FileRecord, FsChangeRecord, LogRecord, ParamDescriptor, Reply, ReplyStatus, ReplyWriter,
    TransformationSummary,
};
pub use request::CommandRequest;
pub use router::CommandKind;
pub(crate) use router::DISPATCH_TARGET;
