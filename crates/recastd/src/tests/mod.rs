//! Test suites for the recast daemon.

mod protocol_behaviour;
pub(crate) mod support;
