//! Library side of the venue import command line tool.

pub mod logging;
pub mod pipeline;
pub mod store;
