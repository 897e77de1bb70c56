//! Port traits at the I/O seams: price input, configuration, report output.

pub mod config_port;
pub mod data_port;
pub mod report_port;
