//! Library side of the `benef` command-line tool.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
