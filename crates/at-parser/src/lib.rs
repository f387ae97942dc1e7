//! Streaming parser for AT-style command lines.
//!
//! Modems and many embedded radio/cellular modules expose a line-oriented
//! text protocol where each command starts with `AT+`, names the operation,
//! and ends with a CR/LF terminator. This crate reassembles raw bytes
//! arriving in arbitrary-sized chunks into logical command lines, classifies
//! each line, tokenizes quoted SET arguments, and dispatches to handlers
//! registered by command name. The transport itself (serial port, socket,
//! PTY) is the caller's concern.
//!
//! # Command Forms
//!
//! A line `AT+NAME...` is classified by what follows the name:
//!
//! - **Test**: `AT+NAME?`
//! - **Query**: `AT+NAME=?`
//! - **Set**: `AT+NAME=<args>` - arguments split on a configurable
//!   separator, with double-quoted spans and a configurable escape byte
//! - **Execute**: `AT+NAME`
//!
//! Anything else (wrong prefix, malformed suffix, unterminated quote) is
//! dropped silently: a noisy transport must never halt the parser.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use at_parser::{AtParser, CommandHandler, ParsedCommand};
//!
//! let mut parser = AtParser::new(128, b'\\', b',').unwrap();
//!
//! let handler: Arc<dyn CommandHandler> = Arc::new(|command: &ParsedCommand<'_>| {
//!     println!("{} ({:?})", command.name, command.command_type);
//! });
//! parser.add_handler("HELLOW", handler).unwrap();
//!
//! parser.ingest(b"AT+HELLOW=\"hi\"\r\n");
//! ```

mod args;
mod codec;
mod command;
mod error;
mod parser;
mod registry;

pub use codec::*;
pub use command::*;
pub use error::*;
pub use parser::*;
pub use registry::*;
