//! The parser itself: byte ingestion, line classification, and dispatch.

use std::sync::Arc;

use bytes::Bytes;
use log::{debug, trace};

use crate::args::split_arguments;
use crate::codec::LineBuffer;
use crate::command::{classify, CommandType, ParsedCommand};
use crate::error::{ParserError, ParserResult};
use crate::registry::{CommandHandler, HandlerRegistry};

/// Smallest accepted buffer capacity: the shortest dispatchable line plus
/// its terminator (`AT+X\r\n`).
pub const MIN_BUFFER_CAPACITY: usize = 6;

/// A streaming AT command parser.
///
/// Feed raw bytes from any transport into [`AtParser::ingest`] in whatever
/// chunk sizes they arrive; the parser reassembles logical lines, classifies
/// them, and synchronously invokes every matching handler. The buffer
/// capacity must be large enough to hold the longest anticipated command
/// line including its CR/LF terminator, or such lines will be lost through
/// the overflow policy.
#[derive(Debug)]
pub struct AtParser {
    buffer: LineBuffer,
    registry: HandlerRegistry,
    escape_char: u8,
    arg_separator: u8,
}

impl AtParser {
    /// Create a parser with the given buffer capacity, quote escape byte,
    /// and SET argument separator byte.
    pub fn new(
        buffer_capacity: usize,
        escape_char: u8,
        arg_separator: u8,
    ) -> ParserResult<AtParser> {
        if buffer_capacity < MIN_BUFFER_CAPACITY {
            return Err(ParserError::BufferTooSmall {
                minimum: MIN_BUFFER_CAPACITY,
                requested: buffer_capacity,
            });
        }
        Ok(AtParser {
            buffer: LineBuffer::new(buffer_capacity),
            registry: HandlerRegistry::default(),
            escape_char,
            arg_separator,
        })
    }

    /// Register `handler` for commands named `name` (the part after `AT+`).
    ///
    /// Registering the same (name, handler) pair twice is a no-op, so a
    /// matching line still dispatches to it exactly once.
    pub fn add_handler(&mut self, name: &str, handler: Arc<dyn CommandHandler>) -> ParserResult<()> {
        self.registry.add(name, handler)
    }

    /// Remove a previously registered (name, handler) pair. Removing a pair
    /// that is not registered is a no-op.
    pub fn remove_handler(
        &mut self,
        name: &str,
        handler: &Arc<dyn CommandHandler>,
    ) -> ParserResult<()> {
        self.registry.remove(name, handler)
    }

    /// Ingest a chunk of raw bytes, dispatching every complete command line
    /// they surface.
    ///
    /// The entire chunk is processed before returning. Dispatch results are
    /// identical regardless of how the byte stream is split into chunks.
    /// Handlers run synchronously on this call stack, so a blocking handler
    /// stalls the remainder of the chunk.
    pub fn ingest(&mut self, data: &[u8]) {
        let mut consumed = 0;
        while consumed < data.len() {
            let accepted = self.buffer.fill(&data[consumed..]);
            if accepted == 0 {
                // Full buffer with no terminator: shed a few bytes and retry
                // without consuming new input this iteration.
                self.buffer.relieve_overflow();
                continue;
            }
            consumed += accepted;
            while let Some(line) = self.buffer.take_line() {
                self.dispatch_line(&line);
            }
        }
    }

    /// Number of handler registrations.
    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of bytes currently held back as an incomplete line.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any partially accumulated line.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// The configured quote escape byte.
    pub fn escape_char(&self) -> u8 {
        self.escape_char
    }

    /// The configured SET argument separator byte.
    pub fn arg_separator(&self) -> u8 {
        self.arg_separator
    }

    /// Classify one logical line and invoke every matching handler.
    ///
    /// All protocol-level anomalies end here: unrecognized or malformed
    /// lines and unterminated quotes drop the line without dispatch, and
    /// the stream continues with the next line.
    fn dispatch_line(&mut self, line: &[u8]) {
        let Some(classified) = classify(line) else {
            trace!("discarding unrecognized line ({} bytes)", line.len());
            return;
        };
        let arguments: Vec<Bytes> = if classified.command_type == CommandType::Set {
            match split_arguments(classified.raw_arguments, self.arg_separator, self.escape_char) {
                Some(arguments) => arguments,
                None => {
                    debug!("dropping SET line with an unterminated quoted argument");
                    return;
                }
            }
        } else {
            Vec::new()
        };
        for entry in self.registry.matches(classified.name) {
            let command = ParsedCommand {
                name: &entry.name,
                command_type: classified.command_type,
                arguments: &arguments,
            };
            entry.handler.on_command(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_tiny_capacity() {
        let err = AtParser::new(5, b'\\', b',').unwrap_err();
        assert_eq!(
            err,
            ParserError::BufferTooSmall {
                minimum: MIN_BUFFER_CAPACITY,
                requested: 5
            }
        );
        assert!(AtParser::new(MIN_BUFFER_CAPACITY, b'\\', b',').is_ok());
    }

    #[test]
    fn test_ingest_without_handlers() {
        // Classification is independent of registration; lines for unknown
        // names simply dispatch to nobody.
        let mut parser = AtParser::new(64, b'\\', b',').unwrap();
        parser.ingest(b"AT+HELLOW=1,2\r\n");
        assert_eq!(parser.buffered_len(), 0);
    }

    #[test]
    fn test_partial_line_is_held_back() {
        let mut parser = AtParser::new(64, b'\\', b',').unwrap();
        parser.ingest(b"AT+HELL");
        assert_eq!(parser.buffered_len(), 7);

        parser.ingest(b"OW\r\n");
        assert_eq!(parser.buffered_len(), 0);
    }
}
