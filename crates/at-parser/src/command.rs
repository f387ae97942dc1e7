//! Command line classification.
//!
//! A logical line is recognized as a command when it starts with the `AT+`
//! prefix. The command name is the maximal run of ASCII letters and digits
//! after the prefix; what remains after the name decides the command form:
//!
//! - `?` - test
//! - `=?` - query
//! - `=<args>` - set, requiring at least one byte after the `=`
//! - nothing - execute
//!
//! Any other suffix is malformed and the line is dropped; that includes a
//! bare trailing `=` with nothing after it. Classification never depends
//! on which handlers are registered.

use bytes::Bytes;

/// The fixed prefix every command line must carry.
pub const COMMAND_PREFIX: &[u8] = b"AT+";

/// Shortest line that can possibly be a command (`AT+X`).
pub(crate) const MIN_LINE_LENGTH: usize = 4;

/// The four forms an AT command line can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// `AT+NAME=?` - ask which values the command accepts.
    Query,
    /// `AT+NAME?` - read the current value.
    Test,
    /// `AT+NAME=<args>` - write one or more argument values.
    Set,
    /// `AT+NAME` - run the command without arguments.
    Execute,
}

/// The borrowed view of one dispatched command that handlers receive.
///
/// All fields are valid only for the duration of the callback; handlers
/// that need the data longer must copy it out.
#[derive(Debug, Clone, Copy)]
pub struct ParsedCommand<'a> {
    /// The registered command name that matched this line.
    pub name: &'a str,
    /// Which of the four command forms was received.
    pub command_type: CommandType,
    /// Unescaped SET arguments; empty for the other command forms.
    pub arguments: &'a [Bytes],
}

/// A line that passed classification, borrowed from the line buffer.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ClassifiedLine<'a> {
    /// Command name bytes (ASCII letters and digits).
    pub name: &'a [u8],
    /// The recognized command form.
    pub command_type: CommandType,
    /// Raw argument substring after `=`; empty unless the form is SET.
    pub raw_arguments: &'a [u8],
}

/// Classify one de-terminated line, or reject it.
///
/// Returns `None` for transport noise: lines too short to be a command,
/// lines without the `AT+` prefix, and lines with a malformed suffix.
pub(crate) fn classify(line: &[u8]) -> Option<ClassifiedLine<'_>> {
    if line.len() < MIN_LINE_LENGTH || !line.starts_with(COMMAND_PREFIX) {
        return None;
    }
    let rest = &line[COMMAND_PREFIX.len()..];
    let name_len = rest
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let (name, suffix) = rest.split_at(name_len);

    let (command_type, raw_arguments) = match suffix {
        [] => (CommandType::Execute, &[][..]),
        [b'?'] => (CommandType::Test, &[][..]),
        [b'=', b'?'] => (CommandType::Query, &[][..]),
        [b'=', args @ ..] if !args.is_empty() => (CommandType::Set, args),
        _ => return None,
    };
    Some(ClassifiedLine {
        name,
        command_type,
        raw_arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_execute() {
        let classified = classify(b"AT+HELLOW").expect("should classify");
        assert_eq!(classified.name, b"HELLOW");
        assert_eq!(classified.command_type, CommandType::Execute);
        assert!(classified.raw_arguments.is_empty());
    }

    #[test]
    fn test_classify_test() {
        let classified = classify(b"AT+HELLOW?").expect("should classify");
        assert_eq!(classified.name, b"HELLOW");
        assert_eq!(classified.command_type, CommandType::Test);
    }

    #[test]
    fn test_classify_query() {
        let classified = classify(b"AT+HELLOW=?").expect("should classify");
        assert_eq!(classified.name, b"HELLOW");
        assert_eq!(classified.command_type, CommandType::Query);
        assert!(classified.raw_arguments.is_empty());
    }

    #[test]
    fn test_classify_set() {
        let classified = classify(b"AT+HELLOW=hello_world").expect("should classify");
        assert_eq!(classified.name, b"HELLOW");
        assert_eq!(classified.command_type, CommandType::Set);
        assert_eq!(classified.raw_arguments, b"hello_world");
    }

    #[test]
    fn test_classify_rejects_bare_equals() {
        // A trailing `=` with nothing after it is malformed, not an empty
        // SET.
        assert!(classify(b"AT+HELLOW=").is_none());
    }

    #[test]
    fn test_classify_name_with_digits() {
        let classified = classify(b"AT+GPS2?").expect("should classify");
        assert_eq!(classified.name, b"GPS2");
        assert_eq!(classified.command_type, CommandType::Test);
    }

    #[test]
    fn test_classify_rejects_wrong_prefix() {
        assert!(classify(b"hello world").is_none());
        assert!(classify(b"AZ+HELLOW").is_none());
        assert!(classify(b"at+hellow").is_none());
    }

    #[test]
    fn test_classify_rejects_short_line() {
        assert!(classify(b"AT+").is_none());
        assert!(classify(b"").is_none());
    }

    #[test]
    fn test_classify_rejects_malformed_suffix() {
        assert!(classify(b"AT+HELLOW!").is_none());
        assert!(classify(b"AT+HELLOW??").is_none());
        assert!(classify(b"AT+HELLOW?x").is_none());
    }
}
