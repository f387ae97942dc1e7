//! SET argument tokenization.
//!
//! The raw substring after `=` is split on the configured separator byte.
//! Double quotes delimit spans in which the separator is literal content,
//! and the configured escape byte turns a quote into content instead of a
//! delimiter. Structural quotes are stripped from the produced tokens; an
//! escaped quote survives as a literal `"`.

use bytes::{Bytes, BytesMut};

const QUOTE: u8 = b'"';

/// Split a raw argument substring into unescaped tokens.
///
/// A separator ends the current token only when the number of unescaped
/// quotes seen so far is even, i.e. outside any open quoted span. Returns
/// `None` when the substring ends inside a quoted span (unterminated
/// quote), in which case the whole argument list is invalid.
///
/// A trailing separator does not produce a final empty token, and an empty
/// substring produces an empty list.
pub(crate) fn split_arguments(raw: &[u8], separator: u8, escape: u8) -> Option<Vec<Bytes>> {
    let mut arguments = Vec::new();
    let mut position = 0;
    while position < raw.len() {
        let mut quotes = 0usize;
        let mut end = None;
        for index in position..raw.len() {
            let byte = raw[index];
            if byte == separator && quotes % 2 == 0 {
                end = Some(index);
                break;
            }
            if byte == QUOTE && (index == 0 || raw[index - 1] != escape) {
                quotes += 1;
            }
        }
        match end {
            Some(end) => {
                arguments.push(unescape(&raw[position..end], escape));
                position = end + 1;
            }
            None => {
                if quotes % 2 != 0 {
                    return None;
                }
                arguments.push(unescape(&raw[position..], escape));
                position = raw.len();
            }
        }
    }
    Some(arguments)
}

/// Copy one token, dropping structural quotes and resolving escapes.
///
/// Single pass: a structural quote emits nothing, an escape byte followed
/// by a quote emits a literal quote and consumes both bytes, and every
/// other byte (including a dangling escape) passes through unchanged. The
/// output is never longer than the input.
fn unescape(token: &[u8], escape: u8) -> Bytes {
    let mut out = BytesMut::with_capacity(token.len());
    let mut position = 0;
    while position < token.len() {
        let byte = token[position];
        if byte == escape && position + 1 < token.len() && token[position + 1] == QUOTE {
            out.extend_from_slice(&[QUOTE]);
            position += 2;
        } else if byte == QUOTE {
            position += 1;
        } else {
            out.extend_from_slice(&[byte]);
            position += 1;
        }
    }
    out.freeze()
}
