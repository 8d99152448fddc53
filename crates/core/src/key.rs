//! Key events and ANSI escape-sequence decoding.
//!
//! A keypress is either a printable/control character (`Normal`) or the
//! final byte of an arrow-key style escape sequence (`Special`). The decoder
//! here works over any byte stream, which is what a raw-mode terminal read
//! produces on POSIX systems; readers built on higher-level event sources
//! normalize into the same vocabulary.

use std::io::Read;

use log::debug;

use crate::error::Result;

/// First byte of an escape sequence.
pub const ESC: u8 = 0x1b;

/// Ctrl+C as delivered by a raw-mode read (ETX).
pub const CTRL_C: char = '\u{3}';

/// Backspace as delivered by a raw-mode read (DEL).
pub const BACKSPACE: char = '\u{7f}';

/// Final byte of the `ESC [ A` (cursor up) sequence.
pub const UP: char = 'A';

/// Final byte of the `ESC [ B` (cursor down) sequence.
pub const DOWN: char = 'B';

/// One logical keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A plain character, including control characters such as `\r` and ETX.
    Normal(char),
    /// The final byte of a recognized `ESC [ <code>` sequence.
    Special(char),
}

/// Reads one logical keypress from a raw byte stream.
///
/// Blocks until a complete keypress is available. An `ESC` byte causes
/// exactly two more bytes to be read: if the first of them is `[`, the
/// second is returned as [`KeyPress::Special`]. Any other escape sequence is
/// consumed and silently discarded, and reading continues with the next key.
///
/// Bytes that are not valid ASCII degrade to a `Normal` key carrying the
/// byte's Latin-1 value, so garbled input is ignored by callers rather than
/// aborting the read loop.
///
/// # Errors
///
/// Returns an error when the underlying stream fails or ends mid-keypress.
pub fn read_key<R: Read>(input: &mut R) -> Result<KeyPress> {
    loop {
        let first = read_byte(input)?;

        if first != ESC {
            return Ok(KeyPress::Normal(char::from(first)));
        }

        let second = read_byte(input)?;
        let third = read_byte(input)?;

        if second == b'[' {
            return Ok(KeyPress::Special(char::from(third)));
        }

        // Not a CSI sequence. Both follow-on bytes are already consumed,
        // and the state machine would ignore the event anyway.
        debug!("discarding unrecognized escape sequence: 0x{second:02x} 0x{third:02x}");
    }
}

fn read_byte<R: Read>(input: &mut R) -> Result<u8> {
    let mut buffer = [0u8; 1];
    input.read_exact(&mut buffer)?;
    Ok(buffer[0])
}
