use std::collections::VecDeque;
use std::io::{self, Read};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use quickpick_core::error::Result;
use quickpick_core::key::{self, KeyPress, BACKSPACE, CTRL_C, DOWN, UP};

/// Blocking source of logical keypresses for the menu loop.
pub trait KeyReader {
    /// Blocks until one logical keypress is available.
    fn read_key(&mut self) -> Result<KeyPress>;
}

/// Production key reader backed by the terminal event stream.
///
/// crossterm performs the platform split (console API on Windows, termios
/// elsewhere); events are normalized to the ANSI final-byte vocabulary the
/// state machine consumes.
pub struct EventKeyReader;

impl KeyReader for EventKeyReader {
    fn read_key(&mut self) -> Result<KeyPress> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(key) = translate(&key_event) {
                    return Ok(key);
                }
            }
        }
    }
}

fn translate(key_event: &KeyEvent) -> Option<KeyPress> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        // Ctrl+C arrives as a key event in raw mode; surface it as the ETX
        // byte a raw read would have produced.
        return match key_event.code {
            KeyCode::Char('c') => Some(KeyPress::Normal(CTRL_C)),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Up => Some(KeyPress::Special(UP)),
        KeyCode::Down => Some(KeyPress::Special(DOWN)),
        KeyCode::Enter => Some(KeyPress::Normal('\r')),
        KeyCode::Backspace => Some(KeyPress::Normal(BACKSPACE)),
        KeyCode::Char(c) => Some(KeyPress::Normal(c)),
        _ => None,
    }
}

/// Key reader that decodes `ESC [ <code>` sequences from a raw byte stream.
pub struct AnsiKeyReader<R: Read> {
    input: R,
}

impl<R: Read> AnsiKeyReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> KeyReader for AnsiKeyReader<R> {
    fn read_key(&mut self) -> Result<KeyPress> {
        key::read_key(&mut self.input)
    }
}

/// Replays a fixed key sequence; for driving the menu loop in tests.
pub struct ScriptedKeyReader {
    keys: VecDeque<KeyPress>,
}

impl ScriptedKeyReader {
    pub fn new(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeyReader for ScriptedKeyReader {
    fn read_key(&mut self) -> Result<KeyPress> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted").into()
        })
    }
}
