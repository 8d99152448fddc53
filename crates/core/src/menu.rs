//! Menu model and selection state machine.
//!
//! A [`Menu`] is a title plus an insertion-ordered list of options, each
//! carrying a payload and an optional callback. The menu itself is plain
//! data; driving it against a terminal is the job of the cli crate. The
//! [`SelectionState`] machine is pure: it consumes one [`KeyPress`] at a
//! time and either moves the clamped cursor, terminates with a selection,
//! or terminates with a quit.

use crate::key::{KeyPress, DOWN, UP};

/// Callback invoked with the selected option's payload; its return value
/// becomes the menu result.
pub type Callback<T> = Box<dyn FnOnce(T) -> T>;

/// One selectable menu row.
///
/// Options are immutable once added. Their insertion order defines both
/// display order and index addressing.
pub struct MenuOption<T> {
    label: String,
    callback: Option<Callback<T>>,
    payload: T,
}

impl<T> MenuOption<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Produces the option's terminal result: the callback applied to the
    /// payload when one was registered, otherwise the payload unchanged.
    pub fn resolve(self) -> T {
        match self.callback {
            Some(callback) => callback(self.payload),
            None => self.payload,
        }
    }
}

/// An interactive menu: a title and the options to choose between.
pub struct Menu<T> {
    title: String,
    options: Vec<MenuOption<T>>,
}

impl<T> Menu<T> {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
        }
    }

    /// Appends an option with no callback; selecting it yields the payload
    /// itself.
    pub fn add_option(&mut self, label: impl Into<String>, payload: T) -> &mut Self {
        self.options.push(MenuOption {
            label: label.into(),
            callback: None,
            payload,
        });
        self
    }

    /// Appends an option whose callback is applied to the payload when the
    /// option is selected.
    pub fn add_option_with(
        &mut self,
        label: impl Into<String>,
        payload: T,
        callback: impl FnOnce(T) -> T + 'static,
    ) -> &mut Self {
        self.options.push(MenuOption {
            label: label.into(),
            callback: Some(Box::new(callback)),
            payload,
        });
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[MenuOption<T>] {
        &self.options
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Consumes the menu, yielding its options for the run loop to resolve.
    #[must_use]
    pub fn into_options(self) -> Vec<MenuOption<T>> {
        self.options
    }
}

/// Outcome of feeding one key to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep looping; the cursor may or may not have moved.
    Continue,
    /// Terminate with the option at this index selected.
    Select(usize),
    /// Terminate without a selection.
    Quit,
}

/// Cursor state for a running menu.
///
/// The selected index stays within `[0, count - 1]`; movement clamps at the
/// boundaries rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    selected: usize,
    count: usize,
}

impl SelectionState {
    /// Creates the initial state with the cursor on the first option.
    ///
    /// A zero `count` is clamped to one so movement stays in range even
    /// when a caller bypasses the run loop's empty-menu check.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            selected: 0,
            count: count.max(1),
        }
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Processes one keypress.
    ///
    /// Up/down arrows move the clamped cursor, Enter selects the current
    /// option, `q`/`Q` quits, and every other key is ignored.
    pub fn apply(&mut self, key: KeyPress) -> Step {
        match key {
            KeyPress::Special(UP) => {
                self.selected = self.selected.saturating_sub(1);
                Step::Continue
            }
            KeyPress::Special(DOWN) => {
                self.selected = (self.selected + 1).min(self.count - 1);
                Step::Continue
            }
            KeyPress::Normal('\r' | '\n') => Step::Select(self.selected),
            KeyPress::Normal('q' | 'Q') => Step::Quit,
            _ => Step::Continue,
        }
    }
}

/// Outcome of feeding one key to the multi-select state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiStep {
    /// Keep looping; the cursor may have moved or a choice toggled.
    Continue,
    /// Terminate, accepting the currently chosen set.
    Confirm,
    /// Terminate without accepting anything.
    Quit,
}

/// Cursor plus chosen-set state for a multi-select menu.
///
/// Navigation behaves exactly like [`SelectionState`]; space toggles the
/// option under the cursor, Enter confirms the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectState {
    cursor: SelectionState,
    chosen: Vec<bool>,
}

impl MultiSelectState {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            cursor: SelectionState::new(count),
            chosen: vec![false; count],
        }
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.cursor.selected()
    }

    #[must_use]
    pub fn is_chosen(&self, index: usize) -> bool {
        self.chosen.get(index).copied().unwrap_or(false)
    }

    /// Indices of the chosen options, in ascending order.
    #[must_use]
    pub fn chosen_indices(&self) -> Vec<usize> {
        self.chosen
            .iter()
            .enumerate()
            .filter_map(|(index, chosen)| chosen.then_some(index))
            .collect()
    }

    /// Processes one keypress.
    ///
    /// Space toggles the option under the cursor, Enter confirms the chosen
    /// set, `q`/`Q` quits; everything else is cursor movement or ignored.
    pub fn apply(&mut self, key: KeyPress) -> MultiStep {
        match key {
            KeyPress::Normal(' ') => {
                if let Some(slot) = self.chosen.get_mut(self.cursor.selected()) {
                    *slot = !*slot;
                }
                MultiStep::Continue
            }
            KeyPress::Normal('\r' | '\n') => MultiStep::Confirm,
            KeyPress::Normal('q' | 'Q') => MultiStep::Quit,
            other => {
                self.cursor.apply(other);
                MultiStep::Continue
            }
        }
    }
}
