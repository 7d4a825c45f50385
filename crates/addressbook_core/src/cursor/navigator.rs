//! Cursor navigator over a loaded contact sequence.
//!
//! # Invariants
//! - On an empty sequence every move returns `None` and the position stays
//!   unset.
//! - A failed `move_next` parks the position on the last row; a failed
//!   `move_previous` parks it on the first row. Repeating the failed move is
//!   a no-op, and the opposite move takes effect on the first press.
//! - `refresh_preserving_position` keeps the numeric index even if it no
//!   longer points at the same contact, or at any row at all.

use crate::model::contact::Contact;

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    First,
    Last,
    Next,
    Previous,
}

/// Position-tracking view over one result set.
#[derive(Debug, Clone, Default)]
pub struct CursorNavigator {
    rows: Vec<Contact>,
    /// `None` when unset.
    position: Option<usize>,
}

impl CursorNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a navigator over `rows` with the position unset.
    pub fn with_rows(rows: Vec<Contact>) -> Self {
        Self {
            rows,
            position: None,
        }
    }

    /// Replaces the tracked rows and unsets the position.
    pub fn load(&mut self, rows: Vec<Contact>) {
        self.rows = rows;
        self.position = None;
    }

    /// Replaces the tracked rows and keeps the numeric position untouched.
    ///
    /// Callers must not assume the position still refers to the same contact,
    /// or that it is in range: check `current()`.
    pub fn refresh_preserving_position(&mut self, rows: Vec<Contact>) {
        self.rows = rows;
    }

    /// Replaces the tracked rows after the current row was removed from them.
    ///
    /// The position moves to the slot just before the removed row, so
    /// `move_next()` yields the contact that followed it.
    pub fn reload_after_removal(&mut self, rows: Vec<Contact>) {
        self.rows = rows;
        self.position = self.position.and_then(|index| index.checked_sub(1));
    }

    pub fn move_first(&mut self) -> Option<&Contact> {
        if self.rows.is_empty() {
            return None;
        }
        self.position = Some(0);
        self.rows.first()
    }

    pub fn move_last(&mut self) -> Option<&Contact> {
        let index = self.rows.len().checked_sub(1)?;
        self.position = Some(index);
        self.rows.get(index)
    }

    /// Advances one row. At the end, parks on the last row and returns `None`.
    pub fn move_next(&mut self) -> Option<&Contact> {
        let candidate = self.position.map_or(0, |index| index.saturating_add(1));
        if candidate < self.rows.len() {
            self.position = Some(candidate);
            return self.rows.get(candidate);
        }

        self.position = self.rows.len().checked_sub(1);
        None
    }

    /// Steps back one row. At the start, parks on the first row and returns
    /// `None`.
    pub fn move_previous(&mut self) -> Option<&Contact> {
        let candidate = self
            .position
            .and_then(|index| index.checked_sub(1))
            .filter(|index| *index < self.rows.len());
        if let Some(index) = candidate {
            self.position = Some(index);
            return self.rows.get(index);
        }

        self.position = if self.rows.is_empty() { None } else { Some(0) };
        None
    }

    /// Performs one step in `direction`.
    pub fn step(&mut self, direction: Direction) -> Option<&Contact> {
        match direction {
            Direction::First => self.move_first(),
            Direction::Last => self.move_last(),
            Direction::Next => self.move_next(),
            Direction::Previous => self.move_previous(),
        }
    }

    /// Returns the row under the position, if the position is set and in range.
    pub fn current(&self) -> Option<&Contact> {
        self.position.and_then(|index| self.rows.get(index))
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn rows(&self) -> &[Contact] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorNavigator, Direction};
    use crate::model::contact::Contact;

    fn contact(id: i64, name: &str) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            number: "555-0100".to_string(),
            email: String::new(),
        }
    }

    fn abc() -> CursorNavigator {
        CursorNavigator::with_rows(vec![contact(1, "A"), contact(2, "B"), contact(3, "C")])
    }

    fn name(row: Option<&Contact>) -> Option<&str> {
        row.map(|contact| contact.name.as_str())
    }

    #[test]
    fn next_walks_then_parks_on_last_row() {
        let mut nav = abc();
        assert_eq!(name(nav.move_first()), Some("A"));
        assert_eq!(name(nav.move_next()), Some("B"));
        assert_eq!(name(nav.move_next()), Some("C"));

        assert_eq!(name(nav.move_next()), None);
        assert_eq!(nav.position(), Some(2));
        assert_eq!(name(nav.current()), Some("C"));

        assert_eq!(name(nav.move_next()), None);
        assert_eq!(nav.position(), Some(2));
        assert_eq!(name(nav.move_previous()), Some("B"));
    }

    #[test]
    fn previous_parks_on_first_row() {
        let mut nav = abc();
        nav.move_first();
        assert_eq!(name(nav.move_previous()), None);
        assert_eq!(nav.position(), Some(0));
        assert_eq!(name(nav.move_previous()), None);
        assert_eq!(name(nav.move_next()), Some("B"));
    }

    #[test]
    fn unset_position_next_starts_at_first_and_previous_parks_on_first() {
        let mut nav = abc();
        assert_eq!(name(nav.move_next()), Some("A"));

        let mut nav = abc();
        assert_eq!(name(nav.move_previous()), None);
        assert_eq!(nav.position(), Some(0));
    }

    #[test]
    fn empty_sequence_never_moves() {
        let mut nav = CursorNavigator::new();
        for direction in [
            Direction::First,
            Direction::Last,
            Direction::Next,
            Direction::Previous,
        ] {
            assert!(nav.step(direction).is_none());
            assert_eq!(nav.position(), None);
        }
    }

    #[test]
    fn load_resets_position() {
        let mut nav = abc();
        nav.move_last();
        nav.load(vec![contact(9, "Z")]);
        assert_eq!(nav.position(), None);
        assert!(nav.current().is_none());
    }

    #[test]
    fn refresh_keeps_index_even_when_out_of_range() {
        let mut nav = abc();
        nav.move_last();
        nav.refresh_preserving_position(vec![contact(1, "A")]);
        assert_eq!(nav.position(), Some(2));
        assert!(nav.current().is_none());

        assert_eq!(name(nav.move_next()), None);
        assert_eq!(nav.position(), Some(0));
    }

    #[test]
    fn reload_after_removal_steps_back_one_slot() {
        let mut nav = abc();
        nav.move_first();
        nav.reload_after_removal(vec![contact(2, "B"), contact(3, "C")]);
        assert_eq!(nav.position(), None);
        assert_eq!(name(nav.move_next()), Some("B"));
    }
}
