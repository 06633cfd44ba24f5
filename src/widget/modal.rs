//! Keyboard-driven image modal.
//!
//! Independent of the section tracker. Navigation clamps at both ends;
//! there is no wrap-around.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { index: usize },
}

/// Modal viewer over `len` images.
///
/// While open the page body may not scroll; the overflow value that was in
/// place when the modal opened is restored on close.
#[derive(Debug, Clone)]
pub struct ImageModal {
    len: usize,
    state: ModalState,
    saved_overflow: Option<String>,
}

impl ImageModal {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: ModalState::Closed,
            saved_overflow: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            ModalState::Open { index } => Some(index),
            ModalState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.index().is_some()
    }

    /// Open at `index`, locking scroll. Out-of-range indices are ignored.
    ///
    /// `body_overflow` is the body's overflow style at the time of opening.
    pub fn open(&mut self, index: usize, body_overflow: &str) -> bool {
        if index >= self.len {
            return false;
        }
        if !self.is_open() {
            self.saved_overflow = Some(body_overflow.to_string());
        }
        self.state = ModalState::Open { index };
        true
    }

    /// Close and return the overflow value to restore, if the modal was open.
    pub fn close(&mut self) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.state = ModalState::Closed;
        self.saved_overflow.take()
    }

    pub fn can_prev(&self) -> bool {
        self.index().is_some_and(|i| i > 0)
    }

    pub fn can_next(&self) -> bool {
        self.index().is_some_and(|i| i + 1 < self.len)
    }

    pub fn prev(&mut self) {
        if let ModalState::Open { index } = self.state
            && index > 0
        {
            self.state = ModalState::Open { index: index - 1 };
        }
    }

    pub fn next(&mut self) {
        if let ModalState::Open { index } = self.state
            && index + 1 < self.len
        {
            self.state = ModalState::Open { index: index + 1 };
        }
    }

    /// Apply a key press. Keys are ignored while closed.
    ///
    /// Returns the overflow value to restore when the key closed the modal.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        match key {
            Key::Escape => return self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_navigate() {
        let mut modal = ImageModal::new(3);
        assert!(modal.open(1, ""));
        assert_eq!(modal.state(), ModalState::Open { index: 1 });

        modal.handle_key(Key::ArrowRight);
        assert_eq!(modal.index(), Some(2));
        assert!(!modal.can_next());

        // Clamped at the end
        modal.handle_key(Key::ArrowRight);
        assert_eq!(modal.index(), Some(2));

        modal.handle_key(Key::ArrowLeft);
        modal.handle_key(Key::ArrowLeft);
        modal.handle_key(Key::ArrowLeft);
        assert_eq!(modal.index(), Some(0));
        assert!(!modal.can_prev());
        assert!(modal.can_next());
    }

    #[test]
    fn test_open_out_of_range_is_ignored() {
        let mut modal = ImageModal::new(2);
        assert!(!modal.open(2, ""));
        assert!(!modal.is_open());

        let mut empty = ImageModal::new(0);
        assert!(!empty.open(0, ""));
    }

    #[test]
    fn test_escape_restores_overflow() {
        let mut modal = ImageModal::new(2);
        modal.open(0, "auto");
        // Re-opening at another index keeps the original value
        modal.open(1, "hidden");

        assert_eq!(modal.handle_key(Key::Other), None);
        assert_eq!(modal.handle_key(Key::Escape), Some("auto".to_string()));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut modal = ImageModal::new(2);
        assert_eq!(modal.handle_key(Key::Escape), None);
        modal.handle_key(Key::ArrowRight);
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(modal.close(), None);
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }
}
