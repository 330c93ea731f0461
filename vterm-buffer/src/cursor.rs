// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cursor position plus its latched sub-state.

use bitflags::bitflags;
use vterm_common::glyph::Attr;

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
    pub struct CursorFlags: u8 {
        /// The next printable character wraps to the next row before it is emitted.
        const WRAPNEXT = 1 << 0;
        /// `y` addresses are interpreted relative to the scroll region.
        const ORIGIN   = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    pub x: usize,
    pub y: usize,
    pub attr: Attr,
    pub flags: CursorFlags,
}

impl CursorState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            attr: Attr::default(),
            flags: CursorFlags::empty(),
        }
    }

    #[must_use]
    pub fn wrap_next(self) -> bool {
        self.flags.contains(CursorFlags::WRAPNEXT)
    }

    pub fn set_wrap_next(&mut self, set: bool) {
        self.flags.set(CursorFlags::WRAPNEXT, set);
    }

    #[must_use]
    pub fn origin_mode(self) -> bool {
        self.flags.contains(CursorFlags::ORIGIN)
    }

    pub fn set_origin_mode(&mut self, set: bool) {
        self.flags.set(CursorFlags::ORIGIN, set);
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_is_at_origin_with_no_flags() {
        let cursor = CursorState::new();
        assert_eq!((cursor.x, cursor.y), (0, 0));
        assert!(!cursor.wrap_next());
        assert!(!cursor.origin_mode());
    }

    #[test]
    fn flags_are_independent() {
        let mut cursor = CursorState::new();
        cursor.set_wrap_next(true);
        cursor.set_origin_mode(true);
        assert!(cursor.wrap_next());
        assert!(cursor.origin_mode());
        cursor.set_wrap_next(false);
        assert!(!cursor.wrap_next());
        assert!(cursor.origin_mode());
    }
}
