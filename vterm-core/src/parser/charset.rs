// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `G0..G3` designation slots and the `GL`/`GR` selectors.
//!
//! Lives in the parser, not the screen model: the screen's event handler
//! treats `DesignateCharset`/`LockingShift` as no-ops (translation already
//! happened before `Event::Print` was emitted), so this table has to be
//! the parser's own state.

use vterm_common::charmap::{CharMap, CharsetId};
use vterm_common::event::{CharsetSlot, LockingShift};

/// The four designation slots plus which two are currently active as
/// `GL` (left half, 0x20-0x7E) and `GR` (right half, 0xA0-0xFE).
#[derive(Clone, Copy, Debug)]
pub struct CharsetTable {
    g: [CharsetId; 4],
    gl: usize,
    gr: usize,
}

impl Default for CharsetTable {
    fn default() -> Self {
        Self {
            g: [CharsetId::UsAscii; 4],
            gl: 0,
            gr: 1,
        }
    }
}

impl CharsetTable {
    pub fn designate(&mut self, slot: CharsetSlot, charset: CharsetId) {
        self.g[slot_index(slot)] = charset;
    }

    pub fn apply_locking_shift(&mut self, shift: LockingShift) {
        match shift {
            LockingShift::ShiftInG0 => self.gl = 0,
            LockingShift::ShiftOutG1 => self.gl = 1,
            LockingShift::Ls2 => self.gl = 2,
            LockingShift::Ls3 => self.gl = 3,
            LockingShift::Ls1R => self.gr = 1,
            LockingShift::Ls2R => self.gr = 2,
            LockingShift::Ls3R => self.gr = 3,
        }
    }

    fn gl_map(&self) -> &'static CharMap {
        self.g[self.gl].table()
    }

    fn gr_map(&self) -> &'static CharMap {
        self.g[self.gr].table()
    }

    /// Translate a run of printable text through the active `GL`/`GR` maps.
    #[must_use]
    pub fn translate(&self, s: &str) -> String {
        self.gr_map().gr(&self.gl_map().gl(s))
    }

    /// Snapshot the table for `DECSC` (`ESC 7` / `CSI s`).
    #[must_use]
    pub const fn snapshot(&self) -> Self {
        *self
    }

    /// Restore a table previously returned by [`Self::snapshot`] (`DECRC`,
    /// `ESC 8` / `CSI u`).
    pub fn restore(&mut self, saved: Self) {
        *self = saved;
    }
}

const fn slot_index(slot: CharsetSlot) -> usize {
    match slot {
        CharsetSlot::G0 => 0,
        CharsetSlot::G1 => 1,
        CharsetSlot::G2 => 2,
        CharsetSlot::G3 => 3,
    }
}
