// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The grid of styled glyphs, its cursor, modes, scroll region, tab
//! stops, and alternate-screen save slot. This is the mutation target
//! the event handler in [`crate::handler`] drives; `Screen` itself only
//! knows how to keep its own invariants, not how to interpret VT events.

use vterm_common::cursor::CursorVisualStyle;
use vterm_common::glyph::{Attr, Glyph};
use vterm_common::mode::Mode;

use crate::cursor::CursorState;
use crate::line::Line;
use crate::notify::Notification;
use crate::scroll::ScrollRegion;
use crate::tabs::TabStops;

/// Snapshot held while the alternate screen is active so the primary
/// screen can be restored verbatim on exit.
#[derive(Clone, Debug)]
struct SavedPrimary {
    mode: Mode,
    buffer: Vec<Line>,
    base: usize,
    cursor: CursorState,
    scroll: ScrollRegion,
    tabs: TabStops,
}

#[derive(Debug)]
pub struct Screen {
    buffer: Vec<Line>,
    base: usize,
    cols: usize,
    rows: usize,
    cursor: CursorState,
    scroll: ScrollRegion,
    tabs: TabStops,
    mode: Mode,
    title: String,
    cursor_style: CursorVisualStyle,
    clipboard: Vec<u8>,
    saved_primary: Option<SavedPrimary>,
    /// Snapshot taken by `DECSC`/`CSI s`/DECSET 1048, consumed by
    /// `DECRC`/`CSI u`/DECRST 1048.
    saved_cursor: Option<CursorState>,
    dirty: Option<(usize, usize)>,
}

impl Screen {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            buffer: vec![Line::blank(cols, Attr::default()); rows],
            base: 0,
            cols,
            rows,
            cursor: CursorState::new(),
            scroll: ScrollRegion::full(rows),
            tabs: TabStops::new(cols),
            mode: Mode::default(),
            title: String::new(),
            cursor_style: CursorVisualStyle::default(),
            clipboard: Vec::new(),
            saved_primary: None,
            saved_cursor: None,
            dirty: None,
        }
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    #[must_use]
    pub const fn cursor(&self) -> CursorState {
        self.cursor
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn clipboard(&self) -> &[u8] {
        &self.clipboard
    }

    #[must_use]
    pub const fn cursor_style(&self) -> CursorVisualStyle {
        self.cursor_style
    }

    #[must_use]
    pub const fn scroll_region(&self) -> ScrollRegion {
        self.scroll
    }

    /// The line at absolute buffer row `y`, if in range.
    #[must_use]
    pub fn line(&self, y: usize) -> Option<&Line> {
        self.buffer.get(y)
    }

    /// The full buffer, scrollback and visible screen together: exactly
    /// `base + rows` lines.
    #[must_use]
    pub fn buffer_lines(&self) -> &[Line] {
        &self.buffer
    }

    fn mark_dirty(&mut self, y0: usize, y1: usize) {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        self.dirty = Some(match self.dirty {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        });
    }

    /// Drain the accumulated dirty range for this chunk, if any, into a
    /// [`Notification::Refresh`]. Called once per processed input chunk.
    pub fn take_refresh(&mut self) -> Option<Notification> {
        let (y0, y1) = self.dirty.take()?;
        let slice = self.buffer[y0..=y1.min(self.buffer.len().saturating_sub(1))].to_vec();
        Some(Notification::Refresh {
            dirty: (y0, y1),
            slice,
            cursor: (self.cursor.x, self.cursor.y),
        })
    }

    fn abs(&self, y: usize) -> usize {
        self.base + y
    }

    pub fn set_attr(&mut self, attr: Attr) {
        self.cursor.attr = attr;
    }

    #[must_use]
    pub const fn attr(&self) -> Attr {
        self.cursor.attr
    }

    /// *Print*: write a single already-translated code point at the
    /// cursor, honoring `WRAP`/`INSERT` mode and the `WRAPNEXT` latch.
    pub fn print_char(&mut self, ch: char) {
        if self.mode.contains(Mode::WRAP) && self.cursor.wrap_next() {
            self.new_line(true);
        }
        if self.mode.contains(Mode::INSERT) && self.cursor.x < self.cols {
            let y = self.abs(self.cursor.y);
            let attr = self.cursor.attr;
            if let Some(line) = self.buffer.get_mut(y) {
                line.insert_blank_at(self.cursor.x, attr);
            }
        }
        let y = self.abs(self.cursor.y);
        let (x, attr) = (self.cursor.x, self.cursor.attr);
        if let Some(line) = self.buffer.get_mut(y) {
            line.set(x, Glyph::new(ch, attr));
        }
        self.mark_dirty(y, y);
        if self.cursor.x + 1 < self.cols {
            self.cursor.x += 1;
            self.cursor.set_wrap_next(false);
        } else {
            self.cursor.set_wrap_next(true);
        }
    }

    pub fn print(&mut self, s: &str) {
        for ch in s.chars() {
            self.print_char(ch);
        }
    }

    /// *New-line*: move down one row, scrolling if at the scroll
    /// region's bottom; optionally also return to column 0.
    pub fn new_line(&mut self, with_cr: bool) {
        if self.cursor.y == self.scroll.bottom {
            self.scroll_up(1);
        } else if self.cursor.y + 1 < self.rows {
            self.cursor.y += 1;
        }
        self.cursor.set_wrap_next(false);
        if with_cr || self.mode.contains(Mode::CRLF) {
            self.cursor.x = 0;
        }
    }

    /// `IND`: like [`Self::new_line`] but never implies a carriage return.
    pub fn index(&mut self) {
        self.new_line(false);
    }

    /// `RI`: move up one row, reverse-scrolling if at the scroll region's top.
    pub fn reverse_index(&mut self) {
        if self.cursor.y == self.scroll.top {
            self.scroll_up(-1);
        } else if self.cursor.y > 0 {
            self.cursor.y -= 1;
        }
        self.cursor.set_wrap_next(false);
    }

    /// *Scroll*: `n > 0` scrolls content up (new blank lines appear at
    /// the bottom); `n < 0` scrolls down. See `spec.md`'s Open Question:
    /// scrolling up always grows scrollback, even inside a restricted
    /// scroll region — a deliberate deviation from strict VT semantics,
    /// reproduced here rather than fixed.
    pub fn scroll_up(&mut self, n: isize) {
        if n > 0 {
            for _ in 0..n {
                self.base += 1;
                let insert_at = self.abs(self.scroll.bottom);
                let attr = self.cursor.attr;
                self.buffer.insert(insert_at.min(self.buffer.len()), Line::blank(self.cols, attr));
            }
            self.mark_dirty(self.abs(self.scroll.top), self.abs(self.scroll.bottom));
        } else if n < 0 {
            let attr = self.cursor.attr;
            for _ in 0..(-n) {
                let bottom = self.abs(self.scroll.bottom);
                if bottom < self.buffer.len() {
                    self.buffer.remove(bottom);
                }
                let top = self.abs(self.scroll.top);
                self.buffer.insert(top.min(self.buffer.len()), Line::blank(self.cols, attr));
            }
            self.mark_dirty(self.abs(self.scroll.top), self.abs(self.scroll.bottom));
        }
    }

    fn clamp_y_bounds(&self) -> (usize, usize) {
        if self.cursor.origin_mode() {
            (self.scroll.top, self.scroll.bottom)
        } else {
            (0, self.rows.saturating_sub(1))
        }
    }

    /// *Move-to*: absolute cursor positioning (`CUP`/`HVP`), 0-based,
    /// already converted from the 1-based wire parameters by the caller.
    pub fn move_to(&mut self, x: Option<usize>, y: Option<usize>) {
        let (miny, maxy) = self.clamp_y_bounds();
        let old_y = self.abs(self.cursor.y);
        let offset = if self.cursor.origin_mode() { self.scroll.top } else { 0 };
        let target_y = y.map_or(miny, |y| y + offset);
        self.cursor.y = target_y.clamp(miny, maxy);
        self.cursor.x = x.unwrap_or(0).min(self.cols);
        self.cursor.set_wrap_next(false);
        self.mark_dirty(old_y, self.abs(self.cursor.y));
    }

    pub fn move_relative(&mut self, dx: isize, dy: isize) {
        let (miny, maxy) = self.clamp_y_bounds();
        let old_y = self.abs(self.cursor.y);
        let new_x = (self.cursor.x as isize + dx).clamp(0, self.cols as isize);
        let new_y = (self.cursor.y as isize + dy).clamp(miny as isize, maxy as isize);
        self.cursor.x = new_x as usize;
        self.cursor.y = new_y as usize;
        self.cursor.set_wrap_next(false);
        self.mark_dirty(old_y, self.abs(self.cursor.y));
    }

    pub fn set_column(&mut self, col: usize) {
        self.cursor.x = col.min(self.cols.saturating_sub(1));
        self.cursor.set_wrap_next(false);
    }

    pub fn set_row(&mut self, row: usize) {
        let (miny, maxy) = self.clamp_y_bounds();
        let offset = if self.cursor.origin_mode() { self.scroll.top } else { 0 };
        let old_y = self.abs(self.cursor.y);
        self.cursor.y = (row + offset).clamp(miny, maxy);
        self.cursor.set_wrap_next(false);
        self.mark_dirty(old_y, self.abs(self.cursor.y));
    }

    pub fn cursor_next_line(&mut self, n: usize) {
        for _ in 0..n.max(1) {
            self.new_line(true);
        }
    }

    pub fn cursor_prev_line(&mut self, n: usize) {
        for _ in 0..n.max(1) {
            let old_y = self.abs(self.cursor.y);
            if self.cursor.y > 0 {
                self.cursor.y -= 1;
            }
            self.cursor.x = 0;
            self.cursor.set_wrap_next(false);
            self.mark_dirty(old_y, self.abs(self.cursor.y));
        }
    }

    /// *Clear region*: fill a rectangle with blank glyphs carrying `attr`
    /// (or `fill_char` if given). Coordinates/extents are clamped.
    pub fn clear_region(&mut self, x: usize, y: usize, w: usize, h: usize, attr: Attr, fill_char: Option<char>) {
        let x0 = x.min(self.cols);
        let x1 = (x + w).min(self.cols);
        let y0 = y.min(self.rows.saturating_sub(1));
        let y1 = (y + h).min(self.rows);
        for row in y0..y1 {
            let abs = self.abs(row);
            if let Some(line) = self.buffer.get_mut(abs) {
                if let Some(ch) = fill_char {
                    for col in x0..x1 {
                        line.set(col, Glyph::new(ch, attr));
                    }
                } else {
                    line.fill(x0, x1, attr);
                }
            }
        }
        if y1 > y0 {
            self.mark_dirty(self.abs(y0), self.abs(y1 - 1));
        }
    }

    pub fn erase_below(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(self.cursor.x, self.cursor.y, self.cols, 1, attr, None);
        if self.cursor.y + 1 < self.rows {
            self.clear_region(0, self.cursor.y + 1, self.cols, self.rows - self.cursor.y - 1, attr, None);
        }
    }

    pub fn erase_above(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(0, self.cursor.y, self.cursor.x + 1, 1, attr, None);
        if self.cursor.y > 0 {
            self.clear_region(0, 0, self.cols, self.cursor.y, attr, None);
        }
    }

    pub fn erase_all(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(0, 0, self.cols, self.rows, attr, None);
    }

    pub fn erase_right(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(self.cursor.x, self.cursor.y, self.cols, 1, attr, None);
    }

    pub fn erase_left(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(0, self.cursor.y, self.cursor.x + 1, 1, attr, None);
    }

    pub fn erase_line_all(&mut self) {
        let attr = self.cursor.attr;
        self.clear_region(0, self.cursor.y, self.cols, 1, attr, None);
    }

    pub fn insert_lines(&mut self, n: usize) {
        if !self.scroll.contains(self.cursor.y) {
            return;
        }
        let attr = self.cursor.attr;
        for _ in 0..n.max(1) {
            let bottom = self.abs(self.scroll.bottom);
            if bottom < self.buffer.len() {
                self.buffer.remove(bottom);
            }
            let at = self.abs(self.cursor.y);
            self.buffer.insert(at.min(self.buffer.len()), Line::blank(self.cols, attr));
        }
        self.mark_dirty(self.abs(self.cursor.y), self.abs(self.scroll.bottom));
    }

    pub fn delete_lines(&mut self, n: usize) {
        if !self.scroll.contains(self.cursor.y) {
            return;
        }
        let attr = self.cursor.attr;
        for _ in 0..n.max(1) {
            let at = self.abs(self.cursor.y);
            if at < self.buffer.len() {
                self.buffer.remove(at);
            }
            let bottom = self.abs(self.scroll.bottom);
            self.buffer.insert(bottom.min(self.buffer.len()), Line::blank(self.cols, attr));
        }
        self.mark_dirty(self.abs(self.cursor.y), self.abs(self.scroll.bottom));
    }

    pub fn insert_chars(&mut self, n: usize) {
        let attr = self.cursor.attr;
        let y = self.abs(self.cursor.y);
        if let Some(line) = self.buffer.get_mut(y) {
            for _ in 0..n.max(1) {
                line.insert_blank_at(self.cursor.x, attr);
            }
        }
        self.mark_dirty(y, y);
    }

    pub fn delete_chars(&mut self, n: usize) {
        let attr = self.cursor.attr;
        let y = self.abs(self.cursor.y);
        let cols = self.cols;
        if let Some(line) = self.buffer.get_mut(y) {
            let n = n.max(1).min(cols - self.cursor.x.min(cols));
            for _ in 0..n {
                for col in self.cursor.x..cols.saturating_sub(1) {
                    let next = line.get(col + 1).unwrap_or_else(|| Glyph::blank(attr));
                    line.set(col, next);
                }
                line.set(cols.saturating_sub(1), Glyph::blank(attr));
            }
        }
        self.mark_dirty(y, y);
    }

    pub fn erase_chars(&mut self, n: usize) {
        let attr = self.cursor.attr;
        self.clear_region(self.cursor.x, self.cursor.y, n.max(1), 1, attr, None);
    }

    /// Snapshot `{x, y, attr, flags}` into the saved-cursor slot
    /// (`DECSC`/`CSI s`/DECSET 1048).
    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some(self.cursor);
    }

    /// Replace the cursor with the last snapshot taken by
    /// [`Self::save_cursor`], then re-clamp via `move_to`
    /// (`DECRC`/`CSI u`/DECRST 1048). A no-op if nothing was ever saved.
    pub fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved_cursor {
            self.cursor = saved;
            let x = self.cursor.x;
            let y = self.cursor.y;
            self.move_to(Some(x), Some(y));
        }
    }

    pub fn set_scroll_region(&mut self, top: Option<usize>, bottom: Option<usize>) {
        let top = top.unwrap_or(0).min(self.rows.saturating_sub(1));
        let bottom = bottom.unwrap_or(self.rows.saturating_sub(1)).min(self.rows.saturating_sub(1));
        self.scroll = if top < bottom {
            ScrollRegion { top, bottom }
        } else {
            ScrollRegion::full(self.rows)
        };
        self.move_to(Some(0), Some(0));
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_cursor_style(&mut self, style: CursorVisualStyle) {
        self.cursor_style = style;
    }

    pub fn set_clipboard(&mut self, data: Vec<u8>) {
        self.clipboard = data;
    }

    pub fn set_mode(&mut self, flag: Mode, enabled: bool) {
        self.mode.set(flag, enabled);
    }

    pub fn set_origin_mode(&mut self, enabled: bool) {
        self.cursor.set_origin_mode(enabled);
        self.move_to(Some(0), Some(0));
    }

    /// `DECALN`: fill the whole screen with `'E'`.
    pub fn screen_alignment_test(&mut self) {
        let attr = self.cursor.attr;
        for row in 0..self.rows {
            let abs = self.abs(row);
            if let Some(line) = self.buffer.get_mut(abs) {
                for col in 0..self.cols {
                    line.set(col, Glyph::new('E', attr));
                }
            }
        }
        self.mark_dirty(self.abs(0), self.abs(self.rows.saturating_sub(1)));
    }

    pub fn tab_forward(&mut self) {
        self.cursor.x = self.tabs.next_stop(self.cursor.x).min(self.cols);
    }

    pub fn tab_backward(&mut self, n: usize) {
        for _ in 0..n.max(1) {
            self.cursor.x = self.tabs.prev_stop(self.cursor.x);
        }
    }

    pub fn tab_set(&mut self) {
        self.tabs.set(self.cursor.x);
    }

    pub fn tab_clear_here(&mut self) {
        self.tabs.clear(self.cursor.x);
    }

    pub fn tab_clear_all(&mut self) {
        self.tabs.clear_all();
    }

    /// *Alternate screen*: snapshot, emit `alternate(true)`, hard-reset,
    /// then set `ALTSCREEN`; disabling restores the snapshot verbatim,
    /// clears `ALTSCREEN`, and discards pending dirty range.
    pub fn set_alternate_mode(&mut self, enabled: bool) -> Notification {
        if enabled {
            self.saved_primary = Some(SavedPrimary {
                mode: self.mode,
                buffer: std::mem::replace(&mut self.buffer, vec![Line::blank(self.cols, Attr::default()); self.rows]),
                base: self.base,
                cursor: self.cursor,
                scroll: self.scroll,
                tabs: self.tabs.clone(),
            });
            self.base = 0;
            self.cursor = CursorState::new();
            self.scroll = ScrollRegion::full(self.rows);
            self.tabs = TabStops::new(self.cols);
            self.mode.insert(Mode::ALTSCREEN);
            self.dirty = None;
        } else if let Some(saved) = self.saved_primary.take() {
            self.mode = saved.mode;
            self.buffer = saved.buffer;
            self.base = saved.base;
            self.cursor = saved.cursor;
            self.scroll = saved.scroll;
            self.tabs = saved.tabs;
            self.mode.remove(Mode::ALTSCREEN);
            self.dirty = None;
        }
        Notification::Alternate(enabled)
    }

    /// *Resize*: pad/truncate each line, extend/truncate the row vector,
    /// reset tabs and the scroll region, clamp the cursor, and extend the
    /// dirty range over any rows the old geometry exposed but the new
    /// one does not.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let attr = self.cursor.attr;
        for line in &mut self.buffer {
            line.resize(cols, attr);
        }
        let old_visible_end = self.base + self.rows;
        let target_len = self.base + rows;
        if self.buffer.len() > target_len {
            self.buffer.truncate(target_len);
        } else {
            while self.buffer.len() < target_len {
                self.buffer.push(Line::blank(cols, attr));
            }
        }
        let had_dirty = self.dirty.is_some();
        self.cols = cols;
        self.rows = rows;
        self.tabs = TabStops::new(cols);
        self.scroll = ScrollRegion::full(rows);
        self.cursor.x = self.cursor.x.min(cols);
        self.cursor.y = self.cursor.y.min(rows.saturating_sub(1));
        if had_dirty {
            let new_visible_end = self.base + self.rows;
            self.mark_dirty(self.base, old_visible_end.max(new_visible_end).saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_advances_cursor_and_marks_dirty() {
        let mut screen = Screen::new(40, 24);
        screen.print("test");
        assert_eq!(screen.cursor().x, 4);
        assert_eq!(screen.cursor().y, 0);
        let refresh = screen.take_refresh().expect("dirty after print");
        match refresh {
            Notification::Refresh { dirty, .. } => assert_eq!(dirty, (0, 0)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn print_wraps_at_right_edge() {
        let mut screen = Screen::new(40, 24);
        screen.print(&"E".repeat(50));
        assert_eq!(screen.cursor().x, 10);
        assert_eq!(screen.cursor().y, 1);
        assert!(!screen.cursor().wrap_next());
        assert_eq!(screen.line(0).unwrap().get(39).unwrap().ch, 'E');
        assert_eq!(screen.line(1).unwrap().get(0).unwrap().ch, 'E');
        assert_eq!(screen.line(1).unwrap().get(10).unwrap().ch, ' ');
    }

    #[test]
    fn new_line_scrolls_at_region_bottom() {
        let mut screen = Screen::new(10, 3);
        screen.print("a");
        screen.new_line(true);
        screen.print("b");
        screen.new_line(true);
        screen.print("c");
        screen.new_line(true);
        screen.print("d");
        assert_eq!(screen.base(), 1);
        assert_eq!(screen.line(1).unwrap().get(0).unwrap().ch, 'b');
        assert_eq!(screen.line(3).unwrap().get(0).unwrap().ch, 'd');
    }

    #[test]
    fn alternate_screen_round_trips_state() {
        let mut screen = Screen::new(40, 24);
        screen.print("A");
        let saved_cursor = screen.cursor();
        screen.set_alternate_mode(true);
        assert!(screen.mode().contains(Mode::ALTSCREEN));
        screen.print("B");
        screen.set_alternate_mode(false);
        assert!(!screen.mode().contains(Mode::ALTSCREEN));
        assert_eq!(screen.cursor(), saved_cursor);
        assert_eq!(screen.line(0).unwrap().get(0).unwrap().ch, 'A');
    }

    #[test]
    fn save_and_restore_cursor_round_trips_position() {
        let mut screen = Screen::new(40, 24);
        screen.move_to(Some(5), Some(3));
        screen.save_cursor();
        screen.move_to(Some(20), Some(10));
        screen.restore_cursor();
        assert_eq!((screen.cursor().x, screen.cursor().y), (5, 3));
    }

    #[test]
    fn restore_cursor_without_a_prior_save_is_a_no_op() {
        let mut screen = Screen::new(40, 24);
        screen.move_to(Some(5), Some(3));
        screen.restore_cursor();
        assert_eq!((screen.cursor().x, screen.cursor().y), (5, 3));
    }

    #[test]
    fn resize_pads_lines_and_clamps_cursor() {
        let mut screen = Screen::new(10, 5);
        screen.move_to(Some(9), Some(4));
        screen.resize(5, 3);
        assert_eq!(screen.cols(), 5);
        assert_eq!(screen.rows(), 3);
        assert!(screen.cursor().x <= 5);
        assert!(screen.cursor().y < 3);
    }

    #[test]
    fn origin_mode_clamps_moves_to_scroll_region() {
        let mut screen = Screen::new(10, 10);
        screen.set_scroll_region(Some(2), Some(5));
        screen.set_origin_mode(true);
        screen.move_to(Some(0), Some(0));
        assert_eq!(screen.cursor().y, 2);
        screen.move_to(Some(0), Some(10));
        assert_eq!(screen.cursor().y, 5);
    }

    #[test]
    fn insert_and_delete_chars() {
        let mut screen = Screen::new(5, 1);
        screen.print("abcde");
        screen.move_to(Some(1), Some(0));
        screen.delete_chars(1);
        assert_eq!(screen.line(0).unwrap().get(1).unwrap().ch, 'c');
        screen.insert_chars(1);
        assert_eq!(screen.line(0).unwrap().get(1).unwrap().ch, ' ');
    }
}
