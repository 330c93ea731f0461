// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The semantic event vocabulary emitted by the VT parser and consumed
//! by the screen model. Living in this shared, dependency-free crate
//! lets the parser (which produces events) and the screen model (which
//! consumes them) stay decoupled from one another.

use crate::charmap::CharsetId;
use crate::cursor::CursorVisualStyle;
use crate::mode::{AnsiMode, DecPrivateMode};
use crate::sgr::SelectGraphicRendition;

/// Which `G0..G3` slot a character-set designation targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CharsetSlot {
    G0,
    G1,
    G2,
    G3,
}

/// `SO`/`SI`/`LSn`/`LSnR` locking-shift targets for `GL`/`GR`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockingShift {
    /// `SI` (`0x0F`): `GL := G0`.
    ShiftInG0,
    /// `SO` (`0x0E`): `GL := G1`.
    ShiftOutG1,
    /// `ESC n`: `GL := G2`.
    Ls2,
    /// `ESC o`: `GL := G3`.
    Ls3,
    /// `ESC ~`: `GR := G1`.
    Ls1R,
    /// `ESC }`: `GR := G2`.
    Ls2R,
    /// `ESC |`: `GR := G3`.
    Ls3R,
}

/// Cursor-relative motion direction for `CUU`/`CUD`/`CUF`/`CUB`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Forward,
    Back,
}

/// `ED` (Erase in Display) variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EraseDisplay {
    Below,
    Above,
    All,
    /// `ED(3)`, "erase saved lines" — treated as a full clear.
    SavedLines,
}

/// `EL` (Erase in Line) variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EraseLine {
    Right,
    Left,
    All,
}

/// `TBC` (Tab Clear) variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TabClear {
    ThisColumn,
    All,
}

/// A Device Status Report family recognized by `CSI n` / `CSI ? n`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeviceStatusReport {
    /// `5` — operating status; always reports "OK".
    OperatingStatus,
    /// `6` — cursor position report; the reply is computed from live state.
    CursorPosition,
    /// `15` — printer status.
    Printer,
    /// `25` — UDK (user-defined keys) status.
    Udk,
    /// `26` — keyboard language status.
    Keyboard,
    /// `53` — locking-shift status.
    LockingShift,
}

/// One semantic event produced by the VT parser and consumed by the
/// screen model. Mirrors `spec.md` 4.C's CC1/ESC/CSI/OSC dispatch tables.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Plain text, already translated through the active `GL`/`GR` maps.
    Print(String),
    Bell,
    Backspace,
    ForwardTabStop,
    BackTab(u16),
    /// `LF`/`VT`/`FF`: move down one row, scrolling if at the scroll
    /// region's bottom. Does not itself return the cursor to column 0.
    LineFeed,
    CarriageReturn,
    /// `IND` (`ESC D`): like `LineFeed` but never carries an implicit CR.
    Index,
    /// `NEL` (`ESC E`): `Index` + `CarriageReturn`.
    NextLine,
    /// `RI` (`ESC M`): move up one row, reverse-scrolling if at the top.
    ReverseIndex,
    /// `HTS` (`ESC H`): set a tab stop at the current column.
    HorizontalTabSet,
    SaveCursor,
    RestoreCursor,
    ApplicationKeypad(bool),
    DesignateCharset { slot: CharsetSlot, charset: CharsetId },
    LockingShift(LockingShift),
    /// `DECALN` (`ESC # 8`): fill the screen with `E`.
    ScreenAlignmentTest,
    /// Parsed-but-no-op members of the teacher's `ESC #`/`ESC SP` families:
    /// double-width/height line markers and 7-bit/8-bit/conformance-level
    /// controls. Kept distinct from `Unknown` because they are recognized,
    /// well-formed sequences, not garbage.
    NoOp,
    /// `RIS` (`ESC c`): hard reset.
    FullReset,
    CursorPosition { row: Option<u16>, col: Option<u16> },
    CursorMove { dir: Direction, n: u16 },
    CursorNextLine(u16),
    CursorPrevLine(u16),
    CursorColumn(u16),
    CursorRow(u16),
    EraseDisplay(EraseDisplay),
    EraseLine(EraseLine),
    InsertLines(u16),
    DeleteLines(u16),
    InsertChars(u16),
    DeleteChars(u16),
    EraseChars(u16),
    ScrollUp(u16),
    ScrollDown(u16),
    SetAnsiMode { mode: AnsiMode, enabled: bool },
    SetDecPrivateMode { mode: DecPrivateMode, enabled: bool },
    /// `DECRQM` (`CSI Ps $ p`): report whether a mode is set.
    RequestMode { ansi: bool, code: u16 },
    Sgr(Vec<SelectGraphicRendition>),
    SetScrollRegion { top: Option<u16>, bottom: Option<u16> },
    TabClear(TabClear),
    WindowTitle(String),
    /// `OSC 52`: `query == true` requests a read-back; otherwise `data`
    /// carries the already base64-decoded payload to store.
    Clipboard { query: bool, data: Option<Vec<u8>> },
    RequestPrimaryDeviceAttributes,
    RequestSecondaryDeviceAttributes,
    /// `DECID` (`ESC Z`), which replies identically to primary DA.
    RequestDeviceId,
    DeviceStatusReport(DeviceStatusReport),
    /// `DECSTR`: soft reset.
    SoftReset,
    CursorStyle(CursorVisualStyle),
    RequestXtVersion,
    /// Raw reply bytes destined for the pty (DA/DSR/CPR/DECRQM/XTVERSION).
    Write(Vec<u8>),
    /// Recognized code outside the supported subset; logged when the
    /// host's `warn` config flag is set, otherwise ignored. Never aborts
    /// the stream.
    Unknown,
}
