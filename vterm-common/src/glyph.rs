// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The packed glyph attribute word and the `Glyph` it decorates.
//!
//! `attr` is the canonical on-wire representation: bits 0-8 are the
//! background color index, bits 9-17 the foreground color index, bits
//! 18-31 an attribute bitmask. Named accessors live here rather than
//! scattering bit-twiddling across call sites.

use bitflags::bitflags;

/// Color index denoting "use the default background".
pub const DEFAULT_BG: u16 = 256;
/// Color index denoting "use the default foreground".
pub const DEFAULT_FG: u16 = 257;

const BG_MASK: u32 = 0x1FF;
const FG_SHIFT: u32 = 9;
const FG_MASK: u32 = 0x1FF << FG_SHIFT;
const ATTR_SHIFT: u32 = 18;

bitflags! {
    /// The attribute bitmask occupying bits 18-31 of a packed glyph attr word.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
    pub struct AttrFlags: u16 {
        const NULL      = 0;
        const REVERSE   = 1;
        const UNDERLINE = 2;
        const BOLD      = 4;
        const GFX       = 8;
        const ITALIC    = 16;
        const BLINK     = 32;
    }
}

/// A packed 32-bit glyph attribute word: `bg(9) | fg(9) | attrs(14)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Attr(u32);

impl Attr {
    #[must_use]
    pub const fn new(bg: u16, fg: u16, flags: AttrFlags) -> Self {
        Self((bg as u32 & BG_MASK) | ((fg as u32) << FG_SHIFT & FG_MASK) | ((flags.bits() as u32) << ATTR_SHIFT))
    }

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn bg(self) -> u16 {
        (self.0 & BG_MASK) as u16
    }

    #[must_use]
    pub const fn fg(self) -> u16 {
        ((self.0 & FG_MASK) >> FG_SHIFT) as u16
    }

    #[must_use]
    pub fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_truncate((self.0 >> ATTR_SHIFT) as u16)
    }

    #[must_use]
    pub const fn with_bg(self, bg: u16) -> Self {
        Self((self.0 & !BG_MASK) | (bg as u32 & BG_MASK))
    }

    #[must_use]
    pub const fn with_fg(self, fg: u16) -> Self {
        Self((self.0 & !FG_MASK) | ((fg as u32) << FG_SHIFT & FG_MASK))
    }

    #[must_use]
    pub fn with_flags(self, flags: AttrFlags) -> Self {
        Self((self.0 & (BG_MASK | FG_MASK)) | ((flags.bits() as u32) << ATTR_SHIFT))
    }

    #[must_use]
    pub fn with_flag(self, flag: AttrFlags, set: bool) -> Self {
        let mut flags = self.flags();
        flags.set(flag, set);
        self.with_flags(flags)
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::new(DEFAULT_BG, DEFAULT_FG, AttrFlags::NULL)
    }
}

/// A single display cell: a translated code point plus its packed attr word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    pub attr: Attr,
    pub ch: char,
}

impl Glyph {
    #[must_use]
    pub const fn new(ch: char, attr: Attr) -> Self {
        Self { attr, ch }
    }

    #[must_use]
    pub fn blank(attr: Attr) -> Self {
        Self { attr, ch: ' ' }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::blank(Attr::default())
    }
}
