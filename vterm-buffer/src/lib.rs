// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)] // Allow multiple versions from transitive dependencies
#![allow(clippy::cargo_common_metadata)] // Metadata is inherited from workspace

//! The screen model: a grid of styled glyphs plus cursor, modes, scroll
//! region, tab stops, and an alternate-screen save slot. Consumes the
//! semantic events `vterm-core`'s parser produces, mutates grid state,
//! tracks dirty rows, and emits refresh/title/alternate/resize
//! notifications.

pub mod cursor;
pub mod handler;
pub mod line;
pub mod notify;
pub mod scroll;
pub mod screen;
pub mod tabs;
