// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parser/screen configuration.
//!
//! Unlike the host application this crate was ported out of, there is no
//! file-loading layer here: file discovery, layered overrides, and
//! `FREMINAL_CONFIG`-style env overrides are a GUI-host concern. The host
//! builds a [`ParserConfig`] however it likes (a literal, a `toml` file it
//! parses itself, whatever) and passes it into the facade's constructor.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------------------------
///  Parser configuration
/// ---------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Whether `DECSET 3` (132-column mode) is allowed to resize the screen.
    pub allow_width_change: bool,
    /// Time budget, in milliseconds, for an OSC/DCS/APC/PM string sequence
    /// to see its terminator before it is silently aborted.
    pub osc_time_limit_ms: u64,
    /// Maximum accumulated byte length of an OSC/DCS/APC/PM string sequence
    /// before it is silently aborted.
    pub max_string_sequence: usize,
    /// Log unrecognized control/CSI/OSC codes at `warn` level.
    pub warn: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_width_change: true,
            osc_time_limit_ms: 2000,
            max_string_sequence: 1024,
            warn: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = ParserConfig::default();
        assert!(cfg.allow_width_change);
        assert_eq!(cfg.osc_time_limit_ms, 2000);
        assert_eq!(cfg.max_string_sequence, 1024);
        assert!(cfg.warn);
    }

    #[test]
    fn clone_preserves_overridden_fields() {
        let mut cfg = ParserConfig::default();
        cfg.warn = false;
        cfg.max_string_sequence = 256;
        let cloned = cfg.clone();
        assert!(!cloned.warn);
        assert_eq!(cloned.max_string_sequence, 256);
        assert!(cloned.allow_width_change);
    }
}
