// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pty writeback side of the bidirectional byte channel.
//!
//! The core never owns or spawns a pty: it is handed something that can
//! accept outbound bytes (device attribute replies, cursor position
//! reports) and treats it as opaque. `crossbeam-channel` is the teacher's
//! choice for the pty write side; [`Sender<Vec<u8>>`] is provided as the
//! obvious concrete implementation, but any type implementing
//! [`PtyWriter`] will do.

use crossbeam_channel::Sender;

/// A sink for outbound pty bytes.
pub trait PtyWriter {
    /// Write `bytes` back to the pty. Implementations that can fail
    /// (a closed channel, a dead process) should log and drop the bytes
    /// rather than propagate: the core has no asynchronous failure path.
    fn write(&mut self, bytes: &[u8]);
}

impl PtyWriter for Sender<Vec<u8>> {
    fn write(&mut self, bytes: &[u8]) {
        if self.send(bytes.to_vec()).is_err() {
            warn!("pty writeback channel closed; dropping {} reply bytes", bytes.len());
        }
    }
}

/// A writer that discards everything. Useful for tests and for hosts
/// that only read the model and never need replies delivered anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPtyWriter;

impl PtyWriter for NullPtyWriter {
    fn write(&mut self, _bytes: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_writer_accepts_and_discards() {
        let mut writer = NullPtyWriter;
        writer.write(b"\x1b[?1;2c");
    }

    #[test]
    fn channel_writer_forwards_bytes() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut writer = tx;
        writer.write(b"hello");
        assert_eq!(rx.try_recv().unwrap(), b"hello".to_vec());
    }
}
