/// Scripted port I/O for host tests.
///
/// Records every port write and tracks the divisor latch so bytes written
/// to DATA while DLAB is set (the divisor) are not mistaken for output.
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use super::port::PortIo;
use super::{reg, LineStatus, DLAB};

pub struct MockPort {
    base: u16,
    dlab: bool,
    busy_polls: usize,
    line_status_reads: usize,
    writes: Vec<(u16, u8)>,
    tx: Vec<u8>,
    rx: VecDeque<u8>,
}

impl MockPort {
    pub fn new(base: u16) -> Self {
        Self {
            base,
            dlab: false,
            busy_polls: 0,
            line_status_reads: 0,
            writes: Vec::new(),
            tx: Vec::new(),
            rx: VecDeque::new(),
        }
    }

    /// Report the transmitter busy for the next `n` line status reads.
    pub fn with_busy_polls(mut self, n: usize) -> Self {
        self.busy_polls = n;
        self
    }

    /// Bytes waiting to be received.
    pub fn with_input(mut self, bytes: &[u8]) -> Self {
        self.rx.extend(bytes.iter().copied());
        self
    }

    /// Every (port, value) written, in order.
    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    /// Bytes that went out on the wire.
    pub fn transmitted(&self) -> &[u8] {
        &self.tx
    }

    /// Transmitted bytes as text (for test assertions).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.tx).into_owned()
    }

    pub fn line_status_reads(&self) -> usize {
        self.line_status_reads
    }
}

impl PortIo for MockPort {
    fn write(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
        if port == self.base + reg::LINE_CONTROL {
            self.dlab = value & DLAB != 0;
        } else if port == self.base + reg::DATA && !self.dlab {
            self.tx.push(value);
        }
    }

    fn read(&mut self, port: u16) -> u8 {
        if port == self.base + reg::LINE_STATUS {
            self.line_status_reads += 1;
            let mut status = LineStatus::empty();
            if !self.rx.is_empty() {
                status |= LineStatus::DATA_READY;
            }
            if self.busy_polls > 0 {
                self.busy_polls -= 1;
            } else {
                status |= LineStatus::THR_EMPTY | LineStatus::TRANSMITTER_EMPTY;
            }
            status.bits()
        } else if port == self.base + reg::DATA && !self.dlab {
            self.rx.pop_front().unwrap_or(0)
        } else {
            0
        }
    }
}
