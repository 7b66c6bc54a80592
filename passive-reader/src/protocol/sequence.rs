// passive-reader/src/protocol/sequence.rs

/// 8-bit frame sequence counter.
///
/// Every `$:`/`Z:` frame built takes the current value and advances the
/// counter modulo 256. An answer is correlated with the last frame sent
/// when it carries `counter - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceCounter(u8);

impl SequenceCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Value the next frame will carry.
    pub fn peek(&self) -> u8 {
        self.0
    }

    /// Take the value for a new frame and advance.
    pub fn next(&mut self) -> u8 {
        let current = self.0;
        self.0 = self.0.wrapping_add(1);
        current
    }

    /// Sequence an answer to the last frame sent must carry.
    pub fn expected_answer(&self) -> u8 {
        self.0.wrapping_sub(1)
    }

    pub fn matches(&self, sequence: u8) -> bool {
        sequence == self.expected_answer()
    }
}
