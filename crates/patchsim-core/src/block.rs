//! The per-step stereo audio buffer.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A reusable dual-channel float buffer holding one render block.
///
/// Capacity is fixed at construction; the logical [`len`](AudioBlock::len)
/// may be set smaller for the final, partial block of a run. The channel
/// accessors only ever expose the first `len` samples, so a shorter block
/// can never leak stale data from a longer predecessor — provided the host
/// calls [`clear`](AudioBlock::clear) before handing the block to a patch.
pub struct AudioBlock {
    left: Vec<f32>,
    right: Vec<f32>,
    len: usize,
}

impl AudioBlock {
    /// Creates a zeroed block with the given capacity, initially full-length.
    pub fn new(capacity: usize) -> Self {
        Self {
            left: vec![0.0; capacity],
            right: vec![0.0; capacity],
            len: capacity,
        }
    }

    /// The fixed allocation size of each channel.
    pub fn capacity(&self) -> usize {
        self.left.len()
    }

    /// The logical length of the current block.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the current block holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the logical length for the next render step.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) {
        assert!(
            len <= self.capacity(),
            "block length {len} exceeds capacity {}",
            self.capacity()
        );
        self.len = len;
    }

    /// Fills both channels with zeros over the full capacity.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }

    /// The left channel, bounded by the logical length.
    pub fn left(&self) -> &[f32] {
        &self.left[..self.len]
    }

    /// The right channel, bounded by the logical length.
    pub fn right(&self) -> &[f32] {
        &self.right[..self.len]
    }

    /// Mutable left channel, bounded by the logical length.
    pub fn left_mut(&mut self) -> &mut [f32] {
        &mut self.left[..self.len]
    }

    /// Mutable right channel, bounded by the logical length.
    pub fn right_mut(&mut self) -> &mut [f32] {
        &mut self.right[..self.len]
    }

    /// Both channels mutably at once, for patches that write them together.
    pub fn channels_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.left[..self.len], &mut self.right[..self.len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_zeroed_and_full_length() {
        let block = AudioBlock::new(16);
        assert_eq!(block.capacity(), 16);
        assert_eq!(block.len(), 16);
        assert!(block.left().iter().all(|&s| s == 0.0));
        assert!(block.right().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn clear_erases_previous_contents() {
        let mut block = AudioBlock::new(8);
        block.left_mut().fill(1.0);
        block.right_mut().fill(-1.0);
        block.clear();
        assert!(block.left().iter().all(|&s| s == 0.0));
        assert!(block.right().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn partial_length_bounds_channel_views() {
        let mut block = AudioBlock::new(8);
        block.set_len(3);
        assert_eq!(block.len(), 3);
        assert_eq!(block.left().len(), 3);
        assert_eq!(block.right_mut().len(), 3);
        let (l, r) = block.channels_mut();
        assert_eq!(l.len(), 3);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn shrink_then_clear_leaves_no_stale_tail() {
        let mut block = AudioBlock::new(8);
        block.left_mut().fill(0.5);
        block.set_len(4);
        block.clear();
        block.set_len(8);
        assert!(block.left().iter().all(|&s| s == 0.0));
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn set_len_beyond_capacity_panics() {
        let mut block = AudioBlock::new(4);
        block.set_len(5);
    }
}
