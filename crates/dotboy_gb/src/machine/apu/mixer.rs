use std::collections::VecDeque;

use crate::CPU_CLOCK_HZ;

/// Counter-driven downsampler feeding a bounded queue of interleaved
/// stereo samples.
pub(super) struct Resampler {
    sample_rate: u32,
    acc: u32,
    capacity: usize,
    queue: VecDeque<i16>,
}

impl Resampler {
    /// `capacity` counts i16 samples; it is rounded down to whole pairs.
    pub(super) fn new(sample_rate: u32, capacity: usize) -> Self {
        let capacity = (capacity & !1).max(2);
        Self {
            sample_rate,
            acc: 0,
            capacity,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    /// Advance the sample clock by `cycles` ticks. Returns how many stereo
    /// frames are due.
    pub(super) fn advance(&mut self, cycles: u32) -> u32 {
        self.acc += self.sample_rate * cycles;
        let due = self.acc / CPU_CLOCK_HZ;
        self.acc %= CPU_CLOCK_HZ;
        due
    }

    pub(super) fn push(&mut self, left: i16, right: i16) {
        if self.queue.len() + 2 > self.capacity {
            self.queue.drain(..2);
        }
        self.queue.push_back(left);
        self.queue.push_back(right);
    }

    pub(super) fn len(&self) -> usize {
        self.queue.len()
    }

    /// Copy out as many whole pairs as fit into `out`; returns samples written.
    pub(super) fn drain(&mut self, out: &mut [i16]) -> usize {
        let count = self.queue.len().min(out.len() & !1);
        for (slot, sample) in out.iter_mut().zip(self.queue.drain(..count)) {
            *slot = sample;
        }
        count
    }
}

/// Mix one side. `outputs` are the channel DAC inputs (0..=15), `None` when
/// the channel is stopped or its DAC is off.
pub(super) fn mix_side(outputs: [Option<u8>; 4], routing: u8, master: u8) -> i16 {
    let sum: i32 = outputs
        .iter()
        .enumerate()
        .filter(|(i, _)| routing & (1 << i) != 0)
        .filter_map(|(_, out)| out.map(|v| v as i32 * 2 - 15))
        .sum();
    (sum * (master as i32 + 1) * 64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_yields_sample_rate_frames() {
        let mut r = Resampler::new(44_100, 1 << 20);
        let mut frames = 0;
        for _ in 0..CPU_CLOCK_HZ / 4 {
            frames += r.advance(4);
        }
        assert_eq!(frames, 44_100);
    }

    #[test]
    fn overflow_drops_oldest_pair() {
        let mut r = Resampler::new(44_100, 4);
        r.push(1, -1);
        r.push(2, -2);
        r.push(3, -3);
        let mut out = [0i16; 8];
        assert_eq!(r.drain(&mut out), 4);
        assert_eq!(&out[..4], &[2, -2, 3, -3]);
    }

    #[test]
    fn drain_copies_whole_pairs_only() {
        let mut r = Resampler::new(44_100, 16);
        r.push(5, 6);
        r.push(7, 8);
        let mut out = [0i16; 3];
        assert_eq!(r.drain(&mut out), 2);
        assert_eq!(out, [5, 6, 0]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn mix_skips_unrouted_and_dac_off() {
        let outputs = [Some(15), Some(0), None, Some(15)];
        // ch1 + ch2 routed: 15 + -15 = 0
        assert_eq!(mix_side(outputs, 0b0011, 7), 0);
        // ch1 only at max volume
        assert_eq!(mix_side(outputs, 0b0001, 7), 15 * 8 * 64);
        // DAC off contributes nothing
        assert_eq!(mix_side(outputs, 0b0100, 7), 0);
    }
}
