//! Audio processing unit.
//!
//! Two pulse channels (the first with a frequency sweep), a wave channel and
//! an LFSR noise channel, clocked per machine cycle. A 512 Hz frame sequencer
//! drives length counters, sweep and envelopes. The mixed output is
//! downsampled by a counter (no filtering) into a bounded queue of
//! interleaved stereo `i16` samples.

mod mixer;
mod noise;
mod registers;
mod square;
mod units;
mod wave;

use mixer::{mix_side, Resampler};
use noise::Noise;
use square::Square;
use wave::Wave;

/// Ticks between frame sequencer steps (4 194 304 / 512).
const SEQUENCER_PERIOD: u32 = 8192;

pub(crate) struct Apu {
    powered: bool,
    ch1: Square,
    ch2: Square,
    ch3: Wave,
    ch4: Noise,
    nr50: u8,
    nr51: u8,
    sequencer_counter: u32,
    sequencer_step: u8,
    resampler: Resampler,
    pub(crate) render_enabled: bool,
}

impl Apu {
    pub(crate) fn new(sample_rate: u32, capacity: usize) -> Self {
        Self {
            powered: false,
            ch1: Square::new(true),
            ch2: Square::new(false),
            ch3: Wave::default(),
            ch4: Noise::default(),
            nr50: 0,
            nr51: 0,
            sequencer_counter: 0,
            sequencer_step: 0,
            resampler: Resampler::new(sample_rate, capacity),
            render_enabled: true,
        }
    }

    /// Register state the boot ROM leaves behind.
    pub(crate) fn apply_post_boot_state(&mut self) {
        self.powered = true;
        self.nr50 = 0x77;
        self.nr51 = 0xF3;
        self.ch1.apply_post_boot_state();
    }

    pub(crate) fn tick(&mut self, cycles: u32) {
        let mut remaining = cycles;
        while remaining > 0 {
            let step = remaining.min(4);
            remaining -= step;
            self.tick_mcycle(step);
        }
    }

    fn tick_mcycle(&mut self, cycles: u32) {
        if self.powered {
            self.ch1.tick(cycles);
            self.ch2.tick(cycles);
            self.ch3.tick(cycles);
            self.ch4.tick(cycles);

            self.sequencer_counter += cycles;
            if self.sequencer_counter >= SEQUENCER_PERIOD {
                self.sequencer_counter -= SEQUENCER_PERIOD;
                self.clock_sequencer();
            }
        }

        let due = self.resampler.advance(cycles);
        if !self.render_enabled {
            return;
        }
        for _ in 0..due {
            let (left, right) = self.mix();
            self.resampler.push(left, right);
        }
    }

    fn clock_sequencer(&mut self) {
        let step = self.sequencer_step;
        self.sequencer_step = (step + 1) & 0x07;

        if step % 2 == 0 {
            self.ch1.clock_length();
            self.ch2.clock_length();
            self.ch3.clock_length();
            self.ch4.clock_length();
        }
        if step == 2 || step == 6 {
            self.ch1.clock_sweep();
        }
        if step == 7 {
            self.ch1.envelope.clock();
            self.ch2.envelope.clock();
            self.ch4.envelope.clock();
        }
    }

    fn mix(&self) -> (i16, i16) {
        if !self.powered {
            return (0, 0);
        }
        // A stopped channel drops out of the mix instead of holding its
        // DAC at the bottom rail.
        let outputs = [
            (self.ch1.enabled && self.ch1.dac_enabled()).then(|| self.ch1.output()),
            (self.ch2.enabled && self.ch2.dac_enabled()).then(|| self.ch2.output()),
            (self.ch3.enabled && self.ch3.dac_enabled()).then(|| self.ch3.output()),
            (self.ch4.enabled && self.ch4.dac_enabled()).then(|| self.ch4.output()),
        ];
        let left = mix_side(outputs, self.nr51 >> 4, (self.nr50 >> 4) & 0x07);
        let right = mix_side(outputs, self.nr51 & 0x0F, self.nr50 & 0x07);
        (left, right)
    }

    /// Samples currently queued.
    pub(crate) fn queued(&self) -> usize {
        self.resampler.len()
    }

    pub(crate) fn drain(&mut self, out: &mut [i16]) -> usize {
        self.resampler.drain(out)
    }

    /// NR52 status bits for channels 1-4.
    fn channel_status(&self) -> u8 {
        (self.ch1.enabled as u8)
            | (self.ch2.enabled as u8) << 1
            | (self.ch3.enabled as u8) << 2
            | (self.ch4.enabled as u8) << 3
    }
}
