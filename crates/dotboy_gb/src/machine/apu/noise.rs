use super::units::{Envelope, LengthCounter};

const DIVISORS: [u32; 8] = [8, 16, 32, 48, 64, 80, 96, 112];

/// Channel 4: LFSR noise, 15-bit or 7-bit.
pub(super) struct Noise {
    pub(super) enabled: bool,
    clock_shift: u8,
    width7: bool,
    divisor_code: u8,
    timer: u32,
    lfsr: u16,
    pub(super) length: LengthCounter,
    pub(super) envelope: Envelope,
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            enabled: false,
            clock_shift: 0,
            width7: false,
            divisor_code: 0,
            timer: 0,
            lfsr: 0x7FFF,
            length: LengthCounter::new(64),
            envelope: Envelope::default(),
        }
    }
}

impl Noise {
    fn period(&self) -> u32 {
        DIVISORS[self.divisor_code as usize] << self.clock_shift
    }

    fn step_lfsr(&mut self) {
        let feedback = (self.lfsr ^ (self.lfsr >> 1)) & 0x01;
        self.lfsr = (self.lfsr >> 1) | (feedback << 14);
        if self.width7 {
            self.lfsr = (self.lfsr & !0x40) | (feedback << 6);
        }
    }

    pub(super) fn tick(&mut self, mut cycles: u32) {
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            self.step_lfsr();
        }
        self.timer -= cycles;
    }

    pub(super) fn output(&self) -> u8 {
        if !self.enabled || self.lfsr & 0x01 != 0 {
            return 0;
        }
        self.envelope.volume()
    }

    pub(super) fn dac_enabled(&self) -> bool {
        self.envelope.dac_enabled()
    }

    pub(super) fn clock_length(&mut self) {
        if self.length.clock() {
            self.enabled = false;
        }
    }

    pub(super) fn write_nr41(&mut self, value: u8) {
        self.length.load(value & 0x3F);
    }

    pub(super) fn write_nr42(&mut self, value: u8) {
        self.envelope.write(value);
        if !self.dac_enabled() {
            self.enabled = false;
        }
    }

    pub(super) fn read_nr43(&self) -> u8 {
        (self.clock_shift << 4) | (if self.width7 { 0x08 } else { 0 }) | self.divisor_code
    }

    pub(super) fn write_nr43(&mut self, value: u8) {
        self.clock_shift = value >> 4;
        self.width7 = value & 0x08 != 0;
        self.divisor_code = value & 0x07;
    }

    pub(super) fn read_nr44(&self) -> u8 {
        0xBF | if self.length.enabled { 0x40 } else { 0 }
    }

    pub(super) fn write_nr44(&mut self, value: u8) {
        self.length.enabled = value & 0x40 != 0;
        if value & 0x80 != 0 {
            self.enabled = self.dac_enabled();
            self.length.trigger();
            self.timer = self.period();
            self.envelope.trigger();
            self.lfsr = 0x7FFF;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_bit_mode_repeats_every_127_steps() {
        let mut ch = Noise::default();
        ch.write_nr42(0xF0);
        ch.write_nr43(0x08);
        ch.write_nr44(0x80);

        let period = 8;
        let first: Vec<u8> = (0..127)
            .map(|_| {
                ch.tick(period);
                ch.output()
            })
            .collect();
        let second: Vec<u8> = (0..127)
            .map(|_| {
                ch.tick(period);
                ch.output()
            })
            .collect();
        assert_eq!(first, second);
        assert!(first.contains(&15));
        assert!(first.contains(&0));
    }
}
