use super::units::{Envelope, LengthCounter, Sweep};

const DUTY_PATTERNS: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 1], // 12.5%
    [1, 0, 0, 0, 0, 0, 0, 1], // 25%
    [1, 0, 0, 0, 0, 1, 1, 1], // 50%
    [0, 1, 1, 1, 1, 1, 1, 0], // 75%
];

/// Pulse channel. Channel 1 carries a sweep unit, channel 2 does not.
pub(super) struct Square {
    pub(super) enabled: bool,
    duty: u8,
    duty_pos: u8,
    frequency: u16,
    timer: u32,
    pub(super) length: LengthCounter,
    pub(super) envelope: Envelope,
    sweep: Option<Sweep>,
}

impl Square {
    pub(super) fn new(with_sweep: bool) -> Self {
        Self {
            enabled: false,
            duty: 0,
            duty_pos: 0,
            frequency: 0,
            timer: 0,
            length: LengthCounter::new(64),
            envelope: Envelope::default(),
            sweep: with_sweep.then(Sweep::default),
        }
    }

    fn period(&self) -> u32 {
        (2048 - self.frequency as u32) * 4
    }

    pub(super) fn tick(&mut self, mut cycles: u32) {
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            self.duty_pos = (self.duty_pos + 1) & 0x07;
        }
        self.timer -= cycles;
    }

    /// Digital output 0..=15.
    pub(super) fn output(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        DUTY_PATTERNS[self.duty as usize][self.duty_pos as usize] * self.envelope.volume()
    }

    pub(super) fn dac_enabled(&self) -> bool {
        self.envelope.dac_enabled()
    }

    pub(super) fn clock_length(&mut self) {
        if self.length.clock() {
            self.enabled = false;
        }
    }

    pub(super) fn clock_sweep(&mut self) {
        if let Some(sweep) = self.sweep.as_mut() {
            if !sweep.clock(&mut self.frequency) {
                self.enabled = false;
            }
        }
    }

    pub(super) fn read_nrx0(&self) -> u8 {
        self.sweep.map_or(0xFF, |s| s.read())
    }

    pub(super) fn write_nrx0(&mut self, value: u8) {
        if let Some(sweep) = self.sweep.as_mut() {
            sweep.write(value);
        }
    }

    pub(super) fn read_nrx1(&self) -> u8 {
        (self.duty << 6) | 0x3F
    }

    pub(super) fn write_nrx1(&mut self, value: u8) {
        self.duty = value >> 6;
        self.length.load(value & 0x3F);
    }

    pub(super) fn write_nrx2(&mut self, value: u8) {
        self.envelope.write(value);
        if !self.dac_enabled() {
            self.enabled = false;
        }
    }

    pub(super) fn write_nrx3(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x700) | value as u16;
    }

    pub(super) fn read_nrx4(&self) -> u8 {
        0xBF | if self.length.enabled { 0x40 } else { 0 }
    }

    pub(super) fn write_nrx4(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x0FF) | (((value & 0x07) as u16) << 8);
        self.length.enabled = value & 0x40 != 0;
        if value & 0x80 != 0 {
            self.trigger();
        }
    }

    /// Channel 1 as the boot ROM leaves it: triggered, then decayed to silence.
    pub(super) fn apply_post_boot_state(&mut self) {
        self.write_nrx1(0x80);
        self.write_nrx2(0xF3);
        self.write_nrx3(0xC1);
        self.write_nrx4(0x87);
        self.envelope.set_volume(0);
    }

    fn trigger(&mut self) {
        self.enabled = self.dac_enabled();
        self.length.trigger();
        self.timer = self.period();
        self.envelope.trigger();
        if let Some(sweep) = self.sweep.as_mut() {
            if !sweep.trigger(self.frequency) {
                self.enabled = false;
            }
        }
    }
}
