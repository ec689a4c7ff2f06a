use super::units::LengthCounter;

pub(super) const WAVE_RAM_SIZE: usize = 16;

/// Channel 3: plays 32 four-bit samples from wave RAM (0xFF30..=0xFF3F).
pub(super) struct Wave {
    pub(super) enabled: bool,
    dac: bool,
    volume_code: u8,
    frequency: u16,
    timer: u32,
    position: u8,
    sample: u8,
    pub(super) length: LengthCounter,
    pub(super) ram: [u8; WAVE_RAM_SIZE],
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            enabled: false,
            dac: false,
            volume_code: 0,
            frequency: 0,
            timer: 0,
            position: 0,
            sample: 0,
            length: LengthCounter::new(256),
            ram: [0; WAVE_RAM_SIZE],
        }
    }
}

impl Wave {
    fn period(&self) -> u32 {
        (2048 - self.frequency as u32) * 2
    }

    fn fetch_sample(&mut self) {
        let byte = self.ram[self.position as usize / 2];
        self.sample = if self.position % 2 == 0 { byte >> 4 } else { byte & 0x0F };
    }

    pub(super) fn tick(&mut self, mut cycles: u32) {
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            self.position = (self.position + 1) & 0x1F;
            self.fetch_sample();
        }
        self.timer -= cycles;
    }

    /// Digital output 0..=15 after the NR32 volume shift.
    pub(super) fn output(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        match self.volume_code {
            0 => 0,
            1 => self.sample,
            2 => self.sample >> 1,
            _ => self.sample >> 2,
        }
    }

    pub(super) fn dac_enabled(&self) -> bool {
        self.dac
    }

    pub(super) fn clock_length(&mut self) {
        if self.length.clock() {
            self.enabled = false;
        }
    }

    pub(super) fn read_nr30(&self) -> u8 {
        0x7F | if self.dac { 0x80 } else { 0 }
    }

    pub(super) fn write_nr30(&mut self, value: u8) {
        self.dac = value & 0x80 != 0;
        if !self.dac {
            self.enabled = false;
        }
    }

    pub(super) fn write_nr31(&mut self, value: u8) {
        self.length.load(value);
    }

    pub(super) fn read_nr32(&self) -> u8 {
        0x9F | (self.volume_code << 5)
    }

    pub(super) fn write_nr32(&mut self, value: u8) {
        self.volume_code = (value >> 5) & 0x03;
    }

    pub(super) fn write_nr33(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x700) | value as u16;
    }

    pub(super) fn read_nr34(&self) -> u8 {
        0xBF | if self.length.enabled { 0x40 } else { 0 }
    }

    pub(super) fn write_nr34(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x0FF) | (((value & 0x07) as u16) << 8);
        self.length.enabled = value & 0x40 != 0;
        if value & 0x80 != 0 {
            self.enabled = self.dac;
            self.length.trigger();
            self.timer = self.period();
            self.position = 0;
        }
    }
}
