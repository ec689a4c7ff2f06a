//! Frame-sequencer driven units shared by the channels.

/// Counts down at 256 Hz; reaching zero silences the channel.
#[derive(Clone, Copy, Debug)]
pub(super) struct LengthCounter {
    counter: u16,
    pub(super) enabled: bool,
    max: u16,
}

impl LengthCounter {
    pub(super) fn new(max: u16) -> Self {
        Self {
            counter: 0,
            enabled: false,
            max,
        }
    }

    /// NRx1 length load: the counter runs for `max - value` steps.
    pub(super) fn load(&mut self, value: u8) {
        self.counter = self.max - (value as u16 & (self.max - 1));
    }

    pub(super) fn trigger(&mut self) {
        if self.counter == 0 {
            self.counter = self.max;
        }
    }

    /// Returns `true` when this clock ran the counter out.
    pub(super) fn clock(&mut self) -> bool {
        if self.enabled && self.counter > 0 {
            self.counter -= 1;
            return self.counter == 0;
        }
        false
    }
}

/// Volume envelope (NRx2), clocked at 64 Hz.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Envelope {
    initial: u8,
    increase: bool,
    period: u8,
    volume: u8,
    timer: u8,
}

impl Envelope {
    pub(super) fn write(&mut self, value: u8) {
        self.initial = value >> 4;
        self.increase = value & 0x08 != 0;
        self.period = value & 0x07;
    }

    pub(super) fn read(&self) -> u8 {
        (self.initial << 4) | (if self.increase { 0x08 } else { 0 }) | self.period
    }

    /// Upper five bits clear means the channel DAC is off.
    pub(super) fn dac_enabled(&self) -> bool {
        self.read() & 0xF8 != 0
    }

    pub(super) fn trigger(&mut self) {
        self.volume = self.initial;
        self.timer = self.period;
    }

    pub(super) fn clock(&mut self) {
        if self.period == 0 {
            return;
        }
        if self.timer > 0 {
            self.timer -= 1;
        }
        if self.timer == 0 {
            self.timer = self.period;
            if self.increase && self.volume < 15 {
                self.volume += 1;
            } else if !self.increase && self.volume > 0 {
                self.volume -= 1;
            }
        }
    }

    #[inline]
    pub(super) fn volume(&self) -> u8 {
        self.volume
    }

    pub(super) fn set_volume(&mut self, volume: u8) {
        self.volume = volume & 0x0F;
    }
}

/// Channel 1 frequency sweep (NR10), clocked at 128 Hz.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Sweep {
    period: u8,
    negate: bool,
    shift: u8,
    timer: u8,
    enabled: bool,
    shadow: u16,
}

impl Sweep {
    pub(super) fn write(&mut self, value: u8) {
        self.period = (value >> 4) & 0x07;
        self.negate = value & 0x08 != 0;
        self.shift = value & 0x07;
    }

    pub(super) fn read(&self) -> u8 {
        0x80 | (self.period << 4) | (if self.negate { 0x08 } else { 0 }) | self.shift
    }

    fn reload_timer(&mut self) {
        self.timer = if self.period == 0 { 8 } else { self.period };
    }

    fn next_frequency(&self) -> u16 {
        let delta = self.shadow >> self.shift;
        if self.negate {
            self.shadow.wrapping_sub(delta)
        } else {
            self.shadow + delta
        }
    }

    /// Returns `false` if the initial overflow check disables the channel.
    pub(super) fn trigger(&mut self, frequency: u16) -> bool {
        self.shadow = frequency;
        self.reload_timer();
        self.enabled = self.period != 0 || self.shift != 0;
        self.shift == 0 || self.next_frequency() <= 0x7FF
    }

    /// Apply one sweep step to `frequency`. Returns `false` when the new
    /// frequency overflows and the channel must be disabled.
    pub(super) fn clock(&mut self, frequency: &mut u16) -> bool {
        if self.timer > 0 {
            self.timer -= 1;
        }
        if self.timer != 0 {
            return true;
        }
        self.reload_timer();
        if !self.enabled || self.period == 0 {
            return true;
        }

        let next = self.next_frequency();
        if next > 0x7FF {
            return false;
        }
        if self.shift != 0 {
            self.shadow = next;
            *frequency = next;
            if self.next_frequency() > 0x7FF {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counter_expires() {
        let mut length = LengthCounter::new(64);
        length.load(62);
        length.enabled = true;
        assert!(!length.clock());
        assert!(length.clock());
        assert!(!length.clock());
    }

    #[test]
    fn envelope_clamps() {
        let mut env = Envelope::default();
        env.write(0xE9);
        env.trigger();
        for _ in 0..10 {
            env.clock();
        }
        assert_eq!(env.volume(), 15);
        assert!(env.dac_enabled());

        env.write(0x00);
        assert!(!env.dac_enabled());
    }

    #[test]
    fn sweep_overflow_disables() {
        let mut sweep = Sweep::default();
        sweep.write(0x11);
        let mut freq = 0x500;
        assert!(sweep.trigger(freq));
        // First step lands on 0x780; the follow-up check overflows.
        assert!(!sweep.clock(&mut freq));
        assert_eq!(freq, 0x780);
    }
}
