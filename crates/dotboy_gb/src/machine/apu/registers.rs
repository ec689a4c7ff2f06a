use super::{Apu, Noise, Square, Wave};

impl Apu {
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF10 => self.ch1.read_nrx0(),
            0xFF11 => self.ch1.read_nrx1(),
            0xFF12 => self.ch1.envelope.read(),
            0xFF14 => self.ch1.read_nrx4(),
            0xFF16 => self.ch2.read_nrx1(),
            0xFF17 => self.ch2.envelope.read(),
            0xFF19 => self.ch2.read_nrx4(),
            0xFF1A => self.ch3.read_nr30(),
            0xFF1C => self.ch3.read_nr32(),
            0xFF1E => self.ch3.read_nr34(),
            0xFF21 => self.ch4.envelope.read(),
            0xFF22 => self.ch4.read_nr43(),
            0xFF23 => self.ch4.read_nr44(),
            0xFF24 => self.nr50,
            0xFF25 => self.nr51,
            0xFF26 => 0x70 | (if self.powered { 0x80 } else { 0 }) | self.channel_status(),
            0xFF30..=0xFF3F => self.ch3.ram[(addr - 0xFF30) as usize],
            // Write-only frequency/length registers and the unused gaps.
            _ => 0xFF,
        }
    }

    pub(crate) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF26 => return self.write_nr52(value),
            0xFF30..=0xFF3F => {
                self.ch3.ram[(addr - 0xFF30) as usize] = value;
                return;
            }
            _ if !self.powered => return,
            _ => {}
        }

        match addr {
            0xFF10 => self.ch1.write_nrx0(value),
            0xFF11 => self.ch1.write_nrx1(value),
            0xFF12 => self.ch1.write_nrx2(value),
            0xFF13 => self.ch1.write_nrx3(value),
            0xFF14 => self.ch1.write_nrx4(value),
            0xFF16 => self.ch2.write_nrx1(value),
            0xFF17 => self.ch2.write_nrx2(value),
            0xFF18 => self.ch2.write_nrx3(value),
            0xFF19 => self.ch2.write_nrx4(value),
            0xFF1A => self.ch3.write_nr30(value),
            0xFF1B => self.ch3.write_nr31(value),
            0xFF1C => self.ch3.write_nr32(value),
            0xFF1D => self.ch3.write_nr33(value),
            0xFF1E => self.ch3.write_nr34(value),
            0xFF20 => self.ch4.write_nr41(value),
            0xFF21 => self.ch4.write_nr42(value),
            0xFF22 => self.ch4.write_nr43(value),
            0xFF23 => self.ch4.write_nr44(value),
            0xFF24 => self.nr50 = value,
            0xFF25 => self.nr51 = value,
            _ => {}
        }
    }

    /// Only bit 7 is writable. Powering off clears every channel and
    /// control register; wave RAM survives.
    fn write_nr52(&mut self, value: u8) {
        let on = value & 0x80 != 0;
        if self.powered && !on {
            let ram = self.ch3.ram;
            self.ch1 = Square::new(true);
            self.ch2 = Square::new(false);
            self.ch3 = Wave::default();
            self.ch3.ram = ram;
            self.ch4 = Noise::default();
            self.nr50 = 0;
            self.nr51 = 0;
            log::debug!("APU powered off");
        } else if !self.powered && on {
            self.sequencer_counter = 0;
            self.sequencer_step = 0;
        }
        self.powered = on;
    }
}
