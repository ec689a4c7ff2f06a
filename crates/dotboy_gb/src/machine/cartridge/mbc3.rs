use super::{banked_ram_index, banked_rom_byte};

use crate::CPU_CLOCK_HZ;

/// MBC3: 7-bit ROM bank, four RAM banks and a real-time clock.
///
/// The clock only advances with emulated time, so two runs fed the same
/// input read the same RTC values.
pub(super) struct Mbc3Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    rom_bank: u8,
    /// 0x00..=0x03 selects a RAM bank, 0x08..=0x0C an RTC register.
    ram_rtc_select: u8,
    last_latch_write: u8,
    rtc: Rtc,
}

impl Mbc3Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram_bytes: usize) -> Self {
        Self {
            rom,
            ram: vec![0xFF; ram_bytes],
            ram_enable: false,
            rom_bank: 1,
            ram_rtc_select: 0,
            last_latch_write: 0xFF,
            rtc: Rtc::default(),
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.rom_bank as usize };
        banked_rom_byte(&self.rom, bank, addr)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => self.rom_bank = (value & 0x7F).max(1),
            0x4000..=0x5FFF => self.ram_rtc_select = value,
            0x6000..=0x7FFF => {
                if self.last_latch_write == 0x00 && value == 0x01 {
                    self.rtc.latch();
                }
                self.last_latch_write = value;
            }
            _ => {}
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        match self.ram_rtc_select {
            bank @ 0x00..=0x03 => {
                banked_ram_index(&self.ram, bank as usize, addr).map_or(0xFF, |i| self.ram[i])
            }
            reg @ 0x08..=0x0C => self.rtc.read_latched(reg - 0x08),
            _ => 0xFF,
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        match self.ram_rtc_select {
            bank @ 0x00..=0x03 => {
                if let Some(i) = banked_ram_index(&self.ram, bank as usize, addr) {
                    self.ram[i] = value;
                }
            }
            reg @ 0x08..=0x0C => self.rtc.write(reg - 0x08, value),
            _ => {}
        }
    }

    pub(super) fn tick(&mut self, cycles: u32) {
        self.rtc.tick(cycles);
    }
}

const RTC_HALT: u8 = 0x40;
const RTC_DAY_CARRY: u8 = 0x80;

/// RTC register file: seconds, minutes, hours, day low, day high/flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RtcRegisters {
    seconds: u8,
    minutes: u8,
    hours: u8,
    days: u16,
    halted: bool,
    day_carry: bool,
}

impl RtcRegisters {
    fn read(&self, index: u8) -> u8 {
        match index {
            0 => self.seconds,
            1 => self.minutes,
            2 => self.hours,
            3 => self.days as u8,
            _ => {
                let mut value = ((self.days >> 8) as u8) & 0x01;
                if self.halted {
                    value |= RTC_HALT;
                }
                if self.day_carry {
                    value |= RTC_DAY_CARRY;
                }
                value
            }
        }
    }

    fn advance_second(&mut self) {
        self.seconds = (self.seconds + 1) & 0x3F;
        if self.seconds != 60 {
            return;
        }
        self.seconds = 0;
        self.minutes = (self.minutes + 1) & 0x3F;
        if self.minutes != 60 {
            return;
        }
        self.minutes = 0;
        self.hours = (self.hours + 1) & 0x1F;
        if self.hours != 24 {
            return;
        }
        self.hours = 0;
        self.days += 1;
        if self.days > 0x1FF {
            self.days = 0;
            self.day_carry = true;
        }
    }
}

#[derive(Default)]
struct Rtc {
    live: RtcRegisters,
    latched: RtcRegisters,
    /// T-cycles accumulated towards the next second.
    subsecond: u32,
}

impl Rtc {
    fn tick(&mut self, cycles: u32) {
        if self.live.halted {
            return;
        }
        self.subsecond += cycles;
        while self.subsecond >= CPU_CLOCK_HZ {
            self.subsecond -= CPU_CLOCK_HZ;
            self.live.advance_second();
        }
    }

    fn latch(&mut self) {
        self.latched = self.live;
        log::debug!("MBC3 RTC latched: {:?}", self.latched);
    }

    fn read_latched(&self, index: u8) -> u8 {
        self.latched.read(index)
    }

    fn write(&mut self, index: u8, value: u8) {
        match index {
            0 => {
                self.live.seconds = value & 0x3F;
                self.subsecond = 0;
            }
            1 => self.live.minutes = value & 0x3F,
            2 => self.live.hours = value & 0x1F,
            3 => self.live.days = (self.live.days & 0x100) | value as u16,
            _ => {
                self.live.days = (self.live.days & 0x0FF) | (((value & 0x01) as u16) << 8);
                self.live.halted = value & RTC_HALT != 0;
                self.live.day_carry = value & RTC_DAY_CARRY != 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Mbc3Cartridge {
        let mut c = Mbc3Cartridge::new(vec![0u8; 8 * 0x4000], 0x8000);
        c.rom_write(0x0000, 0x0A);
        c
    }

    fn latch(c: &mut Mbc3Cartridge) {
        c.rom_write(0x6000, 0x00);
        c.rom_write(0x6000, 0x01);
    }

    #[test]
    fn rtc_reads_latched_value_until_relatched() {
        let mut c = cart();
        c.tick(CPU_CLOCK_HZ * 3);
        latch(&mut c);

        c.rom_write(0x4000, 0x08);
        assert_eq!(c.ram_read(0xA000), 3);

        c.tick(CPU_CLOCK_HZ * 2);
        assert_eq!(c.ram_read(0xA000), 3);

        latch(&mut c);
        assert_eq!(c.ram_read(0xA000), 5);
    }

    #[test]
    fn rtc_rolls_minutes_and_halts() {
        let mut c = cart();
        c.rom_write(0x4000, 0x08);
        c.ram_write(0xA000, 59);
        c.tick(CPU_CLOCK_HZ);
        latch(&mut c);
        assert_eq!(c.ram_read(0xA000), 0);
        c.rom_write(0x4000, 0x09);
        assert_eq!(c.ram_read(0xA000), 1);

        c.rom_write(0x4000, 0x0C);
        c.ram_write(0xA000, RTC_HALT);
        c.tick(CPU_CLOCK_HZ * 10);
        latch(&mut c);
        c.rom_write(0x4000, 0x09);
        assert_eq!(c.ram_read(0xA000), 1);
    }

    #[test]
    fn ram_banks_are_isolated() {
        let mut c = cart();
        c.rom_write(0x4000, 0x01);
        c.ram_write(0xA000, 0x11);
        c.rom_write(0x4000, 0x02);
        c.ram_write(0xA000, 0x22);
        c.rom_write(0x4000, 0x01);
        assert_eq!(c.ram_read(0xA000), 0x11);
    }
}
