use crate::cpu::Bus;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn pending_interrupts(&mut self) -> u8 {
        self.interrupts.pending()
    }

    fn acknowledge_interrupt(&mut self, index: u8) {
        if log::log_enabled!(log::Level::Debug) {
            if let Some(line) = self.interrupts.highest_pending() {
                log::debug!("servicing {line:?} (bit {index})");
            }
        }
        self.interrupts.acknowledge(index);
    }

    fn enter_stop(&mut self) {
        self.timer.write_div();
    }
}
