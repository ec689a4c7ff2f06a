use super::{Bus, Cpu};

/// Cost of one idle M-cycle while halted, stopped or locked.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute a single instruction (or interrupt dispatch) and return the
    /// number of T-cycles taken. Always returns at least 4.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            return IDLE_CYCLES;
        }

        if self.stopped {
            // Any joypad line pulled low ends STOP.
            if bus.read8(0xFF00) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return IDLE_CYCLES;
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return cycles;
        }

        if self.halted {
            return IDLE_CYCLES;
        }

        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode);
        self.apply_ime_delay();
        cycles
    }
}
