mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod timing;

pub use bus::Bus;
pub use regs::{Flag, Registers};

/// Sharp LR35902 core.
///
/// Executes one instruction (or one interrupt dispatch) per [`Cpu::step`]
/// call and reports the T-cycles it took. The CPU never advances the rest of
/// the machine itself; the frame driver forwards the returned cycle count to
/// the timer, PPU and APU.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub(crate) regs: Registers,
    pub(crate) ime: bool,
    pub(crate) halted: bool,
    /// STOP low-power state, left when a joypad line goes low.
    stopped: bool,
    /// Set by HALT with IME clear and an interrupt already pending: the next
    /// opcode fetch does not advance PC.
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set after executing one of the unassigned opcodes. The real CPU stops
    /// responding until power-off; we keep reporting idle cycles so the rest
    /// of the machine still runs.
    locked: bool,
    /// Set by conditional control-flow executors when the branch is taken,
    /// so the timing table can pick the longer cycle count.
    branch_taken: bool,
}

impl Cpu {
    /// Read-only view of the register file.
    #[inline]
    pub fn regs(&self) -> &Registers {
        &self.regs
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.set_flag(flag, value);
    }

    #[inline]
    pub(crate) fn clear_flags(&mut self) {
        self.regs.f = 0;
    }
}
