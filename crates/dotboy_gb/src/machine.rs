//! The DMG machine: bus, peripherals and the frame driver.

mod apu;
mod bus;
mod cartridge;
mod config;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::{CartridgeError, CartridgeHeader, MapperKind};
pub use config::GameBoyConfig;
pub use gameboy::GameBoy;
pub use interrupts::InterruptFlags;

#[cfg(test)]
mod tests;
