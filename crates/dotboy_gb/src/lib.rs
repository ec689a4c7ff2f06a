//! DMG handheld emulation core.
//!
//! [`GameBoy`] owns a complete machine. Feed it a ROM, push button state,
//! call [`GameBoy::frame`] at 59.73 Hz and pull pixels and samples out.
//!
//! ```
//! use dotboy_gb::{Buttons, GameBoy};
//!
//! let mut gb = GameBoy::new();
//! gb.set_input(Buttons::START);
//! gb.frame();
//! assert_eq!(gb.frame_buffer().len(), dotboy_gb::SCREEN_WIDTH * dotboy_gb::SCREEN_HEIGHT);
//! ```
pub mod cpu;
pub mod machine;

pub use dotboy_common::{Buttons, Color};
pub use machine::{CartridgeError, CartridgeHeader, GameBoy, GameBoyConfig, MapperKind};

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;
/// Master clock in T-cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// T-cycles per video frame (154 lines x 456 dots).
pub const CYCLES_PER_FRAME: u32 = 70_224;
/// Default audio output rate.
pub const SAMPLE_RATE: u32 = 44_100;
