//! C ABI over [`dotboy_gb::GameBoy`].
//!
//! Every entry point takes the opaque handle returned by [`dotboy_new`].
//! NULL handles and buffers are tolerated (the call does nothing and returns
//! `false`/0), and panics are caught and logged rather than unwinding into
//! the caller.

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::{Context, Result};
use dotboy_common::Buttons;
use dotboy_gb::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Opaque emulator handle.
pub struct DotBoy {
    gb: GameBoy,
}

/// Pixels in one frame; the size `dotboy_get_frame_rgba` expects.
pub const DOTBOY_FRAME_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Run `f`, mapping errors and panics to `fallback`.
fn guard<T>(name: &str, fallback: T, f: impl FnOnce() -> Result<T>) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            log::error!("{name}: {err:#}");
            fallback
        }
        Err(_) => {
            log::error!("{name}: panicked");
            fallback
        }
    }
}

/// # Safety
/// `handle` must be NULL or a live pointer from [`dotboy_new`].
unsafe fn handle_mut<'a>(handle: *mut DotBoy) -> Result<&'a mut DotBoy> {
    handle.as_mut().context("null handle")
}

/// Create an emulator at power-on. Returns NULL if construction fails.
#[no_mangle]
pub extern "C" fn dotboy_new() -> *mut DotBoy {
    guard("dotboy_new", std::ptr::null_mut(), || {
        Ok(Box::into_raw(Box::new(DotBoy { gb: GameBoy::new() })))
    })
}

/// Release an emulator. NULL is ignored.
///
/// # Safety
/// `handle` must be NULL or a pointer from [`dotboy_new`] that has not been
/// freed yet.
#[no_mangle]
pub unsafe extern "C" fn dotboy_free(handle: *mut DotBoy) {
    if handle.is_null() {
        return;
    }
    guard("dotboy_free", (), || {
        drop(Box::from_raw(handle));
        Ok(())
    })
}

/// Load a cartridge image. On failure the previous cartridge stays in place.
///
/// # Safety
/// `data` must point to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn dotboy_load_rom(handle: *mut DotBoy, data: *const u8, len: usize) -> bool {
    guard("dotboy_load_rom", false, || {
        let dotboy = handle_mut(handle)?;
        anyhow::ensure!(!data.is_null(), "null ROM pointer");
        let rom = std::slice::from_raw_parts(data, len);
        dotboy.gb.load_rom(rom)?;
        Ok(true)
    })
}

/// Latch button state: bit 0 A, 1 B, 2 Select, 3 Start, 4 Right, 5 Left,
/// 6 Up, 7 Down; set means pressed.
///
/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_set_input(handle: *mut DotBoy, buttons: u8) {
    guard("dotboy_set_input", (), || {
        handle_mut(handle)?.gb.set_input(Buttons::from_bits_retain(buttons));
        Ok(())
    })
}

/// Run one video frame (70 224 ticks).
///
/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_frame(handle: *mut DotBoy) {
    guard("dotboy_frame", (), || {
        handle_mut(handle)?.gb.frame();
        Ok(())
    })
}

/// Copy the frame buffer as packed RGBA.
///
/// # Safety
/// `out` must be NULL or point to [`DOTBOY_FRAME_PIXELS`] writable `u32`s.
#[no_mangle]
pub unsafe extern "C" fn dotboy_get_frame_rgba(handle: *mut DotBoy, out: *mut u32) {
    guard("dotboy_get_frame_rgba", (), || {
        let dotboy = handle_mut(handle)?;
        anyhow::ensure!(!out.is_null(), "null frame buffer");
        let out = std::slice::from_raw_parts_mut(out, DOTBOY_FRAME_PIXELS);
        dotboy.gb.frame_rgba(out);
        Ok(())
    })
}

/// Drain queued interleaved stereo samples into `out`. `capacity` counts
/// `i16` values and only whole left/right pairs are copied. Returns the
/// number of stereo frames written, so `out` holds twice that many values.
///
/// # Safety
/// `out` must be NULL or point to `capacity` writable `i16`s.
#[no_mangle]
pub unsafe extern "C" fn dotboy_get_audio_samples(
    handle: *mut DotBoy,
    out: *mut i16,
    capacity: usize,
) -> usize {
    guard("dotboy_get_audio_samples", 0, || {
        let dotboy = handle_mut(handle)?;
        anyhow::ensure!(!out.is_null(), "null sample buffer");
        let out = std::slice::from_raw_parts_mut(out, capacity);
        Ok(dotboy.gb.drain_audio(out) / 2)
    })
}

/// Store a byte through the CPU's address space.
///
/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_write(handle: *mut DotBoy, addr: u16, value: u8) {
    guard("dotboy_write", (), || {
        handle_mut(handle)?.gb.write(addr, value);
        Ok(())
    })
}

/// Read a byte without side effects. NULL handles read 0xFF.
///
/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_read(handle: *mut DotBoy, addr: u16) -> u8 {
    guard("dotboy_read", 0xFF, || Ok(handle_mut(handle)?.gb.read(addr)))
}

/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_set_render_graphics(handle: *mut DotBoy, on: bool) {
    guard("dotboy_set_render_graphics", (), || {
        handle_mut(handle)?.gb.set_render_graphics(on);
        Ok(())
    })
}

/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_set_render_audio(handle: *mut DotBoy, on: bool) {
    guard("dotboy_set_render_audio", (), || {
        handle_mut(handle)?.gb.set_render_audio(on);
        Ok(())
    })
}

/// Jump to the post-boot state at 0x0100 without running the boot image.
///
/// # Safety
/// `handle` must be NULL or live.
#[no_mangle]
pub unsafe extern "C" fn dotboy_skip_boot(handle: *mut DotBoy) {
    guard("dotboy_skip_boot", (), || {
        handle_mut(handle)?.gb.skip_boot();
        Ok(())
    })
}
