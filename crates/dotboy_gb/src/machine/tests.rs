use dotboy_common::Buttons;

use super::bus::WRAM_SIZE;
use super::{CartridgeError, CartridgeHeader, GameBoy, GameBoyConfig};
use crate::cpu::Bus;
use crate::CYCLES_PER_FRAME;

const ROM_BANK: usize = 0x4000;

/// Flat ROM with `program` at the 0x0100 entry point and a valid header
/// checksum.
fn build_rom(cart_type: u8, banks: usize, ram_code: u8, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; banks * ROM_BANK];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom[0x134..0x13C].copy_from_slice(b"TESTCART");
    rom[0x147] = cart_type;
    rom[0x148] = (banks / 2).trailing_zeros() as u8;
    rom[0x149] = ram_code;
    rom[0x14D] = CartridgeHeader::compute_header_checksum(&rom);
    rom
}

/// `JR -2` forever.
const SPIN: [u8; 2] = [0x18, 0xFE];

fn machine_with(program: &[u8]) -> GameBoy {
    let mut gb = GameBoy::new();
    gb.load_rom(&build_rom(0x00, 2, 0x00, program))
        .expect("test ROM loads");
    gb
}

#[test]
fn every_frame_spans_exactly_one_frame_period() {
    let mut gb = machine_with(&SPIN);
    let mut boundaries = Vec::new();
    for k in 1..=20u64 {
        gb.frame();
        // The PPU already counts the overshoot towards the next frame.
        let overshoot = gb.bus.ppu.frame_dots() as u64;
        assert!(overshoot < 24, "frame {k} overshot by {overshoot}");
        assert_eq!(gb.read(0xFF44), 144, "frame {k} ended outside V-Blank entry");
        boundaries.push(gb.total_cycles() - overshoot);
    }
    for pair in boundaries.windows(2) {
        assert_eq!(pair[1] - pair[0], CYCLES_PER_FRAME as u64);
    }
    assert_eq!(gb.frame_count(), 20);
}

#[test]
fn lcd_toggle_mid_frame_realigns_frames_to_vblank() {
    #[rustfmt::skip]
    let program = [
        0xF0, 0x44,       // wait: LDH A,(44)
        0xFE, 0x48,       // CP 72
        0x20, 0xFA,       // JR NZ,wait
        0xAF,             // XOR A
        0xE0, 0x40,       // LDH (40),A   LCD off
        0x3E, 0x91,       // LD A,91
        0xE0, 0x40,       // LDH (40),A   LCD on
        0x18, 0xFE,       // JR -2
    ];
    let mut gb = machine_with(&program);
    gb.skip_boot();

    let mut previous = None;
    for k in 0..4 {
        gb.frame();
        assert_eq!(gb.read(0xFF44), 144, "frame {k} returned mid-scan");
        assert_eq!(gb.read(0xFF41) & 0x03, 0x01);
        let boundary = gb.total_cycles() - gb.bus.ppu.frame_dots() as u64;
        if let Some(prev) = previous {
            assert_eq!(boundary - prev, CYCLES_PER_FRAME as u64);
        }
        previous = Some(boundary);
    }
}

#[test]
fn frame_without_cartridge_returns() {
    let mut gb = GameBoy::new();
    gb.frame();
    gb.frame();
    assert_eq!(gb.frame_count(), 2);
    assert!(gb.cartridge_header().is_none());
    assert_eq!(gb.read(0x4000), 0xFF);
}

#[test]
fn boot_image_hands_off_to_cartridge() {
    let mut gb = machine_with(&SPIN);
    assert_eq!(gb.read(0x0000), 0x31);
    assert_eq!(gb.cpu().regs().pc, 0x0000);

    gb.frame();
    assert_eq!(gb.read(0x0000), 0x00);
    assert!((0x0100..0x0102).contains(&gb.cpu().regs().pc));

    let regs = gb.cpu().regs();
    assert_eq!(regs.a, 0x01);
    assert_eq!(regs.f, 0xB0);
    assert_eq!(regs.bc(), 0x0013);
    assert_eq!(regs.de(), 0x00D8);
    assert_eq!(regs.hl(), 0x014D);
    assert_eq!(regs.sp, 0xFFFE);
    assert_eq!(gb.read(0xFF40), 0x91);
    assert_eq!(gb.read(0xFF47), 0xFC);
}

#[test]
fn boot_overlay_disable_is_permanent() {
    let mut gb = machine_with(&SPIN);
    gb.write(0xFF50, 0x01);
    assert_eq!(gb.read(0x0000), 0x00);

    gb.write(0xFF50, 0x00);
    assert_eq!(gb.read(0x0000), 0x00);
    assert!(!gb.bus.boot_rom_active);
}

#[test]
fn external_ff50_write_completes_handoff() {
    let mut gb = machine_with(&SPIN);
    gb.write(0xFF50, 0x01);

    let regs = gb.cpu().regs();
    assert_eq!(regs.pc, 0x0100);
    assert_eq!(regs.a, 0x01);
    assert_eq!(regs.sp, 0xFFFE);
    assert_eq!(gb.read(0xFF04), 0xAB);

    gb.frame();
    assert!((0x0100..0x0102).contains(&gb.cpu().regs().pc));
}

#[test]
fn ff50_write_after_handoff_changes_nothing() {
    let mut gb = machine_with(&SPIN);
    gb.frame();
    let before = *gb.cpu().regs();
    gb.write(0xFF50, 0x01);
    assert_eq!(*gb.cpu().regs(), before);
}

#[test]
fn start_button_releases_polling_loop() {
    #[rustfmt::skip]
    let program = [
        0xAF,             // XOR A
        0xE0, 0x80,       // LDH (80),A
        0x3E, 0x10,       // LD A,10 (select action buttons)
        0xE0, 0x00,       // LDH (00),A
        0xF0, 0x00,       // poll: LDH A,(00)
        0xE6, 0x08,       // AND 08 (Start, active low)
        0x20, 0xFA,       // JR NZ,poll
        0x3E, 0x42,       // LD A,42
        0xE0, 0x80,       // LDH (80),A
        0x18, 0xFE,       // JR -2
    ];
    let mut gb = machine_with(&program);
    gb.frame();
    gb.frame();
    assert_eq!(gb.read(0xFF80), 0x00);

    gb.set_input(Buttons::START);
    gb.frame();
    assert_eq!(gb.read(0xFF80), 0x42);
}

#[test]
fn joypad_interrupt_on_press() {
    let mut gb = machine_with(&SPIN);
    gb.skip_boot();
    gb.write(0xFF00, 0x20); // select directions
    gb.write(0xFF0F, 0x00);

    gb.set_input(Buttons::START);
    assert_eq!(gb.read(0xFF0F) & 0x10, 0x00);

    gb.set_input(Buttons::START | Buttons::LEFT);
    assert_eq!(gb.read(0xFF0F) & 0x10, 0x10);
    assert_eq!(gb.read(0xFF00) & 0x0F, 0x0D);
}

#[test]
fn vblank_serviced_before_timer() {
    #[rustfmt::skip]
    let program = [
        0x3E, 0x05,       // LD A,05
        0xE0, 0xFF,       // LDH (FF),A
        0xE0, 0x0F,       // LDH (0F),A
        0xFB,             // EI
        0x00,             // NOP
        0x18, 0xFE,       // JR -2
    ];
    let mut rom = build_rom(0x00, 2, 0x00, &program);
    // V-Blank handler marks 0x40, timer handler marks 0x50; neither returns.
    rom[0x40..0x46].copy_from_slice(&[0x3E, 0x40, 0xE0, 0x81, 0x18, 0xFE]);
    rom[0x50..0x56].copy_from_slice(&[0x3E, 0x50, 0xE0, 0x81, 0x18, 0xFE]);
    rom[0x14D] = CartridgeHeader::compute_header_checksum(&rom);

    let mut gb = GameBoy::new();
    gb.load_rom(&rom).expect("test ROM loads");
    gb.skip_boot();
    gb.frame();

    assert_eq!(gb.read(0xFF81), 0x40);
    assert_eq!(gb.read(0xFF0F) & 0x04, 0x04);
    assert!(!gb.cpu().ime());
}

#[test]
fn mbc1_bank_switch_leaves_bank_zero_alone() {
    let mut rom = build_rom(0x01, 8, 0x00, &SPIN);
    for bank in 1..8 {
        rom[bank * ROM_BANK] = bank as u8 * 0x11;
    }
    let mut gb = GameBoy::new();
    gb.load_rom(&rom).expect("test ROM loads");
    gb.skip_boot();

    assert_eq!(gb.read(0x4000), 0x11);
    gb.write(0x2000, 0x05);
    assert_eq!(gb.read(0x4000), 0x55);
    assert_eq!(gb.read(0x0100), SPIN[0]);
    // Bank 0 requested in the switchable window means bank 1.
    gb.write(0x2000, 0x00);
    assert_eq!(gb.read(0x4000), 0x11);
}

#[test]
fn mbc5_ram_banks_are_isolated() {
    let rom = build_rom(0x1A, 4, 0x03, &SPIN);
    let mut gb = GameBoy::new();
    gb.load_rom(&rom).expect("test ROM loads");
    gb.skip_boot();

    assert_eq!(gb.read(0xA000), 0xFF);
    gb.write(0x0000, 0x0A);
    gb.write(0x4000, 0x00);
    gb.write(0xA000, 0x12);
    gb.write(0x4000, 0x03);
    gb.write(0xA000, 0x34);

    gb.write(0x4000, 0x00);
    assert_eq!(gb.read(0xA000), 0x12);
    gb.write(0x4000, 0x03);
    assert_eq!(gb.read(0xA000), 0x34);
}

#[test]
fn failed_load_keeps_previous_cartridge() {
    let mut gb = machine_with(&SPIN);
    gb.frame();
    let pc = gb.cpu().regs().pc;

    assert_eq!(
        gb.load_rom(&[0u8; 0x100]),
        Err(CartridgeError::TooSmall { len: 0x100 })
    );
    let mut bad_type = build_rom(0x00, 2, 0x00, &SPIN);
    bad_type[0x147] = 0xFC;
    assert_eq!(
        gb.load_rom(&bad_type),
        Err(CartridgeError::UnsupportedMapper(0xFC))
    );

    let header = gb.cartridge_header().expect("cartridge still inserted");
    assert_eq!(header.title, "TESTCART");
    assert_eq!(gb.cpu().regs().pc, pc);
    assert_eq!(gb.frame_count(), 1);
}

#[test]
fn oam_dma_copies_through_read_routing() {
    let mut gb = machine_with(&SPIN);
    for i in 0..0xA0u16 {
        gb.write(0xC000 + i, i as u8 ^ 0x5A);
    }

    // LCD is still off at power-on, so OAM is readable.
    gb.write(0xFF46, 0xC0);
    assert_eq!(gb.read(0xFE00), 0x5A);
    assert_eq!(gb.read(0xFE9F), 0x9F ^ 0x5A);
    assert_eq!(gb.read(0xFF46), 0xC0);

    // Page E0 is echo RAM over C000.
    gb.write(0xC000, 0x77);
    gb.write(0xFF46, 0xE0);
    assert_eq!(gb.read(0xFE00), 0x77);
}

#[test]
fn vram_and_oam_closed_during_transfer() {
    let mut gb = machine_with(&SPIN);
    gb.write(0x8000, 0x12);
    gb.write(0xFE00, 0x34);

    gb.write(0xFF40, 0x91);
    gb.bus.tick(80);
    assert_eq!(gb.read(0x8000), 0xFF);
    assert_eq!(gb.read(0xFE00), 0xFF);
    gb.write(0x8000, 0x99);

    gb.bus.tick(200);
    assert_eq!(gb.read(0x8000), 0x12);
    assert_eq!(gb.read(0xFE00), 0x34);
}

#[test]
fn io_holes_and_unusable_area_read_ff() {
    let mut gb = machine_with(&SPIN);
    for addr in [0xFF03, 0xFF08, 0xFF15, 0xFF4C, 0xFF50, 0xFF7F, 0xFEA0, 0xFEFF] {
        assert_eq!(gb.read(addr), 0xFF, "{addr:04X}");
    }
    gb.write(0xFEA0, 0x00);
    assert_eq!(gb.read(0xFEA0), 0xFF);
}

#[test]
fn echo_ram_aliases_wram() {
    let mut gb = machine_with(&SPIN);
    gb.write(0xC123, 0x5A);
    assert_eq!(gb.read(0xE123), 0x5A);
    gb.write(0xFDFF, 0xA5);
    assert_eq!(gb.read(0xDDFF), 0xA5);
}

#[test]
fn wram_contents_follow_seed() {
    let a = GameBoy::with_config(GameBoyConfig::builder().wram_seed(7).build());
    let b = GameBoy::with_config(GameBoyConfig::builder().wram_seed(7).build());
    let c = GameBoy::with_config(GameBoyConfig::builder().wram_seed(8).build());
    assert_eq!(a.bus.wram, b.bus.wram);
    assert_ne!(a.bus.wram, c.bus.wram);
    assert!(a.bus.wram.iter().any(|&byte| byte != 0));
    assert_eq!(a.bus.wram.len(), WRAM_SIZE);
}

#[test]
fn headless_modes_keep_timing() {
    let mut full = machine_with(&SPIN);
    let mut headless = machine_with(&SPIN);
    headless.set_render_graphics(false);
    headless.set_render_audio(false);

    for _ in 0..5 {
        full.frame();
        headless.frame();
    }
    assert_eq!(full.total_cycles(), headless.total_cycles());
    assert_eq!(full.read(0xFF44), headless.read(0xFF44));
    assert_eq!(full.read(0xFF04), headless.read(0xFF04));

    let mut out = vec![0i16; 8192];
    assert!(full.drain_audio(&mut out) > 0);
    assert_eq!(headless.drain_audio(&mut out), 0);
}

#[test]
fn audio_per_frame_matches_sample_rate() {
    let mut gb = machine_with(&SPIN);
    gb.skip_boot();
    let mut out = vec![0i16; 8192];
    gb.drain_audio(&mut out);

    // The first frame after switching the LCD on is 144 lines short.
    gb.frame();
    gb.drain_audio(&mut out);

    let mut total = 0;
    for _ in 0..60 {
        gb.frame();
        total += gb.drain_audio(&mut out);
    }
    // 60 frames at 59.73 Hz is a little over a second of audio.
    let pairs = total / 2;
    assert!((44_290..=44_310).contains(&pairs), "{pairs}");
}

#[test]
fn stop_resets_divider() {
    let mut gb = machine_with(&[0x10, 0x00, 0x18, 0xFE]);
    gb.skip_boot();
    assert_eq!(gb.read(0xFF04), 0xAB);
    let cycles = gb.cpu.step(&mut gb.bus);
    gb.bus.tick(cycles);
    assert!(gb.cpu().is_stopped());
    assert_eq!(gb.read(0xFF04), 0x00);

    // Selecting a group with a pressed button wakes it up.
    gb.set_input(Buttons::A);
    gb.write(0xFF00, 0x10);
    gb.cpu.step(&mut gb.bus);
    assert!(!gb.cpu().is_stopped());
}

#[test]
fn serial_transfer_collects_output() {
    #[rustfmt::skip]
    let program = [
        0x3E, b'O', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, // SB='O', SC=81
        0xF0, 0x02, 0xE6, 0x80, 0x20, 0xFA,             // wait for SC bit 7
        0x3E, b'K', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02,
        0x18, 0xFE,
    ];
    let mut gb = machine_with(&program);
    gb.skip_boot();
    gb.frame();
    assert_eq!(gb.serial_output(), b"OK");
    assert_eq!(gb.bus.read8(0xFF01), 0xFF);
}
