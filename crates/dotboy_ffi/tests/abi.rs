use dotboy::*;
use dotboy_gb::CartridgeHeader;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn spin_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x102].copy_from_slice(&[0x18, 0xFE]);
    rom[0x14D] = CartridgeHeader::compute_header_checksum(&rom);
    rom
}

#[test]
fn lifecycle_runs_frames_and_copies_buffers() {
    init_logger();
    let rom = spin_rom();
    unsafe {
        let h = dotboy_new();
        assert!(!h.is_null());
        assert!(dotboy_load_rom(h, rom.as_ptr(), rom.len()));

        dotboy_set_input(h, 0x08);
        dotboy_frame(h);
        dotboy_frame(h);

        let mut frame = vec![0u32; DOTBOY_FRAME_PIXELS];
        dotboy_get_frame_rgba(h, frame.as_mut_ptr());
        assert!(frame.iter().all(|&p| p == dotboy_gb::Color::WHITE.to_u32()));

        let mut audio = vec![0i16; 4097];
        let frames = dotboy_get_audio_samples(h, audio.as_mut_ptr(), audio.len());
        assert!(frames > 0);
        assert!(frames * 2 <= audio.len());

        dotboy_free(h);
    }
}

#[test]
fn rejects_bad_rom_and_keeps_running() {
    init_logger();
    let short = [0u8; 16];
    unsafe {
        let h = dotboy_new();
        assert!(!dotboy_load_rom(h, short.as_ptr(), short.len()));
        assert!(!dotboy_load_rom(h, std::ptr::null(), 0));
        dotboy_frame(h);
        assert_eq!(dotboy_read(h, 0x4000), 0xFF);
        dotboy_free(h);
    }
}

#[test]
fn null_handles_and_buffers_are_ignored() {
    init_logger();
    let rom = spin_rom();
    unsafe {
        let null = std::ptr::null_mut();
        dotboy_free(null);
        dotboy_frame(null);
        dotboy_set_input(null, 0xFF);
        dotboy_write(null, 0xC000, 1);
        dotboy_set_render_graphics(null, false);
        dotboy_set_render_audio(null, false);
        assert!(!dotboy_load_rom(null, rom.as_ptr(), rom.len()));
        assert_eq!(dotboy_get_audio_samples(null, std::ptr::null_mut(), 8), 0);
        assert_eq!(dotboy_read(null, 0x0000), 0xFF);

        let h = dotboy_new();
        dotboy_get_frame_rgba(h, std::ptr::null_mut());
        assert_eq!(dotboy_get_audio_samples(h, std::ptr::null_mut(), 8), 0);
        dotboy_free(h);
    }
}

#[test]
fn ff50_write_hands_off_to_cartridge() {
    init_logger();
    let rom = spin_rom();
    unsafe {
        let h = dotboy_new();
        assert!(dotboy_load_rom(h, rom.as_ptr(), rom.len()));
        assert_eq!(dotboy_read(h, 0x0000), 0x31);
        dotboy_write(h, 0xFF50, 0x01);
        assert_eq!(dotboy_read(h, 0x0000), 0x00);
        assert_eq!(dotboy_read(h, 0xFF40), 0x91);
        dotboy_free(h);
    }
}

#[test]
fn headless_toggles_stop_audio_queue() {
    init_logger();
    let rom = spin_rom();
    unsafe {
        let h = dotboy_new();
        assert!(dotboy_load_rom(h, rom.as_ptr(), rom.len()));
        dotboy_skip_boot(h);
        dotboy_set_render_graphics(h, false);
        dotboy_set_render_audio(h, false);
        dotboy_frame(h);
        let mut audio = vec![0i16; 4096];
        assert_eq!(dotboy_get_audio_samples(h, audio.as_mut_ptr(), audio.len()), 0);
        dotboy_free(h);
    }
}

#[test]
fn audio_count_is_in_stereo_frames() {
    init_logger();
    let rom = spin_rom();
    unsafe {
        let h = dotboy_new();
        assert!(dotboy_load_rom(h, rom.as_ptr(), rom.len()));
        dotboy_skip_boot(h);
        dotboy_frame(h);
        dotboy_frame(h);

        // Odd capacity: the last slot can never hold a whole pair.
        let mut audio = vec![i16::MAX; 11];
        assert_eq!(dotboy_get_audio_samples(h, audio.as_mut_ptr(), audio.len()), 5);
        assert_eq!(audio[10], i16::MAX);

        // A caller reading `frames * 2` values sees only freshly written data.
        let mut big = vec![i16::MAX; 8192];
        let frames = dotboy_get_audio_samples(h, big.as_mut_ptr(), big.len());
        assert!(frames > 0 && frames * 2 < big.len());
        assert_eq!(big[frames * 2], i16::MAX);
        assert!(big[..frames * 2].iter().all(|&s| s != i16::MAX));
        dotboy_free(h);
    }
}
