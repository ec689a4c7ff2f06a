mod common;

use common::{boot, RomBuilder, SPIN};
use dotboy_gb::{Buttons, Color, GameBoy, CYCLES_PER_FRAME};

#[test]
fn infinite_loop_rom_runs_fixed_length_frames() {
    let mut gb = boot(&RomBuilder::new(0x00, 2).code(&SPIN).build());
    // The first frame ends on the first V-Blank after the boot image
    // switches the LCD on.
    gb.frame();
    let first = gb.total_cycles();
    let mut previous = first;
    for k in 2..=600u64 {
        gb.frame();
        let total = gb.total_cycles();
        let delta = total - previous;
        // Instruction granularity jitters a frame by at most one instruction.
        assert!(delta.abs_diff(CYCLES_PER_FRAME as u64) < 24, "frame {k}: {delta}");
        assert_eq!(gb.read(0xFF44), 144, "frame {k} ended mid-scan");
        previous = total;
    }
    let drift = (gb.total_cycles() - first).abs_diff(599 * CYCLES_PER_FRAME as u64);
    assert!(drift < 24);
    assert_eq!(gb.cpu().regs().pc, 0x0100);
}

#[test]
fn locked_cpu_still_produces_frames() {
    // 0xD3 is an unassigned opcode.
    let mut gb = boot(&RomBuilder::new(0x00, 2).code(&[0xD3]).build());
    for _ in 0..3 {
        gb.frame();
    }
    assert!(gb.cpu().is_locked());
    assert_eq!(gb.frame_count(), 3);
    assert!(gb.total_cycles() > 2 * CYCLES_PER_FRAME as u64);
    assert_eq!(gb.read(0xFF44), 144);
}

#[test]
fn program_drawn_background_reaches_frame_buffer() {
    #[rustfmt::skip]
    let program = [
        0xAF,             // XOR A
        0xE0, 0x40,       // LDH (40),A   LCD off
        0x21, 0x00, 0x80, // LD HL,8000
        0x3E, 0xFF,       // LD A,FF
        0x06, 0x10,       // LD B,16
        0x22,             // fill: LD (HL+),A
        0x05,             // DEC B
        0x20, 0xFC,       // JR NZ,fill
        0x3E, 0xE4,       // LD A,E4
        0xE0, 0x47,       // LDH (47),A   BGP
        0x3E, 0x91,       // LD A,91
        0xE0, 0x40,       // LDH (40),A   LCD on
        0x18, 0xFE,       // JR -2
    ];
    let mut gb = boot(&RomBuilder::new(0x00, 2).code(&program).build());
    for _ in 0..3 {
        gb.frame();
    }
    let black = Color::BLACK.to_u32();
    assert!(gb.frame_buffer().iter().all(|&p| p == black));

    let mut copy = vec![0u32; gb.frame_buffer().len()];
    gb.frame_rgba(&mut copy);
    assert_eq!(copy, gb.frame_buffer());
}

#[test]
fn identical_runs_are_bit_identical() {
    let rom = RomBuilder::new(0x00, 2).code(&SPIN).build();
    let run = |rom: &[u8]| {
        let mut gb = boot(rom);
        let mut audio = Vec::new();
        let mut chunk = vec![0i16; 4096];
        for frame in 0..30 {
            if frame == 10 {
                gb.set_input(Buttons::A | Buttons::UP);
            }
            gb.frame();
            let n = gb.drain_audio(&mut chunk);
            audio.extend_from_slice(&chunk[..n]);
        }
        (gb.frame_buffer().to_vec(), audio, gb.total_cycles())
    };
    assert_eq!(run(&rom), run(&rom));
}

#[test]
fn audio_queue_drops_oldest_when_not_drained() {
    let rom = RomBuilder::new(0x00, 2).code(&SPIN).build();
    let config = dotboy_gb::GameBoyConfig::builder()
        .audio_queue_capacity(256)
        .build();
    let mut gb = GameBoy::with_config(config);
    gb.load_rom(&rom).expect("synthetic ROM loads");
    for _ in 0..5 {
        gb.frame();
    }
    assert_eq!(gb.queued_audio(), 256);
    let mut out = vec![0i16; 1024];
    assert_eq!(gb.drain_audio(&mut out), 256);
    assert_eq!(gb.drain_audio(&mut out), 0);
}
