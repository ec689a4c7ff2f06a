use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotboy_gb::{Color, GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str =
    "Usage: frame_dump <rom_path> <out_rgb24_path> [frames] [--skip-boot] [--audio <out_s16le_path>]";

struct Args {
    rom_path: PathBuf,
    out_path: PathBuf,
    frames: u32,
    skip_boot: bool,
    audio_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut skip_boot = false;
    let mut audio_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--skip-boot" => skip_boot = true,
            "--audio" => {
                let path = args.next().context("--audio needs a path")?;
                audio_path = Some(PathBuf::from(path));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(rom), Some(out)) = (positional.next(), positional.next()) else {
        bail!(USAGE);
    };
    let frames = match positional.next() {
        Some(n) => n
            .parse()
            .with_context(|| format!("invalid frame count '{n}'"))?,
        None => 120,
    };

    Ok(Args {
        rom_path: PathBuf::from(rom),
        out_path: PathBuf::from(out),
        frames,
        skip_boot,
        audio_path,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let rom = std::fs::read(&args.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", args.rom_path.display()))?;

    let mut gb = GameBoy::new();
    gb.set_render_audio(args.audio_path.is_some());
    gb.load_rom(&rom)
        .with_context(|| format!("failed to load '{}'", args.rom_path.display()))?;
    if args.skip_boot {
        gb.skip_boot();
    }

    let mut samples = Vec::new();
    let mut chunk = vec![0i16; 4096];
    for _ in 0..args.frames {
        gb.frame();
        let n = gb.drain_audio(&mut chunk);
        samples.extend_from_slice(&chunk[..n]);
    }

    let mut rgb = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 3);
    for &pixel in gb.frame_buffer() {
        let (r, g, b, _) = Color::from_u32(pixel).rgba();
        rgb.extend_from_slice(&[r, g, b]);
    }
    std::fs::write(&args.out_path, &rgb)
        .with_context(|| format!("failed to write '{}'", args.out_path.display()))?;

    if let Some(path) = &args.audio_path {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("Wrote {} stereo frames to '{}'", samples.len() / 2, path.display());
    }

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        rgb.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        args.frames,
        args.out_path.display()
    );
    if !gb.serial_output().is_empty() {
        println!("Serial: {}", String::from_utf8_lossy(gb.serial_output()));
    }
    Ok(())
}
