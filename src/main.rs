use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nesdot::Console;

#[derive(Parser, Debug)]
#[command(name = "nesdot", about = "Run an iNES image headless for a number of frames")]
struct Args {
    /// iNES (.nes) image to load
    rom: PathBuf,

    /// Frames to emulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Write the last frame as PNG (needs the `screenshot` feature)
    #[arg(long, value_name = "PATH")]
    screenshot: Option<PathBuf>,

    /// Stop as soon as the CPU hits an illegal opcode
    #[arg(long)]
    stop_on_fault: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut console = Console::new();
    console
        .load_ines_file(&args.rom)
        .with_context(|| format!("loading {}", args.rom.display()))?;

    let mut cycles = 0u64;
    let mut frames = 0u32;
    while frames < args.frames {
        cycles += console.run_frame();
        frames += 1;
        if args.stop_on_fault && console.fault().is_some() {
            break;
        }
    }
    info!("ran {frames} frames, {cycles} cpu cycles");

    let cpu = &console.cpu;
    println!("frames: {frames}");
    println!("cycles: {cycles}");
    println!(
        "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} PC:{:04X} P:{:08b}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.pc(),
        cpu.status()
    );
    if let Some(fault) = console.fault() {
        println!("fault: {fault}");
    }

    if let Some(path) = args.screenshot.as_deref() {
        save_screenshot(&console, path)?;
    }
    Ok(())
}

#[cfg(feature = "screenshot")]
fn save_screenshot(console: &Console, path: &std::path::Path) -> Result<()> {
    nesdot::screenshot::save_png(console.framebuffer(), path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("screenshot: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "screenshot"))]
fn save_screenshot(_console: &Console, path: &std::path::Path) -> Result<()> {
    anyhow::bail!(
        "cannot write {}: built without the `screenshot` feature",
        path.display()
    )
}
