use apple2_core::bus::LanguageCardKind;
use apple2_core::constants::disk2::{NIBBLES_PER_TRACK, TRACK_COUNT};
use apple2_core::machine::Machine;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a ROM (and optionally a slot-6 PROM and a disk image), reset the
    /// machine, run it for a number of cycles, and print the final register
    /// state. Useful for smoke-testing a ROM dump against this crate without
    /// writing a throwaway host.
    Run(RunArgs),
    /// Print basic geometry info about a raw `.nib` disk image.
    InspectDisk(InspectDiskArgs),
}

#[derive(Parser)]
struct RunArgs {
    /// Path to a 12 KiB system ROM image.
    #[arg(long)]
    rom: PathBuf,
    /// Path to the 256-byte slot-6 Disk II boot PROM.
    #[arg(long)]
    prom: Option<PathBuf>,
    /// Path to a raw `.nib` image to load into drive 1.
    #[arg(long)]
    disk: Option<PathBuf>,
    /// Install the 16 KiB Language Card.
    #[arg(long)]
    language_card: bool,
    /// Number of cycles to run before stopping.
    #[arg(long, default_value_t = 1_000_000)]
    cycles: u64,
}

#[derive(Parser)]
struct InspectDiskArgs {
    /// Path to a raw `.nib` image.
    path: PathBuf,
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::InspectDisk(args) => inspect_disk(args),
    }
}

fn run(args: RunArgs) -> Result<(), String> {
    let language_card_kind = if args.language_card {
        LanguageCardKind::Card16k
    } else {
        LanguageCardKind::None
    };
    let mut machine = Machine::new(language_card_kind);

    let rom = apple2_media::load_rom_file(&args.rom).map_err(|e| e.to_string())?;
    machine.load_rom(rom);

    if let Some(prom_path) = &args.prom {
        let prom = apple2_media::load_slot6_prom_file(prom_path).map_err(|e| e.to_string())?;
        machine.load_slot6_prom(prom);
    }

    if let Some(disk_path) = &args.disk {
        let nibbles = apple2_media::load_nib_file(disk_path).map_err(|e| e.to_string())?;
        machine.load_disk(0, nibbles, true);
    }

    machine.reset();
    machine.exec(args.cycles);

    println!(
        "pc={:#06x} a={:#04x} x={:#04x} y={:#04x} s={:#04x} p={:#010b} cycles={}",
        machine.cpu.pc,
        machine.cpu.a,
        machine.cpu.x,
        machine.cpu.y,
        machine.cpu.s,
        machine.cpu.p,
        machine.cpu.cycles
    );

    Ok(())
}

fn inspect_disk(args: InspectDiskArgs) -> Result<(), String> {
    let nibbles = apple2_media::load_nib_file(&args.path).map_err(|e| e.to_string())?;
    println!("tracks: {}", TRACK_COUNT);
    println!("nibbles per track: {:#x}", NIBBLES_PER_TRACK);
    println!("image size: {} bytes", nibbles.len());
    Ok(())
}
