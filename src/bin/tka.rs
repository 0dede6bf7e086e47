use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tka", version)]
struct Cli {
    /// Log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place every pictograph of a sequence and print arrows and props as JSON.
    Place(PlaceArgs),
    /// Look up the start position for a `<pos>_<pos>` key.
    Start(StartArgs),
    /// Determine the letter spelled by a motion pair.
    Letter(LetterArgs),
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Sequence JSON.
    #[arg(long)]
    sequence: PathBuf,

    /// Special placement table JSON.
    #[arg(long)]
    special: Option<PathBuf>,

    /// Placement config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Place beats on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel` (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StartArgs {
    /// Pictograph dataset CSV for the chosen grid.
    #[arg(long)]
    dataset: PathBuf,

    #[arg(long, value_enum, default_value_t = GridChoice::Diamond)]
    grid: GridChoice,

    /// Position key, e.g. `alpha1_alpha1`.
    key: String,
}

#[derive(Parser, Debug)]
struct LetterArgs {
    /// Pictograph dataset CSV for the chosen grid.
    #[arg(long)]
    dataset: PathBuf,

    #[arg(long, value_enum, default_value_t = GridChoice::Diamond)]
    grid: GridChoice,

    /// JSON file with `blue` and `red` motions.
    #[arg(long)]
    motions: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GridChoice {
    Diamond,
    Box,
}

impl From<GridChoice> for tka::GridMode {
    fn from(value: GridChoice) -> Self {
        match value {
            GridChoice::Diamond => tka::GridMode::Diamond,
            GridChoice::Box => tka::GridMode::Box,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Start(args) => cmd_start(args),
        Command::Letter(args) => cmd_letter(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dataset(path: &Path, grid: tka::GridMode) -> anyhow::Result<tka::PictographDataset> {
    let mut dataset = tka::PictographDataset::new();
    dataset
        .load_csv(grid, path)
        .with_context(|| format!("load dataset '{}'", path.display()))?;
    Ok(dataset)
}

fn read_motions_json(path: &Path) -> anyhow::Result<tka::ColorPair<tka::MotionData>> {
    let f = File::open(path).with_context(|| format!("open motions '{}'", path.display()))?;
    let motions: tka::ColorPair<tka::MotionData> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse motions JSON")?;
    for (color, motion) in motions.iter() {
        motion
            .validate()
            .with_context(|| format!("invalid {color} motion"))?;
    }
    Ok(motions)
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    let Some(path) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let sequence = tka::read_sequence_json(&args.sequence)?;
    let config = match &args.config {
        Some(path) => tka::PlacementConfig::from_path(path)?,
        None => tka::PlacementConfig::default(),
    };
    let special = match &args.special {
        Some(path) => tka::SpecialPlacements::from_path(path)?,
        None => tka::SpecialPlacements::empty(),
    };
    let ctx = tka::PlacementContext::new(config, Arc::new(special))?;
    let threading = tka::BatchThreading {
        parallel: args.parallel,
        threads: args.threads,
    };

    let (beats, stats) = tka::place_sequence(&ctx, &sequence, &threading)?;
    let text = serde_json::to_string_pretty(&beats).context("serialize placements")?;
    write_output(args.out.as_deref(), &text)?;
    eprintln!(
        "placed {}/{} pictographs ({} placeholders)",
        stats.pictographs_placed, stats.pictographs_total, stats.placeholders
    );
    Ok(())
}

fn cmd_start(args: StartArgs) -> anyhow::Result<()> {
    let grid = tka::GridMode::from(args.grid);
    let dataset = load_dataset(&args.dataset, grid)?;
    let pictograph = tka::PictographResolver::new(&dataset)
        .start_position(&args.key, grid)
        .with_context(|| format!("no start position for '{}' on {grid} grid", args.key))?;
    let text = serde_json::to_string_pretty(&pictograph).context("serialize pictograph")?;
    write_output(None, &text)
}

fn cmd_letter(args: LetterArgs) -> anyhow::Result<()> {
    let grid = tka::GridMode::from(args.grid);
    let dataset = load_dataset(&args.dataset, grid)?;
    let motions = read_motions_json(&args.motions)?;
    let letter = tka::PictographResolver::new(&dataset)
        .determine_letter(&motions, grid)
        .context("no letter matches these motions")?;
    println!("{letter}");
    Ok(())
}
