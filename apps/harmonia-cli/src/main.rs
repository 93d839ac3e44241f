mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use harmonia::album::with_extension;
use harmonia::{Album, ChartObject, HarmonicService};
use harmonia_config::{load_config_or_default, AppConfig};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Harmonic resonance analysis of zodiac charts")]
struct Args {
    /// Config file (default: configs/harmonia.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Highest harmonic to examine, overriding the config
    #[arg(long, global = true)]
    edge_harmonic: Option<u32>,

    /// Primary orb is 360 divided by this, overriding the config
    #[arg(long, global = true)]
    orb_divisor: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harmonic patterns for every chart subset
    Patterns {
        #[command(flatten)]
        target: Target,

        /// Per-harmonic detail with point strengths
        #[arg(long)]
        detailed: bool,
    },
    /// Resonating pairs within and between charts
    Aspects {
        #[command(flatten)]
        target: Target,
    },
    /// Charts and multi-charts of an album
    List {
        #[arg(help = "Album file (.daw); defaults to the autoload album")]
        album: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
struct Target {
    #[arg(help = "Album file (.daw); defaults to the autoload album")]
    album: Option<PathBuf>,

    /// Only this chart or multi-chart
    #[arg(long)]
    chart: Option<String>,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    dimension: usize,
    points: usize,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_settings(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = load_config_or_default(args.config.as_deref())?;
    if let Some(edge) = args.edge_harmonic {
        config.resonance.edge_harmonic = edge;
    }
    if let Some(divisor) = args.orb_divisor {
        config.resonance.orb_divisor = divisor;
    }
    config
        .resonance
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {e}"))?;
    debug!("using {:?}", config.resonance);
    Ok(config)
}

fn resolve_album(album: Option<&Path>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    let path = match album {
        Some(p) => p.to_path_buf(),
        None => match config.autoload_album() {
            Some(name) => PathBuf::from(name),
            None => anyhow::bail!("No album given and autoload is disabled"),
        },
    };
    if path.exists() {
        return Ok(path);
    }
    let with_ext = PathBuf::from(with_extension(&path.to_string_lossy()));
    if with_ext.exists() {
        return Ok(with_ext);
    }
    anyhow::bail!("Album not found: {}", path.display());
}

fn selected<'a>(album: &'a Album, chart: Option<&str>) -> anyhow::Result<Vec<&'a ChartObject>> {
    match chart {
        Some(name) => album
            .get(name)
            .map(|object| vec![object])
            .ok_or_else(|| anyhow::anyhow!("No chart '{}' in album '{}'", name, album.name())),
        None => Ok(album.entries().iter().collect()),
    }
}

fn open_album(target: Option<&Path>, config: &AppConfig) -> anyhow::Result<Album> {
    let path = resolve_album(target, config)?;
    let album = Album::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!("album '{}' holds {} entries", album.name(), album.len());
    Ok(album)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_settings(&args)?;
    let mut service = HarmonicService::new(config.resonance);

    match &args.command {
        Command::Patterns { target, detailed } => {
            let album = open_album(target.album.as_deref(), &config)?;
            for object in selected(&album, target.chart.as_deref())? {
                let table = service.pattern_table(object);
                if target.json {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                } else {
                    let matrix = service.matrix_for(object.charts());
                    print!("{}", report::pattern_report(&table, matrix, *detailed));
                }
            }
        }
        Command::Aspects { target } => {
            let album = open_album(target.album.as_deref(), &config)?;
            for object in selected(&album, target.chart.as_deref())? {
                let table = service.aspect_table(object);
                if target.json {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                } else {
                    let matrix = service.matrix_for(object.charts());
                    print!("{}", report::aspect_report(&table, matrix));
                }
            }
        }
        Command::List { album, json } => {
            let album = open_album(album.as_deref(), &config)?;
            let entries: Vec<ListEntry> = album
                .entries()
                .iter()
                .map(|object| ListEntry {
                    name: object.name(),
                    dimension: object.dimension(),
                    points: object.charts().iter().map(|c| c.len()).sum(),
                })
                .collect();
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{} ({} charts, {} points)", entry.name, entry.dimension, entry.points);
                }
            }
        }
    }
    Ok(())
}
