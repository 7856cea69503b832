use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use sapper_core::{CellCount, Coord, GameConfig, Level};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Preset to start from
    #[arg(short, long)]
    pub level: Option<Level>,

    /// Override the number of rows
    #[arg(long)]
    pub rows: Option<Coord>,

    /// Override the number of columns
    #[arg(long)]
    pub cols: Option<Coord>,

    /// Override the number of mines
    #[arg(long)]
    pub mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// TOML file with the same keys, flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Contents of the optional config file.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub level: Option<Level>,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub game: GameConfig,
    pub seed: u64,
}

impl Settings {
    pub fn resolve(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: &Args, file: FileConfig) -> Result<Self> {
        let level = args.level.or(file.level).unwrap_or(Level::Easy);
        let preset = level.config();

        let game = GameConfig::new(
            args.rows.or(file.rows).unwrap_or(preset.rows),
            args.cols.or(file.cols).unwrap_or(preset.cols),
            args.mines.or(file.mines).unwrap_or(preset.mines),
        );
        game.validate().with_context(|| format!("Invalid game configuration {game:?}"))?;

        let seed = args.seed.or(file.seed).unwrap_or_else(clock_seed);
        Ok(Self { game, seed })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
