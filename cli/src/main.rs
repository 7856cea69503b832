use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use sapper_core::{Level, MineField, SeededSource};

mod command;
mod config;
mod render;

use command::Command;
use config::{Args, Settings};

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = Settings::resolve(&args)?;
    log::debug!("settings: {:?}", settings);

    run(&settings, io::stdin().lock(), io::stdout().lock())
}

/// Plays one session, reading commands from `input` until it ends or `q` is entered.
fn run(settings: &Settings, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let game = settings.game;
    let mut rng = SeededSource::new(settings.seed);
    let mut field = MineField::from_config(&game, &mut rng)?;

    writeln!(out, "{} game, seed {}, type ? for help", Level::of(&game), rng.seed())?;
    render::board(&mut out, &field)?;

    for line in input.lines() {
        let line = line?;
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", command::HELP)?;
                continue;
            }
            Command::NewGame => {
                let events = field.regenerate(game.rows, game.cols, game.mines, &mut rng)?;
                render::events(&mut out, &events)?;
            }
            Command::Play(actions) => {
                for action in actions {
                    log::trace!("apply {:?}", action);
                    match field.apply(action) {
                        Ok(events) => render::events(&mut out, &events)?,
                        Err(err) => {
                            writeln!(out, "{err} at {:?}", action.coords())?;
                            break;
                        }
                    }
                }
            }
        }
        render::board(&mut out, &field)?;
    }

    out.flush()?;
    Ok(())
}
