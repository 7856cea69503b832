use anyhow::{Context, Result, bail};
use sapper_core::{Action, Coord, Coord2};

pub(crate) const HELP: &str = "\
commands, coordinates are `row col` starting at 0:
  o R C   open a cell (press + release)
  f R C   toggle a flag
  c R C   chord around a revealed cell (press + release)
  p R C   press only          r R C   release the pressed cell
  cp R C  chord press         cm R C  chord drag to a cell
  cr R C  chord release
  n       new game
  ?       this help
  q       quit";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Play(Vec<Action>),
    NewGame,
    Help,
    Quit,
}

pub(crate) fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Play(Vec::new()));
    };

    let command = match verb {
        "q" | "quit" => Command::Quit,
        "n" | "new" => Command::NewGame,
        "?" | "h" | "help" => Command::Help,
        _ => {
            let actions: fn(Coord2) -> Vec<Action> = match verb {
                "o" | "open" => |at| vec![Action::PrimaryPress(at), Action::PrimaryRelease(at)],
                "f" | "flag" => |at| vec![Action::Secondary(at)],
                "c" | "chord" => |at| vec![Action::ChordPress(at), Action::ChordRelease(at)],
                "p" => |at| vec![Action::PrimaryPress(at)],
                "r" => |at| vec![Action::PrimaryRelease(at)],
                "cp" => |at| vec![Action::ChordPress(at)],
                "cm" => |at| vec![Action::ChordMove(at)],
                "cr" => |at| vec![Action::ChordRelease(at)],
                _ => bail!("Unknown command `{verb}`, type ? for help"),
            };
            Command::Play(actions(parse_coords(&mut words)?))
        }
    };

    if words.next().is_some() {
        bail!("Too many arguments for `{verb}`");
    }
    Ok(command)
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |name: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("Missing {name}"))?;
        word.parse().with_context(|| format!("Invalid {name} `{word}`"))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}
