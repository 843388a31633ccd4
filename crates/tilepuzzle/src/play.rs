//! Interactive game in the terminal.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use eyre::{Result, eyre};
use itertools::Itertools;
use serde_json::Value;
use tilepuzzle_core::{
    ProfileRecord, PuzzleEvent, PuzzleState, ResourceProvider, SolvePhase, SolveTransition,
};

const INTRO: &str = "\
Let's Play!
Solve the puzzle by moving each tile to its correct position. Solving the
puzzle unlocks the profiles behind the tiles. Type `new` to start, or `skip`
if you don't want to play.";
const SOLVED: &str = "Great Job!";
const SKIPPED: &str = "Next Step";
const UNLOCKED: &str = "Type `flip <position>` to read the profile behind a tile.";
const HELP: &str = "\
Commands:
  new              start a new game
  skip             skip the puzzle and unlock the profiles
  move <from> <to> move the tile at one position to another
  flip <position>  show the profile behind a tile (once solved)
  show             show the tiles
  again            play again
  quit             exit";

/// Number of tiles per row when rendering the board.
const COLUMNS: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Command {
    NewGame,
    Skip,
    Move { from: usize, to: usize },
    Flip(usize),
    Show,
    PlayAgain,
    Help,
    Quit,
}
impl FromStr for Command {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let words = s.split_whitespace().collect_vec();
        match words.as_slice() {
            ["new" | "ok"] => Ok(Command::NewGame),
            ["skip"] => Ok(Command::Skip),
            ["move", from, to] => Ok(Command::Move {
                from: parse_position(from)?,
                to: parse_position(to)?,
            }),
            ["flip", position] => Ok(Command::Flip(parse_position(position)?)),
            ["show"] => Ok(Command::Show),
            ["again"] => Ok(Command::PlayAgain),
            ["help" | "?"] => Ok(Command::Help),
            ["quit" | "exit" | "q"] => Ok(Command::Quit),
            _ => Err(eyre!("unknown command {s:?}; type `help` for a list of commands")),
        }
    }
}

/// Parses a 1-based position typed by the user into a 0-based index.
fn parse_position(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(eyre!("invalid position {s:?}")),
    }
}

/// Runs the game, reading commands from `input` until it ends or the user
/// quits.
pub fn run<R: ResourceProvider>(
    puzzle: &mut PuzzleState<R>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    let events = Rc::new(RefCell::new(vec![]));
    let events_ref = Rc::clone(&events);
    puzzle.subscribe(move |event| events_ref.borrow_mut().push(event.clone()));

    writeln!(out, "{INTRO}")?;

    for line in input.lines() {
        let line = line?;
        puzzle.poll_profiles();
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::NewGame => {
                puzzle.new_game();
                write_board(puzzle, &mut out)?;
            }
            Command::Skip => {
                puzzle.skip();
                write_board(puzzle, &mut out)?;
            }
            Command::Move { from, to } => {
                if puzzle.phase() == SolvePhase::Empty {
                    writeln!(out, "Type `new` to start a game first.")?;
                    continue;
                }
                match puzzle.try_move_tile(from, to) {
                    Ok(()) => {
                        if puzzle.evaluate_solved() == SolveTransition::Unchanged {
                            write_board(puzzle, &mut out)?;
                        }
                    }
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            Command::Flip(position) => {
                if !puzzle.can_flip(position) {
                    writeln!(out, "That tile can't be flipped until the puzzle is solved.")?;
                    continue;
                }
                puzzle.wait_for_profiles();
                write_profile(position, puzzle.profile_at(position), &mut out)?;
            }
            Command::Show => write_board(puzzle, &mut out)?,
            Command::PlayAgain => {
                puzzle.reset();
                writeln!(out, "{INTRO}")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }

        for event in events.borrow_mut().drain(..) {
            match event {
                PuzzleEvent::SolvedChanged(true) => {
                    let title = match puzzle.phase() {
                        SolvePhase::Bypassed => SKIPPED,
                        _ => SOLVED,
                    };
                    writeln!(out, "{title}\n{UNLOCKED}")?;
                }
                PuzzleEvent::SolvedChanged(false) => (),
                PuzzleEvent::ProfilesUpdated(profiles) => {
                    log::debug!("{} profiles available", profiles.len());
                }
            }
        }
    }

    Ok(())
}

fn write_board<R: ResourceProvider>(puzzle: &PuzzleState<R>, out: &mut impl Write) -> Result<()> {
    if puzzle.is_empty() {
        writeln!(out, "(no tiles)")?;
        return Ok(());
    }
    let cells = puzzle
        .tiles()
        .enumerate()
        .map(|(i, tile)| format!("{}:[{}]", i + 1, tile.name))
        .collect_vec();
    for row in cells.chunks(COLUMNS) {
        writeln!(out, "{}", row.join("  "))?;
    }
    Ok(())
}

fn write_profile(
    position: usize,
    profile: Option<&ProfileRecord>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(profile) = profile.filter(|p| !p.placeholder) else {
        writeln!(out, "Tile {}: no profile", position + 1)?;
        return Ok(());
    };
    writeln!(out, "{} ({})", profile.name, profile.platform)?;
    writeln!(out, "{}", profile.location_name)?;
    if !profile.location_details.is_empty() {
        writeln!(out, "{}", profile.location_details)?;
    }
    for (key, value) in &profile.extra {
        match value {
            Value::String(s) => writeln!(out, "  {key}: {s}")?,
            other => writeln!(out, "  {key}: {other}")?,
        }
    }
    Ok(())
}
