use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use minefield_core::{Command, GameConfig, RandomPlacer, Session, TerminalEvent};

mod clock;
mod input;
mod json;
mod render;

use clock::TickDriver;
use input::Input;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Speak JSON lines on stdin/stdout instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let session = match args.seed {
        Some(seed) => Session::new(GameConfig::CLASSIC, RandomPlacer::seeded(seed)),
        None => Session::classic(),
    };

    if args.json {
        json::run(session, io::stdin().lock(), io::stdout().lock())
    } else {
        run_interactive(session)
    }
}

fn run_interactive(mut session: Session) -> anyhow::Result<()> {
    let ended = Rc::new(Cell::new(None));
    let sink = Rc::clone(&ended);
    session.on_terminal(move |event| sink.set(Some(event)));

    let mut clock = TickDriver::start();
    let mut stdout = io::stdout().lock();
    render::draw(&mut stdout, &session.snapshot())?;
    writeln!(stdout, "{}", input::HELP)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        clock.catch_up(&mut session);

        match input::parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                writeln!(stdout, "{}", input::HELP)?;
                continue;
            }
            Ok(Input::Empty) => {}
            Ok(Input::Command(command)) => {
                session.dispatch(command);
                if matches!(command, Command::NewGame) {
                    clock = TickDriver::start();
                }
            }
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        }

        render::draw(&mut stdout, &session.snapshot())?;
        if let Some(event) = ended.take() {
            let banner = match event {
                TerminalEvent::Won => "Congratulations! You won the game!",
                TerminalEvent::Lost => "Game over",
            };
            writeln!(stdout, "{banner} (n for a new game)")?;
        }
    }

    Ok(())
}
