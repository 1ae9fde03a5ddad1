//! Main CLI interface to the Tempo engine.
//!
//! Usage: `tempo [FEN] [MILLIS]`
//!
//! Searches the given position (the standard starting position when no FEN
//! is provided) for up to MILLIS milliseconds (default 1000) and prints the
//! selected move in coordinate notation.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use tempo_engine::error::{self, Error, ErrorKind};
use tempo_engine::timeman::Mode;
use tempo_engine::{Engine, Position};

const DEFAULT_MOVETIME: Duration = Duration::from_millis(1000);

fn main() -> ExitCode {
    env_logger::init();

    match run(env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: impl Iterator<Item = String>) -> error::Result<()> {
    let mut position = match args.next() {
        Some(fen) => Position::parse_fen(&fen)?,
        None => Position::start_position(),
    };

    let movetime = match args.next() {
        Some(millis) => millis
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|err| Error::new(ErrorKind::BadArgument, err))?,
        None => DEFAULT_MOVETIME,
    };

    let mut engine = Engine::new();
    let result = engine.search(&mut position, Mode::movetime(movetime));

    if result.best_move.is_none() {
        println!("(none)");
    } else {
        println!("{}", result.best_move);
    }
    Ok(())
}
