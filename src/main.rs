//! Tank Duel - headless native runner
//!
//! Plays autopilot matches through the same session, ledger and scene code a
//! windowed build uses, then prints the ranking.
//!
//! ```text
//! tank-duel [--difficulty easy|medium|hard] [--seed N] [--matches N]
//!           [--names BLUE GREEN] [--settings PATH] [--max-ticks N]
//!           [--write-settings]
//! ```

use std::process::ExitCode;

use tank_duel::consts::{FPS, SIM_DT};
use tank_duel::renderer::{CommandList, TankSprite};
use tank_duel::settings::SETTINGS_PATH;
use tank_duel::sim::{Difficulty, TankSlot, TickInput, autopilot};
use tank_duel::{ScoreLedger, Session, Settings};

/// Give up on a match after ten simulated minutes
const DEFAULT_MAX_TICKS: u64 = 10 * 60 * FPS as u64;

#[derive(Debug)]
struct Options {
    difficulty: Option<Difficulty>,
    seed: u64,
    matches: u64,
    names: Option<[String; 2]>,
    settings_path: String,
    max_ticks: u64,
    write_settings: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            difficulty: None,
            seed: 0x5eed,
            matches: 1,
            names: None,
            settings_path: SETTINGS_PATH.to_string(),
            max_ticks: DEFAULT_MAX_TICKS,
            write_settings: false,
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--difficulty" => {
                let v = value("--difficulty")?;
                let difficulty =
                    Difficulty::from_str(&v).ok_or_else(|| format!("unknown difficulty {:?}", v))?;
                opts.difficulty = Some(difficulty);
            }
            "--seed" => opts.seed = parse_number("--seed", &value("--seed")?)?,
            "--matches" => opts.matches = parse_number("--matches", &value("--matches")?)?,
            "--max-ticks" => opts.max_ticks = parse_number("--max-ticks", &value("--max-ticks")?)?,
            "--settings" => opts.settings_path = value("--settings")?,
            "--names" => {
                let blue = value("--names")?;
                let green = value("--names")?;
                opts.names = Some([blue, green]);
            }
            "--write-settings" => opts.write_settings = true,
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(opts)
}

fn parse_number(flag: &str, v: &str) -> Result<u64, String> {
    v.parse().map_err(|_| format!("{} expects a number, got {:?}", flag, v))
}

/// Drive one match to completion (or the tick limit); true if it finished
fn run_match(session: &mut Session, canvas: &mut CommandList, max_ticks: u64) -> bool {
    while !session.state.is_finished() && session.state.time_ticks < max_ticks {
        let input = TickInput::new(
            autopilot(&session.state, TankSlot::Blue),
            autopilot(&session.state, TankSlot::Green),
        );
        canvas.reset();
        session.frame(SIM_DT, &input, canvas);
    }
    session.state.is_finished()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("tank-duel: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load_from(&opts.settings_path);
    if let Some(difficulty) = opts.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(names) = opts.names.clone() {
        settings.player_names = names;
        settings.sanitize();
    }
    if opts.write_settings {
        if let Err(e) = settings.save_to(&opts.settings_path) {
            log::error!("{:#}", e);
        }
    }

    log::info!(
        "Tank Duel starting: {} match(es) on {}",
        opts.matches,
        settings.difficulty.as_str()
    );

    let sprites = TankSprite::load_defaults(".");
    let mut canvas = CommandList::new();
    for round in 0..opts.matches {
        let mut session = Session::new(opts.seed.wrapping_add(round), &settings, sprites.clone());
        if run_match(&mut session, &mut canvas, opts.max_ticks) {
            let banner = canvas.texts().find(|t| t.ends_with("Wins!") || *t == "Draw!");
            log::info!(
                "Match {} over after {} ticks: {}",
                round + 1,
                session.state.time_ticks,
                banner.unwrap_or("?")
            );
        } else {
            log::warn!(
                "Match {} hit the {} tick limit, not recorded",
                round + 1,
                opts.max_ticks
            );
        }
    }

    let ledger = ScoreLedger::load(&settings.ledger_path);
    println!("Ranking ({}):", settings.ledger_path);
    for (i, (name, record)) in ledger.ranking().iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>5} pts  net {}",
            i + 1,
            name,
            record.rank_points,
            record.net_score
        );
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let opts = parse_args(args(&[
            "--difficulty",
            "hard",
            "--seed",
            "9",
            "--names",
            "Alice",
            "Bob",
            "--matches",
            "3",
        ]))
        .unwrap();
        assert_eq!(opts.difficulty, Some(Difficulty::Hard));
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.matches, 3);
        assert_eq!(opts.names, Some(["Alice".to_string(), "Bob".to_string()]));
        assert_eq!(opts.max_ticks, DEFAULT_MAX_TICKS);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--seed", "x"])).is_err());
        assert!(parse_args(args(&["--difficulty", "nightmare"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
