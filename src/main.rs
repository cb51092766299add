use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use slide_2048::autoplay::Autoplay;
use slide_2048::config::Config;
use slide_2048::game::Game;
use slide_2048::input::Command;
use slide_2048::lookahead::Lookahead;
use slide_2048::store::{FileStore, Persistence};

const DEFAULT_STATE_DIR: &str = ".slide-2048";

#[derive(Parser, Debug)]
#[command(name = "slide-2048", about = "2048 in the terminal, with a lookahead advisor")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the saved game and best score (default .slide-2048)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Seed for tile spawns; the advisor uses seed + 1
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play interactively: type left/right/up/down (or h/j/k/l, w/a/s/d), hint, new, quit
    Play,
    /// Let the lookahead play the saved game
    Auto {
        /// Moves to play (default from config, 10)
        #[arg(long)]
        rounds: Option<u32>,
        /// Lookahead depth (default from config, 5)
        #[arg(long)]
        depth: Option<u32>,
        /// Pause between moves in milliseconds (default from config, 260)
        #[arg(long)]
        pace_ms: Option<u64>,
        /// Suppress the spinner and per-move boards
        #[arg(long)]
        quiet: bool,
    },
    /// Print the recommended move for the saved game
    Hint {
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Discard the saved game; the best score is kept
    Reset,
    /// Print the saved game
    Show,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let mut session = Session::open(&args)?;

    match args.cmd {
        Cmd::Play => play(&mut session),
        Cmd::Auto { rounds, depth, pace_ms, quiet } => auto(&mut session, rounds, depth, pace_ms, quiet),
        Cmd::Hint { depth } => {
            let game = session.load_game()?;
            println!("{}", game);
            match session.advisor(depth).advise(&game) {
                Some(d) => println!("hint: {} (projected score {})", d.direction, d.projected_score),
                None => println!("no move changes the board"),
            }
            Ok(())
        }
        Cmd::Reset => {
            session.persistence.clear_game()?;
            println!("saved game discarded, best score {}", session.persistence.load_highest_score());
            Ok(())
        }
        Cmd::Show => {
            println!("{}", session.load_game()?);
            Ok(())
        }
    }
}

/// Resolved settings plus the on-disk store.
struct Session {
    cfg: Config,
    seed: Option<u64>,
    persistence: Persistence<FileStore>,
}

impl Session {
    fn open(args: &Args) -> anyhow::Result<Self> {
        let cfg = match &args.config {
            Some(path) => Config::from_toml(path).with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        let dir = args
            .state_dir
            .clone()
            .or_else(|| cfg.storage.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        let store = FileStore::open(&dir).with_context(|| format!("opening state dir {}", dir.display()))?;
        info!("state dir {}", dir.display());
        let seed = args.seed.or(cfg.seed);
        Ok(Self { cfg, seed, persistence: Persistence::new(store) })
    }

    /// The saved game, or a fresh one when nothing usable is stored.
    fn load_game(&self) -> anyhow::Result<Game> {
        let best = self.persistence.load_highest_score();
        if let Some(snapshot) = self.persistence.load_game() {
            match Game::from_snapshot(&snapshot, best, self.seed) {
                Ok(game) => return Ok(game),
                Err(e) => warn!("saved game rejected, starting fresh: {}", e),
            }
        }
        let size = self.cfg.board_size;
        let game = match self.seed {
            Some(seed) => Game::seeded(size, seed)?,
            None => Game::new(size)?,
        };
        Ok(game.with_highest_score(best))
    }

    fn advisor(&self, depth: Option<u32>) -> Lookahead {
        let mut cfg = self.cfg.lookahead_config();
        if let Some(d) = depth {
            cfg.depth = d;
        }
        match self.seed {
            Some(seed) => Lookahead::seeded(cfg, seed.wrapping_add(1)),
            None => Lookahead::with_config(cfg),
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn play(session: &mut Session) -> anyhow::Result<()> {
    let mut game = session.load_game()?;
    let mut advisor = session.advisor(None);
    println!("{}", game);
    prompt()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Hint) => match advisor.advise(&game) {
                Some(d) => println!("hint: {} (projected score {})", d.direction, d.projected_score),
                None => println!("no move changes the board"),
            },
            Ok(Command::NewGame) => {
                game.new_game();
                session.persistence.record(&game)?;
                println!("{}", game);
            }
            Ok(Command::Move(dir)) => {
                let result = game.advance(dir);
                if result.changed() {
                    session.persistence.record(&game)?;
                    println!("{}", game);
                } else {
                    println!("{} moves nothing", dir);
                }
                if result.game_over {
                    println!("game over, type `new` to start again");
                }
            }
            Err(e) => println!("{} (try left/right/up/down, hint, new, quit)", e),
        }
        prompt()?;
    }
    Ok(())
}

fn spinner() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {elapsed_precise} | Moves: {msg}")?
            .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

fn auto(
    session: &mut Session,
    rounds: Option<u32>,
    depth: Option<u32>,
    pace_ms: Option<u64>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut game = session.load_game()?;
    if game.is_over() {
        info!("saved game is over, starting a new one");
        game.new_game();
    }
    let rounds = rounds.unwrap_or(session.cfg.autoplay.rounds);
    let pace = pace_ms.map(Duration::from_millis).unwrap_or_else(|| session.cfg.pace());
    let mut driver = Autoplay::new(session.advisor(depth), rounds, pace);

    let pb = if quiet { None } else { Some(spinner()?) };
    let persistence = &mut session.persistence;
    let mut save_error = None;
    let report = driver.run(&mut game, |g, d, _| {
        if let Some(pb) = &pb {
            pb.println(format!("{}\n", g));
            pb.set_message(format!("{} | last: {} | score: {}", g.steps(), d.direction, g.score()));
        }
        if save_error.is_none() {
            if let Err(e) = persistence.record(g) {
                save_error = Some(e);
            }
        }
    });
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if let Some(e) = save_error {
        return Err(e).context("saving game during autoplay");
    }

    println!("{}", game);
    println!(
        "stopped ({:?}) after {} rounds | score: {} | highest tile: {}",
        report.stop,
        report.rounds_played,
        report.final_score,
        game.highest_tile()
    );
    Ok(())
}
