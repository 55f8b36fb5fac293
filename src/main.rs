use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use salamandra_lib::app::autoplay::Autopilot;
use salamandra_lib::app::Session;
use salamandra_lib::model::config::{AppConfig, GameMode};
use salamandra_lib::model::persistence::{to_json_pretty, FileStore, SaveGateway};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Directory holding the save slots
    #[arg(long, default_value = "saves", global = true)]
    save_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the autopilot play a number of cycles
    Play {
        #[arg(short = 'n', long, default_value_t = 10)]
        cycles: u32,

        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Overrides the game mode from the config file
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Simulated milliseconds per tick
        #[arg(long, default_value_t = 1000.0)]
        tick_ms: f64,

        /// Give up after this many ticks
        #[arg(long, default_value_t = 1_000_000)]
        max_ticks: u64,

        /// Continue the saved game instead of starting a new lineage
        #[arg(long)]
        resume: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the current save
    Inspect,
    /// Delete the save and the New Game+ record
    Reset,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Normal,
    Trial,
}

fn main() -> Result<()> {
    salamandra_core::init_logging();
    let args = Args::parse();
    let store = FileStore::new(&args.save_dir);

    match args.command {
        Command::Play {
            cycles,
            seed,
            mode,
            tick_ms,
            max_ticks,
            resume,
            json,
        } => {
            let mut config = AppConfig::load_or_default(&args.config)?;
            if let Some(mode) = mode {
                config.game_mode = match mode {
                    Mode::Normal => GameMode::Normal,
                    Mode::Trial => GameMode::Trial,
                };
            }

            let mut session = Session::new(config, store, seed);
            if resume && !session.continue_game() {
                println!("No saved game in {}, starting a new lineage.", args.save_dir);
            }

            let mut autopilot = Autopilot::new(seed.wrapping_add(1), tick_ms);
            let report = autopilot.run(&mut session, cycles, max_ticks);
            session.metrics().log_summary();

            if json {
                println!("{}", to_json_pretty(&report).context("Failed to encode report")?);
            } else {
                println!("Lineage {}", report.lineage_id);
                println!(
                    "  cycles played: {} ({} ticks)",
                    report.cycles_advanced, report.ticks
                );
                println!(
                    "  now: cycle {}, era {}, generation {}, pond {:.0}%",
                    report.final_cycle,
                    report.final_era,
                    report.final_generation,
                    report.final_pond_size
                );
                println!(
                    "  deaths: {}, respawns: {}, siblings lost: {}, predators repelled: {}",
                    report.deaths, report.respawns, report.siblings_lost, report.predators_repelled
                );
                println!(
                    "  albino births: {}, New Game+ unlocks: {}",
                    report.albino_births, report.new_game_plus_unlocks
                );
                if report.game_over {
                    println!("  the lineage has ended");
                }
            }
        }
        Command::Inspect => {
            let gateway = SaveGateway::new(store);
            match gateway.load_game() {
                Some(state) => {
                    println!("{}", to_json_pretty(&state).context("Failed to encode save")?)
                }
                None => println!("No saved game in {}", args.save_dir),
            }
            if let Some(record) = gateway.load_new_game_plus() {
                println!(
                    "New Game+ unlocked at cycle {}, era {}",
                    record.cycle, record.era
                );
            }
        }
        Command::Reset => {
            let mut gateway = SaveGateway::new(store);
            gateway.reset();
            println!("Save slots cleared in {}", args.save_dir);
        }
    }

    Ok(())
}
