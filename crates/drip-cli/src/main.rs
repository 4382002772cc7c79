//! Interactive coffee maker binary.
//!
//! Wires a [`CoffeeMaker`] to stdin: loads `drip-config.yaml` (falling
//! back to defaults when absent), starts the clock, and reads one
//! command per line until `quit` or end of input.
//!
//! # Startup sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `drip-config.yaml`
//! 3. Assemble the coffee maker and start the clock
//! 4. Read commands from stdin until `quit`

mod error;

use std::path::Path;

use drip_core::config::BrewConfig;
use drip_core::maker::{CoffeeMaker, PotHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// One line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Add cups of water to the reservoir.
    Fill(u32),
    /// Press the brew button.
    Brew,
    /// Print the appliance state.
    Status,
    /// Pour cups of coffee out of the removed pot.
    Pour(u32),
    /// Take the pot off the warmer plate.
    Remove,
    /// Put the pot back on the warmer plate.
    Replace,
    /// Print the command list.
    Help,
    /// Stop the clock and exit.
    Quit,
}

/// Parse one input line into a [`Command`].
///
/// Errors are human-readable strings destined straight for the terminal.
fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(String::from("empty command; try 'help'"));
    };

    let parse_cups = |words: &mut std::str::SplitWhitespace<'_>| {
        words
            .next()
            .ok_or_else(|| format!("'{verb}' needs a number of cups"))?
            .parse::<u32>()
            .map_err(|e| format!("'{verb}' needs a whole number of cups: {e}"))
    };

    let command = match verb {
        "fill" => Command::Fill(parse_cups(&mut words)?),
        "pour" => Command::Pour(parse_cups(&mut words)?),
        "brew" => Command::Brew,
        "status" => Command::Status,
        "remove" => Command::Remove,
        "replace" => Command::Replace,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'; try 'help'")),
    };

    if words.next().is_some() {
        return Err(format!("too many arguments for '{verb}'"));
    }
    Ok(command)
}

/// Print the command list.
fn print_help() {
    println!("commands:");
    println!("  fill <cups>    add water to the reservoir");
    println!("  brew           press the brew button (press again to cancel)");
    println!("  status         show water, coffee, and plate state");
    println!("  remove         take the pot off the warmer plate");
    println!("  pour <cups>    pour coffee out of the removed pot");
    println!("  replace        put the pot back on the warmer plate");
    println!("  quit           stop the clock and exit");
}

/// Print the appliance state in one line per component.
fn print_status(maker: &CoffeeMaker, held: Option<&PotHandle>) {
    let water = maker.cups_of_water();
    let capacity = maker.max_water_capacity_cups();
    let coffee = maker.cups_of_coffee();
    println!("reservoir:    {water}/{capacity} cups of water");
    println!("coffee pot:   {coffee} cups of coffee");
    println!(
        "brewing:      {}",
        if maker.is_brewing() { "yes" } else { "no" }
    );
    println!(
        "warmer plate: {}",
        if maker.is_warmer_plate_on() {
            "hot"
        } else {
            "cold"
        }
    );
    if held.is_some() {
        println!("pot:          in your hand");
    }
}

/// Apply one command to the maker, printing the outcome.
///
/// Returns `false` once the user asks to quit.
fn apply_command(
    maker: &CoffeeMaker,
    held: &mut Option<PotHandle>,
    command: Command,
) -> bool {
    match command {
        Command::Fill(cups) => match maker.fill(cups) {
            Ok(()) => println!("filled {cups} cups of water"),
            Err(e) => println!("{e}"),
        },
        Command::Brew => {
            maker.press_brew_button();
            println!("brew button pressed");
        }
        Command::Status => print_status(maker, held.as_ref()),
        Command::Pour(cups) => match held.as_ref() {
            Some(pot) => {
                pot.pour_out(cups);
                let remaining = pot.cups_of_coffee();
                println!("poured; {remaining} cups of coffee left in the pot");
            }
            None => println!("remove the pot before pouring"),
        },
        Command::Remove => match maker.remove_pot() {
            Ok(pot) => {
                println!("pot removed ({} cups of coffee)", pot.cups_of_coffee());
                *held = Some(pot);
            }
            Err(e) => println!("{e}"),
        },
        Command::Replace => match maker.replace_pot() {
            Ok(()) => {
                *held = None;
                println!("pot replaced");
            }
            Err(e) => println!("{e}"),
        },
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

/// Load configuration from `drip-config.yaml`, falling back to defaults
/// when the file does not exist.
fn load_config() -> Result<BrewConfig, CliError> {
    let config_path = Path::new("drip-config.yaml");
    if config_path.exists() {
        let config = BrewConfig::from_file(config_path)?;
        config.validate()?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(BrewConfig::default())
    }
}

/// Application entry point for the coffee maker.
///
/// # Errors
///
/// Returns an error if configuration loading or stdin reading fails.
#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    let config = load_config()?;
    info!(
        tick_delay = config.clock.tick_delay,
        tick_unit = ?config.clock.tick_unit,
        pot_capacity = config.pot.max_capacity_cups,
        brew_rate = config.reservoir.cups_per_minute_brew_rate,
        stay_hot_minutes = config.warmer.stay_hot_minutes,
        "Configuration loaded"
    );

    let mut maker = CoffeeMaker::new(&config)?;
    maker.start_clock();
    println!("coffee maker ready; type 'help' for commands");

    let mut held: Option<PotHandle> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(command) => {
                if !apply_command(&maker, &mut held, command) {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
    }

    maker.stop_clock();
    info!("Clock stopped, exiting");
    Ok(())
}
