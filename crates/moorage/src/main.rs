//! `moorctl` - CLI for moorage
//!
//! This binary provides the interactive menu for managing a marina's boat
//! inventory backed by a flat data file.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use moorage::cli::Cli;
use moorage::{init_logging, BoatRegistry, Config, Error};

const MENU_PROMPT: &str = "(I)nventory, (A)dd, (R)emove, (P)ayment, (M)onth, e(X)it : ";
const ADD_PROMPT: &str = "Please enter the boat data in CSV format                 : ";
const NAME_PROMPT: &str = "Please enter the boat name                               : ";
const AMOUNT_PROMPT: &str = "Please enter the amount to be paid                       : ";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // A data file that cannot be opened is fatal: persistence is mandatory
    let mut registry = BoatRegistry::load_path(&cli.data_file, config.registry.capacity)
        .with_context(|| format!("cannot load boat data from {}", cli.data_file.display()))?;

    println!();
    println!("Welcome to the Boat Management System");
    println!("-------------------------------------");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let Some(choice) = menu_choice(&mut input)? else {
            // End of input is treated the same as the exit command
            break;
        };
        match choice.to_ascii_lowercase() {
            'i' => handle_inventory(&registry),
            'a' => handle_add(&mut registry, &mut input)?,
            'r' => handle_remove(&mut registry, &mut input)?,
            'p' => handle_payment(&mut registry, &mut input)?,
            'm' => handle_month(&mut registry, &config),
            'x' => break,
            other => println!("Invalid option {other}\n"),
        }
    }

    println!();
    println!("Exiting the Boat Management System");
    println!();

    // A failed save is reported, not fatal; the program still exits cleanly
    if let Err(err) = registry.save_path(&cli.data_file) {
        error!("could not save boat data: {err}");
    }
    Ok(())
}

/// Print `label` and read one line, `None` on end of input.
fn prompt(label: &str, input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompt until a non-blank line arrives, returning its first character.
fn menu_choice(input: &mut impl BufRead) -> io::Result<Option<char>> {
    loop {
        let Some(line) = prompt(MENU_PROMPT, input)? else {
            return Ok(None);
        };
        if let Some(choice) = line.trim().chars().next() {
            return Ok(Some(choice));
        }
    }
}

fn handle_inventory(registry: &BoatRegistry) {
    for boat in registry {
        println!("{boat}");
    }
    println!();
}

fn handle_add(registry: &mut BoatRegistry, input: &mut impl BufRead) -> io::Result<()> {
    if registry.is_full() {
        println!("Marina is full\n");
        return Ok(());
    }
    let Some(line) = prompt(ADD_PROMPT, input)? else {
        return Ok(());
    };
    // A malformed line is dropped without comment, matching the data-file policy
    if let Err(err) = registry.add_line(&line) {
        debug!("rejected add: {err}");
    }
    println!();
    Ok(())
}

fn handle_remove(registry: &mut BoatRegistry, input: &mut impl BufRead) -> io::Result<()> {
    let Some(name) = prompt(NAME_PROMPT, input)? else {
        return Ok(());
    };
    match registry.remove(name.trim()) {
        Ok(_) => println!(),
        Err(_) => println!("No boat with that name\n"),
    }
    Ok(())
}

fn handle_payment(registry: &mut BoatRegistry, input: &mut impl BufRead) -> io::Result<()> {
    let Some(name) = prompt(NAME_PROMPT, input)? else {
        return Ok(());
    };
    let name = name.trim().to_string();
    if registry.find_index(&name).is_none() {
        println!("No boat with that name\n");
        return Ok(());
    }
    let Some(amount) = prompt(AMOUNT_PROMPT, input)? else {
        return Ok(());
    };
    let Ok(amount) = amount.trim().parse::<f64>() else {
        println!("That is not an amount\n");
        return Ok(());
    };
    match registry.make_payment(&name, amount) {
        Ok(_) => println!(),
        Err(Error::OverpaymentRejected { owed, .. }) => {
            println!("That is more than the amount owed, ${owed:.2}\n");
        }
        Err(err) => {
            debug!("payment failed: {err}");
            println!("No boat with that name\n");
        }
    }
    Ok(())
}

fn handle_month(registry: &mut BoatRegistry, config: &Config) {
    registry.accrue_monthly(&config.billing);
    println!();
}
