use smart_remote::{DispatchError, Dispatcher, Home, HomeConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Pick the home layout: explicit path argument, then the per-user file, then the demo
fn load_config() -> Result<HomeConfig, Box<dyn std::error::Error>> {
    if let Some(path) = std::env::args().nth(1) {
        return Ok(HomeConfig::load(PathBuf::from(path))?);
    }

    match HomeConfig::default_path() {
        Some(path) if path.exists() => Ok(HomeConfig::load(path)?),
        _ => {
            tracing::info!("no home layout found, using the demo home");
            Ok(HomeConfig::demo())
        }
    }
}

/// Presses and undos on a remote report problems but never stop the session
fn report(result: Result<(), DispatchError>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "remote operation ignored");
    }
}

fn run_scenario(dispatcher: &mut Dispatcher) {
    for slot in dispatcher.bound_slots() {
        report(dispatcher.press_on(slot));
    }

    report(dispatcher.press_undo());
    report(dispatcher.press_undo());

    if let Some(&last) = dispatcher.bound_slots().last() {
        report(dispatcher.press_on(last));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Smart Remote ===\n");

    let config = load_config()?;
    let mut home = Home::build(&config)?;

    run_scenario(home.dispatcher_mut());

    println!("\nCommand history");
    for line in home.dispatcher().history_report() {
        println!("{}", line);
    }

    Ok(())
}
