use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    println!("{}", "Configuration".bold());
    println!("  {} {}", "file:".dimmed(), path.display());
    println!();

    let config = Config::load_or_default();
    let defaults = config.defaults.clone().unwrap_or_default();

    print_key("defaults.theme", defaults.theme.as_deref(), "light");
    print_key(
        "defaults.interval",
        defaults.interval.map(|v| v.to_string()).as_deref(),
        "5000",
    );
    print_key("defaults.start_mode", defaults.start_mode.as_deref(), "auto");
    Ok(())
}

fn print_key(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {} = {}", key.cyan(), v.green()),
        None => println!("  {} = {} {}", key.cyan(), default, "(default)".dimmed()),
    }
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value,
        path.display()
    );
    Ok(())
}
