use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::config::{
    Config, Connection, SupabaseSection, load_config, resolve_connection, save_config,
};

fn prompt(label: &str, current: Option<&str>) -> Result<String> {
    match current {
        Some(c) => print!("{} [{}]: ", label, c),
        None => print!("{}: ", label),
    }
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    let s = s.trim().to_string();
    Ok(match (s.is_empty(), current) {
        (true, Some(c)) => c.to_string(),
        _ => s,
    })
}

/// Interactive onboarding: ask for the project URL and anon key, write config.toml.
pub fn run_setup() -> Result<()> {
    println!("LedgerLite setup\n");
    println!("Both values are under Project Settings → API in your Supabase dashboard.\n");

    let existing = load_config()?;
    let url = prompt("Project URL", existing.supabase.url())?;
    let anon_key = prompt("Anon key", existing.supabase.anon_key())?;

    let cfg = Config {
        supabase: SupabaseSection { url, anon_key },
    };
    if let Connection::SetupRequired(decision) = resolve_connection(&cfg) {
        bail!("setup incomplete: missing {}", decision.missing.join(", "));
    }

    let p = save_config(&cfg)?;
    println!("\nWrote {}", p.display());

    println!("\nNext:");
    println!("- ledgerlite                      (show balances, goals, transactions)");
    println!("- ledgerlite add --name Coffee --amount 4.5 --category food");
    println!("- ledgerlite goal add --name \"New Car\" --target 500000");
    Ok(())
}
