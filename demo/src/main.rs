//! WeCareWell Monitoring Core — Demo CLI
//!
//! Runs one or all of the three demo scenarios. Each scenario wires real
//! components (metric adapter, live update hub, emergency monitor,
//! prescription intake) over the in-memory reference backend with seeded
//! sample data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- vitals
//!   cargo run -p demo -- emergency
//!   cargo run -p demo -- prescription

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wecare_contracts::identity::Role;
use wecare_core::{composer::DashboardComposer, role::resolve_role};

mod sample;
mod scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// WeCareWell — role-based health-monitoring dashboard core demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "WeCareWell monitoring core demo",
    long_about = "Runs WeCareWell demo scenarios showing metric aggregation,\n\
                  live updates, the emergency lifecycle, and prescription intake."
)]
struct Cli {
    /// Email of the signed-in user; the dashboard role is derived from its
    /// domain.
    #[arg(long, default_value = "grandma@gmail.com")]
    email: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: Vitals Dashboard (metric cards, series, live updates, sleep).
    Vitals,
    /// Scenario 2: Emergency Lifecycle (trigger, checklist, resolve, failure path).
    Emergency,
    /// Scenario 3: Prescription Intake (validation, attachment, submission).
    Prescription,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let role = resolve_role(&cli.email);
    let composer = DashboardComposer::new(role);
    println!(
        "Signed in as {} — role {:?}, initial panel {:?}.",
        cli.email,
        composer.role(),
        composer.active_panel()
    );
    if role != Role::Customer {
        println!("Note: only the customer role sees the monitoring tabs; the scenarios");
        println!("below always exercise the customer panels.");
    }
    println!();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Vitals => scenarios::vitals::run_scenario(),
        Command::Emergency => scenarios::emergency::run_scenario(),
        Command::Prescription => scenarios::prescription::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> wecare_contracts::error::WecareResult<()> {
    scenarios::vitals::run_scenario()?;
    scenarios::emergency::run_scenario()?;
    scenarios::prescription::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("WeCareWell — Health Monitoring Core");
    println!("Dashboard Demo");
    println!("===================================");
    println!();
    println!("Data flow per panel:");
    println!("  [1] Role resolver derives the dashboard role from the email domain");
    println!("  [2] Dashboard composer picks the panel for (role, active tab)");
    println!("  [3] Panels query metrics through the store adapter");
    println!("  [4] Live update channel triggers re-fetches on table changes");
    println!("  [5] Emergency button / form submissions mutate backend state");
    println!();
}
