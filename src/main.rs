use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use toolrack::config::Config;
use toolrack::sim::{self, SimulatedController};
use toolrack::{ControlMode, FLANGE, Robot, Tool, ToolMutation, ToolParams, ToolRegistry};

mod cli;

use cli::{Cli, Commands};

fn setup_logging(level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolrack")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolrack.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.unwrap_or("info")))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    let robot = sim::from_config(config);
    info!(
        "Using simulated controller {} in {} mode",
        robot.serial_number(),
        config.controller.mode
    );

    if cli.is_verbose() {
        println!(
            "{} {} ({} tools seeded)",
            "Controller:".yellow(),
            robot.serial_number(),
            config.tools.len()
        );
    }

    match &cli.command {
        Commands::List => handle_list_command(&robot),
        Commands::Show { name } => handle_show_command(&robot, name.as_deref()),
        Commands::Demo { name } => handle_demo_command(&robot, name),
    }
}

fn print_tool_list(tool: &Tool<'_, SimulatedController>) -> Result<()> {
    let active = tool.current_name()?;
    for (i, name) in tool.list()?.iter().enumerate() {
        if *name == active {
            println!("[{}] {} {}", i, name.green(), "(active)".dimmed());
        } else {
            println!("[{}] {}", i, name);
        }
    }
    Ok(())
}

fn print_params(name: &str, params: &ToolParams) {
    println!("{} {}", "Tool:".green(), name);
    println!("  mass:         {} kg", params.mass);
    println!("  com:          {:?} m", params.com);
    println!("  inertia:      {:?} kg*m^2", params.inertia);
    println!("  tcp position: {:?} m", params.tcp_position());
    println!("  tcp rotation: {:?} (qw, qx, qy, qz)", params.tcp_orientation());
}

fn handle_list_command(robot: &SimulatedController) -> Result<()> {
    info!("Listing tools");
    let tool = Tool::new(robot);
    println!("{}", "All configured tools:".cyan());
    print_tool_list(&tool)
}

fn handle_show_command(robot: &SimulatedController, name: Option<&str>) -> Result<()> {
    info!("Showing tool: {:?}", name);
    let tool = Tool::new(robot);
    match name {
        Some(name) => {
            let params = tool.params_of(name).context(format!("Failed to read tool [{}]", name))?;
            print_params(name, &params);
        }
        None => {
            let name = tool.current_name()?;
            let params = tool.params()?;
            print_params(&name, &params);
        }
    }
    Ok(())
}

fn example_params() -> ToolParams {
    ToolParams::new(
        0.9,
        [0.0, 0.0, 0.057],
        [2.768e-03, 3.149e-03, 5.64e-04, 0.0, 0.0, 0.0],
        [0.0, -0.207, 0.09, 0.7071068, 0.7071068, 0.0, 0.0],
    )
}

fn handle_demo_command(robot: &SimulatedController, name: &str) -> Result<()> {
    info!("Running tool demo with [{}]", name);

    if !robot.control_mode().is_idle() {
        println!("{}", "Switching robot to IDLE mode".yellow());
        robot.set_control_mode(ControlMode::Idle);
    }

    let tool = Tool::new(robot);

    println!("{}", "All configured tools:".cyan());
    print_tool_list(&tool)?;
    println!("{} {}", "Current active tool:".cyan(), tool.current_name()?);

    // Duplicate names are not allowed, so clear out any leftover tool first
    if tool.exists(name)? {
        println!("{} Tool [{}] already exists, removing it now", "Warning:".yellow(), name);
        tool.switch(FLANGE)?;
        tool.remove(name)?;
    }

    println!("{} Adding new tool [{}]", "Demo:".green(), name);
    tool.add(name, &example_params())?;

    println!("{}", "All configured tools:".cyan());
    print_tool_list(&tool)?;

    println!("{} Switching to tool [{}]", "Demo:".green(), name);
    tool.switch(name)?;
    println!("{} {}", "Current active tool:".cyan(), tool.current_name()?);

    tool.switch(FLANGE)?;
    println!("{} Removing tool [{}]", "Demo:".green(), name);
    tool.remove(name)?;

    println!("{}", "Demo finished".green());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    config.log_source();

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
