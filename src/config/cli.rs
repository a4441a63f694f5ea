use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tags::Tags;

#[derive(Parser)]
#[command(name = "xtouch")]
#[command(about = "Bridge X11 multi-touch input into an application touch pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// X display to connect to (e.g. ":0")
    #[arg(long, env = "DISPLAY")]
    pub display: Option<String>,

    /// Tags attached to every forwarded touch (comma-separated)
    #[arg(long, value_parser = clap::value_parser!(Tags))]
    pub tags: Option<Tags>,

    /// Poll interval between event drains, in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Surface height used to flip Y coordinates (defaults to the display height)
    #[arg(long)]
    pub surface_height: Option<f64>,

    /// Path to config file
    #[arg(long, env = "XTOUCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump normalized touch events for debugging
    Dump,
}
