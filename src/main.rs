use clap::Parser;
use f1_countdown::{RunOptions, run};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "f1-countdown",
    version,
    about = "Next Grand Prix, session times and a live countdown"
)]
struct Cli {
    #[arg(long, help = "Workspace holding config/ and logs/ (default: current directory)")]
    root: Option<PathBuf>,

    #[arg(long, help = "IANA timezone for session times, overriding config/app.json")]
    timezone: Option<String>,

    #[arg(long, help = "Fetch once, print the view and exit")]
    once: bool,
}

fn main() {
    let cli = Cli::parse();
    let options = RunOptions {
        root: cli.root,
        timezone: cli.timezone,
        once: cli.once,
    };

    if let Err(error) = run(options) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
