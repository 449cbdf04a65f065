use clap::Parser;
use prefixtidy::cli::{CliArgs, run_cli};
use prefixtidy::output::OutputFormatter;

fn main() {
    println!("Welcome to prefixtidy - group files by shared name prefix!");

    let args = CliArgs::parse();

    if let Err(e) = run_cli(args) {
        OutputFormatter::error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}
