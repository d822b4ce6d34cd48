use std::process;

use clap::Parser;

use mkpass::{Generator, Policy};

/// Generate random passwords from a composable set of policies.
///
/// With no class flags, passwords draw on lowercase, uppercase, numbers, and
/// symbols. Selecting one or more classes restricts the output to exactly
/// those; `--custom` replaces the built-in classes entirely.
#[derive(Parser)]
#[command(name = "mkpass", version)]
struct Args {
    /// How many passwords to generate.
    #[arg(default_value_t = 1)]
    count: usize,

    /// Length of each password, in characters.
    #[arg(long, default_value_t = 12)]
    length: usize,

    /// Use uppercase letters.
    #[arg(short = 'u', long)]
    upper: bool,

    /// Use lowercase letters.
    #[arg(short = 'l', long)]
    lower: bool,

    /// Use numbers.
    #[arg(short = 'n', long)]
    number: bool,

    /// Use symbols.
    #[arg(short = 's', long)]
    symbol: bool,

    /// Use a custom character set instead of the built-in classes.
    #[arg(long, conflicts_with_all = ["upper", "lower", "number", "symbol"])]
    custom: Option<String>,

    /// Reject passwords shorter than this many characters.
    #[arg(long)]
    min_length: Option<usize>,

    /// Reject passwords longer than this many characters.
    #[arg(long)]
    max_length: Option<usize>,

    /// Give up after this many rejected candidates instead of retrying
    /// forever.
    #[arg(long)]
    max_attempts: Option<usize>,
}

fn create_policies(args: &Args) -> Vec<Policy> {
    let mut policies = Vec::new();
    if args.upper {
        policies.push(Policy::uppercase());
    }
    if args.lower {
        policies.push(Policy::lowercase());
    }
    if args.number {
        policies.push(Policy::numbers());
    }
    if args.symbol {
        policies.push(Policy::symbols());
    }
    if let Some(custom) = &args.custom {
        policies.push(Policy::custom(custom));
    }
    if let Some(min) = args.min_length {
        policies.push(Policy::min_length(min));
    }
    if let Some(max) = args.max_length {
        policies.push(Policy::max_length(max));
    }
    policies
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let generator = Generator::new(create_policies(&args));

    for _ in 0..args.count {
        let password = match args.max_attempts {
            Some(max_attempts) => generator.generate_bounded(args.length, max_attempts)?,
            None => generator.generate(args.length),
        };
        println!("{}", password);
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
