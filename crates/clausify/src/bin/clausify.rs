// The clausify CLI.
// Reads a JSON-encoded formula and prints its conjunctive normal form.

use clap::Parser;
use clausify::{ClausifyError, ConversionConfig, Converter, Formula};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(
    name = "clausify",
    about = "Convert a first-order formula to conjunctive normal form"
)]
struct Args {
    /// JSON formula file, or "-" to read stdin
    input: PathBuf,

    /// JSON conversion config (name prefixes, first index)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Print the output of every stage
    #[clap(long, conflicts_with = "clauses")]
    trace: bool,

    /// Print one clause per line instead of the CNF formula
    #[clap(long)]
    clauses: bool,

    /// Emit JSON instead of symbolic text
    #[clap(long)]
    json: bool,
}

fn read_formula(path: &Path) -> Result<Formula, ClausifyError> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn run(args: Args) -> Result<(), ClausifyError> {
    let config = match &args.config {
        Some(path) => ConversionConfig::from_json_file(path)?,
        None => ConversionConfig::default(),
    };
    let formula = read_formula(&args.input)?;
    tracing::info!(size = formula.size(), "read formula");

    let mut converter = Converter::with_config(config);

    if args.trace {
        let trace = converter.convert_traced(formula)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&trace)?);
        } else {
            println!("input: {}", trace.input);
            for (stage, formula) in trace.stages() {
                println!("{}: {}", stage, formula);
            }
        }
    } else if args.clauses {
        let clauses = converter.clausify(formula)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&clauses)?);
        } else {
            print!("{}", clauses);
        }
    } else {
        let cnf = converter.convert(formula)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&cnf)?);
        } else {
            println!("{}", cnf);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
