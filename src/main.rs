use std::process::ExitCode;

use balanced_collatz::stats::{FrequencyTest, RandomnessTest, RunsTest};
use balanced_collatz::{BalancedCollatz, BitSequence, CollatzError, FilterStats, GeneratorConfig};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Secure balanced Collatz bit generator", long_about = None)]
struct Args {
    /// Output length in bits (must be a positive even number)
    #[arg(short, long, default_value_t = 128, env = "BALANCED_COLLATZ_LENGTH")]
    length: usize,

    /// Also print the output packed into hex bytes
    #[arg(long)]
    hex: bool,

    /// Print acceptance and discard counters
    #[arg(long)]
    stats: bool,

    /// Fixed seed as big-endian hex, for reproducible runs (requires --key)
    #[arg(long, value_name = "HEX", requires = "key")]
    seed: Option<String>,

    /// Fixed 32-byte HMAC key as 64 hex digits (requires --seed)
    #[arg(long, value_name = "HEX", requires = "seed")]
    key: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = GeneratorConfig::with_length(args.length);
    if let Err(e) = config.validate() {
        eprintln!("error: {}", e);
        return ExitCode::from(2);
    }

    let fixed = match (&args.seed, &args.key) {
        (Some(seed), Some(key)) => match BalancedCollatz::from_hex_parts(seed, key) {
            Ok(generator) => Some(generator),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(2);
            }
        },
        _ => None,
    };

    match run(&args, &config, fixed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("generation aborted: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(
    args: &Args,
    config: &GeneratorConfig,
    fixed: Option<BalancedCollatz>,
) -> Result<(), CollatzError> {
    let mut generator = match fixed {
        Some(generator) => generator,
        None => BalancedCollatz::new()?,
    };
    info!(length = config.length, "generating balanced sequence");
    let (bits, stats) = generator.generate_with_stats(config.length)?;

    println!("Target length: {}", config.length);
    println!("Generated Secure Output: {}", bits);
    if args.hex {
        println!("Hex: {}", hex::encode(bits.to_bytes()));
    }
    if args.stats {
        print_filter_stats(&stats);
    }
    print_verification(&bits);
    print_tests(&bits, config);
    Ok(())
}

fn print_filter_stats(stats: &FilterStats) {
    println!(
        "Filter: accepted={} discarded={} candidates={}",
        stats.accepted(),
        stats.discarded,
        stats.candidates
    );
}

fn print_verification(bits: &BitSequence) {
    let zeros = bits.zeros();
    let ones = bits.ones();
    println!(
        "Verification: 0s={}, 1s={} - {}",
        zeros,
        ones,
        verdict(zeros == ones)
    );
}

fn print_tests(bits: &BitSequence, config: &GeneratorConfig) {
    let tests: [Box<dyn RandomnessTest>; 2] = [
        Box::new(FrequencyTest::new(config.frequency_critical)),
        Box::new(RunsTest::new(config.runs_z_bound)),
    ];
    for test in &tests {
        match test.evaluate(bits) {
            Ok(outcome) => println!(
                "{} test: statistic={:.4} - {}",
                outcome.name,
                outcome.statistic,
                verdict(outcome.passed)
            ),
            Err(e) => println!("{} test: not evaluated ({})", test.name(), e),
        }
    }
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}
