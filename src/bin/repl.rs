use clap::Parser;
use dice_hist::{Config, MarkdownStringifier, Model, RollContext, Roller, View};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;

#[derive(Parser)]
#[command(author, version, about = "Roll dice pool expressions and show their distribution")]
struct Cli {
    /// Largest combination count a sub-pool enumerates exactly
    #[arg(long, value_name = "INT", default_value_t = Config::DEFAULT_EXACT_CUTOFF)]
    cutoff: u64,

    /// Simulated rolls for sub-pools above the cutoff
    #[arg(long, value_name = "INT", default_value_t = Config::DEFAULT_SAMPLES)]
    samples: NonZeroUsize,

    /// Widest range of sums computed exactly
    #[arg(long, value_name = "INT", default_value_t = Config::DEFAULT_MAX_SUPPORT)]
    max_support: u64,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Print the distribution of every expression
    #[arg(long)]
    histogram: bool,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = Config::new(cli.cutoff, cli.samples).with_max_support(cli.max_support);
    match cli.seed {
        Some(seed) => run(&cli, RollContext::new(config, StdRng::seed_from_u64(seed))),
        None => run(&cli, RollContext::new(config, rand::thread_rng())),
    }
}

fn run<R: Roller>(cli: &Cli, mut ctx: RollContext<R>) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut stringifier = MarkdownStringifier::new();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match dice_hist::parse_expression(&line) {
                Ok(expr) => {
                    let pool = &expr.pool;
                    match expr.comment {
                        Some(comment) => println!("{} ; {}", pool.textual_form(), comment),
                        None => println!("{}", pool.textual_form()),
                    }
                    let outcome = ctx.roll(pool);
                    println!("{}", stringifier.result(&outcome));
                    if cli.histogram {
                        match ctx.distribution(pool) {
                            Ok(dist) => print_histogram(&dist),
                            Err(why) => eprintln!("Error: {}", why),
                        }
                    }
                }
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn print_histogram(dist: &dice_hist::Distribution) {
    let exactness = if dist.is_exact() { "exact" } else { "approximate" };
    println!(
        "mean {:.3}, std {:.3} ({})",
        dist.mean(),
        dist.std_dev(),
        exactness
    );
    print!("{:>6}", "sum");
    for view in View::ALL {
        print!(" {:>9}", view.as_str());
    }
    println!();
    for &k in dist.sums() {
        print!("{:>6}", k);
        for view in View::ALL {
            print!(" {:>8.3}%", 100.0 * dist.probability(view, k));
        }
        println!();
    }
}
