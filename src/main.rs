use std::env;
use std::io::{self, IsTerminal, Read};
use std::process;

use numwords::{parse_number_with, spell, Config, NumberError, Scale};
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: i32 = 1;
const EXIT_BAD_NUMBER: i32 = 7;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error("{0}")]
    Number(#[from] NumberError),
    #[error("Error unrelated to number format: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

impl HostError {
    fn exit_code(&self) -> i32 {
        match self {
            HostError::Number(_) | HostError::Io(_) => EXIT_BAD_NUMBER,
            HostError::Usage(_) => EXIT_USAGE,
        }
    }
}

enum Mode {
    Parse,
    Spell(String),
}

struct CliArgs {
    mode: Mode,
    max_scale: Option<Scale>,
    color: Option<bool>,
    verbose: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("numwords v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Usage: numwords [options] < phrase.txt");
    eprintln!();
    eprintln!("Reads an English number phrase from standard input and prints its value.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --spell <integer>    Print the English words for an integer instead");
    eprintln!("  --max-scale <word>   Largest scale word accepted (default: million)");
    eprintln!("  --color | --no-color Force colored or plain error reports");
    eprintln!("  -v | --verbose       Debug logging on stderr");
    eprintln!("  -h | --help          Show this message");
}

fn parse_args(args: &[String]) -> Result<CliArgs, HostError> {
    let mut cli = CliArgs {
        mode: Mode::Parse,
        max_scale: None,
        color: None,
        verbose: false,
        help: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--verbose" | "-v" => cli.verbose = true,
            "--help" | "-h" => cli.help = true,
            "--color" => cli.color = Some(true),
            "--no-color" => cli.color = Some(false),
            "--spell" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| HostError::Usage("--spell needs an integer".to_string()))?;
                cli.mode = Mode::Spell(value.clone());
            }
            "--max-scale" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| HostError::Usage("--max-scale needs a scale word".to_string()))?;
                cli.max_scale = Some(value.parse::<Scale>().map_err(HostError::Usage)?);
            }
            other => return Err(HostError::Usage(format!("unknown option '{}'", other))),
        }
        i += 1;
    }

    Ok(cli)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(mode: &Mode, config: &Config) -> Result<String, HostError> {
    match mode {
        Mode::Spell(text) => {
            let n: i64 = text.trim().parse().map_err(|e| {
                HostError::Usage(format!("--spell expects an integer, got '{}': {}", text, e))
            })?;
            Ok(spell(n))
        }
        Mode::Parse => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            tracing::debug!(bytes = input.len(), "read standard input");
            let value = parse_number_with(&input, config.options)?;
            Ok(value.to_string())
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(e.exit_code());
        }
    };

    if cli.help {
        print_usage();
        process::exit(EXIT_USAGE);
    }

    init_logging(cli.verbose);

    let mut config = Config::load();
    if let Some(scale) = cli.max_scale {
        config.options.max_scale = scale;
    }
    // Colors only make sense on a terminal unless explicitly requested
    config.color = match cli.color {
        Some(forced) => forced,
        None => config.color && io::stderr().is_terminal(),
    };
    tracing::debug!(?config, "resolved configuration");

    match run(&cli.mode, &config) {
        Ok(output) => println!("{}", output),
        Err(HostError::Number(e)) => {
            eprint!("{}", e.render(config.color));
            process::exit(EXIT_BAD_NUMBER);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    }
}
