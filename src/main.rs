use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io::{self, Read};
use std::path::PathBuf;
use yazim::cli::output::{self, OutputFormat};
use yazim::cli::run::{self, RunOptions};
use yazim::{dict, Config};

#[derive(Parser, Debug)]
#[command(name = "yazim")]
#[command(version, about = "A fast Turkish spellchecker", long_about = None)]
struct Cli {
    /// Files or directories to check (stdin when empty)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Fix misspellings in place (auto-apply top suggestion)
    #[arg(short, long)]
    fix: bool,

    /// Interactive mode for selecting corrections
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Cached dictionary to use (e.g., tr_TR)
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Load words from a local wordlist file instead of the cache
    #[arg(long, value_name = "FILE")]
    wordlist: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Add words to personal dictionary
    #[arg(long)]
    add_to_dict: Vec<String>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Personal dictionary file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
    /// Print ranked suggestions for a word
    Suggest {
        word: String,

        /// Number of suggestions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a wordlist and build its cache
    Download {
        /// Dictionary name (e.g., tr_TR)
        name: Option<String>,

        /// Wordlist URL (NDJSON or plain text, optionally .gz)
        #[arg(long)]
        url: Option<String>,
    },
    /// Update all dictionaries
    Update,
    /// Show dictionary info
    Info {
        /// Dictionary name
        name: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "yazim", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(
        cli.dictionary.clone(),
        cli.personal_dict.clone(),
        cli.ignore_pattern.clone(),
    )?;

    if let Some(command) = cli.command {
        return handle_command(command, &config, cli.wordlist.as_deref());
    }

    if !cli.add_to_dict.is_empty() {
        run::add_to_personal(config.personal_dictionary.as_deref(), &cli.add_to_dict)?;
        if cli.files.is_empty() {
            return Ok(());
        }
    }

    let checker = run::build_checker(&config, cli.wordlist.as_deref())?;

    let reports = if cli.files.is_empty() {
        if cli.interactive {
            anyhow::bail!("--interactive needs files; stdin is used for the text itself");
        }
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        vec![run::check_stdin(&checker, content)?]
    } else {
        let files = run::collect_files(&cli.files);
        run::check_files(&checker, &files)?
    };

    let options = RunOptions {
        fix: cli.fix,
        interactive: cli.interactive,
        format: cli.format,
        personal_dictionary: config.personal_dictionary.as_deref(),
    };
    let result = run::process(&reports, &options)?;

    // Exit with appropriate code
    if result.error_count > 0 && !cli.no_fail && !cli.fix {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(
    command: Commands,
    config: &Config,
    wordlist: Option<&std::path::Path>,
) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries()?;
            }
            DictCommands::Download { name, url } => {
                let name = name.unwrap_or_else(|| config.dictionary.clone());
                let url = url.unwrap_or_else(|| config.wordlist_url.clone());
                dict::manager::download_dictionary(&name, &url)?;
            }
            DictCommands::Update => {
                dict::manager::update_dictionaries(&config.wordlist_url)?;
            }
            DictCommands::Info { name } => {
                dict::manager::show_info(name.as_deref().unwrap_or(&config.dictionary))?;
            }
        },
        Commands::Suggest { word, limit } => {
            let checker = run::build_checker(config, wordlist)?;
            let limit = limit.unwrap_or(checker.options().limit);
            if checker.is_valid(&word) {
                println!("{} is spelled correctly", word);
            } else {
                output::print_suggestions(&word, &checker.suggest(&word, limit)?);
            }
        }
    }
    Ok(())
}
