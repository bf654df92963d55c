use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "fti",
    version,
    about = "Validate fuel provider configurations and preview imported transactions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// List the providers defined in a configuration file.
    Providers {
        config: PathBuf,
    },
    /// Validate one provider's configuration.
    Validate {
        config: PathBuf,
        #[arg(long)]
        provider: String,
        #[command(flatten)]
        catalogs: commands::CatalogArgs,
    },
    /// Check a date/time pattern against the format grammar.
    CheckFormat {
        pattern: String,
        /// JSON file with condition1..condition5 messages.
        #[arg(long, value_name = "PATH")]
        format_messages: Option<PathBuf>,
    },
    /// Validate a provider, normalize a CSV export and print its rows as JSON.
    Preview {
        config: PathBuf,
        table: PathBuf,
        #[arg(long)]
        provider: String,
        #[command(flatten)]
        catalogs: commands::CatalogArgs,
        #[command(flatten)]
        table_args: commands::TableArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut out = std::io::stdout().lock();
    let result = match cli.command {
        Command::Providers { config } => commands::list_providers(&config, &mut out),
        Command::Validate {
            config,
            provider,
            catalogs,
        } => commands::validate(&config, &provider, &catalogs, &mut out),
        Command::CheckFormat {
            pattern,
            format_messages,
        } => commands::check_format(&pattern, format_messages.as_deref(), &mut out),
        Command::Preview {
            config,
            table,
            provider,
            catalogs,
            table_args,
        } => commands::preview(
            &config,
            &provider,
            &table,
            &catalogs,
            &table_args,
            &mut out,
        ),
    };

    drop(out);

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
