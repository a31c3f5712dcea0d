use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref account,
            ref site,
            ref password,
        } => passvault::cli::commands::add::execute(&cli, account, site, password.as_deref()),
        Commands::Show { ref account } => passvault::cli::commands::show::execute(&cli, account),
        Commands::Edit {
            ref account,
            ref site,
            ref password,
        } => passvault::cli::commands::edit::execute(&cli, account, site, password.as_deref()),
        Commands::Delete {
            ref account,
            ref site,
            force,
        } => passvault::cli::commands::delete::execute(&cli, account, site, force),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Search { ref query } => passvault::cli::commands::search::execute(&cli, query),
        Commands::Clear { force } => passvault::cli::commands::clear::execute(&cli, force),
        Commands::Completions { ref shell } => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Route store-level diagnostics (e.g. the malformed-vault warning)
/// to stderr; `RUST_LOG` controls verbosity.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
