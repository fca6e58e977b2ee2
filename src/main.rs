use clap::Parser;
use saltbox::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt {
            ref path,
            discard_archive,
        } => saltbox::cli::commands::encrypt::execute(path, discard_archive),
        Commands::Decrypt { ref path } => saltbox::cli::commands::decrypt::execute(path),
        Commands::Pack { ref path } => saltbox::cli::commands::pack::execute(path),
        Commands::Unpack { ref path } => saltbox::cli::commands::unpack::execute(path),
        Commands::Inspect { ref path } => saltbox::cli::commands::inspect::execute(path),
        Commands::Completions { ref shell } => saltbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        saltbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
