use clap::Parser;
use colored::Colorize;
use tuning_db::cli::{
    handle_calculate, handle_completions, handle_config_init, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => tuning_db::cli::serve::run_serve(args).await,
        Commands::Calculate(args) => handle_calculate(&args).map(|output| {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
