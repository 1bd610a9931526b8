use clap::Parser;
use colored::Colorize;
use ipecho::cli::{Cli, Commands};
use ipecho::config::init_config;
use ipecho::runtime::modes::{run_cli, run_server};
use ipecho::system::{RunMode, init_logging, install_panic_hook};

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => {
            install_panic_hook(RunMode::Server);

            // guard 需要存活到进程结束
            let log_guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };

            let result = run_server(&config).await;
            drop(log_guard);

            if let Err(e) = result {
                eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            install_panic_hook(RunMode::Cli);

            if let Err(e) = run_cli(command, &config).await {
                eprintln!("{}", e.format_simple());
                std::process::exit(1);
            }
        }
    }
}
