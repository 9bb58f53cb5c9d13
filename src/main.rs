mod cli;
mod client;
mod error;
mod fmt;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod queue;
mod session;
mod settings;
mod storage;
mod store;
mod view;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ConfigCommands, QueueCommands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CARDSTMT_LOG", "warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::results::run(false),
        Some(Commands::Init { data_dir, endpoint }) => cli::init::run(data_dir, endpoint),
        Some(Commands::Status) => cli::status::run(),
        Some(Commands::Queue { command }) => match command {
            QueueCommands::Add { paths } => cli::queue::add(&paths),
            QueueCommands::List => cli::queue::list(),
            QueueCommands::Remove { position } => cli::queue::remove(position),
            QueueCommands::Clear => cli::queue::clear(),
        },
        Some(Commands::Submit { paths }) => cli::submit::run(&paths),
        Some(Commands::Results { json }) => cli::results::run(json),
        Some(Commands::Remove { file, yes }) => cli::remove::run(&file, yes),
        Some(Commands::Reset { yes }) => cli::remove::reset(yes),
        #[cfg(feature = "pdf")]
        Some(Commands::Export {
            file,
            all,
            csv,
            output,
        }) => match file {
            Some(file) if !all => cli::export::one(&file, output),
            _ => cli::export::all(output, csv),
        },
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetEndpoint { url } => cli::config::set_endpoint(&url),
            ConfigCommands::SetTimeout { value } => cli::config::set_timeout(&value),
        },
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "cardstmt", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
