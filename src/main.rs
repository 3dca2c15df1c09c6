use anyhow::{Context, Result, bail};
use blogkyl::auth::hash_password;
use blogkyl::{Cli, Command, Config};
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Serve(config) => run_server(config),
        Command::HashPassword { password } => print_hash(password),
    }
}

fn run_server(config: Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("Invalid configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(blogkyl::serve(config))
}

fn print_hash(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = hash_password(&password).context("Failed to hash password")?;
    println!("{}", hash);
    Ok(())
}
