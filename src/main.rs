use clap::Parser;
use tracing_subscriber::EnvFilter;

use dialout::cli::{self, Cli};
use dialout::config::{CallConfig, ConfigError, ACCOUNT_SID_VAR, AUTH_TOKEN_VAR};
use dialout::voice::TwilioClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match CallConfig::from_env(&cli.numbers) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            match err {
                ConfigError::MissingCredential(_) => {
                    eprintln!();
                    eprintln!("Set your Twilio credentials:");
                    eprintln!("  export {}='your_account_sid'", ACCOUNT_SID_VAR);
                    eprintln!("  export {}='your_auth_token'", AUTH_TOKEN_VAR);
                }
                ConfigError::MissingNumbers => {
                    eprintln!();
                    eprint!("{}", cli::usage_hint());
                }
                ConfigError::InvalidNumber { .. } => {}
            }
            std::process::exit(1);
        }
    };

    let client = match TwilioClient::new(config.account_sid.clone(), config.auth_token.clone()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = cli::handle_call(&config, cli.twiml_url.as_deref(), &client).await {
        eprintln!("Error making call: {}", err);
        std::process::exit(1);
    }
}
