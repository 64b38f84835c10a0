use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cfddns::config::Settings;
use cfddns::dns::CloudflareProvider;
use cfddns::report::{LogEvent, OutcomeLog};
use cfddns::secrets::{self, EnvSource};
use cfddns::update::{self, UpdateRequest};

#[derive(Parser)]
#[command(name = "update")]
#[command(about = "Point every A record of a Cloudflare zone at the given IPv4 address")]
#[command(version)]
struct Cli {
    /// Configuration file [default: /etc/cfddns/config.toml]
    #[arg(long, env = "CFDDNS_CONFIG")]
    config: Option<PathBuf>,

    /// Accepted for DDNS client compatibility, not used
    #[arg(allow_hyphen_values = true)]
    username: String,

    /// Accepted for DDNS client compatibility, not used
    #[arg(allow_hyphen_values = true)]
    password: String,

    /// Zone whose A records are updated (e.g., example.com)
    #[arg(allow_hyphen_values = true)]
    domain: String,

    /// New IPv4 address
    #[arg(allow_hyphen_values = true)]
    ip_address: String,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(&e),
    };

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.log.level);
    secrets::load_dotenv();

    let log = OutcomeLog::new(&settings.log.file);
    let _separator = log.run_guard();

    let request = UpdateRequest {
        domain: cli.domain,
        ip_address: cli.ip_address,
    };

    let result = update::run(&request, &settings, &EnvSource, &log, |credentials| {
        CloudflareProvider::new(
            credentials,
            &settings.cloudflare.api_base,
            settings.cloudflare.timeout(),
        )
    })
    .await;

    match result {
        Ok(summary) => {
            if summary.failed() > 0 {
                warn!(
                    "{} of {} records could not be updated, see {}",
                    summary.failed(),
                    summary.records.len(),
                    log.path().display()
                );
            }
            info!(
                "Update of {} complete ({})",
                summary.domain,
                if summary.has_changes() { "with changes" } else { "no changes" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = e.to_string();
            log.append(&LogEvent::Error(&message));
            eprintln!("ERROR: {}", message);
            ExitCode::FAILURE
        }
    }
}

/// Report a command line error. Help and version requests are not errors.
fn usage_error(e: &clap::Error) -> ExitCode {
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = e.print();
        return ExitCode::SUCCESS;
    }

    let _ = e.print();

    let message = match e.kind() {
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => "Incorrect number of arguments.",
        _ => "Invalid arguments.",
    };

    let config = config_from_args(std::env::args_os().skip(1))
        .or_else(|| std::env::var_os("CFDDNS_CONFIG").map(PathBuf::from));
    let settings = Settings::load(config.as_deref()).unwrap_or_default();
    let log = OutcomeLog::new(&settings.log.file);
    let _separator = log.run_guard();
    log.append(&LogEvent::Error(message));

    ExitCode::FAILURE
}

/// Find `--config <PATH>` or `--config=<PATH>` in arguments clap rejected.
fn config_from_args(args: impl IntoIterator<Item = OsString>) -> Option<PathBuf> {
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.to_str().and_then(|a| a.strip_prefix("--config=")) {
            return Some(PathBuf::from(path));
        }
    }

    None
}
