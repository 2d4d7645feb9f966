//! confpath CLI - query a configuration file by path

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use confpath::{ConfError, Dictionary, KvOptions};

#[derive(Parser)]
#[command(name = "confpath")]
#[command(version, about = "Query JSON, INI and properties files with dotted paths", long_about = None)]
struct Cli {
    /// Configuration file (.json, .ini or .properties)
    file: PathBuf,

    /// Path to look up, e.g. server.ports[0]
    #[arg(default_value = ".")]
    path: String,

    /// Printed when the path does not exist
    #[arg(short, long)]
    default: Option<String>,

    /// Substitute $NAME from the environment
    #[arg(short, long)]
    env: bool,

    /// Substitute ${path} from the file itself
    #[arg(short, long)]
    config: bool,

    /// Override a value before the lookup (KEY=VALUE)
    #[arg(short, long, value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// List the keys of the object at the path instead of its value
    #[arg(short, long)]
    keys: bool,

    /// Parse the file as key/value text with these options (JSON object)
    #[arg(long, value_name = "JSON")]
    kv_options: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confpath=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfError> {
    let dict = match &cli.kv_options {
        Some(raw) => Dictionary::from_file_with(&cli.file, parse_kv_options(raw)?)?,
        None => Dictionary::from_file(&cli.file)?,
    };
    let mut dict = dict
        .with_env_substitution(cli.env)
        .with_config_substitution(cli.config);

    for assignment in &cli.set {
        let (key, value) = assignment.split_once('=').ok_or_else(|| ConfError::InvalidOptions {
            message: format!("Expected KEY=VALUE but got '{}'", assignment),
            hint: Some("Write overrides as --set server.port=8080".into()),
            code: Some(207),
        })?;
        debug!(key, "applying override");
        dict.set(key.trim(), value)?;
    }

    if cli.keys {
        for key in dict.keys(&cli.path)? {
            println!("{}", key);
        }
        return Ok(());
    }

    let value = match &cli.default {
        Some(default) => dict.get_or(&cli.path, default)?,
        None => dict.get(&cli.path)?,
    };
    println!("{}", value.as_deref().unwrap_or("null"));
    Ok(())
}

fn parse_kv_options(raw: &str) -> Result<KvOptions, ConfError> {
    serde_json::from_str(raw).map_err(|e| ConfError::InvalidOptions {
        message: format!("Invalid key/value options: {}", e),
        hint: Some(r#"Pass a JSON object such as {"equals_separator": true}"#.into()),
        code: Some(206),
    })
}
