use clap::{Parser, Subcommand};
use osaas_client::Environment;

/// osc - manage Open Source Cloud service instances
#[derive(Parser)]
#[command(name = "osc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Personal access token (defaults to OSC_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Environment to use: prod, stage or dev
    #[arg(short, long, global = true, env = "OSC_ENVIRONMENT")]
    pub environment: Option<Environment>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a subscribed service
    Service { service_id: String },
    /// Add a service to your subscriptions
    Activate { service_id: String },
    /// Print a service access token
    Token { service_id: String },
    /// Create a service instance
    Create {
        service_id: String,
        name: String,

        /// Instance option as key=value (repeatable)
        #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
        options: Vec<(String, String)>,
    },
    /// List instances of a service
    List { service_id: String },
    /// Show a service instance
    Describe { service_id: String, name: String },
    /// Remove a service instance
    Remove { service_id: String, name: String },
    /// Show the ports exposed by an instance
    Ports { service_id: String, name: String },
    /// Show the logs of an instance
    Logs { service_id: String, name: String },
    /// Store a secret for a service
    Secret {
        service_id: String,
        secret_name: String,
        secret_value: String,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid option '{}': expected key=value", s))?;
    if key.is_empty() {
        return Err(format!("invalid option '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("SourceUrl=https://a.b/c?x=1").unwrap(),
            ("SourceUrl".to_string(), "https://a.b/c?x=1".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "osc", "-e", "dev", "create", "eyevinn-test-adserver", "demo", "-o", "a=1",
        ])
        .unwrap();

        assert_eq!(cli.environment, Some(Environment::Dev));
        match cli.command {
            Commands::Create {
                service_id,
                name,
                options,
            } => {
                assert_eq!(service_id, "eyevinn-test-adserver");
                assert_eq!(name, "demo");
                assert_eq!(options, vec![("a".to_string(), "1".to_string())]);
            }
            _ => panic!("expected create"),
        }
    }
}
