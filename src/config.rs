use anyhow::{Context, Result};
use clap::Parser;
use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Region hint for the S3 client. `None` defers to the AWS default chain.
    pub region: Option<String>,
    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Browse S3 buckets from a local web browser using your AWS credentials"
)]
pub struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// AWS profile name to load credentials from
    #[arg(long)]
    pub profile: Option<String>,

    /// Custom S3 endpoint URL (overrides AWS_ENDPOINT_URL)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Address buckets as path segments instead of virtual hosts
    #[arg(long)]
    pub force_path_style: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    fn from_args(args: Args) -> Result<Self> {
        // --- Environment fallback ---
        let env_host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.into());
        let env_port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => DEFAULT_PORT,
            Err(err) => return Err(err).context("reading PORT"),
        };
        let env_region = non_empty_var("AWS_REGION");
        let env_endpoint = non_empty_var("AWS_ENDPOINT_URL");
        let env_path_style = non_empty_var("S3_FORCE_PATH_STYLE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            region: args.region.or(env_region),
            profile: args.profile,
            endpoint_url: args.endpoint_url.or(env_endpoint),
            force_path_style: args.force_path_style || env_path_style,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_take_precedence() {
        let args = Args::parse_from([
            "bucket-browser",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--region",
            "eu-west-1",
            "--force-path-style",
        ]);
        let cfg = AppConfig::from_args(args).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:9090");
        assert_eq!(cfg.region.as_deref(), Some("eu-west-1"));
        assert!(cfg.force_path_style);
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("YES"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
    }
}
