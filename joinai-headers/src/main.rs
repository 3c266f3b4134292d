/// JoinAI header generator
///
/// Prints the authentication headers for one JoinAI request as JSON so they
/// can be pasted into curl or an SDK client config.
///
/// Credentials come from flags, the environment, or a .env file.
/// Usage: joinai-headers joinai --path /myapp/chat
///        joinai-headers hmac --host api.example.com

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use joinai_auth::{HmacConfig, JoinAiConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "joinai-headers", about = "Generate JoinAI authentication headers")]
struct Args {
    #[command(subcommand)]
    scheme: Scheme,
}

/// Flags left unset fall back to the environment (see `joinai_auth::config`)
#[derive(Subcommand)]
enum Scheme {
    /// X-Server-Param / X-CurTime / X-CheckSum headers [env: JOINAI_APP_ID, JOINAI_APP_KEY, JOINAI_APP_PATH]
    Joinai {
        #[arg(long)]
        app_id: Option<String>,
        #[arg(long)]
        app_key: Option<String>,
        /// Request path, e.g. /appName/endpoint
        #[arg(long)]
        path: Option<String>,
    },
    /// HMAC-SHA256 gateway headers [env: APP_ID, APP_SECRET, APP_HOST]
    Hmac {
        #[arg(long)]
        app_id: Option<String>,
        #[arg(long)]
        app_secret: Option<String>,
        #[arg(long)]
        host: Option<String>,
    },
}

// Load .env file on startup
fn init_env() {
    let _ = dotenv::dotenv();
}

/// Build the headers for `scheme` and render them as pretty JSON
fn render(scheme: Scheme) -> Result<String> {
    let output = match scheme {
        Scheme::Joinai { app_id, app_key, path } => {
            let config = JoinAiConfig::from_env_or(app_id, app_key, path).context("missing JoinAI credentials")?;
            info!(app_id = %config.app_id, path = ?config.path, "generating JoinAI headers");
            let headers = config.headers().context("failed to build JoinAI headers")?;
            serde_json::to_string_pretty(&headers)?
        }
        Scheme::Hmac { app_id, app_secret, host } => {
            let config = HmacConfig::from_env_or(app_id, app_secret, host).context("missing HMAC credentials")?;
            info!(app_id = %config.app_id, host = %config.host, "generating HMAC gateway headers");
            let headers = config.headers().context("failed to build HMAC headers")?;
            serde_json::to_string_pretty(&headers)?
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    init_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("{}", render(args.scheme)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joinai_flags() {
        let args = Args::try_parse_from([
            "joinai-headers",
            "joinai",
            "--app-id",
            "abc",
            "--app-key",
            "secret",
            "--path",
            "/myapp/chat",
        ])
        .unwrap();

        match args.scheme {
            Scheme::Joinai { app_id, path, .. } => {
                assert_eq!(app_id.as_deref(), Some("abc"));
                assert_eq!(path.as_deref(), Some("/myapp/chat"));
            }
            Scheme::Hmac { .. } => panic!("expected joinai scheme"),
        }
    }

    #[test]
    fn test_parse_hmac_flags() {
        let args = Args::try_parse_from([
            "joinai-headers",
            "hmac",
            "--app-id",
            "abc",
            "--app-secret",
            "secret",
            "--host",
            "api.example.com",
        ])
        .unwrap();

        assert!(matches!(args.scheme, Scheme::Hmac { ref host, .. } if host.as_deref() == Some("api.example.com")));
    }

    #[test]
    fn test_render_joinai_json() {
        let scheme = Scheme::Joinai {
            app_id: Some("abc".to_string()),
            app_key: Some("secret".to_string()),
            path: Some("/myapp/chat".to_string()),
        };
        let json: serde_json::Value = serde_json::from_str(&render(scheme).unwrap()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        for key in ["X-Server-Param", "X-CurTime", "X-CheckSum", "Content-Type"] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(object["Content-Type"], "application/json");
        assert_eq!(object["X-CheckSum"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn test_render_hmac_json() {
        let scheme = Scheme::Hmac {
            app_id: Some("my-app".to_string()),
            app_secret: Some("secret".to_string()),
            host: Some("api.example.com".to_string()),
        };
        let json: serde_json::Value = serde_json::from_str(&render(scheme).unwrap()).unwrap();

        assert_eq!(json["appId"], "my-app");
        assert_eq!(json["host"], "api.example.com");
        assert!(json["authorization"].as_str().unwrap().starts_with("hmac api_key=my-app, "));
    }
}
