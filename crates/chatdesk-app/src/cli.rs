use clap::Parser;
use std::env;
use std::path::PathBuf;

use chatdesk_api::HttpConfig;

/// CLI arguments for chatdesk
#[derive(Parser, Debug)]
#[command(name = "chatdesk")]
#[command(about = "Terminal client for a conversation-based chat backend")]
#[command(version)]
pub struct Cli {
    /// Origin of the chat backend
    #[arg(long, env = "CHATDESK_BASE_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Raw Cookie header to send (session and csrftoken cookies)
    #[arg(long, env = "CHATDESK_COOKIE", value_name = "COOKIE")]
    pub cookie: Option<String>,

    /// CSRF token; defaults to the csrftoken entry of --cookie
    #[arg(long, env = "CHATDESK_CSRF_TOKEN", value_name = "TOKEN")]
    pub csrf_token: Option<String>,

    /// Where the current conversation id is persisted
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url.clone(),
            cookie: self.cookie.clone(),
            csrf_token: self.csrf_token.clone(),
        }
    }

    /// `--state-file`, else `~/.chatdesk/state.json`
    pub fn state_file_path(&self) -> PathBuf {
        if let Some(path) = &self.state_file {
            return path.clone();
        }

        let base = env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(".chatdesk").join("state.json")
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
