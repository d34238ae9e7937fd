use anyhow::Result;
use clap::Parser;
use std::rc::Rc;

use chatdesk_api::HttpChatApi;
use chatdesk_app::{run_repl, Cli, FileStore, TerminalView, TokioRuntime};
use chatdesk_chat::{ChatClient, ClientOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.default_log_level()))
        .init();

    let state_file = cli.state_file_path();
    log::debug!("Using state file {}", state_file.display());

    let view = Rc::new(TerminalView::new());
    let client = ChatClient::new(
        Rc::new(HttpChatApi::new(cli.http_config())),
        view.clone(),
        Rc::new(FileStore::open(state_file)),
        Rc::new(TokioRuntime),
        ClientOptions::default(),
    );

    // The controller is single-threaded; its timers need a LocalSet
    let local = tokio::task::LocalSet::new();
    local.run_until(run_repl(client, view)).await
}
