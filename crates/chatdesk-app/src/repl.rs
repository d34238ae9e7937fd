use anyhow::{anyhow, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use tokio::sync::mpsc as async_mpsc;

use chatdesk_chat::{ChatClient, DeleteOutcome, OpenOutcome, SubmitOutcome};
use chatdesk_types::ConversationId;

use crate::terminal_view::TerminalView;

/// One parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    New,
    List,
    Open(ConversationId),
    Delete(ConversationId),
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        if !line.starts_with('/') {
            return Command::Send(line.to_string());
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match (name, arg) {
            ("/new", "") => Command::New,
            ("/list", "") => Command::List,
            ("/help", "") => Command::Help,
            ("/quit" | "/exit", "") => Command::Quit,
            ("/open", id) if !id.is_empty() => Command::Open(ConversationId::parse(id)),
            ("/delete", id) if !id.is_empty() => Command::Delete(ConversationId::parse(id)),
            ("/open" | "/delete", _) => Command::Invalid(format!("Usage: {} <id>", name)),
            _ => Command::Invalid(format!("Unknown command: {}", name)),
        }
    }
}

/// Line editor on its own thread so timers keep running while waiting.
///
/// The thread only reads when asked, which leaves stdin free for the
/// delete confirmation in between.
pub struct Prompter {
    requests: mpsc::Sender<String>,
    lines: async_mpsc::UnboundedReceiver<Result<String, ReadlineError>>,
}

impl Prompter {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (line_tx, line_rx) = async_mpsc::unbounded_channel();

        thread::spawn(move || {
            let mut editor = match DefaultEditor::new() {
                Ok(editor) => editor,
                Err(e) => {
                    let _ = line_tx.send(Err(e));
                    return;
                }
            };

            while let Ok(prompt) = request_rx.recv() {
                let line = editor.readline(&prompt);
                if let Ok(text) = &line {
                    if !text.trim().is_empty() {
                        let _ = editor.add_history_entry(text.as_str());
                    }
                }
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            lines: line_rx,
        }
    }

    pub async fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        if self.requests.send(prompt.to_string()).is_err() {
            return Err(ReadlineError::Eof);
        }
        self.lines.recv().await.unwrap_or(Err(ReadlineError::Eof))
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan().bold());
    println!("  <text>          Send a message");
    println!("  /new            Start a new conversation");
    println!("  /list           Refresh and show conversations");
    println!("  /open <id>      Load a conversation");
    println!("  /delete <id>    Delete a conversation");
    println!("  /help           Show this help");
    println!("  /quit           Exit");
}

/// Run the interactive loop until `/quit` or end of input
pub async fn run_repl(client: ChatClient, view: Rc<TerminalView>) -> Result<()> {
    let mut prompter = Prompter::spawn();

    println!("{}", "chatdesk - type /help for commands".bright_cyan());
    client.start().await;

    loop {
        let prompt = format!("{} ", "You:".bright_green().bold());
        let line = match prompter.read_line(&prompt).await {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow!("Failed to read input: {}", e)),
        };

        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Command::Send(text) => match client.submit(&text).await {
                SubmitOutcome::Delivered { conversation_id } => {
                    log::debug!("Delivered to conversation {}", conversation_id);
                }
                SubmitOutcome::Failed(e) => log::debug!("Send failed: {}", e),
                SubmitOutcome::Busy | SubmitOutcome::Empty => {}
            },
            Command::New => client.new_chat(),
            Command::List => {
                client.refresh_list().await;
                view.print_conversations();
            }
            Command::Open(id) => match client.open(id).await {
                OpenOutcome::AlreadyOpen => println!("{}", "Already open".bright_black()),
                OpenOutcome::Opened => {}
                OpenOutcome::Failed(e) => log::debug!("Open failed: {}", e),
            },
            Command::Delete(id) => {
                if let DeleteOutcome::Cancelled = client.delete(id).await {
                    println!("{}", "Cancelled".bright_black());
                }
            }
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Invalid(message) => eprintln!("{} {}", "⚠️".yellow(), message),
        }
    }

    println!("{}", "Goodbye!".bright_cyan());
    Ok(())
}
