use colored::Colorize;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use chatdesk_chat::render::{BOT_AVATAR, EMPTY_LIST_TEXT, USER_AVATAR};
use chatdesk_chat::{ChatView, Notice, NoticeId, NoticeKind};
use chatdesk_types::{ConversationId, ConversationSummary, Exchange};

/// Sidebar state kept between refreshes
#[derive(Default)]
struct Sidebar {
    conversations: Vec<ConversationSummary>,
    active: Option<ConversationId>,
}

/// Prints the chat to stdout.
///
/// The conversation list is only stored when rendered; background
/// refreshes would otherwise print over the prompt. `/list` prints it.
#[derive(Default)]
pub struct TerminalView {
    sidebar: RefCell<Sidebar>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines for the last rendered list, active entry marked with `*`
    pub fn conversation_lines(&self) -> Vec<String> {
        let sidebar = self.sidebar.borrow();
        if sidebar.conversations.is_empty() {
            return vec![EMPTY_LIST_TEXT.to_string()];
        }

        sidebar
            .conversations
            .iter()
            .map(|summary| {
                let marker = if sidebar.active.as_ref() == Some(&summary.id) { "*" } else { " " };
                match summary.message_count {
                    Some(count) => format!("{} [{}] {} ({} messages)", marker, summary.id, summary.title, count),
                    None => format!("{} [{}] {}", marker, summary.id, summary.title),
                }
            })
            .collect()
    }

    pub fn print_conversations(&self) {
        println!("{}", "Conversations:".bright_cyan().bold());
        for line in self.conversation_lines() {
            if line.starts_with('*') {
                println!("  {}", line.bright_green());
            } else {
                println!("  {}", line);
            }
        }
    }
}

impl ChatView for TerminalView {
    fn set_busy(&self, busy: bool) {
        log::debug!("busy: {}", busy);
    }

    fn clear_input(&self) {}

    fn focus_input(&self) {}

    fn set_typing(&self, visible: bool) {
        if visible {
            println!("{}", "AI is typing...".bright_black());
        }
    }

    fn set_welcome_visible(&self, visible: bool) {
        if visible {
            println!("{}", "Start a new conversation by typing a message.".bright_black());
        }
    }

    fn append_exchange(&self, exchange: &Exchange) {
        println!("{} {}", format!("{}:", USER_AVATAR).bright_green().bold(), exchange.user_message);
        println!("{} {}", format!("{}:", BOT_AVATAR).bright_blue().bold(), exchange.bot_response);
        if let Some(summary) = exchange.summary() {
            println!("  {} {}", "Summary:".bright_black(), summary.bright_black());
        }
    }

    fn clear_transcript(&self) {
        println!("{}", "─".repeat(40).bright_black());
    }

    fn set_title(&self, title: &str) {
        println!("{} {}", "💬".bright_cyan(), title.bold());
    }

    fn render_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>) {
        let mut sidebar = self.sidebar.borrow_mut();
        sidebar.conversations = conversations.to_vec();
        sidebar.active = active.cloned();
    }

    fn mark_active(&self, active: Option<&ConversationId>) {
        self.sidebar.borrow_mut().active = active.cloned();
    }

    fn remove_conversation(&self, id: &ConversationId) {
        self.sidebar
            .borrow_mut()
            .conversations
            .retain(|summary| &summary.id != id);
    }

    fn show_notice(&self, _id: NoticeId, notice: &Notice) {
        match notice.kind {
            NoticeKind::Error => eprintln!("{} {}", "❌".bright_red(), notice.text.bright_red()),
            NoticeKind::Success => println!("{} {}", "✅".bright_green(), notice.text.bright_green()),
        }
    }

    // Printed lines cannot be taken back
    fn dismiss_notice(&self, _id: NoticeId) {}

    fn confirm(&self, question: &str) -> bool {
        print!("{} {} ", question.bright_yellow(), "[y/N]".bright_black());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                log::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
