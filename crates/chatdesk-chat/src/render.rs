//! HTML fragments for the browser transcript and sidebar.
//!
//! Every piece of text that reaches these functions is escaped, including
//! the user's own echo and ids placed in attributes. Nothing here emits an
//! inline event handler; the sidebar is wired by delegation on
//! `data-action` / `data-conversation-id`.

use chatdesk_types::{ConversationId, ConversationSummary, Exchange};

pub const USER_AVATAR: &str = "You";
pub const BOT_AVATAR: &str = "AI";
pub const EMPTY_LIST_TEXT: &str = "No conversations yet. Start a new chat!";

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn text_block(s: &str) -> String {
    escape_html(s).replace('\n', "<br>")
}

/// User line: content first, avatar after it
pub fn user_message(text: &str) -> String {
    format!(
        r#"<div class="message user"><div class="message-content">{}</div><div class="message-avatar">{}</div></div>"#,
        text_block(text),
        USER_AVATAR
    )
}

fn section(extra_class: &str, label: &str, content: &str) -> String {
    format!(
        r#"<div class="message-section{}"><div class="section-label">{}</div><div class="section-content">{}</div></div>"#,
        extra_class,
        label,
        text_block(content)
    )
}

/// Bot line: avatar first, then the response and the optional summary
pub fn bot_message(exchange: &Exchange) -> String {
    let mut content = section("", "Bot Response", &exchange.bot_response);
    if let Some(summary) = exchange.summary() {
        content.push_str(&section(" summary-section", "Summary", summary));
    }

    format!(
        r#"<div class="message bot"><div class="message-avatar">{}</div><div class="message-content">{}</div></div>"#,
        BOT_AVATAR, content
    )
}

pub fn exchange(exchange: &Exchange) -> String {
    let mut html = user_message(&exchange.user_message);
    html.push_str(&bot_message(exchange));
    html
}

pub fn conversation_entry(summary: &ConversationSummary, active: bool) -> String {
    let id = escape_html(summary.id.as_str());
    let title = escape_html(&summary.title);
    let tooltip = match summary.message_count {
        Some(count) => format!("{} ({} messages)", title, count),
        None => title.clone(),
    };

    format!(
        r#"<div class="conversation-item{}" data-conversation-id="{}"><div class="conversation-title" title="{}">{}</div><div class="conversation-actions"><button type="button" class="conversation-action" data-action="delete" data-conversation-id="{}" title="Delete">🗑️</button></div></div>"#,
        if active { " active" } else { "" },
        id,
        tooltip,
        title,
        id
    )
}

pub fn empty_conversation_list() -> String {
    format!(r#"<div class="no-conversations">{}</div>"#, EMPTY_LIST_TEXT)
}

/// Whole sidebar body
pub fn conversation_list(conversations: &[ConversationSummary], active: Option<&ConversationId>) -> String {
    if conversations.is_empty() {
        return empty_conversation_list();
    }

    conversations
        .iter()
        .map(|summary| conversation_entry(summary, active == Some(&summary.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_bot_markup_is_literal() {
        let html = bot_message(&Exchange::new("hi", "<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_user_echo_is_escaped() {
        let html = user_message("<b>bold</b>\nnext");
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;<br>next"));
    }

    #[test]
    fn test_avatar_order_distinguishes_roles() {
        let user = user_message("x");
        assert!(user.find("message-content").unwrap() < user.find("message-avatar").unwrap());

        let bot = bot_message(&Exchange::new("x", "y"));
        assert!(bot.find("message-avatar").unwrap() < bot.find("message-content").unwrap());
    }

    #[test]
    fn test_summary_section_only_when_present() {
        let without = bot_message(&Exchange::new("q", "a"));
        assert!(!without.contains("summary-section"));

        let with = bot_message(&Exchange::new("q", "a").with_summary("<i>short</i>"));
        assert!(with.contains("summary-section"));
        assert!(with.contains("&lt;i&gt;short&lt;/i&gt;"));
    }

    #[test]
    fn test_entry_uses_data_attributes() {
        let summary = ConversationSummary::new(ConversationId::from(9), "Plans");
        let html = conversation_entry(&summary, false);
        assert!(html.contains(r#"data-conversation-id="9""#));
        assert!(html.contains(r#"data-action="delete""#));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("active"));
    }

    #[test]
    fn test_entry_escapes_title_and_id() {
        let summary = ConversationSummary::new(ConversationId::text(r#"x" onmouseover="y"#), "<img src=x>");
        let html = conversation_entry(&summary, true);
        assert!(html.contains("conversation-item active"));
        assert!(!html.contains("<img"));
        assert!(!html.contains(r#"x" onmouseover"#));
    }

    #[test]
    fn test_list_marks_only_active_entry() {
        let list = vec![
            ConversationSummary::new(ConversationId::from(1), "one"),
            ConversationSummary::new(ConversationId::from(2), "two"),
        ];
        let html = conversation_list(&list, Some(&ConversationId::parse("2")));
        assert_eq!(html.matches("conversation-item active").count(), 1);
        assert!(html.find("conversation-item active").unwrap() > html.find("one").unwrap());
    }

    #[test]
    fn test_empty_list_placeholder() {
        assert_eq!(
            conversation_list(&[], None),
            r#"<div class="no-conversations">No conversations yet. Start a new chat!</div>"#
        );
    }
}
