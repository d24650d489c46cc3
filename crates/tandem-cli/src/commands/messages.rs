use super::utils::format_time;
use anyhow::Result;
use colored::Colorize;
use tandem_application::TandemApp;
use tandem_core::conversation::PresenceStatus;

pub fn list(app: &TandemApp, query: &str) {
    let conversations = app.conversations().search(query);
    if conversations.is_empty() {
        println!("{}", "No conversations found".yellow());
        return;
    }

    for summary in conversations {
        let marker = if summary.is_unread() { "●".blue() } else { " ".normal() };
        let preview = summary
            .last_message
            .as_ref()
            .map(|m| format!("{}  {}", format_time(&m.sent_at), m.text))
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            marker,
            summary.id.dimmed(),
            summary.participant.name.bold(),
            preview
        );
    }

    let unread = app.conversations().unread_count();
    if unread > 0 {
        println!("\n{} unread", unread);
    }
}

pub async fn show(app: &mut TandemApp, id: &str) -> Result<()> {
    app.conversations_mut().set_active_conversation(id)?;
    app.save().await?;

    let thread = app.conversations().thread(id)?;
    let status = match thread.participant.status {
        PresenceStatus::Online => thread.participant.status.to_string().green(),
        PresenceStatus::Offline => thread.participant.status.to_string().dimmed(),
    };
    println!("{} {}", thread.participant.name.bold(), status);
    println!();

    for message in &thread.messages {
        let time = format_time(&message.sent_at).dimmed();
        if message.sender.is_me() {
            println!("{} {} {}", time, "You:".cyan(), message.text);
        } else {
            println!("{} {} {}", time, format!("{}:", thread.participant.name).magenta(), message.text);
        }
    }
    Ok(())
}

pub async fn send(app: &mut TandemApp, id: &str, text: &str) -> Result<()> {
    let message = app.conversations_mut().send_message(id, text)?;
    app.save().await?;

    println!(
        "{} {} {}",
        "Sent".green(),
        message.id.dimmed(),
        format_time(&message.sent_at)
    );
    Ok(())
}

pub async fn read(app: &mut TandemApp, id: &str) -> Result<()> {
    if app.conversations_mut().mark_conversation_as_read(id)? {
        app.save().await?;
        println!("{}", "Marked as read".green());
    } else {
        println!("{}", "Already read".dimmed());
    }
    Ok(())
}
