use super::utils::format_datetime;
use anyhow::Result;
use colored::Colorize;
use tandem_application::{ScheduleRequest, TandemApp};
use tandem_core::session::Session;

pub fn list(app: &TandemApp) {
    println!("{}", "Upcoming sessions".bold());
    print_sessions(app.sessions().upcoming());
    println!();
    println!("{}", "Past sessions".bold());
    print_sessions(app.sessions().past());
}

fn print_sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for session in sessions {
        println!(
            "  {}  {} with {} ({} min) - {}",
            session.id.dimmed(),
            session.language.cyan(),
            session.partner_name,
            session.duration_minutes,
            format_datetime(&session.scheduled_at)
        );
    }
}

pub fn show(app: &TandemApp, id: &str) -> Result<()> {
    let session = app.sessions().find(id)?;

    println!("{}", session.topic.bold());
    println!("  Partner:  {}", session.partner_name);
    println!("  Language: {}", session.language.cyan());
    println!("  When:     {}", format_datetime(&session.scheduled_at));
    println!("  Duration: {} minutes", session.duration_minutes);
    if let Some(notes) = &session.notes {
        println!("  Notes:    {}", notes);
    }
    if let Some(conversation_id) = app
        .conversations()
        .find_by_participant_name(&session.partner_name)
    {
        println!(
            "\n  Message {}: tandem messages show {}",
            session.partner_name, conversation_id
        );
    }
    Ok(())
}

pub async fn schedule(app: &mut TandemApp, request: ScheduleRequest) -> Result<()> {
    let outcome = app.schedule_session(request)?;
    app.save().await?;

    println!("{}", outcome.title.green());
    println!("{}", outcome.description);
    println!("  id: {}", outcome.session.id.dimmed());

    app.scheduler().settle().await;
    Ok(())
}
