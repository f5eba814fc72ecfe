use colored::*;

use super::mrkdwn::format_blocks;
use super::utils::{pluralize, truncate};
use crate::models::{Message, Team};

pub fn format_owner_count(count: usize) -> ColoredString {
    match count {
        0 => "no owners".red().bold(),
        1 => "1 owner".yellow(),
        n => format!("{} owners", n).green(),
    }
}

pub fn print_teams(teams: &[Team]) {
    if teams.is_empty() {
        println!("{}", "No teams found.".dimmed());
        return;
    }

    println!("{}", "Teams:".bold());
    for team in teams {
        let channel = team.fallback_channel().unwrap_or("-");
        println!(
            "  {} - {}, {} ({})",
            team.slug.cyan(),
            pluralize(team.members.len(), "member", "members"),
            format_owner_count(team.owner_count()),
            channel.dimmed()
        );

        let owners: Vec<&str> = team.owners().map(|m| m.user.name.as_str()).collect();
        if !owners.is_empty() {
            println!("      {}", truncate(&owners.join(", "), 76).dimmed());
        }
    }
}

/// Prints what would have been sent to `recipient`.
pub fn print_message_preview(team: &Team, recipient: &str, message: &Message) {
    println!("\n{} {} {} {}", "▸".cyan(), team.slug.bold(), "→".dimmed(), recipient.yellow());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", message.text.dimmed());
    for line in format_blocks(&message.blocks) {
        println!("{}", line);
    }
}
