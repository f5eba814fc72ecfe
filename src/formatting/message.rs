use crate::constants::SUPPORT_CHANNEL;
use crate::models::slack::{ListStyle, RichTextElement, TextObject};
use crate::models::{Block, Message, Team};

fn mrkdwn(text: impl Into<String>) -> Block {
    Block::Section {
        text: TextObject::Mrkdwn { text: text.into() },
    }
}

fn header(text: impl Into<String>) -> Block {
    Block::Header {
        text: TextObject::PlainText { text: text.into() },
    }
}

fn bullet_list(entries: &[&str]) -> Block {
    let items = entries
        .iter()
        .map(|entry| RichTextElement::RichTextSection {
            elements: vec![RichTextElement::Text {
                text: entry.to_string(),
            }],
        })
        .collect();

    Block::RichText {
        elements: vec![RichTextElement::RichTextList {
            style: ListStyle::Bullet,
            elements: items,
        }],
    }
}

/// Link to the member administration page of a team in Console.
pub fn team_members_admin_url(console_url: &str, team_slug: &str) -> String {
    format!("{}/team/{}/members", console_url.trim_end_matches('/'), team_slug)
}

pub fn fallback_text(team_slug: &str) -> String {
    format!("Reminder to keep the {:?} team up to date", team_slug)
}

/// Builds the membership reminder for a team.
pub fn team_reminder(team: &Team, console_url: &str) -> Message {
    let mut blocks = vec![
        mrkdwn(format!("👋 Hi {}!", team.slug)),
        mrkdwn(
            "You are responsible for keeping the member list of your team up to date. \
             Team membership grants elevated access to, among other things, production \
             environments and personal data, so it is important that the list is correct.",
        ),
        mrkdwn(format!(
            "The following users are currently registered as members and owners of `{}`:",
            team.slug
        )),
    ];

    let member_names: Vec<&str> = team.members.iter().map(|m| m.user.name.as_str()).collect();
    let owner_names: Vec<&str> = team.owners().map(|m| m.user.name.as_str()).collect();

    blocks.push(header("Members"));
    if member_names.is_empty() {
        // Slack rejects empty rich text lists
        blocks.push(mrkdwn("_No members registered._"));
    } else {
        blocks.push(bullet_list(&member_names));
    }

    if !owner_names.is_empty() {
        blocks.push(header("Owners"));
        blocks.push(bullet_list(&owner_names));
    }

    blocks.push(mrkdwn(format!(
        "Does this look correct? If not, you can manage the team in <{}|Console>.",
        team_members_admin_url(console_url, &team.slug)
    )));

    match owner_names.len() {
        0 => blocks.push(mrkdwn(format!(
            "*NB!* The team has no owner, contact support in {} to get an owner added.",
            SUPPORT_CHANNEL
        ))),
        1 => blocks.push(mrkdwn(
            "*NB!* There *should* be at least two owners of every team.",
        )),
        _ => {}
    }

    Message {
        text: fallback_text(&team.slug),
        blocks,
    }
}
