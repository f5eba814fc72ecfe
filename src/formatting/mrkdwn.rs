use std::sync::OnceLock;

use colored::*;
use regex::Regex;

use crate::models::slack::{RichTextElement, TextObject};
use crate::models::Block;

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^|>]+)\|([^>]+)>").expect("valid link pattern"))
}

fn bold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("valid bold pattern"))
}

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid code pattern"))
}

fn italic_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b_([^_]+)_\b").expect("valid italic pattern"))
}

/// `<url|text>` becomes `text (url)`
pub fn format_links(text: &str) -> String {
    let mut result = text.to_string();
    for cap in link_regex().captures_iter(text) {
        let formatted = format!("{} ({})", cap[2].blue().underline(), cap[1].dimmed());
        result = result.replace(&cap[0], &formatted);
    }
    result
}

pub fn format_bold(text: &str) -> String {
    let mut result = text.to_string();
    for cap in bold_regex().captures_iter(text) {
        result = result.replace(&cap[0], &cap[1].bold().to_string());
    }
    result
}

pub fn format_code(text: &str) -> String {
    let mut result = text.to_string();
    for cap in code_regex().captures_iter(text) {
        result = result.replace(&cap[0], &cap[1].cyan().to_string());
    }
    result
}

pub fn format_italic(text: &str) -> String {
    let mut result = text.to_string();
    for cap in italic_regex().captures_iter(text) {
        result = result.replace(&cap[0], &cap[1].italic().to_string());
    }
    result
}

/// Renders Slack mrkdwn for a terminal.
pub fn format_mrkdwn(text: &str) -> String {
    let text = format_links(text);
    let text = format_code(&text);
    let text = format_bold(&text);
    format_italic(&text)
}

fn rich_text_lines(element: &RichTextElement, lines: &mut Vec<String>) {
    match element {
        RichTextElement::RichTextList { elements, .. } => {
            for item in elements {
                let mut item_lines = Vec::new();
                rich_text_lines(item, &mut item_lines);
                lines.push(format!("  • {}", item_lines.join("")));
            }
        }
        RichTextElement::RichTextSection { elements } => {
            let mut parts = Vec::new();
            for part in elements {
                rich_text_lines(part, &mut parts);
            }
            lines.push(parts.join(""));
        }
        RichTextElement::Text { text } => lines.push(text.clone()),
    }
}

/// Renders message blocks as terminal lines.
pub fn format_blocks(blocks: &[Block]) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Section { text } => lines.push(match text {
                TextObject::Mrkdwn { text } => format_mrkdwn(text),
                TextObject::PlainText { text } => text.clone(),
            }),
            Block::Header { text } => {
                lines.push(String::new());
                lines.push(text.text().bold().blue().to_string());
            }
            Block::RichText { elements } => {
                for element in elements {
                    rich_text_lines(element, &mut lines);
                }
            }
        }
    }
    lines
}
