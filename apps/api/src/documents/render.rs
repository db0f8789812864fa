//! Letter rendering: turns the final draft into the downloadable document.
//!
//! Layout: centered title, centered date, a rule, then the letter's paragraphs
//! wrapped to `LINE_WIDTH` columns with one blank line between them.

use chrono::NaiveDate;

pub const LINE_WIDTH: usize = 80;
const TITLE: &str = "Cover Letter";

/// Splits letter text into trimmed, non-empty paragraphs (blank-line separated).
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn render_letter(text: &str, date: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&center(TITLE));
    out.push('\n');
    out.push_str(&center(&date.format("%B %d, %Y").to_string()));
    out.push('\n');
    out.push_str(&"-".repeat(LINE_WIDTH));
    out.push_str("\n\n");

    let body: Vec<String> = paragraphs(text)
        .into_iter()
        .map(|p| p.lines().map(|line| wrap(line.trim())).collect::<Vec<_>>().join("\n"))
        .collect();
    out.push_str(&body.join("\n\n"));
    out.push('\n');
    out
}

fn center(line: &str) -> String {
    let pad = LINE_WIDTH.saturating_sub(line.chars().count()) / 2;
    format!("{}{line}", " ".repeat(pad))
}

/// Greedy word wrap. Words longer than the line stay whole.
fn wrap(line: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > LINE_WIDTH && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
