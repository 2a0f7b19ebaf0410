// Tab list rendering for the terminal

use ansi_term::{Colour, Style};
use route_tabs::Route;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PIN_MARKER: &str = "📌";
const MAX_TITLE_WIDTH: usize = 32;

/// Pad to a display width; CJK titles take two columns per character.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn truncate(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_table(tabs: &[Route], active: Option<usize>, color: bool) -> String {
    if tabs.is_empty() {
        return "(no tabs)\n".to_string();
    }

    let titles: Vec<String> = tabs.iter().map(|t| truncate(t.title(), MAX_TITLE_WIDTH)).collect();
    let title_width = titles
        .iter()
        .map(|t| UnicodeWidthStr::width(t.as_str()))
        .max()
        .unwrap_or(0)
        .max("Title".len());
    let index_width = (tabs.len() - 1).to_string().len().max(1);
    let pin_width = UnicodeWidthStr::width(PIN_MARKER);

    let mut out = format!(
        "  {}  {}  {}  Path\n",
        pad("#", index_width),
        pad("", pin_width),
        pad("Title", title_width)
    );

    for (i, (tab, title)) in tabs.iter().zip(&titles).enumerate() {
        let is_active = active == Some(i);
        let marker = if is_active { "*" } else { " " };
        let pin = if tab.is_pinned() { PIN_MARKER } else { "" };
        let path = if tab.full_path.is_empty() { &tab.path } else { &tab.full_path };
        let line = format!(
            "{} {}  {}  {}  {}",
            marker,
            pad(&i.to_string(), index_width),
            pad(pin, pin_width),
            pad(title, title_width),
            path
        );

        if color && is_active {
            out.push_str(&Style::new().bold().fg(Colour::Green).paint(line).to_string());
        } else if color && tab.is_pinned() {
            out.push_str(&Colour::Yellow.paint(line).to_string());
        } else {
            out.push_str(line.trim_end());
        }
        out.push('\n');
    }
    out
}
