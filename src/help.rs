use crate::terminal::Terminal;
use crossterm::style::Color;

const BORDER: Color = Color::White;
const TEXT: Color = Color::Grey;

/// Render a centered help box with the provided text into the back buffer.
pub fn render_help_overlay(term: &mut Terminal, width: u16, height: u16, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let lines: Vec<&str> = help_text.lines().collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = inner + 4; // 2 chars padding each side
    let box_height = lines.len() + 2;

    let left = ((width as usize).saturating_sub(box_width) / 2) as i32;
    let top = ((height as usize).saturating_sub(box_height) / 2) as i32;
    let right = left + box_width as i32 - 1;
    let bottom = top + box_height as i32 - 1;

    let rule = "─".repeat(box_width - 2);
    term.set(left, top, '┌', Some(BORDER), false);
    term.set_str(left + 1, top, &rule, Some(BORDER), false);
    term.set(right, top, '┐', Some(BORDER), false);

    for (i, line) in lines.iter().enumerate() {
        let y = top + 1 + i as i32;
        let padded = format!(" {:<inner$} ", line, inner = inner);
        term.set(left, y, '│', Some(BORDER), false);
        term.set_str(left + 1, y, &padded, Some(TEXT), false);
        term.set(right, y, '│', Some(BORDER), false);
    }

    term.set(left, bottom, '└', Some(BORDER), false);
    term.set_str(left + 1, bottom, &rule, Some(BORDER), false);
    term.set(right, bottom, '┘', Some(BORDER), false);
}
