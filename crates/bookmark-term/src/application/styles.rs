use bookmark_core::Category;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

pub const ACCENT: Color = Color::Indexed(63);
pub const HIGHLIGHT: Color = Color::Indexed(39);
pub const SUCCESS: Color = Color::Indexed(42);
pub const WARNING: Color = Color::Indexed(214);
pub const ERROR: Color = Color::Indexed(196);
pub const MUTED: Color = Color::Indexed(245);
pub const SUBTLE: Color = Color::Indexed(241);
pub const BORDER: Color = Color::Indexed(238);

const BADGE_COLORS: [Color; 5] = [ACCENT, HIGHLIGHT, SUCCESS, WARNING, Color::Indexed(170)];

pub fn title() -> Style {
    return Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
}

pub fn border(focused: bool) -> Style {
    if focused {
        return Style::default().fg(HIGHLIGHT);
    }

    return Style::default().fg(BORDER);
}

pub fn selected() -> Style {
    return Style::default()
        .fg(Color::White)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD);
}

pub fn muted() -> Style {
    return Style::default().fg(MUTED);
}

pub fn subtle() -> Style {
    return Style::default().fg(SUBTLE);
}

/// Badge colour for a category. The same name always gets the same colour.
pub fn category_badge(category: &Category) -> Style {
    if category.is_empty() {
        return Style::default().fg(Color::Black).bg(MUTED);
    }

    let index = category
        .as_str()
        .bytes()
        .fold(0usize, |acc, b| return acc.wrapping_add(b as usize))
        % BADGE_COLORS.len();

    return Style::default()
        .fg(Color::Black)
        .bg(BADGE_COLORS[index])
        .add_modifier(Modifier::BOLD);
}
