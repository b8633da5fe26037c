use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{
    app::{App, Screen},
    dialogs, editor, settings_tab,
    theme::Theme,
};

const APP_TITLE: &str = concat!("CALLOUTMD v", env!("CARGO_PKG_VERSION"));

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.theme;
    let area = frame.area();

    let background = Block::default().style(Style::default().bg(theme.palette.bg));
    frame.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 헤더
            Constraint::Min(3),    // 본문
            Constraint::Length(1), // 상태바
            Constraint::Length(1), // 단축키
        ])
        .split(area);

    draw_header(frame, app, chunks[0], &theme);
    match app.current_screen {
        Screen::Editor => editor::draw(frame, &mut app.editor, chunks[1], &theme, app.overlay.is_none()),
        Screen::Settings => settings_tab::draw(frame, app, chunks[1], &theme),
    }
    draw_status_bar(frame, app, chunks[2], &theme);
    draw_function_bar(frame, app, chunks[3], &theme);

    dialogs::draw_overlay(frame, app, area, &theme);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_TITLE), theme.shortcut_style()),
        Span::styled(app.vault.root().display().to_string(), theme.dim_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.status_bar_style()), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let message = app.message.clone().unwrap_or_default();
    let style = if message.contains("failed") || message.starts_with("Cannot") {
        theme.error_style()
    } else {
        theme.success_style()
    };
    let (line, col) = (app.editor.cursor_line + 1, app.editor.cursor_col + 1);
    let position = format!("Ln {}, Col {} ", line, col);
    let width = area.width as usize;
    let msg_width = width.saturating_sub(position.len() + 1);
    let msg: String = message.chars().take(msg_width).collect();
    let padding = width.saturating_sub(msg.chars().count() + position.len() + 1);

    let line = Line::from(vec![
        Span::styled(format!(" {}", msg), style),
        Span::raw(" ".repeat(padding)),
        Span::styled(position, theme.dim_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.status_bar_style()), area);
}

fn draw_function_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let keys: &[(&str, &str)] = match app.current_screen {
        Screen::Editor => &[
            ("^P", "Commands"),
            ("F10", "Menu"),
            ("F2", "Settings"),
            ("^S", "Save"),
            ("^Q", "Quit"),
        ],
        Screen::Settings => &[("Esc", "Back"), ("^P", "Commands"), ("^Q", "Quit")],
    };
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {}", key), theme.shortcut_style()));
        spans.push(Span::styled(format!(" {} ", label), theme.dim_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.status_bar_style()), area);
}
