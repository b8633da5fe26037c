use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{app::App, theme::Theme};
use crate::config::Settings;

/// A free-text settings row bound to one field of [`Settings`]
pub struct TextSetting {
    pub name: &'static str,
    pub desc: &'static str,
    pub placeholder: &'static str,
    pub get: fn(&Settings) -> &str,
    pub set: fn(&mut Settings, String),
}

fn get_my_setting(settings: &Settings) -> &str {
    &settings.my_setting
}

fn set_my_setting(settings: &mut Settings, value: String) {
    settings.my_setting = value;
}

pub const SETTING_FIELDS: &[TextSetting] = &[TextSetting {
    name: "Setting #1",
    desc: "It's a secret",
    placeholder: "Enter your secret",
    get: get_my_setting,
    set: set_my_setting,
}];

pub fn draw(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(" Callout Modular Markdown: Settings ")
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(theme.normal_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for field in SETTING_FIELDS {
        let value = (field.get)(&app.settings);
        lines.push(Line::from(Span::styled(
            field.name,
            Style::default().fg(theme.palette.fg_strong).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(field.desc, theme.dim_style())));

        // 값이 비어 있으면 placeholder 표시
        let input = if value.is_empty() {
            Span::styled(field.placeholder, Style::default().fg(theme.dialog.placeholder))
        } else {
            Span::styled(value.to_string(), Style::default().fg(theme.dialog.input_text))
        };
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.palette.accent)),
            input,
            Span::styled("_", Style::default().fg(theme.palette.accent)),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Type", theme.shortcut_style()),
        Span::styled(" Edit (saved on change)  ", theme.dim_style()),
        Span::styled("Esc", theme.shortcut_style()),
        Span::styled(" Back", theme.dim_style()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Every edit goes through `App::update_setting`, which persists it
pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let Some(field) = SETTING_FIELDS.first() else {
        return;
    };
    let mut value = (field.get)(&app.settings).to_string();
    match code {
        KeyCode::Esc | KeyCode::F(2) => app.close_settings(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(c);
            app.update_setting(field, value);
        }
        KeyCode::Backspace => {
            if value.pop().is_some() {
                app.update_setting(field, value);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_binding() {
        let field = &SETTING_FIELDS[0];
        let mut settings = Settings::default();
        assert_eq!((field.get)(&settings), "default");
        (field.set)(&mut settings, "changed".to_string());
        assert_eq!(settings.my_setting, "changed");
    }
}
