use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{
    app::{App, ContextMenuState, IconModalState, Overlay, PaletteState},
    theme::Theme,
};
use crate::commands::EDITOR_MENU;
use crate::icons::{IconRegistry, FALLBACK_GLYPH};
use crate::picker::{IconPicker, SuggestModal};

/// Centered rect of at most `width` x `height` inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Scroll offset that keeps `selected` visible, centered when possible
fn scroll_offset(selected: usize, total: usize, max_visible: usize) -> usize {
    if total <= max_visible || selected < max_visible / 2 {
        0
    } else if selected >= total - max_visible / 2 {
        total - max_visible
    } else {
        selected - max_visible / 2
    }
}

fn dialog_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(Style::default().bg(theme.dialog.bg).fg(theme.dialog.text))
}

fn query_line<'a>(query: &'a str, placeholder: &'a str, theme: &Theme) -> Line<'a> {
    let text = if query.is_empty() {
        Span::styled(placeholder, Style::default().fg(theme.dialog.placeholder))
    } else {
        Span::styled(query, Style::default().fg(theme.dialog.input_text))
    };
    Line::from(vec![
        Span::styled("> ", Style::default().fg(theme.palette.accent)),
        text,
        Span::styled("_", Style::default().fg(theme.palette.accent)),
    ])
}

pub fn draw_overlay(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    match app.overlay.as_ref() {
        Some(Overlay::IconModal(state)) => draw_icon_modal(frame, app, state, area, theme),
        Some(Overlay::Palette(state)) => draw_palette(frame, state, area, theme),
        Some(Overlay::ContextMenu(state)) => draw_context_menu(frame, app, state, area, theme),
        None => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 아이콘 선택 모달
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_icon_modal(frame: &mut Frame, app: &App, state: &IconModalState, area: Rect, theme: &Theme) {
    let rect = centered_rect(60, area.height.saturating_sub(4).max(8), area);
    frame.render_widget(Clear, rect);
    let block = dialog_block(" Insert Icon ", theme);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.height < 3 {
        return;
    }

    frame.render_widget(
        Paragraph::new(query_line(&state.query, "Search icons...", theme))
            .style(Style::default().bg(theme.dialog.input_bg)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let list_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
    let picker = IconPicker::new(&app.icons);
    let total = state.suggestions.len();
    if total == 0 {
        frame.render_widget(
            Paragraph::new(Span::styled("No matching icons", theme.dim_style())),
            list_area,
        );
        return;
    }

    let max_visible = list_area.height as usize;
    let offset = scroll_offset(state.selected_index, total, max_visible);
    let width = list_area.width as usize;
    let lines: Vec<Line> = state
        .suggestions
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible)
        .map(|(i, id)| {
            let row = picker.render(id);
            let glyph = format!(" {} ", row.glyph);
            let label_width = width.saturating_sub(glyph.width());
            let label = format!("{:<w$}", row.label, w = label_width);
            if i == state.selected_index {
                Line::from(vec![
                    Span::styled(glyph, theme.selected_style()),
                    Span::styled(label, theme.selected_style()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(glyph, Style::default().fg(theme.dialog.glyph)),
                    Span::styled(label, Style::default().fg(theme.dialog.text)),
                ])
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);

    // 스크롤 인디케이터
    if total > max_visible {
        let info = format!("[{}/{}]", state.selected_index + 1, total);
        let info_len = info.len() as u16;
        let x = inner.x + inner.width.saturating_sub(info_len);
        frame.render_widget(
            Paragraph::new(Span::styled(info, Style::default().fg(theme.dialog.scroll_info))),
            Rect::new(x, inner.y, info_len.min(inner.width), 1),
        );
    }
}

fn move_selection(selected: &mut usize, total: usize, delta: i32) {
    if total == 0 {
        *selected = 0;
        return;
    }
    let target = *selected as i64 + delta as i64;
    *selected = target.clamp(0, total as i64 - 1) as usize;
}

fn handle_icon_modal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let Some(Overlay::IconModal(state)) = app.overlay.as_mut() else {
        return;
    };
    let total = state.suggestions.len();
    match code {
        KeyCode::Esc => app.overlay = None,
        KeyCode::Enter => app.choose_icon(),
        KeyCode::Up => move_selection(&mut state.selected_index, total, -1),
        KeyCode::Down => move_selection(&mut state.selected_index, total, 1),
        KeyCode::PageUp => move_selection(&mut state.selected_index, total, -10),
        KeyCode::PageDown => move_selection(&mut state.selected_index, total, 10),
        KeyCode::Backspace => {
            let mut query = state.query.clone();
            if query.pop().is_some() {
                app.update_icon_query(query);
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let query = format!("{}{}", state.query, c);
            app.update_icon_query(query);
        }
        _ => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 명령 팔레트
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_palette(frame: &mut Frame, state: &PaletteState, area: Rect, theme: &Theme) {
    let height = (state.commands.len() as u16 + 4).max(5);
    let rect = centered_rect(50, height, area);
    frame.render_widget(Clear, rect);
    let block = dialog_block(" Command Palette ", theme);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut lines = vec![query_line(&state.query, "Type a command...", theme), Line::from("")];
    if state.commands.is_empty() {
        lines.push(Line::from(Span::styled("No commands found", theme.dim_style())));
    }
    let width = inner.width as usize;
    for (i, cmd) in state.commands.iter().enumerate() {
        // 이름은 왼쪽, id 는 오른쪽 정렬
        let name_width = width.saturating_sub(cmd.id.len() + 2);
        let name = format!(" {:<w$}", cmd.name, w = name_width);
        let id = format!("{} ", cmd.id);
        if i == state.selected_index {
            lines.push(Line::from(vec![
                Span::styled(name, theme.selected_style()),
                Span::styled(id, theme.selected_style()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(name, Style::default().fg(theme.dialog.text)),
                Span::styled(id, Style::default().fg(theme.dialog.section)),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn handle_palette_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let Some(Overlay::Palette(state)) = app.overlay.as_mut() else {
        return;
    };
    let total = state.commands.len();
    match code {
        KeyCode::Esc => app.overlay = None,
        KeyCode::Enter => app.run_selected_command(),
        KeyCode::Up => move_selection(&mut state.selected_index, total, -1),
        KeyCode::Down => move_selection(&mut state.selected_index, total, 1),
        KeyCode::Backspace => {
            let mut query = state.query.clone();
            if query.pop().is_some() {
                app.update_palette_query(query);
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let query = format!("{}{}", state.query, c);
            app.update_palette_query(query);
        }
        _ => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 에디터 컨텍스트 메뉴
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_context_menu(frame: &mut Frame, app: &App, state: &ContextMenuState, area: Rect, theme: &Theme) {
    // 섹션 헤더 + 항목
    let mut lines: Vec<Line> = Vec::new();
    let mut last_section = "";
    for (i, item) in EDITOR_MENU.iter().enumerate() {
        if item.section != last_section {
            lines.push(Line::from(Span::styled(
                format!(" {}", item.section),
                Style::default().fg(theme.dialog.section).add_modifier(Modifier::ITALIC),
            )));
            last_section = item.section;
        }
        let glyph = app.icons.glyph(item.icon).unwrap_or(FALLBACK_GLYPH);
        let text = format!(" {} {:<18}", glyph, item.title);
        let style = if i == state.selected_index {
            theme.selected_style()
        } else {
            Style::default().fg(theme.dialog.text)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let rect = centered_rect(26, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    let block = dialog_block(" Editor ", theme);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn handle_context_menu_input(app: &mut App, code: KeyCode) {
    let Some(Overlay::ContextMenu(state)) = app.overlay.as_mut() else {
        return;
    };
    match code {
        KeyCode::Esc => app.overlay = None,
        KeyCode::Up => move_selection(&mut state.selected_index, EDITOR_MENU.len(), -1),
        KeyCode::Down => move_selection(&mut state.selected_index, EDITOR_MENU.len(), 1),
        KeyCode::Enter => {
            if let Some(item) = EDITOR_MENU.get(state.selected_index) {
                app.run_action(item.action);
            } else {
                app.overlay = None;
            }
        }
        _ => {}
    }
}

/// Routes a key to the open overlay
pub fn handle_overlay_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.overlay {
        Some(Overlay::IconModal(_)) => handle_icon_modal_input(app, code, modifiers),
        Some(Overlay::Palette(_)) => handle_palette_input(app, code, modifiers),
        Some(Overlay::ContextMenu(_)) => handle_context_menu_input(app, code),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;
    use crate::vault::Vault;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        (dir, App::activate(vault, None, Theme::dark_256()))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_overlay_input(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 100, 10), 0);
        assert_eq!(scroll_offset(50, 100, 10), 45);
        assert_eq!(scroll_offset(99, 100, 10), 90);
        assert_eq!(scroll_offset(3, 5, 10), 0);
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut selected = 0;
        move_selection(&mut selected, 3, -1);
        assert_eq!(selected, 0);
        move_selection(&mut selected, 3, 10);
        assert_eq!(selected, 2);
        move_selection(&mut selected, 0, 1);
        assert_eq!(selected, 0);
    }

    #[test]
    fn test_typing_in_icon_modal_then_enter_inserts() {
        let (_dir, mut app) = app();
        app.open_icon_modal();
        type_str(&mut app, "bug-o");
        handle_overlay_input(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.editor.text(), "lucide-bug-off");
    }

    #[test]
    fn test_backspace_widens_icon_query() {
        let (_dir, mut app) = app();
        app.open_icon_modal();
        type_str(&mut app, "zzzz");
        handle_overlay_input(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        match app.overlay.as_ref() {
            Some(Overlay::IconModal(state)) => assert_eq!(state.query, "zzz"),
            other => panic!("unexpected overlay: {:?}", other),
        }
    }

    #[test]
    fn test_context_menu_insert_icon_opens_modal() {
        let (_dir, mut app) = app();
        app.open_context_menu();
        handle_overlay_input(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.overlay, Some(Overlay::IconModal(_))));
    }

    #[test]
    fn test_escape_closes_palette() {
        let (_dir, mut app) = app();
        app.open_palette();
        handle_overlay_input(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.overlay.is_none());
    }
}
