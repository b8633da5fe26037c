use std::fs;
use std::path::{Path, PathBuf};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{app::App, theme::Theme};
use crate::commands::Action;
use crate::error::Result;
use crate::picker::{Position, TextBuffer};
use crate::vault::write_atomic;

/// Maximum file size for editing
const MAX_EDIT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 편집기 상태
#[derive(Debug)]
pub struct EditorState {
    pub file_path: Option<PathBuf>,
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub scroll: usize,
    pub modified: bool,
    original_lines: Vec<String>,

    // 화면 크기 (렌더링 시 업데이트)
    pub visible_height: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            file_path: None,
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll: 0,
            modified: false,
            original_lines: vec![String::new()],
            visible_height: 20,
        }
    }

    /// 파일 로드. A missing file opens as an empty new buffer.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            let metadata = fs::metadata(path)?;
            if metadata.len() > MAX_EDIT_FILE_SIZE {
                return Err(crate::error::CalloutError::Other(format!(
                    "File too large for editing ({:.1} MB)",
                    metadata.len() as f64 / 1024.0 / 1024.0
                )));
            }
            let content = fs::read_to_string(path)?;
            self.lines = content.lines().map(String::from).collect();
        } else {
            self.lines = Vec::new();
        }
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }

        self.file_path = Some(path.to_path_buf());
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.scroll = 0;
        self.original_lines = self.lines.clone();
        self.modified = false;
        Ok(())
    }

    /// 파일 저장. Scratch buffers have nowhere to go and report an error.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let path = self.file_path.clone().ok_or_else(|| {
            crate::error::CalloutError::Other("Scratch buffer has no file path".to_string())
        })?;
        let mut content = self.lines.join("\n");
        content.push('\n');
        write_atomic(&path, &content)?;
        self.original_lines = self.lines.clone();
        self.modified = false;
        tracing::debug!(path = %path.display(), "file saved");
        Ok(path)
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[scratch]".to_string())
    }

    fn update_modified(&mut self) {
        self.modified = self.lines != self.original_lines;
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    /// char index → byte index within a line
    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// 문자열 삽입 at the cursor; may contain newlines
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let line = &self.lines[self.cursor_line];
        let at = Self::byte_index(line, self.cursor_col);
        let before = line[..at].to_string();
        let after = line[at..].to_string();

        let parts: Vec<&str> = s.split('\n').collect();
        let last_idx = parts.len() - 1;
        if last_idx == 0 {
            self.lines[self.cursor_line] = format!("{}{}{}", before, s, after);
            self.cursor_col += s.chars().count();
        } else {
            self.lines[self.cursor_line] = format!("{}{}", before, parts[0]);
            for (i, part) in parts.iter().enumerate().skip(1) {
                let content = if i == last_idx {
                    format!("{}{}", part, after)
                } else {
                    part.to_string()
                };
                self.lines.insert(self.cursor_line + i, content);
            }
            self.cursor_line += last_idx;
            self.cursor_col = parts[last_idx].chars().count();
        }
        self.update_modified();
        self.update_scroll();
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// 뒤로 삭제 (Backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let start = Self::byte_index(line, self.cursor_col - 1);
            let end = Self::byte_index(line, self.cursor_col);
            line.replace_range(start..end, "");
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            // 이전 줄과 병합
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
        }
        self.update_modified();
        self.update_scroll();
    }

    /// 앞으로 삭제 (Delete)
    pub fn delete_forward(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            let line = &mut self.lines[self.cursor_line];
            let start = Self::byte_index(line, self.cursor_col);
            let end = Self::byte_index(line, self.cursor_col + 1);
            line.replace_range(start..end, "");
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
        self.update_modified();
    }

    pub fn move_cursor(&mut self, line_delta: i32, col_delta: i32) {
        if line_delta != 0 {
            let target = self.cursor_line as i64 + line_delta as i64;
            self.cursor_line = target.clamp(0, self.lines.len() as i64 - 1) as usize;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
        }
        if col_delta < 0 {
            if self.cursor_col > 0 {
                self.cursor_col -= 1;
            } else if self.cursor_line > 0 {
                self.cursor_line -= 1;
                self.cursor_col = self.line_len(self.cursor_line);
            }
        } else if col_delta > 0 {
            if self.cursor_col < self.line_len(self.cursor_line) {
                self.cursor_col += 1;
            } else if self.cursor_line + 1 < self.lines.len() {
                self.cursor_line += 1;
                self.cursor_col = 0;
            }
        }
        self.update_scroll();
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_line);
    }

    /// 커서가 항상 보이도록 스크롤 조정
    pub fn update_scroll(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor_line < self.scroll {
            self.scroll = self.cursor_line;
        } else if self.cursor_line >= self.scroll + height {
            self.scroll = self.cursor_line + 1 - height;
        }
    }
}

impl TextBuffer for EditorState {
    fn cursor(&self) -> Position {
        (self.cursor_line, self.cursor_col)
    }

    fn insert_at(&mut self, pos: Position, text: &str) {
        self.cursor_line = pos.0.min(self.lines.len() - 1);
        self.cursor_col = pos.1.min(self.line_len(self.cursor_line));
        self.insert_str(text);
    }
}

/// Callout header lines (`> [!kind...]`) get the marker colour
fn is_callout_header(line: &str) -> bool {
    line.trim_start().trim_start_matches('>').trim_start().starts_with("[!")
}

pub fn draw(frame: &mut Frame, state: &mut EditorState, area: Rect, theme: &Theme, active: bool) {
    let title = format!(" {}{} ", state.display_name(), if state.modified { " *" } else { "" });
    let border_style = if active {
        Style::default().fg(theme.dialog.border)
    } else {
        theme.dim_style()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.normal_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.visible_height = inner.height as usize;
    state.update_scroll();

    let gutter = state.lines.len().to_string().len().max(3);
    let mut lines: Vec<Line> = Vec::new();
    for (idx, text) in state
        .lines
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(inner.height as usize)
    {
        let text_style = if is_callout_header(text) {
            Style::default().fg(theme.editor.callout_marker)
        } else {
            Style::default().fg(theme.editor.text)
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", idx + 1, width = gutter),
            Style::default().fg(theme.editor.line_number),
        )];

        if active && idx == state.cursor_line {
            // 커서 위치 문자를 반전 표시
            let chars: Vec<char> = text.chars().collect();
            let col = state.cursor_col.min(chars.len());
            let before: String = chars[..col].iter().collect();
            let at: String = chars.get(col).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
            let after: String = chars.get(col + 1..).map(|s| s.iter().collect()).unwrap_or_default();
            spans.push(Span::styled(before, text_style));
            spans.push(Span::styled(
                at,
                Style::default()
                    .bg(theme.editor.cursor_bg)
                    .fg(theme.palette.fg_inverse)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(after, text_style));
        } else {
            spans.push(Span::styled(text.clone(), text_style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(code, KeyCode::Char('s') | KeyCode::Char('S')) {
        app.run_action(Action::SaveFile);
        return;
    }

    let state = &mut app.editor;
    match code {
        KeyCode::Char(c) if !ctrl => state.insert_char(c),
        KeyCode::Enter => state.insert_newline(),
        KeyCode::Tab => state.insert_str("    "),
        KeyCode::Backspace => state.delete_backward(),
        KeyCode::Delete => state.delete_forward(),
        KeyCode::Up => state.move_cursor(-1, 0),
        KeyCode::Down => state.move_cursor(1, 0),
        KeyCode::Left => state.move_cursor(0, -1),
        KeyCode::Right => state.move_cursor(0, 1),
        KeyCode::PageUp => state.move_cursor(-(state.visible_height.max(1) as i32), 0),
        KeyCode::PageDown => state.move_cursor(state.visible_height.max(1) as i32, 0),
        KeyCode::Home => state.move_to_line_start(),
        KeyCode::End => state.move_to_line_end(),
        _ => {}
    }
}
