use ratatui::style::{Color, Modifier, Style};
use supports_color::Stream;

// ═══════════════════════════════════════════════════════════════════════════════
// 기본 팔레트
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg: Color,           // 기본 배경
    pub bg_alt: Color,       // 헤더, 상태바
    pub fg: Color,           // 기본 텍스트
    pub fg_dim: Color,       // 보조 정보
    pub fg_strong: Color,    // 제목
    pub fg_inverse: Color,   // 선택된 항목
    pub accent: Color,       // 프롬프트, 커서
    pub shortcut: Color,     // 단축키 표시
    pub positive: Color,     // 성공
    pub highlight: Color,    // 경고/에러
}

#[derive(Clone, Copy, Debug)]
pub struct EditorColors {
    pub line_number: Color,
    pub text: Color,
    pub cursor_bg: Color,
    pub callout_marker: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct DialogColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub input_text: Color,
    pub input_bg: Color,
    pub placeholder: Color,
    pub selected_bg: Color,
    pub selected_text: Color,
    pub glyph: Color,
    pub section: Color,
    pub scroll_info: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub palette: Palette,
    pub editor: EditorColors,
    pub dialog: DialogColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

impl Theme {
    /// Truecolor palette when the terminal supports it, 256-colour otherwise
    pub fn detect() -> Self {
        if Self::supports_true_color() {
            Self::dark_rgb()
        } else {
            Self::dark_256()
        }
    }

    /// Check if terminal supports true color (24-bit RGB)
    fn supports_true_color() -> bool {
        supports_color::on(Stream::Stdout)
            .map(|support| support.has_16m)
            .unwrap_or(false)
    }

    pub fn dark_256() -> Self {
        let palette = Palette {
            bg: Color::Indexed(235),
            bg_alt: Color::Indexed(237),
            fg: Color::Indexed(252),
            fg_dim: Color::Indexed(244),
            fg_strong: Color::Indexed(255),
            fg_inverse: Color::Indexed(232),
            accent: Color::Indexed(75),
            shortcut: Color::Indexed(179),
            positive: Color::Indexed(114),
            highlight: Color::Indexed(203),
        };
        Self::from_palette(palette)
    }

    pub fn dark_rgb() -> Self {
        let palette = Palette {
            bg: Color::Rgb(30, 30, 30),
            bg_alt: Color::Rgb(45, 45, 48),
            fg: Color::Rgb(212, 212, 212),
            fg_dim: Color::Rgb(128, 128, 128),
            fg_strong: Color::Rgb(255, 255, 255),
            fg_inverse: Color::Rgb(10, 10, 10),
            accent: Color::Rgb(97, 175, 239),
            shortcut: Color::Rgb(229, 192, 123),
            positive: Color::Rgb(152, 195, 121),
            highlight: Color::Rgb(224, 108, 117),
        };
        Self::from_palette(palette)
    }

    fn from_palette(palette: Palette) -> Self {
        Self {
            palette,
            editor: EditorColors {
                line_number: palette.fg_dim,
                text: palette.fg,
                cursor_bg: palette.accent,
                callout_marker: palette.shortcut,
            },
            dialog: DialogColors {
                bg: palette.bg_alt,
                border: palette.accent,
                title: palette.fg_strong,
                text: palette.fg,
                input_text: palette.fg_strong,
                input_bg: palette.bg,
                placeholder: palette.fg_dim,
                selected_bg: palette.accent,
                selected_text: palette.fg_inverse,
                glyph: palette.shortcut,
                section: palette.fg_dim,
                scroll_info: palette.fg_dim,
            },
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // 스타일 헬퍼 메서드
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.palette.fg_dim)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.dialog.selected_text)
            .bg(self.dialog.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg_alt)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.palette.highlight)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.palette.positive)
    }

    pub fn shortcut_style(&self) -> Style {
        Style::default()
            .fg(self.palette.shortcut)
            .add_modifier(Modifier::BOLD)
    }
}
