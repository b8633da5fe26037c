use std::path::Path;

use crate::commands::{palette_commands, Action, Command, CommandContext};
use crate::config::{Settings, SettingsStore};
use crate::icons::IconSet;
use crate::picker::{IconPicker, SuggestModal, TextBuffer};
use crate::snippet;
use crate::vault::Vault;
use super::editor::EditorState;
use super::settings_tab::TextSetting;
use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Editor,
    Settings,
}

/// Icon suggest modal
#[derive(Debug, Clone, Default)]
pub struct IconModalState {
    pub query: String,
    pub suggestions: Vec<String>,
    pub selected_index: usize,
}

/// Command palette
#[derive(Debug, Clone, Default)]
pub struct PaletteState {
    pub query: String,
    pub commands: Vec<&'static Command>,
    pub selected_index: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMenuState {
    pub selected_index: usize,
}

/// At most one overlay is open at a time
#[derive(Debug, Clone)]
pub enum Overlay {
    IconModal(IconModalState),
    Palette(PaletteState),
    ContextMenu(ContextMenuState),
}

pub struct App {
    pub vault: Vault,
    pub settings: Settings,
    pub store: SettingsStore,
    pub icons: IconSet,
    pub editor: EditorState,
    pub current_screen: Screen,
    pub overlay: Option<Overlay>,
    pub theme: Theme,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Activation: settings load, snippet generation, then the app is ready
    /// for interactive commands. A failed snippet write is reported in the
    /// status line and not retried.
    pub fn activate(vault: Vault, file: Option<&Path>, theme: Theme) -> Self {
        let store = SettingsStore::new(vault.plugin_data_path());
        let settings = store.load();

        let icons = IconSet::with_extra_file(&vault.icon_list_path()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read extra icon list");
            IconSet::builtin()
        });

        let message = match snippet::write_snippet(&vault.snippet_path(), &icons) {
            Ok(_) => format!("Snippet written: {}", snippet_display(&vault)),
            Err(e) => {
                tracing::error!(error = %e, "snippet generation failed");
                format!("Snippet write failed: {}", e)
            }
        };

        let mut editor = EditorState::new();
        let message = match file {
            Some(path) => match editor.load_file(path) {
                Ok(()) => message,
                Err(e) => format!("Cannot open {}: {}", path.display(), e),
            },
            None => message,
        };

        Self {
            vault,
            settings,
            store,
            icons,
            editor,
            current_screen: Screen::Editor,
            overlay: None,
            theme,
            message: Some(message),
            should_quit: false,
        }
    }

    pub fn command_context(&self) -> CommandContext {
        CommandContext {
            editor_active: self.current_screen == Screen::Editor,
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn run_action(&mut self, action: Action) {
        self.overlay = None;
        match action {
            Action::OpenIconModal => self.open_icon_modal(),
            Action::OpenSettings => self.current_screen = Screen::Settings,
            Action::SaveFile => match self.editor.save_file() {
                Ok(path) => self.set_message(format!("Saved {}", path.display())),
                Err(e) => self.set_message(format!("Save failed: {}", e)),
            },
            Action::Quit => self.should_quit = true,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // 아이콘 선택
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn open_icon_modal(&mut self) {
        let state = IconModalState {
            suggestions: IconPicker::new(&self.icons).suggestions(""),
            ..Default::default()
        };
        self.overlay = Some(Overlay::IconModal(state));
    }

    /// Re-filters after a query change
    pub fn update_icon_query(&mut self, query: String) {
        let suggestions = IconPicker::new(&self.icons).suggestions(&query);
        if let Some(Overlay::IconModal(state)) = self.overlay.as_mut() {
            state.query = query;
            state.suggestions = suggestions;
            state.selected_index = 0;
        }
    }

    /// Inserts the selected icon id into the editor, if it is the active
    /// view, and closes the modal.
    pub fn choose_icon(&mut self) {
        let Some(Overlay::IconModal(state)) = self.overlay.take() else {
            return;
        };
        let Some(icon) = state.suggestions.get(state.selected_index) else {
            return;
        };
        let target: Option<&mut dyn TextBuffer> = if self.current_screen == Screen::Editor {
            Some(&mut self.editor)
        } else {
            None
        };
        if IconPicker::new(&self.icons).choose(icon, target) {
            self.set_message(format!("Inserted {}", icon));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // 명령 팔레트
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn open_palette(&mut self) {
        let state = PaletteState {
            query: String::new(),
            commands: palette_commands(&self.command_context(), ""),
            selected_index: 0,
        };
        self.overlay = Some(Overlay::Palette(state));
    }

    pub fn update_palette_query(&mut self, query: String) {
        let commands = palette_commands(&self.command_context(), &query);
        if let Some(Overlay::Palette(state)) = self.overlay.as_mut() {
            state.query = query;
            state.commands = commands;
            state.selected_index = 0;
        }
    }

    pub fn run_selected_command(&mut self) {
        let action = match self.overlay.as_ref() {
            Some(Overlay::Palette(state)) => state
                .commands
                .get(state.selected_index)
                .map(|cmd| cmd.action),
            _ => None,
        };
        match action {
            Some(action) => self.run_action(action),
            None => self.overlay = None,
        }
    }

    pub fn open_context_menu(&mut self) {
        if self.current_screen == Screen::Editor {
            self.overlay = Some(Overlay::ContextMenu(ContextMenuState::default()));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // 설정
    // ═══════════════════════════════════════════════════════════════════════════

    /// Settings field change: update the record, then save it right away
    pub fn update_setting(&mut self, field: &TextSetting, value: String) {
        (field.set)(&mut self.settings, value);
        if let Err(e) = self.store.save(&self.settings) {
            tracing::error!(error = %e, "failed to save settings");
            self.set_message(format!("Settings save failed: {}", e));
        }
    }

    pub fn close_settings(&mut self) {
        self.current_screen = Screen::Editor;
    }
}

fn snippet_display(vault: &Vault) -> String {
    let path = vault.snippet_path();
    path.strip_prefix(vault.root())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn activated() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        let app = App::activate(vault, None, Theme::dark_256());
        (dir, app)
    }

    #[test]
    fn test_activation_writes_snippet_and_defaults() {
        let (dir, app) = activated();
        let css = fs::read_to_string(dir.path().join(".obsidian/snippets/CalloutModularMarkdown.css")).unwrap();
        assert!(css.contains("--callout-icon: lucide-triangle-alert;"));
        assert_eq!(app.settings.my_setting, "default");
        assert_eq!(app.current_screen, Screen::Editor);
    }

    #[test]
    fn test_activation_picks_up_extra_icons() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::write(dir.path().join(".obsidian/icons.txt"), "my-custom-icon\n").unwrap();
        let app = App::activate(Vault::open(dir.path()).unwrap(), None, Theme::dark_256());
        let css = fs::read_to_string(app.vault.snippet_path()).unwrap();
        assert!(css.contains(".callout[data-callout*=\"#my-custom-icon\"]"));
    }

    #[test]
    fn test_icon_modal_filters_and_inserts() {
        let (_dir, mut app) = activated();
        app.editor.insert_str("> [!tip#");
        app.run_action(Action::OpenIconModal);
        app.update_icon_query("TRIANGLE-ALERT".to_string());
        match app.overlay.as_ref() {
            Some(Overlay::IconModal(state)) => {
                assert_eq!(state.suggestions, vec!["lucide-triangle-alert"]);
            }
            other => panic!("unexpected overlay: {:?}", other),
        }
        app.choose_icon();
        assert!(app.overlay.is_none());
        assert_eq!(app.editor.text(), "> [!tip#lucide-triangle-alert");
    }

    #[test]
    fn test_choose_without_editor_is_silent() {
        let (_dir, mut app) = activated();
        app.open_icon_modal();
        app.current_screen = Screen::Settings;
        app.message = None;
        app.choose_icon();
        assert_eq!(app.editor.text(), "");
        assert!(app.message.is_none());
    }

    #[test]
    fn test_palette_hides_icon_command_outside_editor() {
        let (_dir, mut app) = activated();
        app.current_screen = Screen::Settings;
        app.open_palette();
        app.update_palette_query("icon".to_string());
        match app.overlay.as_ref() {
            Some(Overlay::Palette(state)) => assert!(state.commands.is_empty()),
            other => panic!("unexpected overlay: {:?}", other),
        }
    }

    #[test]
    fn test_palette_runs_icon_command() {
        let (_dir, mut app) = activated();
        app.open_palette();
        app.update_palette_query("icon text".to_string());
        app.run_selected_command();
        assert!(matches!(app.overlay, Some(Overlay::IconModal(_))));
    }

    #[test]
    fn test_setting_change_persists() {
        let (dir, mut app) = activated();
        app.update_setting(&crate::ui::settings_tab::SETTING_FIELDS[0], "secret".to_string());
        let reloaded = SettingsStore::new(
            dir.path().join(".obsidian/plugins/callout-modular-markdown/data.json"),
        )
        .load();
        assert_eq!(reloaded.my_setting, "secret");
    }
}
