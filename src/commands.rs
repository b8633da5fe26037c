//! Interactive entry points: palette commands and editor menu items.

/// What an entry point does once triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenIconModal,
    OpenSettings,
    SaveFile,
    Quit,
}

/// State a command's availability check looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandContext {
    /// A markdown editor is the active view
    pub editor_active: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub id: &'static str,
    pub name: &'static str,
    pub action: Action,
    check: fn(&CommandContext) -> bool,
}

impl Command {
    /// Whether the command can run, and so whether the palette lists it
    pub fn is_available(&self, ctx: &CommandContext) -> bool {
        (self.check)(ctx)
    }
}

fn always(_: &CommandContext) -> bool {
    true
}

fn editor_active(ctx: &CommandContext) -> bool {
    ctx.editor_active
}

pub const COMMANDS: &[Command] = &[
    Command {
        id: "open-icon-modal",
        name: "Open Icon Text Select",
        action: Action::OpenIconModal,
        check: editor_active,
    },
    Command {
        id: "open-settings",
        name: "Open settings",
        action: Action::OpenSettings,
        check: always,
    },
    Command {
        id: "save-file",
        name: "Save current file",
        action: Action::SaveFile,
        check: editor_active,
    },
    Command {
        id: "quit",
        name: "Quit",
        action: Action::Quit,
        check: always,
    },
];

/// Commands available in `ctx` whose name contains `query` (case-insensitive)
pub fn palette_commands(ctx: &CommandContext, query: &str) -> Vec<&'static Command> {
    let needle = query.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| cmd.is_available(ctx))
        .filter(|cmd| cmd.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub title: &'static str,
    pub icon: &'static str,
    pub section: &'static str,
    pub action: Action,
}

/// Items added to the editor context menu
pub const EDITOR_MENU: &[MenuItem] = &[
    MenuItem {
        title: "Insert Icon",
        icon: "lucide-copy-plus",
        section: "insert",
        action: Action::OpenIconModal,
    },
    MenuItem {
        title: "Save",
        icon: "lucide-save",
        section: "file",
        action: Action::SaveFile,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_command_requires_editor() {
        let inactive = CommandContext { editor_active: false };
        let active = CommandContext { editor_active: true };
        assert!(palette_commands(&inactive, "icon").is_empty());
        let found = palette_commands(&active, "icon");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "open-icon-modal");
    }

    #[test]
    fn test_palette_query_case_insensitive() {
        let ctx = CommandContext { editor_active: true };
        assert_eq!(palette_commands(&ctx, "SETTINGS")[0].action, Action::OpenSettings);
        assert_eq!(palette_commands(&ctx, "").len(), COMMANDS.len());
    }

    #[test]
    fn test_editor_menu_has_insert_icon() {
        let item = EDITOR_MENU.iter().find(|i| i.section == "insert").unwrap();
        assert_eq!(item.title, "Insert Icon");
        assert_eq!(item.action, Action::OpenIconModal);
    }
}
