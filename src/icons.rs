use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;

/// Source of icon identifiers and their glyphs.
///
/// The list is read fresh on every call so generation and the picker always
/// see the current set.
pub trait IconRegistry {
    /// All known icon ids, in the registry's native order
    fn icon_ids(&self) -> Vec<String>;

    /// Terminal glyph for an icon id, if the registry knows one
    fn glyph(&self, id: &str) -> Option<char>;
}

/// Fallback glyph for ids without a terminal rendition
pub const FALLBACK_GLYPH: char = '◇';

// ═══════════════════════════════════════════════════════════════════════════════
// 내장 Lucide 아이콘 목록 (id, 터미널 글리프)
// ═══════════════════════════════════════════════════════════════════════════════

pub const BUILTIN_ICONS: &[(&str, char)] = &[
    ("lucide-activity", '⌇'),
    ("lucide-alarm-clock", '⏰'),
    ("lucide-align-center", '≡'),
    ("lucide-align-left", '≡'),
    ("lucide-align-right", '≡'),
    ("lucide-anchor", '⚓'),
    ("lucide-archive", '▤'),
    ("lucide-arrow-down", '↓'),
    ("lucide-arrow-left", '←'),
    ("lucide-arrow-right", '→'),
    ("lucide-arrow-up", '↑'),
    ("lucide-at-sign", '@'),
    ("lucide-award", '✪'),
    ("lucide-bell", '🔔'),
    ("lucide-book", '📕'),
    ("lucide-book-open", '📖'),
    ("lucide-bookmark", '🔖'),
    ("lucide-box", '□'),
    ("lucide-brain", '🧠'),
    ("lucide-briefcase", '💼'),
    ("lucide-bug", '🐛'),
    ("lucide-bug-off", '🐛'),
    ("lucide-bug-play", '🐛'),
    ("lucide-calendar", '📅'),
    ("lucide-camera", '📷'),
    ("lucide-check", '✓'),
    ("lucide-check-check", '✓'),
    ("lucide-chevron-down", '⌄'),
    ("lucide-chevron-left", '‹'),
    ("lucide-chevron-right", '›'),
    ("lucide-chevron-up", '⌃'),
    ("lucide-circle", '○'),
    ("lucide-circle-alert", '⊘'),
    ("lucide-circle-check", '✔'),
    ("lucide-circle-help", '?'),
    ("lucide-circle-x", '⊗'),
    ("lucide-clipboard", '📋'),
    ("lucide-clipboard-list", '📋'),
    ("lucide-clock", '🕒'),
    ("lucide-cloud", '☁'),
    ("lucide-code", '⌨'),
    ("lucide-coffee", '☕'),
    ("lucide-cog", '⚙'),
    ("lucide-compass", '🧭'),
    ("lucide-copy", '⧉'),
    ("lucide-copy-plus", '⧉'),
    ("lucide-cpu", '▣'),
    ("lucide-database", '⛁'),
    ("lucide-download", '⤓'),
    ("lucide-edit", '✎'),
    ("lucide-eye", '👁'),
    ("lucide-file", '📄'),
    ("lucide-file-text", '📄'),
    ("lucide-flag", '⚑'),
    ("lucide-flame", '🔥'),
    ("lucide-folder", '📁'),
    ("lucide-gift", '🎁'),
    ("lucide-git-branch", '⎇'),
    ("lucide-globe", '🌐'),
    ("lucide-graduation-cap", '🎓'),
    ("lucide-hash", '#'),
    ("lucide-heart", '♥'),
    ("lucide-home", '⌂'),
    ("lucide-image", '🖼'),
    ("lucide-inbox", '📥'),
    ("lucide-info", 'ℹ'),
    ("lucide-key", '🔑'),
    ("lucide-layers", '☰'),
    ("lucide-lightbulb", '💡'),
    ("lucide-link", '🔗'),
    ("lucide-list", '☰'),
    ("lucide-list-checks", '☑'),
    ("lucide-lock", '🔒'),
    ("lucide-mail", '✉'),
    ("lucide-map", '🗺'),
    ("lucide-map-pin", '📍'),
    ("lucide-message-circle", '💬'),
    ("lucide-mic", '🎤'),
    ("lucide-moon", '☾'),
    ("lucide-music", '♪'),
    ("lucide-package", '📦'),
    ("lucide-paperclip", '📎'),
    ("lucide-pencil", '✏'),
    ("lucide-phone", '☎'),
    ("lucide-pin", '📌'),
    ("lucide-plus", '+'),
    ("lucide-quote", '❝'),
    ("lucide-rocket", '🚀'),
    ("lucide-save", '💾'),
    ("lucide-search", '🔍'),
    ("lucide-settings", '⚙'),
    ("lucide-shield", '🛡'),
    ("lucide-skull", '☠'),
    ("lucide-star", '★'),
    ("lucide-sun", '☀'),
    ("lucide-tag", '🏷'),
    ("lucide-target", '◎'),
    ("lucide-terminal", '⌨'),
    ("lucide-thumbs-down", '👎'),
    ("lucide-thumbs-up", '👍'),
    ("lucide-trash", '🗑'),
    ("lucide-trash-2", '🗑'),
    ("lucide-triangle-alert", '⚠'),
    ("lucide-trophy", '🏆'),
    ("lucide-user", '👤'),
    ("lucide-users", '👥'),
    ("lucide-wrench", '🔧'),
    ("lucide-x", '✗'),
    ("lucide-zap", '⚡'),
];

/// Built-in ids followed by any extra ids loaded from an icon list file.
///
/// The built-in table is a small Lucide subset; `.obsidian/icons.txt` in the
/// vault is how a user extends it, up to the picker's suggestion cap.
#[derive(Debug, Clone)]
pub struct IconSet {
    extra: Vec<String>,
}

impl IconSet {
    /// Built-in Lucide ids only
    pub fn builtin() -> Self {
        Self { extra: Vec::new() }
    }

    /// Built-in ids plus ids from `path`, if it exists
    pub fn with_extra_file(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::builtin()),
            Err(e) => return Err(e.into()),
        };
        let extra = parse_icon_list(&content);
        tracing::debug!(path = %path.display(), count = extra.len(), "loaded extra icon ids");
        Ok(Self::with_extra(extra))
    }

    pub fn with_extra(extra: Vec<String>) -> Self {
        Self { extra }
    }
}

impl IconRegistry for IconSet {
    fn icon_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        BUILTIN_ICONS
            .iter()
            .map(|(id, _)| id.to_string())
            .chain(self.extra.iter().cloned())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    fn glyph(&self, id: &str) -> Option<char> {
        BUILTIN_ICONS
            .iter()
            .find(|(builtin, _)| *builtin == id)
            .map(|(_, g)| *g)
    }
}

/// Ids go into attribute selectors and custom property values unquoted,
/// so only `[A-Za-z0-9_-]` is accepted
pub fn is_valid_icon_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One id per line; blank lines and `#` comments skipped, invalid ids dropped
fn parse_icon_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            let ok = is_valid_icon_id(line);
            if !ok {
                tracing::warn!(line = %line, "skipping invalid icon id");
            }
            ok
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique() {
        let ids = IconSet::builtin().icon_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), BUILTIN_ICONS.len());
    }

    #[test]
    fn test_builtin_covers_callout_defaults() {
        let ids = IconSet::builtin().icon_ids();
        for (_, _, icon) in crate::snippet::BASE_CALLOUTS {
            assert!(ids.iter().any(|id| id == icon), "missing {}", icon);
        }
    }

    #[test]
    fn test_parse_icon_list_skips_comments() {
        let parsed = parse_icon_list("# custom\nmy-icon\n\n  other-icon  \n");
        assert_eq!(parsed, vec!["my-icon", "other-icon"]);
    }

    #[test]
    fn test_parse_icon_list_skips_invalid_ids() {
        let parsed = parse_icon_list(
            "good-icon\nevil\"] { } body { display: none } .x[a=\"\nhas space\nsemi;colon\nok_2\n",
        );
        assert_eq!(parsed, vec!["good-icon", "ok_2"]);
    }

    #[test]
    fn test_builtin_ids_are_valid() {
        assert!(BUILTIN_ICONS.iter().all(|(id, _)| is_valid_icon_id(id)));
        assert!(!is_valid_icon_id(""));
        assert!(!is_valid_icon_id("a]b"));
    }

    #[test]
    fn test_extra_ids_appended_and_deduplicated() {
        let set = IconSet::with_extra(vec!["lucide-bug".to_string(), "custom-star".to_string()]);
        let ids = set.icon_ids();
        assert_eq!(ids.len(), BUILTIN_ICONS.len() + 1);
        assert_eq!(ids.last().map(String::as_str), Some("custom-star"));
    }

    #[test]
    fn test_missing_extra_file_is_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let set = IconSet::with_extra_file(&dir.path().join("icons.txt")).unwrap();
        assert_eq!(set.icon_ids().len(), BUILTIN_ICONS.len());
    }

    #[test]
    fn test_glyph_lookup() {
        let set = IconSet::builtin();
        assert_eq!(set.glyph("lucide-check"), Some('✓'));
        assert_eq!(set.glyph("unknown"), None);
    }
}
