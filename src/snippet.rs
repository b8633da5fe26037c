//! CSS snippet generation for callout tags.
//!
//! The snippet is a pure function of the static tables below and the icon
//! ids supplied by the registry. It is built in memory and written in one
//! atomic step, so a failed write never leaves a half-written file behind.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::icons::IconRegistry;
use crate::vault::write_atomic;

/// (canonical kind, alias tags, default icon id)
pub const BASE_CALLOUTS: &[(&str, &[&str], &str)] = &[
    ("bug", &["bug"], "lucide-bug"),
    ("default", &["default", "note"], "lucide-pencil"),
    ("error", &["error", "danger"], "lucide-zap"),
    ("example", &["example"], "lucide-list"),
    ("fail", &["fail", "failure", "missing"], "lucide-x"),
    ("important", &["important"], "lucide-flame"),
    ("info", &["info"], "lucide-info"),
    ("question", &["question", "help", "faq"], "lucide-circle-help"),
    ("success", &["success", "check", "done"], "lucide-check"),
    ("summary", &["summary", "abstract", "tldr"], "lucide-clipboard-list"),
    ("tip", &["tip", "hint"], "lucide-flame"),
    ("todo", &["todo"], "lucide-circle-check"),
    ("warning", &["warning", "caution", "attention"], "lucide-triangle-alert"),
    ("quote", &["quote", "cite"], "lucide-quote"),
];

/// Colour names that may prefix a callout value
pub const COLORS: &[&str] = &[
    "red", "blue", "green", "cyan", "yellow", "purple", "orange", "pink",
];

const HEADER: &str = "/* CSS Snippet for CalloutModularMarkdown Plugin */\n\n";

/// Renders the full snippet text.
///
/// Block order is fixed: modifiers, base callouts, colours, icon markers.
/// The icon-marker block comes last so a `#<iconId>` marker wins over the
/// icon set by an alias prefix while keeping the alias colour.
pub fn render_snippet(icon_ids: &[String]) -> String {
    let mut out = String::with_capacity(4096 + icon_ids.len() * 64);
    out.push_str(HEADER);

    out.push_str("/*Additional stylings for Callouts*/\n");
    out.push_str(
        ".callout[data-callout*=\"#darken\"] .callout-content{\n\tbackground-color: #00000020 !important;\n\tborder-radius: var(--callout-radius);\n}\n\n",
    );
    out.push_str(
        ".callout[data-callout*=\"#lighten\"] .callout-content{\n\tbackground-color: #FFFFFF20 !important;\n\tborder-radius: var(--callout-radius);\n}\n\n",
    );
    out.push_str(
        ".callout[data-callout*=\"#padding\"] .callout-content{\n\tpadding: var(--callout-padding)\n}\n\n",
    );

    out.push_str("/*Stylings to fix base Callouts*/\n");
    for (kind, tags, icon) in BASE_CALLOUTS {
        for tag in *tags {
            // String 에 쓰기는 실패하지 않음
            let _ = write!(
                out,
                ".callout[data-callout^=\"{}\"] {{\n\t--callout-color: var(--callout-{});\n\t--callout-icon: {};\n}}\n\n",
                tag, kind, icon
            );
        }
    }

    out.push_str("/*Stylings to change Callout Color*/\n");
    for color in COLORS {
        let _ = write!(
            out,
            ".callout[data-callout^=\"{}\"] {{\n\t--callout-color: var(--color-{}-rgb);\n}}\n\n",
            color, color
        );
    }

    out.push_str("/*Stylings to change Callout Icon by using the iconId*/\n");
    for icon_id in icon_ids {
        let _ = write!(
            out,
            ".callout[data-callout*=\"#{}\"] {{\n\t--callout-icon: {};\n}}\n\n",
            icon_id, icon_id
        );
    }

    out
}

/// Renders with the registry's current ids and overwrites `path`.
/// Returns the number of bytes written.
pub fn write_snippet(path: &Path, registry: &dyn IconRegistry) -> Result<usize> {
    let icon_ids = registry.icon_ids();
    let content = render_snippet(&icon_ids);
    write_atomic(path, &content)?;
    tracing::info!(
        path = %path.display(),
        icons = icon_ids.len(),
        bytes = content.len(),
        "callout snippet written"
    );
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconSet;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_warning_aliases_end_to_end() {
        let css = render_snippet(&[]);
        for tag in ["warning", "caution", "attention"] {
            let rule = format!(
                ".callout[data-callout^=\"{}\"] {{\n\t--callout-color: var(--callout-warning);\n\t--callout-icon: lucide-triangle-alert;\n}}",
                tag
            );
            assert_eq!(css.matches(&rule).count(), 1, "rule for {}", tag);
        }
    }

    #[test]
    fn test_every_alias_has_one_prefix_rule() {
        let css = render_snippet(&[]);
        for (kind, tags, icon) in BASE_CALLOUTS {
            for tag in *tags {
                let rule = format!(
                    "[data-callout^=\"{}\"] {{\n\t--callout-color: var(--callout-{});\n\t--callout-icon: {};\n}}",
                    tag, kind, icon
                );
                assert_eq!(css.matches(&rule).count(), 1, "alias {}", tag);
            }
        }
    }

    #[test]
    fn test_every_color_overrides_only_color() {
        let css = render_snippet(&[]);
        for color in COLORS {
            let rule = format!(
                ".callout[data-callout^=\"{}\"] {{\n\t--callout-color: var(--color-{}-rgb);\n}}",
                color, color
            );
            assert_eq!(css.matches(&rule).count(), 1, "color {}", color);
        }
    }

    #[test]
    fn test_icon_markers_emitted_last() {
        let icons = ids(&["lucide-bug", "custom-rocket"]);
        let css = render_snippet(&icons);
        let marker_block = css
            .find("/*Stylings to change Callout Icon by using the iconId*/")
            .unwrap();
        let last_color = css.rfind("--callout-color").unwrap();
        assert!(marker_block > last_color);

        for id in &icons {
            let rule = format!(
                ".callout[data-callout*=\"#{}\"] {{\n\t--callout-icon: {};\n}}",
                id, id
            );
            assert_eq!(css.matches(&rule).count(), 1);
            assert!(css.find(&rule).unwrap() > marker_block);
        }
    }

    #[test]
    fn test_modifier_rules_use_substring_match() {
        let css = render_snippet(&[]);
        for marker in ["#darken", "#lighten", "#padding"] {
            assert!(css.contains(&format!("[data-callout*=\"{}\"] .callout-content{{", marker)));
        }
        let darken = css.find("#darken").unwrap();
        let base = css.find("/*Stylings to fix base Callouts*/").unwrap();
        assert!(darken < base);
    }

    #[test]
    fn test_render_is_deterministic() {
        let icons = IconSet::builtin().icon_ids();
        assert_eq!(render_snippet(&icons), render_snippet(&icons));
    }

    #[test]
    fn test_write_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".obsidian/snippets/CalloutModularMarkdown.css");
        let registry = IconSet::builtin();

        write_snippet(&path, &registry).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        write_snippet(&path, &registry).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(HEADER));
    }

    #[test]
    fn test_write_replaces_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.css");
        std::fs::write(&path, "stale content that is longer than nothing").unwrap();
        let written = write_snippet(&path, &IconSet::with_extra(Vec::new())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.len(), written);
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_icon_list_with_bad_line_keeps_stylesheet_intact() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("icons.txt");
        std::fs::write(
            &list,
            "my-icon\nevil\"] { } body { display: none } .x[a=\"\n",
        )
        .unwrap();
        let registry = IconSet::with_extra_file(&list).unwrap();
        let css = render_snippet(&registry.icon_ids());
        assert!(!css.contains("body { display: none }"));
        assert!(!css.contains("evil"));
        assert!(css.contains(".callout[data-callout*=\"#my-icon\"]"));
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("snippet.css");
        assert!(write_snippet(&path, &IconSet::builtin()).is_err());
    }
}
