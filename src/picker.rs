use crate::icons::{IconRegistry, FALLBACK_GLYPH};

/// Maximum number of suggestions offered at once
pub const SUGGESTION_LIMIT: usize = 3000;

/// Cursor position in a text buffer: (line, column in chars)
pub type Position = (usize, usize);

/// An editable text buffer that a picker can insert into
pub trait TextBuffer {
    fn cursor(&self) -> Position;

    /// Inserts `text` at `pos` and leaves the cursor after it
    fn insert_at(&mut self, pos: Position, text: &str);
}

/// One rendered suggestion row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub glyph: char,
    pub label: String,
}

/// Query-driven selection over a list of items.
///
/// The host draws the rows and routes keys; filtering, row composition and
/// the effect of choosing stay here.
pub trait SuggestModal {
    type Item;

    fn suggestions(&self, query: &str) -> Vec<Self::Item>;

    fn render(&self, item: &Self::Item) -> SuggestionRow;

    /// Applies the chosen item. Returns false when there was nothing to
    /// apply it to.
    fn choose(&self, item: &Self::Item, target: Option<&mut dyn TextBuffer>) -> bool;
}

/// Case-insensitive substring filter, keeping input order, capped at `limit`
pub fn filter_contains<'a, I>(items: I, query: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Icon id picker over an [`IconRegistry`]
pub struct IconPicker<'a> {
    registry: &'a dyn IconRegistry,
    limit: usize,
}

impl<'a> IconPicker<'a> {
    pub fn new(registry: &'a dyn IconRegistry) -> Self {
        Self {
            registry,
            limit: SUGGESTION_LIMIT,
        }
    }

    #[allow(dead_code)]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[allow(dead_code)]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl SuggestModal for IconPicker<'_> {
    type Item = String;

    fn suggestions(&self, query: &str) -> Vec<String> {
        // 매번 레지스트리에서 새로 읽음
        let ids = self.registry.icon_ids();
        filter_contains(&ids, query, self.limit)
    }

    fn render(&self, item: &String) -> SuggestionRow {
        SuggestionRow {
            glyph: self.registry.glyph(item).unwrap_or(FALLBACK_GLYPH),
            label: item.clone(),
        }
    }

    fn choose(&self, item: &String, target: Option<&mut dyn TextBuffer>) -> bool {
        match target {
            Some(buffer) => {
                let pos = buffer.cursor();
                buffer.insert_at(pos, item);
                tracing::debug!(icon = %item, line = pos.0, col = pos.1, "icon id inserted");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconSet;

    struct Registry(Vec<&'static str>);

    impl IconRegistry for Registry {
        fn icon_ids(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }

        fn glyph(&self, id: &str) -> Option<char> {
            (id == "lucide-bug").then_some('B')
        }
    }

    #[derive(Default)]
    struct Buffer {
        text: String,
        cursor: usize,
    }

    impl TextBuffer for Buffer {
        fn cursor(&self) -> Position {
            (0, self.cursor)
        }

        fn insert_at(&mut self, pos: Position, text: &str) {
            self.text.insert_str(pos.1, text);
            self.cursor = pos.1 + text.len();
        }
    }

    #[test]
    fn test_suggestions_case_insensitive() {
        let reg = Registry(vec!["lucide-bug", "Lucide-BUG-off", "lucide-check", "debug-x"]);
        let picker = IconPicker::new(&reg);
        assert_eq!(
            picker.suggestions("bUg"),
            vec!["lucide-bug", "Lucide-BUG-off", "debug-x"]
        );
    }

    #[test]
    fn test_suggestions_exclude_non_matching() {
        let picker_registry = IconSet::builtin();
        let picker = IconPicker::new(&picker_registry);
        let found = picker.suggestions("bug");
        assert!(!found.is_empty());
        assert!(found.iter().all(|id| id.to_lowercase().contains("bug")));
        let expected = picker_registry
            .icon_ids()
            .into_iter()
            .filter(|id| id.contains("bug"))
            .count();
        assert_eq!(found.len(), expected);
    }

    #[test]
    fn test_empty_query_returns_capped_list() {
        let reg = Registry(vec!["a", "b", "c", "d"]);
        assert_eq!(IconPicker::new(&reg).suggestions("").len(), 4);
        assert_eq!(IconPicker::new(&reg).with_limit(2).suggestions(""), vec!["a", "b"]);
    }

    #[test]
    fn test_default_limit() {
        let reg = Registry(vec![]);
        assert_eq!(IconPicker::new(&reg).limit(), 3000);
    }

    #[test]
    fn test_render_row_with_fallback_glyph() {
        let reg = Registry(vec!["lucide-bug", "other"]);
        let picker = IconPicker::new(&reg);
        assert_eq!(picker.render(&"lucide-bug".to_string()).glyph, 'B');
        let row = picker.render(&"other".to_string());
        assert_eq!(row.glyph, FALLBACK_GLYPH);
        assert_eq!(row.label, "other");
    }

    #[test]
    fn test_choose_inserts_at_cursor() {
        let reg = Registry(vec!["lucide-bug"]);
        let picker = IconPicker::new(&reg);
        let mut buffer = Buffer {
            text: "> [!tip#]".to_string(),
            cursor: 8,
        };
        assert!(picker.choose(&"lucide-bug".to_string(), Some(&mut buffer)));
        assert_eq!(buffer.text, "> [!tip#lucide-bug]");
        assert_eq!(buffer.cursor, 18);
    }

    #[test]
    fn test_choose_without_buffer_is_noop() {
        let reg = Registry(vec!["lucide-bug"]);
        assert!(!IconPicker::new(&reg).choose(&"lucide-bug".to_string(), None));
    }
}
