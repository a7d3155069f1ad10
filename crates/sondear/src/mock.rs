//! Scripted in-memory rendition of the grid demo.
//!
//! [`MockGridSession`] implements [`Session`] against a small model of the
//! page under test: a menu bar (`Component > Editor > ...`), a virtualized
//! data grid, and the inline row editor with its save/cancel buttons and
//! event log. It honors the same DOM contract the real page does, so harness
//! code and tests exercise identical query paths either way.

use async_trait::async_trait;
use tracing::debug;

use crate::grid::{
    SelectionMode, CANCEL_CLASS, DEFAULT_CANCEL_CAPTION, DEFAULT_SAVE_CAPTION, EDITOR_CELL_CLASS,
    EDITOR_CLASS, FIELD_CLASS, GRID_CLASS, LOG_CLASS, SAVE_CLASS,
};
use crate::result::{HarnessError, HarnessResult};
use crate::selector::Selector;
use crate::session::{ElementHandle, Key, Session};

/// Rows in the demo dataset
pub const ROW_COUNT: usize = 1000;
/// Columns in the demo dataset
pub const COLUMN_COUNT: usize = 5;
/// The one column without an editor widget
pub const UNEDITABLE_COLUMN: usize = 3;
/// Columns that render an editor text widget
pub const EDITABLE_COLUMNS: usize = COLUMN_COUNT - 1;
/// Rows materialized in the scroll window at any time
pub const VIEWPORT_ROWS: usize = 20;
/// URL the demo page is served from
pub const TEST_URL: &str = "http://localhost:8888/grid-editor";

const EDITOR_MENU_ENTRIES: [&str; 7] = [
    "Enabled",
    "Edit row 5",
    "Edit row 100",
    "Cancel edit",
    "Save",
    "Change Save Caption",
    "Change Cancel Caption",
];

const SELECTION_MODE_ENTRIES: [&str; 3] = ["none", "single", "multi"];

/// What a resolved handle points at in the model
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Grid,
    Editor,
    EditorCell(usize),
    Field(usize),
    SaveButton,
    CancelButton,
    Log,
    Row(usize),
    Cell(usize, usize),
    MenuEntry { depth: usize, label: String },
}

#[derive(Debug, Clone)]
struct OpenEditor {
    row: usize,
    /// One value per editable column, in column order
    fields: Vec<String>,
}

/// In-memory [`Session`] over the grid demo model
#[derive(Debug)]
pub struct MockGridSession {
    url: String,
    enabled: bool,
    selection_mode: SelectionMode,
    editor: Option<OpenEditor>,
    save_caption: String,
    cancel_caption: String,
    log: Vec<String>,
    cells: Vec<Vec<String>>,
    viewport_start: usize,
    /// Labels of the open submenu chain, outermost first
    open_menus: Vec<String>,
    focused_cell: Option<(usize, usize)>,
    calls: Vec<String>,
}

impl Default for MockGridSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGridSession {
    /// Create a session with the demo page freshly loaded
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: TEST_URL.to_string(),
            enabled: false,
            selection_mode: SelectionMode::Single,
            editor: None,
            save_caption: DEFAULT_SAVE_CAPTION.to_string(),
            cancel_caption: DEFAULT_CANCEL_CAPTION.to_string(),
            log: Vec::new(),
            cells: (0..ROW_COUNT)
                .map(|r| (0..COLUMN_COUNT).map(|c| format!("({r}, {c})")).collect())
                .collect(),
            viewport_start: 0,
            open_menus: Vec::new(),
            focused_cell: None,
            calls: Vec::new(),
        }
    }

    /// Whether the editor feature is enabled
    #[must_use]
    pub fn editor_enabled(&self) -> bool {
        self.enabled
    }

    /// Current selection mode of the grid
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Row the editor is open for, `None` while closed
    #[must_use]
    pub fn open_editor_row(&self) -> Option<usize> {
        self.editor.as_ref().map(|e| e.row)
    }

    /// All appended log entries, oldest first
    #[must_use]
    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// First row of the rendered scroll window
    #[must_use]
    pub fn viewport_start(&self) -> usize {
        self.viewport_start
    }

    /// Call history for verification
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.calls
    }

    /// Check whether a session method was invoked
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.calls.iter().any(|c| c.starts_with(method))
    }

    fn rendered(&self, row: usize) -> bool {
        row < ROW_COUNT
            && row >= self.viewport_start
            && row < self.viewport_start + VIEWPORT_ROWS
    }

    fn editable_columns() -> impl Iterator<Item = usize> {
        (0..COLUMN_COUNT).filter(|c| *c != UNEDITABLE_COLUMN)
    }

    fn menu_entries(&self, depth: usize) -> Vec<String> {
        let open_at = |d: usize| self.open_menus.get(d).map(String::as_str);
        match depth {
            0 => vec!["Component".to_string()],
            1 if open_at(0) == Some("Component") => {
                vec!["Editor".to_string(), "State".to_string()]
            }
            2 if open_at(1) == Some("Editor") => {
                EDITOR_MENU_ENTRIES.iter().map(|s| (*s).to_string()).collect()
            }
            2 if open_at(1) == Some("State") => vec!["Selection mode".to_string()],
            3 if open_at(2) == Some("Selection mode") => SELECTION_MODE_ENTRIES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Editor cells in render order: selector column first under multi
    /// selection, then one cell per data column.
    fn editor_cell_count(&self) -> usize {
        COLUMN_COUNT + usize::from(self.selection_mode == SelectionMode::Multi)
    }

    fn editor_cell_text(&self, index: usize) -> String {
        let Some(open) = &self.editor else {
            return String::new();
        };
        let offset = usize::from(self.selection_mode == SelectionMode::Multi);
        if index < offset {
            // The selector column's editor cell stays empty.
            return String::new();
        }
        let col = index - offset;
        Self::editable_columns()
            .position(|c| c == col)
            .map(|i| open.fields[i].clone())
            .unwrap_or_default()
    }

    fn matches(&self, selector: &Selector) -> Vec<Target> {
        match selector {
            Selector::ClassName(name) => match name.as_str() {
                GRID_CLASS => vec![Target::Grid],
                EDITOR_CLASS if self.editor.is_some() => vec![Target::Editor],
                EDITOR_CELL_CLASS if self.editor.is_some() => {
                    (0..self.editor_cell_count()).map(Target::EditorCell).collect()
                }
                FIELD_CLASS => match &self.editor {
                    Some(open) => (0..open.fields.len()).map(Target::Field).collect(),
                    None => Vec::new(),
                },
                SAVE_CLASS if self.editor.is_some() => vec![Target::SaveButton],
                CANCEL_CLASS if self.editor.is_some() => vec![Target::CancelButton],
                LOG_CLASS => vec![Target::Log],
                _ => Vec::new(),
            },
            Selector::Row(row) if self.rendered(*row) => vec![Target::Row(*row)],
            Selector::Cell { row, col } if self.rendered(*row) && *col < COLUMN_COUNT => {
                vec![Target::Cell(*row, *col)]
            }
            Selector::MenuItem { depth } => self
                .menu_entries(*depth)
                .into_iter()
                .map(|label| Target::MenuEntry {
                    depth: *depth,
                    label,
                })
                .collect(),
            // The mock resolves structural selectors only; raw CSS matches
            // nothing here.
            _ => Vec::new(),
        }
    }

    fn resolve(&self, handle: &ElementHandle) -> HarnessResult<Target> {
        self.matches(&handle.selector)
            .into_iter()
            .nth(handle.index)
            .ok_or_else(|| HarnessError::not_found(handle.describe()))
    }

    fn scroll_to(&mut self, row: usize) {
        if !self.rendered(row) {
            let max_start = ROW_COUNT.saturating_sub(VIEWPORT_ROWS);
            self.viewport_start = row.saturating_sub(VIEWPORT_ROWS / 2).min(max_start);
            debug!(row, start = self.viewport_start, "scrolled viewport");
        }
    }

    fn open_editor(&mut self, row: usize) {
        if !self.enabled {
            debug!(row, "edit request ignored, editor disabled");
            return;
        }
        if self.editor.as_ref().is_some_and(|e| e.row == row) {
            // Already editing this row.
            return;
        }
        self.scroll_to(row);
        let fields = Self::editable_columns()
            .map(|c| self.cells[row][c].clone())
            .collect();
        self.editor = Some(OpenEditor { row, fields });
        debug!(row, "editor opened");
    }

    fn cancel_edit(&mut self) {
        if let Some(open) = self.editor.take() {
            self.log.push(format!("Row {} edit cancelled", open.row));
            debug!(row = open.row, "editor cancelled");
        }
    }

    fn save_edit(&mut self) {
        if let Some(open) = self.editor.take() {
            for (i, col) in Self::editable_columns().enumerate() {
                self.cells[open.row][col] = open.fields[i].clone();
            }
            debug!(row = open.row, "editor saved");
        }
    }

    fn run_command(&mut self, label: &str) {
        debug!(label, "running menu command");
        match label {
            "Enabled" => self.enabled = !self.enabled,
            "Cancel edit" => self.cancel_edit(),
            "Save" => self.save_edit(),
            "Change Save Caption" => {
                self.save_caption = self.save_caption.chars().rev().collect();
            }
            "Change Cancel Caption" => {
                self.cancel_caption = self.cancel_caption.chars().rev().collect();
            }
            "none" => self.selection_mode = SelectionMode::None,
            "single" => self.selection_mode = SelectionMode::Single,
            "multi" => self.selection_mode = SelectionMode::Multi,
            other => {
                if let Some(row) = other
                    .strip_prefix("Edit row ")
                    .and_then(|n| n.parse::<usize>().ok())
                {
                    self.open_editor(row);
                }
            }
        }
    }

    fn click_menu_entry(&mut self, depth: usize, label: &str) {
        // Clicking at a level closes any deeper popups first.
        self.open_menus.truncate(depth);
        let is_submenu = matches!(
            (depth, label),
            (0, "Component") | (1, "Editor" | "State") | (2, "Selection mode")
        );
        if is_submenu {
            self.open_menus.push(label.to_string());
        } else {
            self.run_command(label);
            self.open_menus.clear();
        }
    }
}

#[async_trait]
impl Session for MockGridSession {
    async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
        self.calls.push(format!("navigate:{url}"));
        // Fresh page load: all widget state resets.
        let history = std::mem::take(&mut self.calls);
        *self = Self::new();
        self.calls = history;
        self.url = url.to_string();
        Ok(())
    }

    async fn find(&self, selector: &Selector) -> HarnessResult<Option<ElementHandle>> {
        let count = self.matches(selector).len();
        Ok((count > 0).then(|| ElementHandle::first(selector.clone())))
    }

    async fn find_all(&self, selector: &Selector) -> HarnessResult<Vec<ElementHandle>> {
        let count = self.matches(selector).len();
        Ok((0..count)
            .map(|i| ElementHandle::nth(selector.clone(), i))
            .collect())
    }

    async fn click(&mut self, handle: &ElementHandle) -> HarnessResult<()> {
        self.calls.push(format!("click:{}", handle.describe()));
        match self.resolve(handle)? {
            Target::MenuEntry { depth, label } => self.click_menu_entry(depth, &label),
            Target::Cell(row, col) => self.focused_cell = Some((row, col)),
            Target::SaveButton => self.save_edit(),
            Target::CancelButton => self.cancel_edit(),
            Target::Grid
            | Target::Editor
            | Target::EditorCell(_)
            | Target::Field(_)
            | Target::Log
            | Target::Row(_) => {}
        }
        Ok(())
    }

    async fn clear(&mut self, handle: &ElementHandle) -> HarnessResult<()> {
        self.calls.push(format!("clear:{}", handle.describe()));
        match self.resolve(handle)? {
            Target::Field(i) => {
                if let Some(open) = self.editor.as_mut() {
                    open.fields[i].clear();
                }
                Ok(())
            }
            _ => Err(HarnessError::session(format!(
                "cannot clear {}: not a text input",
                handle.describe()
            ))),
        }
    }

    async fn type_text(&mut self, handle: &ElementHandle, text: &str) -> HarnessResult<()> {
        self.calls.push(format!("type:{}", handle.describe()));
        match self.resolve(handle)? {
            Target::Field(i) => {
                if let Some(open) = self.editor.as_mut() {
                    open.fields[i].push_str(text);
                }
                Ok(())
            }
            _ => Err(HarnessError::session(format!(
                "cannot type into {}: not a text input",
                handle.describe()
            ))),
        }
    }

    async fn press_key(&mut self, key: Key) -> HarnessResult<()> {
        self.calls.push(format!("key:{}", key.dom_key()));
        match key {
            Key::Enter => {
                if self.editor.is_none() {
                    if let Some((row, _)) = self.focused_cell {
                        self.open_editor(row);
                    }
                }
            }
            Key::Escape => self.cancel_edit(),
        }
        Ok(())
    }

    async fn text(&self, handle: &ElementHandle) -> HarnessResult<String> {
        Ok(match self.resolve(handle)? {
            Target::SaveButton => self.save_caption.clone(),
            Target::CancelButton => self.cancel_caption.clone(),
            Target::Log => self.log.last().cloned().unwrap_or_default(),
            Target::Cell(row, col) => self.cells[row][col].clone(),
            Target::MenuEntry { label, .. } => label,
            Target::EditorCell(i) => self.editor_cell_text(i),
            Target::Grid | Target::Editor | Target::Field(_) | Target::Row(_) => String::new(),
        })
    }

    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> HarnessResult<Option<String>> {
        Ok(match (self.resolve(handle)?, name) {
            (Target::Field(i), "value") => self
                .editor
                .as_ref()
                .map(|open| open.fields[i].clone()),
            (Target::Row(row) | Target::Cell(row, _), "data-row") => Some(row.to_string()),
            (Target::Grid, "aria-rowcount") => Some(ROW_COUNT.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_session() -> MockGridSession {
        let mut session = MockGridSession::new();
        session.enabled = true;
        session
    }

    mod fresh_state_tests {
        use super::*;

        #[test]
        fn test_starts_closed_and_disabled() {
            let session = MockGridSession::new();
            assert!(!session.editor_enabled());
            assert!(session.open_editor_row().is_none());
            assert!(session.log_lines().is_empty());
            assert_eq!(session.viewport_start(), 0);
        }

        #[tokio::test]
        async fn test_navigate_resets_state_but_keeps_history() {
            let mut session = enabled_session();
            session.open_editor(5);
            session.navigate(TEST_URL).await.unwrap();
            assert!(session.open_editor_row().is_none());
            assert!(!session.editor_enabled());
            assert!(session.was_called("navigate"));
        }
    }

    mod menu_model_tests {
        use super::*;

        #[test]
        fn test_menu_bar_has_component() {
            let session = MockGridSession::new();
            assert_eq!(session.menu_entries(0), ["Component"]);
        }

        #[test]
        fn test_popups_closed_until_parent_clicked() {
            let mut session = MockGridSession::new();
            assert!(session.menu_entries(1).is_empty());
            session.click_menu_entry(0, "Component");
            assert_eq!(session.menu_entries(1), ["Editor", "State"]);
            assert!(session.menu_entries(2).is_empty());
            session.click_menu_entry(1, "Editor");
            assert_eq!(session.menu_entries(2).len(), EDITOR_MENU_ENTRIES.len());
        }

        #[test]
        fn test_selection_mode_subtree() {
            let mut session = MockGridSession::new();
            session.click_menu_entry(0, "Component");
            session.click_menu_entry(1, "State");
            assert_eq!(session.menu_entries(2), ["Selection mode"]);
            session.click_menu_entry(2, "Selection mode");
            assert_eq!(session.menu_entries(3), SELECTION_MODE_ENTRIES);
            session.click_menu_entry(3, "multi");
            assert_eq!(session.selection_mode(), SelectionMode::Multi);
            assert!(session.menu_entries(1).is_empty());
        }

        #[test]
        fn test_leaf_click_closes_menus() {
            let mut session = MockGridSession::new();
            session.click_menu_entry(0, "Component");
            session.click_menu_entry(1, "Editor");
            session.click_menu_entry(2, "Enabled");
            assert!(session.editor_enabled());
            assert!(session.menu_entries(1).is_empty());
        }
    }

    mod editor_model_tests {
        use super::*;

        #[test]
        fn test_open_ignored_while_disabled() {
            let mut session = MockGridSession::new();
            session.open_editor(5);
            assert!(session.open_editor_row().is_none());
        }

        #[test]
        fn test_open_far_row_scrolls_viewport() {
            let mut session = enabled_session();
            session.open_editor(100);
            assert_eq!(session.open_editor_row(), Some(100));
            assert!(session.rendered(100));
            assert!(!session.rendered(5));
        }

        #[test]
        fn test_fields_skip_uneditable_column() {
            let mut session = enabled_session();
            session.open_editor(5);
            let open = session.editor.as_ref().unwrap();
            assert_eq!(open.fields.len(), EDITABLE_COLUMNS);
            assert_eq!(open.fields, ["(5, 0)", "(5, 1)", "(5, 2)", "(5, 4)"]);
        }

        #[test]
        fn test_cancel_appends_log() {
            let mut session = enabled_session();
            session.open_editor(5);
            session.cancel_edit();
            assert_eq!(session.log_lines(), ["Row 5 edit cancelled"]);
            assert!(session.open_editor_row().is_none());
        }

        #[test]
        fn test_save_writes_fields_back() {
            let mut session = enabled_session();
            session.open_editor(5);
            session.editor.as_mut().unwrap().fields[0] = "Changed".to_string();
            session.save_edit();
            assert_eq!(session.cells[5][0], "Changed");
            assert!(session.log_lines().is_empty());
        }

        #[test]
        fn test_editor_cells_follow_selection_mode() {
            let mut session = enabled_session();
            session.open_editor(5);
            assert_eq!(session.editor_cell_count(), COLUMN_COUNT);
            assert_eq!(session.editor_cell_text(0), "(5, 0)");
            assert_eq!(session.editor_cell_text(UNEDITABLE_COLUMN), "");

            session.run_command("multi");
            assert_eq!(session.editor_cell_count(), COLUMN_COUNT + 1);
            assert_eq!(session.editor_cell_text(0), "");
            assert_eq!(session.editor_cell_text(1), "(5, 0)");
        }

        #[test]
        fn test_caption_change_is_reversible() {
            let mut session = MockGridSession::new();
            session.run_command("Change Save Caption");
            assert_eq!(session.save_caption, "evaS");
            session.run_command("Change Save Caption");
            assert_eq!(session.save_caption, DEFAULT_SAVE_CAPTION);
        }
    }

    mod key_model_tests {
        use super::*;

        #[tokio::test]
        async fn test_enter_opens_for_focused_cell() {
            let mut session = enabled_session();
            session.focused_cell = Some((4, 0));
            session.press_key(Key::Enter).await.unwrap();
            assert_eq!(session.open_editor_row(), Some(4));
        }

        #[tokio::test]
        async fn test_enter_noop_without_focus() {
            let mut session = enabled_session();
            session.press_key(Key::Enter).await.unwrap();
            assert!(session.open_editor_row().is_none());
        }

        #[tokio::test]
        async fn test_escape_cancels() {
            let mut session = enabled_session();
            session.open_editor(4);
            session.press_key(Key::Escape).await.unwrap();
            assert!(session.open_editor_row().is_none());
            assert_eq!(session.log_lines(), ["Row 4 edit cancelled"]);
        }
    }
}
