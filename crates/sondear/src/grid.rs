//! Page object for the grid demo and its inline row editor.
//!
//! The widget's DOM contract is fixed and must be preserved bit-exact for
//! the harness to work: the class names and caption defaults below come
//! straight from the subject under test.

use tracing::debug;

use crate::locator::ElementLocator;
use crate::menu::{MenuNavigator, MenuPath};
use crate::result::{HarnessError, HarnessResult};
use crate::selector::Selector;
use crate::session::{ElementHandle, Session};

/// CSS class of the grid root; carries `aria-rowcount` with the dataset size
pub const GRID_CLASS: &str = "v-grid";
/// CSS class of the editor container, absent while the editor is closed
pub const EDITOR_CLASS: &str = "v-grid-editor";
/// CSS class of the editor's per-column cell containers, in column order
pub const EDITOR_CELL_CLASS: &str = "v-grid-editor-cells";
/// CSS class of the editor's save button
pub const SAVE_CLASS: &str = "v-grid-editor-save";
/// CSS class of the editor's cancel button
pub const CANCEL_CLASS: &str = "v-grid-editor-cancel";
/// CSS class of the editable cell widgets, rendered in column order
pub const FIELD_CLASS: &str = "gwt-TextBox";
/// CSS class of the log region recording editor events
pub const LOG_CLASS: &str = "grid-editor-log";

/// Default caption of the save button
pub const DEFAULT_SAVE_CAPTION: &str = "Save";
/// Default caption of the cancel button
pub const DEFAULT_CANCEL_CAPTION: &str = "Cancel";

/// How the grid selects rows.
///
/// Multi selection prepends a selector column ahead of the data columns;
/// the editor renders an empty cell over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// No row selection
    None,
    /// Single-row selection
    Single,
    /// Multi-row selection via a selector column
    Multi,
}

impl SelectionMode {
    /// Menu label of this mode in the demo UI
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

/// Stable identifiers for the demo's editor menu commands.
///
/// Commands are typed; display labels live only in [`to_path`](Self::to_path),
/// so renaming a label cannot silently break call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMenuCommand {
    /// Toggle whether the editor is enabled
    ToggleEnabled,
    /// Open the editor for a row (scrolls it into view if needed)
    EditRow(usize),
    /// Cancel the open edit
    CancelEdit,
    /// Save the open edit
    Save,
    /// Change the save button's caption
    ChangeSaveCaption,
    /// Change the cancel button's caption
    ChangeCancelCaption,
    /// Switch the grid's selection mode
    SetSelectionMode(SelectionMode),
}

impl GridMenuCommand {
    /// Resolve the command to its menu path in the demo UI
    #[must_use]
    pub fn to_path(&self) -> MenuPath {
        fn editor(leaf: String) -> Vec<String> {
            vec!["Component".to_string(), "Editor".to_string(), leaf]
        }
        let labels = match self {
            Self::ToggleEnabled => editor("Enabled".to_string()),
            Self::EditRow(row) => editor(format!("Edit row {row}")),
            Self::CancelEdit => editor("Cancel edit".to_string()),
            Self::Save => editor("Save".to_string()),
            Self::ChangeSaveCaption => editor("Change Save Caption".to_string()),
            Self::ChangeCancelCaption => editor("Change Cancel Caption".to_string()),
            Self::SetSelectionMode(mode) => vec![
                "Component".to_string(),
                "State".to_string(),
                "Selection mode".to_string(),
                mode.label().to_string(),
            ],
        };
        // Invariant: the path is never empty.
        MenuPath::new(labels).unwrap_or_else(|_| unreachable!())
    }
}

/// High-level accessors for the grid under test
#[derive(Debug, Clone, Default)]
pub struct GridPage {
    nav: MenuNavigator,
}

impl GridPage {
    /// Create a page object with default navigation waits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page object with a custom navigator
    #[must_use]
    pub fn with_navigator(nav: MenuNavigator) -> Self {
        Self { nav }
    }

    /// Activate an editor menu command
    pub async fn select<S: Session>(
        &self,
        session: &mut S,
        command: GridMenuCommand,
    ) -> HarnessResult<()> {
        debug!(?command, "selecting editor command");
        self.nav.open(session, &command.to_path()).await
    }

    /// The editor container, `None` while closed.
    ///
    /// Editor state is never tracked in the harness; existence is recomputed
    /// on each query.
    pub async fn editor<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> HarnessResult<Option<ElementHandle>> {
        ElementLocator::find(session, &Selector::class_name(EDITOR_CLASS)).await
    }

    /// The editor's text widgets, one per editable column, in column order
    pub async fn editor_fields<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> HarnessResult<Vec<ElementHandle>> {
        ElementLocator::find_all(session, &Selector::class_name(FIELD_CLASS)).await
    }

    /// The editor's per-column cell containers, in column order.
    ///
    /// Under multi selection the first cell sits over the selector column and
    /// stays empty; its text is the widget value for data cells.
    pub async fn editor_cells<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> HarnessResult<Vec<ElementHandle>> {
        ElementLocator::find_all(session, &Selector::class_name(EDITOR_CELL_CLASS)).await
    }

    /// The save button; the editor must be open
    pub async fn save_button<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> HarnessResult<ElementHandle> {
        self.required(session, SAVE_CLASS, "save button").await
    }

    /// The cancel button; the editor must be open
    pub async fn cancel_button<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> HarnessResult<ElementHandle> {
        self.required(session, CANCEL_CLASS, "cancel button").await
    }

    /// Latest entry of the editor event log, empty when nothing was logged
    pub async fn log_text<S: Session + ?Sized>(&self, session: &S) -> HarnessResult<String> {
        let log = ElementLocator::find(session, &Selector::class_name(LOG_CLASS))
            .await?
            .ok_or_else(|| HarnessError::not_found("editor log region"))?;
        session.text(&log).await
    }

    /// The cell at `(row, col)`; fails with `OutOfViewport` for virtualized
    /// rows outside the rendered scroll window
    pub async fn cell_at<S: Session + ?Sized>(
        &self,
        session: &S,
        row: usize,
        col: usize,
    ) -> HarnessResult<ElementHandle> {
        ElementLocator::cell_at(session, row, col).await
    }

    /// Displayed text of the cell at `(row, col)`
    pub async fn cell_text<S: Session + ?Sized>(
        &self,
        session: &S,
        row: usize,
        col: usize,
    ) -> HarnessResult<String> {
        let cell = self.cell_at(session, row, col).await?;
        session.text(&cell).await
    }

    /// Click the cell at `(row, col)`, focusing it
    pub async fn click_cell<S: Session>(
        &self,
        session: &mut S,
        row: usize,
        col: usize,
    ) -> HarnessResult<()> {
        let cell = ElementLocator::cell_at(session, row, col).await?;
        session.click(&cell).await
    }

    async fn required<S: Session + ?Sized>(
        &self,
        session: &S,
        class: &str,
        what: &str,
    ) -> HarnessResult<ElementHandle> {
        ElementLocator::find(session, &Selector::class_name(class))
            .await?
            .ok_or_else(|| HarnessError::not_found(what))
    }
}
