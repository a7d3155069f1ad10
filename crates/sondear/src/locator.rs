//! Element lookup with explicit absence semantics.
//!
//! `find` and `find_all` never treat a missing element as an error; the
//! caller decides whether absence is expected (asserting the editor closed)
//! or exceptional (fetching a cell that must exist). The one distinguished
//! operation is [`ElementLocator::cell_at`], which models the grid's virtual
//! scrolling: a row outside the rendered window fails with `OutOfViewport`,
//! never with a generic not-found and never with a silently empty success.

use tracing::debug;

use crate::grid::GRID_CLASS;
use crate::result::{HarnessError, HarnessResult};
use crate::selector::Selector;
use crate::session::{ElementHandle, Session};

/// Locator facade over a [`Session`].
///
/// Stateless by design: every query reflects the live document, so there is
/// no cache to invalidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementLocator;

impl ElementLocator {
    /// Find the first element matching `query`, `None` when absent
    pub async fn find<S: Session + ?Sized>(
        session: &S,
        query: &Selector,
    ) -> HarnessResult<Option<ElementHandle>> {
        session.find(query).await
    }

    /// Find all elements matching `query`, in document order
    pub async fn find_all<S: Session + ?Sized>(
        session: &S,
        query: &Selector,
    ) -> HarnessResult<Vec<ElementHandle>> {
        session.find_all(query).await
    }

    /// Fetch the cell at `(row, col)`, which must be rendered.
    ///
    /// # Errors
    ///
    /// - `OutOfViewport` when `row` is virtualized outside the rendered
    ///   scroll window
    /// - `ElementNotFound` when the row is rendered but `col` does not
    ///   exist, or when `row` is beyond the dataset entirely
    pub async fn cell_at<S: Session + ?Sized>(
        session: &S,
        row: usize,
        col: usize,
    ) -> HarnessResult<ElementHandle> {
        let cell = Selector::Cell { row, col };
        if let Some(handle) = session.find(&cell).await? {
            return Ok(handle);
        }

        // The cell is missing: decide whether the whole row is virtualized
        // away or only the column index is bad.
        if session.find(&Selector::Row(row)).await?.is_some() {
            debug!(row, col, "row rendered but column missing");
            return Err(HarnessError::not_found(cell.describe()));
        }

        // A row past the end of the dataset cannot be scrolled to; only
        // rows within `aria-rowcount` are viewport misses.
        match Self::dataset_rows(session).await? {
            Some(count) if row >= count => {
                debug!(row, count, "row beyond dataset");
                Err(HarnessError::not_found(format!(
                    "row {row} (dataset has {count} rows)"
                )))
            }
            _ => {
                debug!(row, "row outside rendered viewport");
                Err(HarnessError::OutOfViewport { row })
            }
        }
    }

    /// Dataset size advertised by the grid root, `None` when unavailable
    async fn dataset_rows<S: Session + ?Sized>(session: &S) -> HarnessResult<Option<usize>> {
        let Some(grid) = session.find(&Selector::class_name(GRID_CLASS)).await? else {
            return Ok(None);
        };
        Ok(session
            .attribute(&grid, "aria-rowcount")
            .await?
            .and_then(|count| count.parse().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMenuCommand;
    use crate::menu::MenuNavigator;
    use crate::mock::{MockGridSession, COLUMN_COUNT};

    async fn session_with_editor_open(row: usize) -> MockGridSession {
        let mut session = MockGridSession::new();
        let nav = MenuNavigator::default();
        nav.open(&mut session, &GridMenuCommand::ToggleEnabled.to_path())
            .await
            .unwrap();
        nav.open(&mut session, &GridMenuCommand::EditRow(row).to_path())
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_find_absent_is_none_not_error() {
        let session = MockGridSession::new();
        let found = ElementLocator::find(&session, &Selector::class_name("v-grid-editor"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_cell_at_rendered_row() {
        let session = MockGridSession::new();
        let handle = ElementLocator::cell_at(&session, 4, 0).await.unwrap();
        assert_eq!(handle.selector, Selector::Cell { row: 4, col: 0 });
    }

    #[tokio::test]
    async fn test_cell_at_virtualized_row_is_out_of_viewport() {
        let session = session_with_editor_open(5).await;
        let err = ElementLocator::cell_at(&session, 200, 0).await.unwrap_err();
        assert!(matches!(err, HarnessError::OutOfViewport { row: 200 }));
    }

    #[tokio::test]
    async fn test_cell_at_nonexistent_row_is_not_found() {
        let session = MockGridSession::new();
        let err = ElementLocator::cell_at(&session, 5000, 0).await.unwrap_err();
        assert!(matches!(err, HarnessError::ElementNotFound { .. }));
        assert!(err.to_string().contains("dataset has"));
    }

    #[tokio::test]
    async fn test_cell_at_bad_column_is_not_found() {
        let session = MockGridSession::new();
        let err = ElementLocator::cell_at(&session, 4, COLUMN_COUNT)
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::ElementNotFound { .. }));
    }
}
