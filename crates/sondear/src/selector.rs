//! Structural queries for locating widgets.
//!
//! A [`Selector`] is a logical descriptor, not a raw CSS string: structural
//! variants (`Row`, `Cell`, `MenuItem`) let a mock session resolve them
//! without a CSS engine, while [`Selector::to_css`] produces the concrete
//! selector a real CDP session uses against the grid demo's DOM.

use serde::{Deserialize, Serialize};

/// Selector for locating elements in the document under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Raw CSS selector (passthrough, only meaningful to real driver sessions)
    Css(String),
    /// Elements carrying a CSS class
    ClassName(String),
    /// Grid body row by logical row index
    Row(usize),
    /// Grid body cell at (row, column)
    Cell {
        /// Logical row index
        row: usize,
        /// Column index
        col: usize,
    },
    /// All menu entries at a nesting depth (0 = menu bar, 1 = first popup, ...)
    MenuItem {
        /// Menu nesting depth
        depth: usize,
    },
}

impl Selector {
    /// Create a raw CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a class-name selector
    #[must_use]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Resolve to the concrete CSS selector for the grid demo's DOM contract.
    ///
    /// Grid body rows carry a `data-row` attribute holding the logical row
    /// index; menu popups carry a `data-depth` attribute.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::ClassName(name) => format!(".{name}"),
            Self::Row(row) => format!(".v-grid-body tr[data-row='{row}']"),
            Self::Cell { row, col } => format!(
                ".v-grid-body tr[data-row='{row}'] > td:nth-child({})",
                col + 1
            ),
            Self::MenuItem { depth: 0 } => ".v-menubar > .v-menubar-menuitem".to_string(),
            Self::MenuItem { depth } => {
                format!(".v-menubar-popup[data-depth='{depth}'] .v-menubar-menuitem")
            }
        }
    }

    /// Short description used in error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(s) => format!("css '{s}'"),
            Self::ClassName(name) => format!("class '{name}'"),
            Self::Row(row) => format!("row {row}"),
            Self::Cell { row, col } => format!("cell ({row}, {col})"),
            Self::MenuItem { depth } => format!("menu entries at depth {depth}"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
