//! Sondear: declarative browser-widget assertion harness.
//!
//! Sondear (Spanish: "to probe / sound out") drives a web UI through three
//! small components and asserts on the resulting DOM state:
//!
//! - [`MenuNavigator`] walks an ordered list of menu labels, clicking each
//!   entry and waiting (bounded poll) for submenus to appear, until the leaf
//!   command fires.
//! - [`ElementLocator`] resolves logical widget queries to transient element
//!   handles, returning absence as a value rather than an error, and models
//!   grid row virtualization with a distinguished `OutOfViewport` failure.
//! - [`Assertions`] wraps locator results into synchronous assertions with
//!   descriptive failure messages.
//!
//! The remote driver is an explicit [`Session`] handle passed to every
//! component. [`mock::MockGridSession`] scripts the reference subject (a data
//! grid with an inline row editor) in memory; the `browser` feature adds a
//! Chromium-backed session over CDP.
//!
//! # Example
//!
//! ```
//! use sondear::{Assertions, GridMenuCommand, GridPage, MockGridSession};
//!
//! # async fn demo() -> sondear::HarnessResult<()> {
//! let mut session = MockGridSession::new();
//! let page = GridPage::new();
//!
//! page.select(&mut session, GridMenuCommand::ToggleEnabled).await?;
//! page.select(&mut session, GridMenuCommand::EditRow(5)).await?;
//! Assertions::present("editor", page.editor(&session).await?)?;
//!
//! page.select(&mut session, GridMenuCommand::CancelEdit).await?;
//! Assertions::absent("editor", page.editor(&session).await?)?;
//! assert_eq!(page.log_text(&session).await?, "Row 5 edit cancelled");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assertion;
pub mod browser;
pub mod grid;
mod locator;
mod menu;
pub mod mock;
mod result;
mod selector;
mod session;
#[cfg(not(target_arch = "wasm32"))]
pub mod trace;
mod wait;

pub use assertion::Assertions;
pub use browser::BrowserOptions;
#[cfg(feature = "browser")]
pub use browser::CdpSession;
pub use grid::{GridMenuCommand, GridPage, SelectionMode};
pub use locator::ElementLocator;
pub use menu::{MenuNavigator, MenuPath};
pub use mock::MockGridSession;
pub use result::{HarnessError, HarnessResult};
pub use selector::Selector;
pub use session::{ElementHandle, Key, Session};
pub use wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
