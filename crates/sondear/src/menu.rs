//! Menu-path navigation.
//!
//! A [`MenuPath`] is an ordered list of menu labels; [`MenuNavigator::open`]
//! walks it left to right, clicking the entry whose visible text equals each
//! label exactly and waiting (poll-until-visible, bounded) for the next
//! submenu before proceeding. The leaf click triggers the command's
//! registered action in the page under test.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::result::{HarnessError, HarnessResult};
use crate::selector::Selector;
use crate::session::{ElementHandle, Session};
use crate::wait::WaitOptions;

/// An ordered, non-empty sequence of menu labels identifying one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPath(Vec<String>);

impl MenuPath {
    /// Build a path from labels.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMenuPath` when no labels are given.
    pub fn new<I, L>(labels: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(HarnessError::EmptyMenuPath);
        }
        Ok(Self(labels))
    }

    /// The labels, outermost first
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// The leaf command's label
    #[must_use]
    pub fn leaf(&self) -> &str {
        // Invariant: the vector is non-empty.
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for MenuPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

/// Walks nested menus by label and activates a leaf command
#[derive(Debug, Clone, Default)]
pub struct MenuNavigator {
    wait: WaitOptions,
}

impl MenuNavigator {
    /// Create a navigator with default wait options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Open every menu along `path` and activate the leaf command.
    ///
    /// # Errors
    ///
    /// - `Timeout` when a submenu never becomes visible within the bounded
    ///   wait
    /// - `ElementNotFound` when a label has no matching entry at its level
    /// - `AmbiguousMenuLabel` when a label matches more than one entry
    pub async fn open<S: Session>(&self, session: &mut S, path: &MenuPath) -> HarnessResult<()> {
        debug!(%path, "opening menu path");
        for (depth, label) in path.labels().iter().enumerate() {
            let entries = self.wait_for_level(session, depth).await?;
            let entry = Self::match_label(session, &entries, label, depth).await?;
            trace!(depth, label, "clicking menu entry");
            session.click(&entry).await?;
        }
        Ok(())
    }

    /// Poll until the menu level at `depth` has visible entries.
    async fn wait_for_level<S: Session>(
        &self,
        session: &S,
        depth: usize,
    ) -> HarnessResult<Vec<ElementHandle>> {
        let selector = Selector::MenuItem { depth };
        let deadline = Instant::now() + self.wait.timeout();
        loop {
            let entries = session.find_all(&selector).await?;
            if !entries.is_empty() {
                return Ok(entries);
            }
            if Instant::now() >= deadline {
                return Err(HarnessError::Timeout {
                    ms: self.wait.timeout_ms,
                    waiting_for: format!("submenu at depth {depth}"),
                });
            }
            tokio::time::sleep(self.wait.poll_interval()).await;
        }
    }

    /// Find the single entry whose visible text equals `label` exactly.
    async fn match_label<S: Session>(
        session: &S,
        entries: &[ElementHandle],
        label: &str,
        depth: usize,
    ) -> HarnessResult<ElementHandle> {
        let mut matched = Vec::new();
        for entry in entries {
            if session.text(entry).await? == label {
                matched.push(entry.clone());
            }
        }
        match matched.len() {
            0 => Err(HarnessError::not_found(format!(
                "menu entry '{label}' at depth {depth}"
            ))),
            1 => Ok(matched.remove(0)),
            count => Err(HarnessError::AmbiguousMenuLabel {
                label: label.to_string(),
                depth,
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMenuCommand;
    use crate::mock::MockGridSession;

    mod menu_path_tests {
        use super::*;

        #[test]
        fn test_rejects_empty() {
            let err = MenuPath::new(Vec::<String>::new()).unwrap_err();
            assert!(matches!(err, HarnessError::EmptyMenuPath));
        }

        #[test]
        fn test_leaf() {
            let path = MenuPath::new(["Component", "Editor", "Save"]).unwrap();
            assert_eq!(path.leaf(), "Save");
        }

        #[test]
        fn test_display() {
            let path = MenuPath::new(["Component", "Editor"]).unwrap();
            assert_eq!(path.to_string(), "Component > Editor");
        }
    }

    mod navigator_tests {
        use super::*;
        use async_trait::async_trait;
        use crate::session::Key;

        /// Menu bar whose two entries carry the same visible text.
        struct DuplicateLabelMenu;

        #[async_trait]
        impl Session for DuplicateLabelMenu {
            async fn navigate(&mut self, _url: &str) -> HarnessResult<()> {
                Ok(())
            }

            async fn find(&self, selector: &Selector) -> HarnessResult<Option<ElementHandle>> {
                Ok(self.find_all(selector).await?.into_iter().next())
            }

            async fn find_all(&self, selector: &Selector) -> HarnessResult<Vec<ElementHandle>> {
                match selector {
                    Selector::MenuItem { depth: 0 } => Ok(vec![
                        ElementHandle::nth(selector.clone(), 0),
                        ElementHandle::nth(selector.clone(), 1),
                    ]),
                    _ => Ok(Vec::new()),
                }
            }

            async fn click(&mut self, _handle: &ElementHandle) -> HarnessResult<()> {
                Ok(())
            }

            async fn clear(&mut self, _handle: &ElementHandle) -> HarnessResult<()> {
                Ok(())
            }

            async fn type_text(
                &mut self,
                _handle: &ElementHandle,
                _text: &str,
            ) -> HarnessResult<()> {
                Ok(())
            }

            async fn press_key(&mut self, _key: Key) -> HarnessResult<()> {
                Ok(())
            }

            async fn text(&self, _handle: &ElementHandle) -> HarnessResult<String> {
                Ok("Duplicated".to_string())
            }

            async fn attribute(
                &self,
                _handle: &ElementHandle,
                _name: &str,
            ) -> HarnessResult<Option<String>> {
                Ok(None)
            }
        }

        #[tokio::test]
        async fn test_duplicate_labels_are_ambiguous() {
            let mut session = DuplicateLabelMenu;
            let nav = MenuNavigator::new();
            let path = MenuPath::new(["Duplicated"]).unwrap();
            let err = nav.open(&mut session, &path).await.unwrap_err();
            assert!(matches!(
                err,
                HarnessError::AmbiguousMenuLabel {
                    count: 2,
                    depth: 0,
                    ..
                }
            ));
        }

        #[tokio::test]
        async fn test_open_leaf_command() {
            let mut session = MockGridSession::new();
            let nav = MenuNavigator::new();
            nav.open(&mut session, &GridMenuCommand::ToggleEnabled.to_path())
                .await
                .unwrap();
            assert!(session.editor_enabled());
        }

        #[tokio::test]
        async fn test_unknown_label_is_not_found() {
            let mut session = MockGridSession::new();
            let nav = MenuNavigator::new();
            let path = MenuPath::new(["Component", "Editor", "No such entry"]).unwrap();
            let err = nav.open(&mut session, &path).await.unwrap_err();
            assert!(matches!(err, HarnessError::ElementNotFound { .. }));
        }

        #[tokio::test]
        async fn test_path_past_a_leaf_times_out() {
            let mut session = MockGridSession::new();
            let nav = MenuNavigator::new()
                .with_wait(WaitOptions::new().with_timeout(100).with_poll_interval(10));
            // "Enabled" is a leaf: clicking it closes the menus, so a popup at
            // depth 3 never appears.
            let path = MenuPath::new(["Component", "Editor", "Enabled", "Extra"]).unwrap();
            let err = nav.open(&mut session, &path).await.unwrap_err();
            assert!(matches!(err, HarnessError::Timeout { .. }));
        }

        #[tokio::test]
        async fn test_reopening_leaf_is_idempotent() {
            let mut session = MockGridSession::new();
            let nav = MenuNavigator::new();
            nav.open(&mut session, &GridMenuCommand::ToggleEnabled.to_path())
                .await
                .unwrap();
            let edit = GridMenuCommand::EditRow(5).to_path();
            nav.open(&mut session, &edit).await.unwrap();
            nav.open(&mut session, &edit).await.unwrap();
            assert_eq!(session.open_editor_row(), Some(5));
            assert!(session.log_lines().is_empty());
        }
    }
}
