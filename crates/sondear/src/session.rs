//! The remote driver seam.
//!
//! A [`Session`] owns one browser page for the duration of one test case and
//! is passed explicitly to every harness component; there is no ambient
//! "current session", so tests can run in parallel safely.
//!
//! # Implementations
//!
//! - [`crate::mock::MockGridSession`] - scripted in-memory grid demo, the
//!   unit-test double
//! - `CdpSession` (behind the `browser` feature) - real Chromium via CDP

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::HarnessResult;
use crate::selector::Selector;

/// An opaque, transient reference to a located element.
///
/// A handle is a (selector, match index) pair re-resolved against the live
/// document on every action or read, never a cached DOM node: the document
/// can mutate between actions, and a handle whose target has since vanished
/// surfaces as `ElementNotFound` at use time rather than going stale
/// silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector the element was found with
    pub selector: Selector,
    /// Index within the selector's match list (document order)
    pub index: usize,
}

impl ElementHandle {
    /// Create a handle for the first match of a selector
    #[must_use]
    pub fn first(selector: Selector) -> Self {
        Self { selector, index: 0 }
    }

    /// Create a handle for the nth match of a selector
    #[must_use]
    pub fn nth(selector: Selector, index: usize) -> Self {
        Self { selector, index }
    }

    /// Short description used in error messages
    #[must_use]
    pub fn describe(&self) -> String {
        if self.index == 0 {
            self.selector.describe()
        } else {
            format!("{} [{}]", self.selector.describe(), self.index)
        }
    }
}

/// Keyboard keys the harness dispatches to the focused element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
}

impl Key {
    /// DOM `key` value for this key
    #[must_use]
    pub const fn dom_key(&self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Escape => "Escape",
        }
    }
}

/// Abstract remote-driver session.
///
/// Methods that read (`find`, `text`, `attribute`) take `&self` and reflect a
/// single document snapshot; methods that act (`click`, `type_text`,
/// `press_key`) take `&mut self` because they mutate remote document state.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate the page to a URL, resetting document state
    async fn navigate(&mut self, url: &str) -> HarnessResult<()>;

    /// Find the first element matching a selector.
    ///
    /// Absence is a valid result, not an error; the caller decides whether
    /// it is expected.
    async fn find(&self, selector: &Selector) -> HarnessResult<Option<ElementHandle>>;

    /// Find all elements matching a selector, in document order.
    ///
    /// The list is materialized at call time from a single snapshot.
    async fn find_all(&self, selector: &Selector) -> HarnessResult<Vec<ElementHandle>>;

    /// Click an element
    async fn click(&mut self, handle: &ElementHandle) -> HarnessResult<()>;

    /// Clear a text input's value
    async fn clear(&mut self, handle: &ElementHandle) -> HarnessResult<()>;

    /// Type text into an element (appends to the current value)
    async fn type_text(&mut self, handle: &ElementHandle, text: &str) -> HarnessResult<()>;

    /// Dispatch a key press to the currently focused element
    async fn press_key(&mut self, key: Key) -> HarnessResult<()>;

    /// Visible text of an element
    async fn text(&self, handle: &ElementHandle) -> HarnessResult<String>;

    /// Attribute value of an element, `None` when the attribute is unset
    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> HarnessResult<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_first() {
            let handle = ElementHandle::first(Selector::class_name("v-grid-editor"));
            assert_eq!(handle.index, 0);
        }

        #[test]
        fn test_describe_omits_zero_index() {
            let handle = ElementHandle::first(Selector::class_name("gwt-TextBox"));
            assert_eq!(handle.describe(), "class 'gwt-TextBox'");
        }

        #[test]
        fn test_describe_includes_nonzero_index() {
            let handle = ElementHandle::nth(Selector::class_name("gwt-TextBox"), 2);
            assert_eq!(handle.describe(), "class 'gwt-TextBox' [2]");
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn test_dom_key_names() {
            assert_eq!(Key::Enter.dom_key(), "Enter");
            assert_eq!(Key::Escape.dom_key(), "Escape");
        }
    }
}
