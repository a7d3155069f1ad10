//! Assertion wrappers over locator results.
//!
//! All assertions are synchronous against the current document snapshot;
//! none retries or waits. Waiting happens before the assertion is issued,
//! in the navigator or the driver. On failure an `AssertionFailed` error
//! carries the component name plus expected vs actual, and propagating it
//! with `?` aborts the current test case.

use crate::result::{HarnessError, HarnessResult};
use crate::session::{ElementHandle, Session};

/// Assertion helpers; each takes the component name used in diagnostics
#[derive(Debug)]
pub struct Assertions;

impl Assertions {
    /// Assert a locator result is present, yielding the handle
    pub fn present(
        component: &str,
        found: Option<ElementHandle>,
    ) -> HarnessResult<ElementHandle> {
        found.ok_or_else(|| {
            HarnessError::assertion(format!("{component}: expected present, was absent"))
        })
    }

    /// Assert a locator result is absent
    pub fn absent(component: &str, found: Option<ElementHandle>) -> HarnessResult<()> {
        match found {
            None => Ok(()),
            Some(handle) => Err(HarnessError::assertion(format!(
                "{component}: expected absent, found {}",
                handle.describe()
            ))),
        }
    }

    /// Assert an element's visible text equals `expected`
    pub async fn text<S: Session + ?Sized>(
        session: &S,
        component: &str,
        handle: &ElementHandle,
        expected: &str,
    ) -> HarnessResult<()> {
        let actual = session.text(handle).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(HarnessError::assertion(format!(
                "{component}: expected text '{expected}', got '{actual}'"
            )))
        }
    }

    /// Assert an element's visible text differs from `unexpected`
    pub async fn text_differs<S: Session + ?Sized>(
        session: &S,
        component: &str,
        handle: &ElementHandle,
        unexpected: &str,
    ) -> HarnessResult<()> {
        let actual = session.text(handle).await?;
        if actual == unexpected {
            Err(HarnessError::assertion(format!(
                "{component}: expected text to differ from '{unexpected}'"
            )))
        } else {
            Ok(())
        }
    }

    /// Assert an element's attribute equals `expected`
    pub async fn attribute<S: Session + ?Sized>(
        session: &S,
        component: &str,
        handle: &ElementHandle,
        name: &str,
        expected: &str,
    ) -> HarnessResult<()> {
        let actual = session.attribute(handle, name).await?;
        match actual {
            Some(ref value) if value == expected => Ok(()),
            Some(value) => Err(HarnessError::assertion(format!(
                "{component}: expected attribute '{name}' = '{expected}', got '{value}'"
            ))),
            None => Err(HarnessError::assertion(format!(
                "{component}: expected attribute '{name}' = '{expected}', attribute unset"
            ))),
        }
    }
}
