//! Real browser control over the Chrome DevTools Protocol.
//!
//! Available behind the `browser` feature; everything else in the crate
//! works against [`crate::mock::MockGridSession`] without a browser binary.

/// Launch configuration for a CDP session
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserOptions {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchKeyEventParams, DispatchKeyEventType,
    };
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page;
    use futures::StreamExt;
    use tracing::debug;

    use super::BrowserOptions;
    use crate::result::{HarnessError, HarnessResult};
    use crate::selector::Selector;
    use crate::session::{ElementHandle, Key, Session};

    /// A [`Session`] backed by a real Chromium page over CDP.
    ///
    /// Handles are re-resolved by (selector, index) against the live DOM on
    /// every action, matching the mock's semantics.
    #[derive(Debug)]
    pub struct CdpSession {
        #[allow(dead_code)]
        browser: Browser,
        page: Page,
        #[allow(dead_code)]
        handler: tokio::task::JoinHandle<()>,
    }

    impl CdpSession {
        /// Launch a browser and open a blank page.
        ///
        /// # Errors
        ///
        /// Returns a `Session` error when the browser cannot be launched.
        pub async fn launch(options: BrowserOptions) -> HarnessResult<Self> {
            let mut builder = BrowserConfig::builder()
                .window_size(options.viewport_width, options.viewport_height);

            if !options.headless {
                builder = builder.with_head();
            }
            if !options.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = options.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let config = builder.build().map_err(HarnessError::session)?;
            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;

            debug!("browser session launched");
            Ok(Self {
                browser,
                page,
                handler: handle,
            })
        }

        async fn resolve(&self, handle: &ElementHandle) -> HarnessResult<Element> {
            let elements = self.all(&handle.selector).await?;
            elements
                .into_iter()
                .nth(handle.index)
                .ok_or_else(|| HarnessError::not_found(handle.describe()))
        }

        async fn all(&self, selector: &Selector) -> HarnessResult<Vec<Element>> {
            self.page
                .find_elements(selector.to_css())
                .await
                .map_err(|e| HarnessError::session(e.to_string()))
        }

        async fn dispatch_key(
            &self,
            kind: DispatchKeyEventType,
            key: Key,
        ) -> HarnessResult<()> {
            let params = DispatchKeyEventParams::builder()
                .r#type(kind)
                .key(key.dom_key())
                .build()
                .map_err(HarnessError::session)?;
            self.page
                .execute(params)
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            Ok(())
        }
    }

    #[async_trait]
    impl Session for CdpSession {
        async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
            debug!(url, "navigating");
            self.page
                .goto(url)
                .await
                .map_err(|e| HarnessError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn find(&self, selector: &Selector) -> HarnessResult<Option<ElementHandle>> {
            let count = self.all(selector).await?.len();
            Ok((count > 0).then(|| ElementHandle::first(selector.clone())))
        }

        async fn find_all(&self, selector: &Selector) -> HarnessResult<Vec<ElementHandle>> {
            let count = self.all(selector).await?.len();
            Ok((0..count)
                .map(|i| ElementHandle::nth(selector.clone(), i))
                .collect())
        }

        async fn click(&mut self, handle: &ElementHandle) -> HarnessResult<()> {
            let element = self.resolve(handle).await?;
            element
                .click()
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            Ok(())
        }

        async fn clear(&mut self, handle: &ElementHandle) -> HarnessResult<()> {
            // CDP has no clear primitive; empty the value in page context.
            let css = handle.selector.to_css();
            let script = format!(
                "document.querySelectorAll({css:?})[{}].value = ''",
                handle.index
            );
            self.page
                .evaluate(script)
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            Ok(())
        }

        async fn type_text(&mut self, handle: &ElementHandle, text: &str) -> HarnessResult<()> {
            let element = self.resolve(handle).await?;
            element
                .click()
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            element
                .type_str(text)
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            Ok(())
        }

        async fn press_key(&mut self, key: Key) -> HarnessResult<()> {
            self.dispatch_key(DispatchKeyEventType::KeyDown, key).await?;
            self.dispatch_key(DispatchKeyEventType::KeyUp, key).await
        }

        async fn text(&self, handle: &ElementHandle) -> HarnessResult<String> {
            let element = self.resolve(handle).await?;
            let text = element
                .inner_text()
                .await
                .map_err(|e| HarnessError::session(e.to_string()))?;
            Ok(text.unwrap_or_default())
        }

        async fn attribute(
            &self,
            handle: &ElementHandle,
            name: &str,
        ) -> HarnessResult<Option<String>> {
            let element = self.resolve(handle).await?;
            element
                .attribute(name)
                .await
                .map_err(|e| HarnessError::session(e.to_string()))
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpSession;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = BrowserOptions::default();
        assert!(options.headless);
        assert!(options.sandbox);
        assert_eq!(options.viewport_width, 1280);
    }

    #[test]
    fn test_builder() {
        let options = BrowserOptions::default()
            .with_headless(false)
            .with_viewport(800, 600)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert!(!options.headless);
        assert!(!options.sandbox);
        assert_eq!(options.viewport_height, 600);
        assert_eq!(options.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
