//! In-page content transitions.
//!
//! Swaps the content container's markup for a fetched page fragment with a
//! fade: the container gets the fade class, the fragment is fetched, and after
//! the fade delay the content is replaced, the class removed and nav links
//! whose target attribute equals the page identifier are marked active.
//!
//! Requesting the page that is already current does nothing, so repeated
//! clicks on the same link never refetch. The page becomes current before the
//! fetch starts and stays current even when the fetch fails; there are no
//! retries.

use crate::config::FolioConfig;
use crate::fetch::Fetcher;
use crate::nav::mark_page;
use crate::page::Page;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// `page` was already current; nothing was fetched.
    Unchanged,
    Swapped,
    /// The page has no content container.
    Skipped,
    /// Fetch or parse failed; the container keeps its content.
    Failed,
}

/// Transition state: which page the container currently shows.
#[derive(Debug, Default)]
pub struct Transitioner {
    current_page: Option<String>,
}

impl Transitioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    /// Load `target` into the content container.
    pub async fn load_content<F: Fetcher>(
        &mut self,
        page: &mut Page,
        fetcher: &F,
        config: &FolioConfig,
        target: &str,
    ) -> TransitionOutcome {
        if self.current_page.as_deref() == Some(target) {
            return TransitionOutcome::Unchanged;
        }
        let settings = &config.transition;
        let Some(container) = page.document.element_by_id(&settings.container) else {
            return TransitionOutcome::Skipped;
        };

        self.current_page = Some(target.to_owned());
        page.document.add_class(container, &settings.fade_class);

        let fetched = match page.resolve_url(target) {
            Ok(url) => fetcher.fetch(&url).await,
            Err(err) => Err(err),
        };

        let outcome = match fetched {
            Ok(markup) => {
                tokio::time::sleep(Duration::from_millis(settings.delay_ms)).await;
                match page.document.set_inner_html(container, &markup) {
                    Ok(()) => {
                        mark_page(&mut page.document, &config.nav, target);
                        TransitionOutcome::Swapped
                    }
                    Err(err) => {
                        page.console
                            .error("transition", format!("error loading content: {err}"));
                        TransitionOutcome::Failed
                    }
                }
            }
            Err(err) => {
                page.console
                    .error("transition", format!("error loading content: {err}"));
                TransitionOutcome::Failed
            }
        };

        page.document.remove_class(container, &settings.fade_class);
        outcome
    }
}
