//! Page lifecycle: initialization on DOM readiness and event dispatch.
//!
//! [`PageRuntime`] owns everything one page needs (config, fetcher, document,
//! transition state and the state of each enhancement). Browser inputs enter
//! as [`Event`]s; side effects the host must perform leave as [`Effect`]s.
//!
//! Initialization order:
//!
//! 1. header mount, link targets, active link, footer mount
//! 2. scroll reveal
//! 3. back-to-top button
//! 4. form validation
//! 5. external link hardening
//!
//! A failed component load is logged to the page console and never stops the
//! steps after it. Initialization runs at most once per page.

use crate::config::FolioConfig;
use crate::dom::NodeId;
use crate::enhance::{
    self, BackToTop, FormValidator, MenuToggled, Rect, ScrollReveal, ScrollTo, SubmitOutcome,
    Violation,
};
use crate::fetch::Fetcher;
use crate::loader::{ComponentLoader, LoadReport};
use crate::page::Page;
use crate::transition::{TransitionOutcome, Transitioner};
use anyhow::Result;

/// Document loading state at the time the runtime is booted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Still parsing; initialization waits for [`Event::DomContentLoaded`].
    Loading,
    Interactive,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DomContentLoaded,
    /// Window scrolled to vertical `offset`.
    Scroll { offset: f64 },
    /// Observed element bounds relative to the viewport.
    Intersection {
        node: NodeId,
        bounds: Rect,
        viewport_height: f64,
    },
    Click { node: NodeId },
    Input { node: NodeId, value: String },
    Submit { form: NodeId },
    /// Load `page` into the content container.
    Navigate { page: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Initialized(InitReport),
    ScrollTo(ScrollTo),
    Revealed(NodeId),
    MenuToggled(MenuToggled),
    SubmitPrevented {
        form: NodeId,
        invalid: Vec<(NodeId, Violation)>,
    },
    Transition(TransitionOutcome),
}

/// What initialization did.
#[derive(Debug, Clone, PartialEq)]
pub struct InitReport {
    pub components: LoadReport,
    /// Elements waiting to be revealed.
    pub reveal_pending: usize,
    pub back_to_top: Option<NodeId>,
    pub forms: usize,
    pub hardened_links: usize,
}

#[derive(Debug, Default)]
struct Features {
    reveal: Option<ScrollReveal>,
    back_to_top: Option<BackToTop>,
    forms: Option<FormValidator>,
}

pub struct PageRuntime<F> {
    config: FolioConfig,
    fetcher: F,
    page: Page,
    transitioner: Transitioner,
    features: Option<Features>,
}

impl<F: Fetcher> PageRuntime<F> {
    pub fn new(config: FolioConfig, fetcher: F, page: Page) -> Self {
        Self {
            config,
            fetcher,
            page,
            transitioner: Transitioner::new(),
            features: None,
        }
    }

    /// Parse `markup` as the page at `location` and wrap it in a runtime.
    pub fn from_markup(
        config: FolioConfig,
        fetcher: F,
        markup: &str,
        location: Option<&str>,
    ) -> Result<Self> {
        let page = Page::new(markup, location, &config)?;
        Ok(Self::new(config, fetcher, page))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn transitioner(&self) -> &Transitioner {
        &self.transitioner
    }

    pub fn is_initialized(&self) -> bool {
        self.features.is_some()
    }

    /// Initialize now unless the document is still loading.
    pub async fn boot(&mut self, ready: ReadyState) -> Option<InitReport> {
        match ready {
            ReadyState::Loading => None,
            ReadyState::Interactive | ReadyState::Complete => self.init().await,
        }
    }

    /// Run initialization; `None` if it already ran.
    pub async fn init(&mut self) -> Option<InitReport> {
        if self.features.is_some() {
            return None;
        }

        let components = ComponentLoader::new(&self.config, &self.fetcher)
            .load(&mut self.page)
            .await;

        let enhance = &self.config.enhance;
        let mut features = Features::default();

        if enhance.reveal.enable {
            features.reveal = Some(ScrollReveal::attach(&mut self.page, &enhance.reveal));
        }
        if enhance.back_to_top.enable {
            features.back_to_top =
                Some(BackToTop::attach(&mut self.page.document, &enhance.back_to_top));
        }
        if enhance.forms.enable {
            features.forms = Some(FormValidator::attach(&self.page.document));
        }
        let hardened_links = if enhance.links.enable {
            enhance::harden_external_links(&mut self.page.document, &enhance.links)
        } else {
            0
        };

        let report = InitReport {
            components,
            reveal_pending: features.reveal.as_ref().map_or(0, |r| r.observed().len()),
            back_to_top: features.back_to_top.as_ref().map(BackToTop::button),
            forms: features.forms.as_ref().map_or(0, |f| f.forms().len()),
            hardened_links,
        };
        self.page.console.info(
            "runtime",
            format!(
                "initialized: {} reveal, {} forms, {} links hardened",
                report.reveal_pending, report.forms, report.hardened_links
            ),
        );
        self.features = Some(features);
        Some(report)
    }

    /// Handle one browser event.
    pub async fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::DomContentLoaded => {
                if let Some(report) = self.init().await {
                    effects.push(Effect::Initialized(report));
                }
            }
            Event::Navigate { page } => {
                let outcome = self
                    .transitioner
                    .load_content(&mut self.page, &self.fetcher, &self.config, &page)
                    .await;
                effects.push(Effect::Transition(outcome));
            }
            event => self.dispatch_to_features(event, &mut effects),
        }
        effects
    }

    fn dispatch_to_features(&mut self, event: Event, effects: &mut Vec<Effect>) {
        let Some(features) = self.features.as_mut() else {
            return;
        };
        let enhance = &self.config.enhance;
        let doc = &mut self.page.document;

        match event {
            Event::Scroll { offset } => {
                if let Some(button) = features.back_to_top.as_mut() {
                    button.on_scroll(doc, &enhance.back_to_top, offset);
                }
            }
            Event::Intersection {
                node,
                bounds,
                viewport_height,
            } => {
                if let Some(reveal) = features.reveal.as_mut()
                    && reveal.on_intersection(doc, &enhance.reveal, node, bounds, viewport_height)
                {
                    effects.push(Effect::Revealed(node));
                }
            }
            Event::Click { node } => {
                if let Some(scroll) = features
                    .back_to_top
                    .as_ref()
                    .and_then(|b| b.on_click(doc, &enhance.back_to_top, node))
                {
                    effects.push(Effect::ScrollTo(scroll));
                }
                if enhance.menu.enable
                    && let Some(toggled) = enhance::menu::on_click(doc, &enhance.menu, node)
                {
                    effects.push(Effect::MenuToggled(toggled));
                }
            }
            Event::Input { node, value } => {
                if features.forms.is_some() {
                    enhance::forms::set_value(doc, node, &value);
                }
            }
            Event::Submit { form } => {
                if let Some(validator) = features.forms.as_ref()
                    && let SubmitOutcome::Prevented(invalid) =
                        validator.on_submit(doc, &enhance.forms, form)
                {
                    effects.push(Effect::SubmitPrevented { form, invalid });
                }
            }
            Event::DomContentLoaded | Event::Navigate { .. } => {}
        }
    }
}
