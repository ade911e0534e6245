//! Behavior layer for static portfolio pages.
//!
//! Every page of the site carries empty header/footer mounts and links whose
//! destination is given as a site-root path in `data-page`. On DOM readiness
//! this crate:
//!
//! - injects the shared header and footer (embedded or fetched)
//! - rewrites link targets relative to the page's directory depth
//! - marks the link of the current page active
//! - sets up scroll reveal, back-to-top, form validation, link hardening and
//!   the mobile menu toggle
//!
//! It also provides an optional fade transition that swaps the content
//! container for a fetched fragment.
//!
//! # Example
//!
//! ```ignore
//! let config = FolioConfig::load_or_default(Path::new("folio.toml"))?;
//! let fetcher = DirFetcher::new("site");
//! let mut runtime = PageRuntime::from_markup(config, fetcher, &markup, Some("/html/projects.html"))?;
//! runtime.boot(ReadyState::Complete).await;
//! println!("{}", runtime.page().document.to_html());
//! ```

#[macro_use]
pub mod logger;

pub mod config;
pub mod dom;
pub mod enhance;
pub mod fetch;
pub mod loader;
pub mod nav;
pub mod page;
pub mod runtime;
pub mod transition;

pub use config::FolioConfig;
pub use dom::{Document, NodeId};
pub use fetch::{DirFetcher, FetchError, Fetcher, HttpFetcher, MemoryFetcher};
pub use loader::{ComponentLoader, LoadReport, MountOutcome};
pub use nav::{NavActivator, NavLink, NavModel, PageLocation, PathResolver};
pub use page::Page;
pub use runtime::{Effect, Event, InitReport, PageRuntime, ReadyState};
pub use transition::{TransitionOutcome, Transitioner};
