//! Page enhancements initialized after the shared components.
//!
//! | Module | Trigger | Effect on the page |
//! |--------|---------|--------------------|
//! | [`reveal`] | intersection report | pending → revealed class |
//! | [`back_to_top`] | scroll, click | visible class, scroll-to-top request |
//! | [`forms`] | submit, input | validated class, submit gating |
//! | [`links`] | init only | `rel` on new-tab links |
//! | [`menu`] | click | open class, `aria-expanded` |
//!
//! Each is switched on and off by its `[enhance.*]` section.

pub mod back_to_top;
pub mod forms;
pub mod links;
pub mod menu;
pub mod reveal;

pub use back_to_top::{BackToTop, ScrollTo};
pub use forms::{FormValidator, SubmitOutcome, Violation};
pub use links::harden_external_links;
pub use menu::MenuToggled;
pub use reveal::{Rect, ScrollReveal};
