//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn base_path() -> String {
        "".into()
    }

    pub fn origin() -> String {
        "http://localhost/".into()
    }
}

// ============================================================================
// [components] Section Defaults
// ============================================================================

pub mod components {
    pub fn header_mount() -> String {
        "header-placeholder".into()
    }

    pub fn footer_mount() -> String {
        "footer-placeholder".into()
    }

    pub fn header_path() -> String {
        "components/header.html".into()
    }

    pub fn footer_path() -> String {
        "components/footer.html".into()
    }
}

// ============================================================================
// [nav] Section Defaults
// ============================================================================

pub mod nav {
    pub fn attribute() -> String {
        "data-page".into()
    }

    pub fn link_class() -> String {
        "nav-link".into()
    }

    pub fn active_class() -> String {
        "active".into()
    }

    pub fn home_symbols() -> Vec<String> {
        vec!["home".into()]
    }
}

// ============================================================================
// [transition] Section Defaults
// ============================================================================

pub mod transition {
    pub fn container() -> String {
        "content".into()
    }

    pub fn fade_class() -> String {
        "fade-out".into()
    }

    /// Matches the 0.5s opacity transition in the stylesheet.
    pub fn delay_ms() -> u64 {
        500
    }
}

// ============================================================================
// [enhance] Section Defaults
// ============================================================================

pub mod enhance {
    pub mod reveal {
        pub fn selectors() -> Vec<String> {
            vec![
                ".feature-1".into(),
                ".feature-2".into(),
                ".timeline-section".into(),
            ]
        }

        pub fn threshold() -> f64 {
            0.1
        }

        pub fn bottom_margin() -> f64 {
            50.0
        }

        pub fn pending_class() -> String {
            "reveal-pending".into()
        }

        pub fn revealed_class() -> String {
            "revealed".into()
        }
    }

    pub mod back_to_top {
        pub fn threshold() -> f64 {
            300.0
        }

        pub fn class() -> String {
            "back-to-top".into()
        }

        pub fn visible_class() -> String {
            "visible".into()
        }

        pub fn label() -> String {
            "Back to top".into()
        }
    }

    pub mod forms {
        pub fn validated_class() -> String {
            "was-validated".into()
        }
    }

    pub mod links {
        pub fn rel() -> String {
            "noopener noreferrer".into()
        }
    }

    pub mod menu {
        pub fn open_class() -> String {
            "open".into()
        }
    }
}
