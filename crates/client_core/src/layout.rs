//! Static description of the portfolio markup.
//!
//! The browser version looked widgets up by data attribute on every
//! event. Here the markup is described once, at startup, and widgets
//! are addressed through typed handles afterwards.

use serde::{Deserialize, Serialize};

macro_rules! handle_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub usize);
    };
}

handle_newtype!(NavLinkHandle);
handle_newtype!(FilterButtonHandle);
handle_newtype!(SelectItemHandle);
handle_newtype!(TestimonialHandle);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLinkSpec {
    pub label: String,
    /// Explicit navigation target; falls back to the label when absent.
    pub target: Option<String>,
}

impl NavLinkSpec {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    pub fn targeting(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterItemSpec {
    pub label: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialSpec {
    pub avatar_src: String,
    pub avatar_alt: String,
    pub title: String,
    pub text: String,
}

/// Everything the page controller needs to know about the markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub pages: Vec<String>,
    pub nav_links: Vec<NavLinkSpec>,
    pub filter_buttons: Vec<String>,
    pub select_items: Vec<String>,
    pub filter_items: Vec<FilterItemSpec>,
    pub testimonials: Vec<TestimonialSpec>,
}
