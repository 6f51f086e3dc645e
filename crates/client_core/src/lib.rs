//! Headless page controller for the portfolio single-page UI.
//!
//! All UI state lives in [`PortfolioApp`]: which page is visible, the
//! testimonial modal, the project filter, the mobile sidebar, and the
//! contact-form flow. The markup is captured once as a [`layout::Layout`]
//! and everything afterwards goes through typed handles, so the whole
//! controller runs and tests without a browser.

pub mod emailjs;
pub mod filter;
pub mod form;
pub mod layout;
pub mod modal;
pub mod nav;

use filter::FilterPanel;
use form::{ContactForm, EmailJsConfig, EmailSender};
use layout::{Layout, NavLinkHandle, TestimonialHandle, TestimonialSpec};
use modal::ModalState;
use nav::{NavOutcome, Navigator};

/// Page shown by the startup activation.
pub const DEFAULT_PAGE: &str = "about";

pub struct PortfolioApp {
    pub nav: Navigator,
    pub modal: ModalState,
    pub filter: FilterPanel,
    pub form: ContactForm,
    pub sidebar_open: bool,
    testimonials: Vec<TestimonialSpec>,
}

impl PortfolioApp {
    pub fn new(layout: Layout, config: EmailJsConfig) -> Self {
        let mut app = Self {
            nav: Navigator::new(layout.pages, layout.nav_links),
            modal: ModalState::default(),
            filter: FilterPanel::new(
                layout.filter_buttons,
                layout.select_items,
                layout.filter_items,
            ),
            form: ContactForm::new(config),
            sidebar_open: false,
            testimonials: layout.testimonials,
        };
        // Startup activation; no scroll reset here.
        app.nav.activate(DEFAULT_PAGE);
        app
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn click_nav_link(&mut self, handle: NavLinkHandle) -> Option<NavOutcome> {
        self.nav.click_link(handle)
    }

    pub fn open_testimonial(&mut self, handle: TestimonialHandle) {
        if let Some(item) = self.testimonials.get(handle.0) {
            self.modal.open_for(item);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub async fn submit_contact_form(&mut self, sender: &dyn EmailSender) {
        self.form.submit(sender).await;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
