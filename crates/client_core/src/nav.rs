use crate::layout::{NavLinkHandle, NavLinkSpec};

#[derive(Debug, Clone)]
pub struct Page {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub target: Option<String>,
    pub active: bool,
}

impl NavLink {
    /// Explicit target wins; otherwise the trimmed visible label,
    /// lower-cased.
    pub fn resolved_target(&self) -> String {
        self.target
            .as_deref()
            .unwrap_or_else(|| self.label.trim())
            .to_lowercase()
    }
}

/// Outcome of a navigation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    pub page_matched: bool,
    pub scroll_to_top: bool,
}

/// Single-page navigation: at most one page and one nav link are active
/// at any time, and the active link targets the active page.
#[derive(Debug, Clone)]
pub struct Navigator {
    pages: Vec<Page>,
    links: Vec<NavLink>,
}

impl Navigator {
    pub fn new(page_names: Vec<String>, link_specs: Vec<NavLinkSpec>) -> Self {
        let pages = page_names
            .into_iter()
            .map(|name| Page {
                name,
                active: false,
            })
            .collect();
        let links = link_specs
            .into_iter()
            .map(|spec| NavLink {
                label: spec.label,
                target: spec.target,
                active: false,
            })
            .collect();
        Self { pages, links }
    }

    /// Deactivates every page and link, then activates the pair matching
    /// `name` (case-insensitive). An unknown name leaves nothing active;
    /// that is deliberate, not an error.
    pub fn activate(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        for page in &mut self.pages {
            page.active = false;
        }
        for link in &mut self.links {
            link.active = false;
        }

        let mut matched = false;
        if let Some(page) = self
            .pages
            .iter_mut()
            .find(|page| page.name.to_lowercase() == name)
        {
            page.active = true;
            matched = true;
        }
        if let Some(link) = self
            .links
            .iter_mut()
            .find(|link| link.resolved_target() == name)
        {
            link.active = true;
        }
        matched
    }

    /// Link-triggered transition; unlike the startup activation it also
    /// resets the scroll position.
    pub fn click_link(&mut self, handle: NavLinkHandle) -> Option<NavOutcome> {
        let target = self.links.get(handle.0)?.resolved_target();
        let page_matched = self.activate(&target);
        Some(NavOutcome {
            page_matched,
            scroll_to_top: true,
        })
    }

    pub fn active_page(&self) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| page.active)
            .map(|page| page.name.as_str())
    }

    pub fn active_link(&self) -> Option<NavLinkHandle> {
        self.links
            .iter()
            .position(|link| link.active)
            .map(NavLinkHandle)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }
}
