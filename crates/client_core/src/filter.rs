use crate::layout::{FilterButtonHandle, FilterItemSpec, SelectItemHandle};

#[derive(Debug, Clone)]
pub struct FilterButton {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FilterItem {
    pub label: String,
    pub category: String,
    pub visible: bool,
}

/// Project filter with its two input surfaces: a custom dropdown and a
/// row of filter buttons.
///
/// The last-active button is tracked explicitly instead of being
/// re-derived from widget state on every click. The button highlight
/// and the dropdown selection are independent state slots: choosing
/// from the dropdown updates the selected value and the select label
/// but leaves the button marker where it was, so the highlight can go
/// stale relative to the applied filter. The two surfaces target
/// different viewport widths and are never shown together.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    buttons: Vec<FilterButton>,
    select_items: Vec<String>,
    items: Vec<FilterItem>,
    selected: Option<String>,
    select_label: Option<String>,
    dropdown_open: bool,
    active_button: Option<FilterButtonHandle>,
}

impl FilterPanel {
    pub fn new(
        button_labels: Vec<String>,
        select_items: Vec<String>,
        item_specs: Vec<FilterItemSpec>,
    ) -> Self {
        let mut buttons: Vec<FilterButton> = button_labels
            .into_iter()
            .map(|label| FilterButton {
                label,
                active: false,
            })
            .collect();
        // The first button starts as the highlighted default.
        let active_button = if buttons.is_empty() {
            None
        } else {
            buttons[0].active = true;
            Some(FilterButtonHandle(0))
        };
        let items = item_specs
            .into_iter()
            .map(|spec| FilterItem {
                label: spec.label,
                category: spec.category,
                visible: true,
            })
            .collect();
        Self {
            buttons,
            select_items,
            items,
            selected: None,
            select_label: None,
            dropdown_open: false,
            active_button,
        }
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Dropdown choice: sets the value, closes the dropdown, applies the
    /// filter. Does not move the button marker.
    pub fn choose_dropdown_item(&mut self, handle: SelectItemHandle) {
        let Some(label) = self.select_items.get(handle.0).cloned() else {
            return;
        };
        self.select_label = Some(label.clone());
        self.dropdown_open = false;
        self.set_selected(&label);
    }

    /// Button click: sets the value, applies the filter, and moves the
    /// active marker from the previously highlighted button.
    pub fn click_button(&mut self, handle: FilterButtonHandle) {
        let Some(label) = self.buttons.get(handle.0).map(|b| b.label.clone()) else {
            return;
        };
        self.select_label = Some(label.clone());
        self.set_selected(&label);

        if let Some(previous) = self.active_button {
            if let Some(button) = self.buttons.get_mut(previous.0) {
                button.active = false;
            }
        }
        if let Some(button) = self.buttons.get_mut(handle.0) {
            button.active = true;
        }
        self.active_button = Some(handle);
    }

    fn set_selected(&mut self, value: &str) {
        let value = value.to_lowercase();
        for item in &mut self.items {
            item.visible = value == "all" || value == item.category.to_lowercase();
        }
        self.selected = Some(value);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Text shown in the collapsed select control.
    pub fn select_label(&self) -> Option<&str> {
        self.select_label.as_deref()
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn active_button(&self) -> Option<FilterButtonHandle> {
        self.active_button
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    pub fn visible_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.visible)
            .map(|item| item.label.as_str())
            .collect()
    }
}
