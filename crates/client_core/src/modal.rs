use crate::layout::TestimonialSpec;

/// Testimonial detail overlay.
///
/// Open/closed is an explicit boolean rather than a class toggle so the
/// overlay and the close button can both request a close without
/// flipping an already-closed modal back open.
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub open: bool,
    pub image_src: String,
    pub image_alt: String,
    pub title: String,
    pub body: String,
}

impl ModalState {
    /// Copies the clicked testimonial's display fields, then opens.
    pub fn open_for(&mut self, item: &TestimonialSpec) {
        self.image_src = item.avatar_src.clone();
        self.image_alt = item.avatar_alt.clone();
        self.title = item.title.clone();
        self.body = item.text.clone();
        self.open = true;
    }

    /// Display fields go stale here on purpose; the next open overwrites
    /// them.
    pub fn close(&mut self) {
        self.open = false;
    }
}
