use serde::{Deserialize, Serialize};

/// Width scale for the modal content region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    TwoXl,
}

impl ModalSize {
    pub fn css_class(&self) -> &'static str {
        match self {
            ModalSize::Sm => "modal-sm",
            ModalSize::Md => "modal-md",
            ModalSize::Lg => "modal-lg",
            ModalSize::Xl => "modal-xl",
            ModalSize::TwoXl => "modal-2xl",
        }
    }
}

/// Presentation flags for the modal shell
#[derive(Debug, Clone, PartialEq)]
pub struct ModalOptions {
    pub title: Option<String>,
    pub size: ModalSize,
    pub close_on_backdrop: bool,
    pub show_close_button: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: None,
            size: ModalSize::default(),
            close_on_backdrop: true,
            show_close_button: true,
        }
    }
}

impl ModalOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Locks the modal open until an explicit action closes it
    pub fn blocking(mut self) -> Self {
        self.close_on_backdrop = false;
        self.show_close_button = false;
        self
    }

    /// Only a click landing on the backdrop itself may dismiss
    pub fn dismisses_on_backdrop(&self) -> bool {
        self.close_on_backdrop
    }

    /// Empty titles render no header text
    pub fn header_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

/// Visibility flag plus the context the modal was opened for (e.g. the selected class)
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<C> {
    open: bool,
    context: Option<C>,
}

impl<C> Default for ModalState<C> {
    fn default() -> Self {
        Self {
            open: false,
            context: None,
        }
    }
}

impl<C> ModalState<C> {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn open_with(&mut self, context: C) {
        self.context = Some(context);
        self.open = true;
    }

    /// Closing also drops the context
    pub fn close(&mut self) {
        self.open = false;
        self.context = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_size_classes() {
        let sizes = [
            (ModalSize::Sm, "modal-sm"),
            (ModalSize::Md, "modal-md"),
            (ModalSize::Lg, "modal-lg"),
            (ModalSize::Xl, "modal-xl"),
            (ModalSize::TwoXl, "modal-2xl"),
        ];
        for (size, class) in sizes {
            assert_eq!(size.css_class(), class);
        }
        assert_eq!(ModalSize::default(), ModalSize::Md);
    }

    #[test]
    fn test_modal_size_serde_names() {
        assert_eq!(serde_json::to_string(&ModalSize::TwoXl).unwrap(), "\"2xl\"");
        let size: ModalSize = serde_json::from_str("\"lg\"").unwrap();
        assert_eq!(size, ModalSize::Lg);
    }

    #[test]
    fn test_modal_options() {
        let options = ModalOptions::titled("Create Exam").size(ModalSize::Lg);
        assert!(options.dismisses_on_backdrop());
        assert!(options.show_close_button);
        assert_eq!(options.header_title(), Some("Create Exam"));

        let blocking = ModalOptions::titled("").blocking();
        assert!(!blocking.dismisses_on_backdrop());
        assert!(!blocking.show_close_button);
        assert_eq!(blocking.header_title(), None);
    }

    #[test]
    fn test_modal_state_lifecycle() {
        let mut state: ModalState<i64> = ModalState::closed();
        assert!(!state.is_open());
        assert!(state.context().is_none());

        state.open_with(3);
        assert!(state.is_open());
        assert_eq!(state.context(), Some(&3));

        state.close();
        assert!(!state.is_open());
        assert!(state.context().is_none());

        // Opening without context
        state.open();
        assert!(state.is_open());
        assert!(state.context().is_none());
    }
}
