pub mod confirmation_modal;
pub mod credentials_modal;
pub mod form_modal;
pub mod session_expiry_warning;
pub mod view_modal;

pub use confirmation_modal::{ConfirmVariant, ConfirmationModal};
pub use credentials_modal::CredentialsModal;
pub use form_modal::FormModal;
pub use session_expiry_warning::SessionExpiryWarning;
pub use view_modal::ViewModal;
