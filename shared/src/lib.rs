//! Types and UI state shared by the school dashboard front-end: API records,
//! draft records with dotted field paths, form and modal state, and the
//! coercions that turn form drafts into API requests.

pub mod attendance;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod form;
pub mod modal;
pub mod models;
pub mod payload;
pub mod session;
pub mod view;

pub use attendance::{AttendanceSheet, AttendanceSummary, BatchOutcome};
pub use config::{AppConfig, LogLevel};
pub use dashboard::{DashboardLists, DashboardStats, DashboardTab, ListResource, ListUpdate};
pub use draft::{DraftRecord, DraftValue, FieldPath};
pub use error::{FieldPathError, PayloadError};
pub use form::{FieldChange, FieldDescriptor, FieldKind, FormController, SelectOption};
pub use modal::{ModalOptions, ModalSize, ModalState};
pub use models::*;
pub use session::{format_time_remaining, Countdown, SessionCheck, SessionClock};
pub use view::{Credentials, ViewField, ViewHeader, ViewSection};
