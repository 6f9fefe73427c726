pub mod attendance_modal;
pub mod modal;
pub mod modals;
