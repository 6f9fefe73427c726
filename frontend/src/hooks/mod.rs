pub mod use_dashboard_data;
pub mod use_modal;
pub mod use_session;
