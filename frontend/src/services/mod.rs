pub mod api;
pub mod browser;
pub mod date_utils;
pub mod logging;
