pub mod teacher_dashboard;
