pub mod countdown;
pub mod models;
pub mod session_schedule;
pub mod time_parser;
