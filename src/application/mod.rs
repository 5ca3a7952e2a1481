pub mod bootstrap;
pub mod dashboard;
pub mod refresh;
pub mod view_state;
