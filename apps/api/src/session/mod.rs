pub mod handlers;
pub mod messages;
pub mod registry;
pub mod run_lock;
pub mod runner;
pub mod state_machine;
