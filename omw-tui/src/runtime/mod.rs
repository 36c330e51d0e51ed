mod action_queue;
mod actions;
mod event_loop;
mod views;

pub use actions::interpret_once;
pub use event_loop::run_app;
