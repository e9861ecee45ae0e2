//! Background Tasks Module
//!
//! Maintenance tasks that run alongside request processing.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
