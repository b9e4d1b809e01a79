//! Background work for EventEngine.
//!
//! This crate provides:
//! - The [`Reconciler`], which reaps expired sessions and their remote users
//! - A [`CronScheduler`] that runs it on the configured schedule

pub mod reconciler;
pub mod scheduler;

pub use reconciler::{Reconciler, SweepReport};
pub use scheduler::CronScheduler;
