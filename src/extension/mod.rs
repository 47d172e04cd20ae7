//! Extension system for main loop lifecycle events
//!
//! Extensions hook into these callbacks:
//! - `before_training` / `after_training`
//! - `before_first_epoch`, `before_epoch` / `after_epoch`
//! - `before_batch` / `after_batch`
//!
//! Which callbacks reach an extension is decided by its [`Schedule`].
//!
//! # Example
//!
//! ```rust
//! use vigilar::{Callback, ExtensionContext, Schedule, SimpleExtension, TrainingExtension};
//!
//! struct EpochCounter {
//!     base: SimpleExtension,
//!     seen: u64,
//! }
//!
//! impl TrainingExtension for EpochCounter {
//!     fn name(&self) -> &str {
//!         self.base.name()
//!     }
//!
//!     fn schedule(&self) -> &Schedule {
//!         self.base.schedule()
//!     }
//!
//!     fn perform(&mut self, _: Callback, ctx: &mut ExtensionContext<'_>) -> vigilar::Result<()> {
//!         self.seen += 1;
//!         ctx.log.current_row_mut().set("epochs_seen", self.seen as f64);
//!         Ok(())
//!     }
//! }
//!
//! let counter = EpochCounter {
//!     base: SimpleExtension::new("EpochCounter", Schedule::new().after_every_epoch(true)),
//!     seen: 0,
//! };
//! assert_eq!(counter.name(), "EpochCounter");
//! ```

mod callback;
mod schedule;
mod traits;

pub use callback::Callback;
pub use schedule::Schedule;
pub use traits::{ExtensionContext, SimpleExtension, TrainingExtension};
