//! Tests for the main loop

use super::*;
use crate::data::{Batch, InMemoryDataStream};
use crate::error::Error;
use crate::extension::{Schedule, SimpleExtension};
use std::sync::{Arc, Mutex};

struct Idle;

impl TrainingAlgorithm for Idle {
    fn process_batch(&mut self, _batch: &Batch) -> Result<()> {
        Ok(())
    }
}

struct Failing;

impl TrainingAlgorithm for Failing {
    fn process_batch(&mut self, _batch: &Batch) -> Result<()> {
        Err(Error::EmptyStream)
    }
}

/// Records every callback it receives along with the counters at that point
struct Recorder {
    base: SimpleExtension,
    seen: Arc<Mutex<Vec<(Callback, u64, u64)>>>,
}

impl Recorder {
    fn everything(seen: Arc<Mutex<Vec<(Callback, u64, u64)>>>) -> Self {
        let schedule = Schedule::new()
            .before_training(true)
            .before_first_epoch(true)
            .before_every_epoch(true)
            .before_every_batch(true)
            .after_every_batch(true)
            .after_every_epoch(true)
            .after_training(true);
        Self { base: SimpleExtension::new("Recorder", schedule), seen }
    }
}

impl TrainingExtension for Recorder {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn schedule(&self) -> &Schedule {
        self.base.schedule()
    }

    fn perform(&mut self, callback: Callback, ctx: &mut ExtensionContext<'_>) -> Result<()> {
        let status = ctx.log.status();
        self.seen.lock().unwrap().push((callback, status.iterations_done, status.epochs_done));
        Ok(())
    }
}

fn two_batches() -> InMemoryDataStream {
    InMemoryDataStream::new(vec![Batch::new(), Batch::new()])
}

#[test]
fn test_callback_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut main_loop = MainLoop::new(Idle, two_batches());
    main_loop.add_extension(Recorder::everything(Arc::clone(&seen)));
    assert_eq!(main_loop.extension_count(), 1);

    main_loop.run(2).unwrap();

    use Callback::*;
    let expected = vec![
        (BeforeTraining, 0, 0),
        (BeforeFirstEpoch, 0, 0),
        (BeforeEpoch, 0, 0),
        (BeforeBatch, 0, 0),
        (AfterBatch, 1, 0),
        (BeforeBatch, 1, 0),
        (AfterBatch, 2, 0),
        (AfterEpoch, 2, 1),
        (BeforeEpoch, 2, 1),
        (BeforeBatch, 2, 1),
        (AfterBatch, 3, 1),
        (BeforeBatch, 3, 1),
        (AfterBatch, 4, 1),
        (AfterEpoch, 4, 2),
        (AfterTraining, 4, 2),
    ];
    assert_eq!(*seen.lock().unwrap(), expected);
}

#[test]
fn test_status_after_run() {
    let mut main_loop = MainLoop::new(Idle, two_batches());
    main_loop.run(3).unwrap();

    let status = main_loop.log().status();
    assert_eq!(status.epochs_done, 3);
    assert_eq!(status.iterations_done, 6);
    assert!(status.training_started);
    assert!(status.training_finished);
    assert!(!status.epoch_started);
}

#[test]
fn test_resumed_run_skips_before_training() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut main_loop = MainLoop::new(Idle, two_batches());
    main_loop.add_extension(Recorder::everything(Arc::clone(&seen)));

    main_loop.run(1).unwrap();
    main_loop.run(2).unwrap();

    let seen = seen.lock().unwrap();
    let count = |cb: Callback| seen.iter().filter(|(c, _, _)| *c == cb).count();
    assert_eq!(count(Callback::BeforeTraining), 1);
    assert_eq!(count(Callback::BeforeFirstEpoch), 1);
    assert_eq!(count(Callback::AfterEpoch), 2);
    assert_eq!(count(Callback::AfterTraining), 2);
}

#[test]
fn test_zero_epochs_only_runs_outer_callbacks() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut main_loop = MainLoop::new(Idle, two_batches());
    main_loop.add_extension(Recorder::everything(Arc::clone(&seen)));
    main_loop.run(0).unwrap();

    let callbacks: Vec<_> = seen.lock().unwrap().iter().map(|(c, _, _)| *c).collect();
    assert_eq!(callbacks, vec![Callback::BeforeTraining, Callback::AfterTraining]);
}

#[test]
fn test_algorithm_error_aborts_run() {
    let mut main_loop = MainLoop::new(Failing, two_batches());
    let err = main_loop.run(1).unwrap_err();
    assert!(matches!(err, Error::EmptyStream));
    assert_eq!(main_loop.log().status().iterations_done, 0);
    assert!(!main_loop.log().status().training_finished);
}

#[test]
fn test_into_log() {
    let mut main_loop = MainLoop::new(Idle, two_batches());
    main_loop.run(1).unwrap();
    let log = main_loop.into_log();
    assert_eq!(log.status().epochs_done, 1);
}
