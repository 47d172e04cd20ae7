//! Reference main loop driving extensions through the training lifecycle

use crate::algorithm::TrainingAlgorithm;
use crate::data::DataStream;
use crate::error::Result;
use crate::extension::{Callback, ExtensionContext, TrainingExtension};
use crate::log::TrainingLog;

/// Runs a training algorithm over a data stream and invokes extensions
///
/// Callback order for a run:
///
/// ```text
/// before_training
/// epoch 0: before_first_epoch, before_epoch, (before_batch, step, after_batch)*, after_epoch
/// epoch n: before_epoch, (before_batch, step, after_batch)*, after_epoch
/// after_training
/// ```
///
/// `iterations_done` is incremented before `after_batch` and `epochs_done`
/// before `after_epoch`, so records written there land in the row of the
/// step or epoch that just completed. The first extension error aborts the
/// run.
pub struct MainLoop<A, S> {
    algorithm: A,
    data_stream: S,
    log: TrainingLog,
    extensions: Vec<Box<dyn TrainingExtension>>,
}

impl<A: TrainingAlgorithm, S: DataStream> MainLoop<A, S> {
    /// Create a main loop with an empty log
    pub fn new(algorithm: A, data_stream: S) -> Self {
        Self { algorithm, data_stream, log: TrainingLog::new(), extensions: Vec::new() }
    }

    /// Add an extension; extensions run in insertion order
    pub fn add_extension<X: TrainingExtension + 'static>(&mut self, extension: X) {
        self.extensions.push(Box::new(extension));
    }

    /// Number of extensions
    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// The training log
    pub fn log(&self) -> &TrainingLog {
        &self.log
    }

    /// The training algorithm
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Consume the loop and keep the log
    pub fn into_log(self) -> TrainingLog {
        self.log
    }

    /// Train until `max_epochs` epochs are done in total
    ///
    /// Calling `run` again with a larger `max_epochs` continues training
    /// without repeating the before-training callbacks.
    pub fn run(&mut self, max_epochs: u64) -> Result<()> {
        if !self.log.status().training_started {
            self.algorithm.initialize()?;
            self.log.status_mut().training_started = true;
            tracing::info!(algorithm = self.algorithm.name(), max_epochs, "Training started");
            self.fire(Callback::BeforeTraining)?;
        }

        while self.log.status().epochs_done < max_epochs {
            self.log.status_mut().epoch_started = true;
            if self.log.status().epochs_done == 0 {
                self.fire(Callback::BeforeFirstEpoch)?;
            }
            self.fire(Callback::BeforeEpoch)?;

            for batch in self.data_stream.epoch() {
                dispatch(
                    &mut self.extensions,
                    &mut self.log,
                    &mut self.algorithm,
                    Callback::BeforeBatch,
                )?;
                self.algorithm.process_batch(&batch)?;
                self.log.status_mut().iterations_done += 1;
                dispatch(
                    &mut self.extensions,
                    &mut self.log,
                    &mut self.algorithm,
                    Callback::AfterBatch,
                )?;
            }

            let status = self.log.status_mut();
            status.epoch_started = false;
            status.epochs_done += 1;
            tracing::debug!(
                epochs_done = status.epochs_done,
                iterations_done = status.iterations_done,
                "Epoch finished"
            );
            self.fire(Callback::AfterEpoch)?;
        }

        self.log.status_mut().training_finished = true;
        self.fire(Callback::AfterTraining)?;
        tracing::info!(
            epochs_done = self.log.status().epochs_done,
            iterations_done = self.log.status().iterations_done,
            "Training finished"
        );
        Ok(())
    }

    fn fire(&mut self, callback: Callback) -> Result<()> {
        dispatch(&mut self.extensions, &mut self.log, &mut self.algorithm, callback)
    }
}

fn dispatch(
    extensions: &mut [Box<dyn TrainingExtension>],
    log: &mut TrainingLog,
    algorithm: &mut dyn TrainingAlgorithm,
    callback: Callback,
) -> Result<()> {
    let mut ctx = ExtensionContext::new(log, algorithm);
    for extension in extensions.iter_mut() {
        extension.dispatch(callback, &mut ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
