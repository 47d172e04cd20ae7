//! Integration tests: monitors driven by the main loop

use approx::assert_abs_diff_eq;
use vigilar::{
    Batch, DataStream, DataStreamMonitoring, Error, Evaluator, GradientDescent,
    InMemoryDataStream, MainLoop, MonitorConfig, MonitoredVariable, Records, Schedule,
    TrainingAlgorithm, TrainingDataMonitoring,
};

/// Evaluator returning the same values on every call
struct Constant(Records);

impl Evaluator for Constant {
    fn evaluate(&mut self, _stream: &mut dyn DataStream) -> vigilar::Result<Records> {
        Ok(self.0.clone())
    }
}

struct Frozen;

impl TrainingAlgorithm for Frozen {
    fn process_batch(&mut self, _batch: &Batch) -> vigilar::Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Frozen"
    }
}

fn targets(values: &[f64]) -> InMemoryDataStream {
    InMemoryDataStream::new(
        values.iter().map(|t| Batch::new().with_source("target", vec![*t])).collect(),
    )
}

/// Fits one scalar to the targets with squared error
fn regression() -> GradientDescent {
    GradientDescent::new(vec![0.0], 0.1, |params, batch| {
        let target = batch.source("target").and_then(|t| t.first().copied()).unwrap_or(0.0);
        let diff = params[0] - target;
        (diff * diff, vec![2.0 * diff])
    })
}

#[test]
fn test_valid_prefix_end_to_end() {
    let values: Records = [("loss".to_string(), 0.5), ("acc".to_string(), 0.9)].into();
    let mut main_loop = MainLoop::new(Frozen, targets(&[1.0]));
    main_loop.add_extension(
        DataStreamMonitoring::with_evaluator(Constant(values), InMemoryDataStream::default())
            .with_prefix("valid"),
    );

    main_loop.run(1).unwrap();

    let log = main_loop.log();
    for iteration in [0, 1] {
        let row = log.row(iteration).unwrap();
        assert_eq!(row.get("valid_loss"), Some(0.5));
        assert_eq!(row.get("valid_acc"), Some(0.9));
        assert_eq!(row.len(), 2);
    }
}

#[test]
fn test_data_stream_monitoring_once_per_epoch_boundary() {
    let valid = InMemoryDataStream::new(vec![
        Batch::new().with_source("target", vec![2.0]),
        Batch::new().with_source("target", vec![4.0]),
    ]);
    let mean_target = MonitoredVariable::new("target", |scope| {
        scope.source("target").and_then(|t| t.first().copied())
    });

    let mut main_loop = MainLoop::new(regression(), targets(&[1.0, 1.0, 1.0]));
    main_loop.add_extension(DataStreamMonitoring::new(vec![mean_target], valid));
    main_loop.run(3).unwrap();

    // before the first epoch, then after epochs 1..=3 (3 batches each)
    let rows: Vec<u64> = main_loop.log().rows().map(|(iteration, _)| iteration).collect();
    assert_eq!(rows, vec![0, 3, 6, 9]);
    for (_, row) in main_loop.log().rows() {
        assert_eq!(row.get("target"), Some(3.0));
    }
}

#[test]
fn test_training_monitoring_per_epoch() {
    let mut main_loop = MainLoop::new(regression(), targets(&[1.0, 1.0]));
    main_loop.add_extension(
        TrainingDataMonitoring::new(vec![
            MonitoredVariable::quantity("cost"),
            MonitoredVariable::quantity("gradient_norm")
                .with_scheme(vigilar::AggregationScheme::Mean),
        ])
        .with_prefix("train")
        .with_schedule(Schedule::new().before_training(true).after_every_epoch(true)),
    );

    main_loop.run(2).unwrap();

    let log = main_loop.log();
    assert_eq!(log.len(), 2);

    // epoch 1: w = 0 -> 0.2 -> 0.36; costs 1.0, 0.64; grad norms 2.0, 1.6
    let first = log.row(2).unwrap();
    assert_abs_diff_eq!(first.get("train_cost").unwrap(), 0.64, epsilon = 1e-12);
    assert_abs_diff_eq!(first.get("train_gradient_norm").unwrap(), 1.8, epsilon = 1e-12);

    // the buffer was reset, so epoch 2 only reflects its own steps
    let second = log.row(4).unwrap();
    let cost_at = |w: f64| (w - 1.0_f64).powi(2);
    assert_abs_diff_eq!(second.get("train_cost").unwrap(), cost_at(0.488), epsilon = 1e-12);
    assert!(second.get("train_gradient_norm").unwrap() < 1.8);

    // training cost keeps going down
    assert!(main_loop.algorithm().params()[0] > 0.5);
}

#[test]
fn test_training_monitoring_every_batch() {
    let mut main_loop = MainLoop::new(regression(), targets(&[1.0, 1.0, 1.0]));
    main_loop.add_extension(
        TrainingDataMonitoring::new(vec![MonitoredVariable::quantity("cost")]).with_schedule(
            Schedule::new().before_training(true).after_every_batch(true),
        ),
    );
    main_loop.run(1).unwrap();

    let costs: Vec<f64> =
        main_loop.log().rows().filter_map(|(_, row)| row.get("cost")).collect();
    assert_eq!(costs.len(), 3);
    assert!(costs.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_training_monitoring_rejects_frozen_algorithm() {
    let mut main_loop = MainLoop::new(Frozen, targets(&[1.0]));
    main_loop.add_extension(TrainingDataMonitoring::new(vec![MonitoredVariable::quantity("cost")]));

    let err = main_loop.run(1).unwrap_err();
    assert!(matches!(err, Error::UnsupportedAlgorithm { ref algorithm } if algorithm == "Frozen"));
    assert!(err.is_integration_error());
    assert!(main_loop.log().is_empty());
    assert_eq!(main_loop.log().status().epochs_done, 0);
}

#[test]
fn test_overlapping_triggers_surface_double_report() {
    // after_every_batch and after_every_epoch both fire at the last step of an epoch
    let mut main_loop = MainLoop::new(regression(), targets(&[1.0, 1.0]));
    main_loop.add_extension(
        TrainingDataMonitoring::new(vec![MonitoredVariable::quantity("cost")]).with_schedule(
            Schedule::new().before_training(true).after_every_batch(true).after_every_epoch(true),
        ),
    );

    let err = main_loop.run(1).unwrap_err();
    assert!(matches!(err, Error::DuplicateReport { iterations_done: 2 }));
}

#[test]
fn test_monitors_from_yaml_config() {
    let valid_config = MonitorConfig::from_yaml(
        "prefix: valid\nschedule:\n  after_training: true\n",
    )
    .unwrap();
    let train_config = MonitorConfig::from_yaml(
        "prefix: train\nschedule:\n  before_training: true\n  every_n_epochs: 2\n",
    )
    .unwrap();

    let mean_target = MonitoredVariable::new("target", |scope| {
        scope.source("target").and_then(|t| t.first().copied())
    });

    let mut main_loop = MainLoop::new(regression(), targets(&[1.0]));
    main_loop.add_extension(
        TrainingDataMonitoring::new(vec![MonitoredVariable::quantity("cost")])
            .with_config(&train_config)
            .unwrap(),
    );
    main_loop.add_extension(
        DataStreamMonitoring::new(vec![mean_target], targets(&[5.0]))
            .with_config(&valid_config)
            .unwrap(),
    );
    main_loop.run(4).unwrap();

    let log = main_loop.log();
    let train_rows: Vec<u64> =
        log.rows().filter(|(_, row)| row.contains("train_cost")).map(|(i, _)| i).collect();
    assert_eq!(train_rows, vec![2, 4]);
    assert_eq!(log.last_value("valid_target"), Some((4, 5.0)));
    assert_eq!(log.rows().filter(|(_, row)| row.contains("valid_target")).count(), 1);
}

#[test]
fn test_log_exports_to_json() {
    let mut main_loop = MainLoop::new(regression(), targets(&[1.0]));
    main_loop.add_extension(
        TrainingDataMonitoring::new(vec![MonitoredVariable::quantity("cost")])
            .with_schedule(Schedule::new().before_training(true).after_every_epoch(true)),
    );
    main_loop.run(2).unwrap();

    let json = main_loop.log().to_json().unwrap();
    assert!(json.contains("iterations_done"));
    assert!(json.contains("cost"));
    let restored = vigilar::TrainingLog::from_json(&json).unwrap();
    assert_eq!(restored.status(), main_loop.log().status());
    assert_eq!(restored.len(), 2);
    for (iteration, row) in main_loop.log().rows() {
        let cost = restored.row(iteration).and_then(|r| r.get("cost")).unwrap();
        assert_abs_diff_eq!(cost, row.get("cost").unwrap(), epsilon = 1e-12);
    }
}
