//! The `replay` command.
//!
//! Drives a recorded trace through a fresh engine pass by pass, printing
//! each line as it is emitted, then the retained history and counters.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use feedexposure::config::ClockSource;
use feedexposure::logger::TimeZoneMode;
use feedexposure::telemetry::MetricsSnapshot;
use feedexposure::{EngineConfig, ExposureLogger, ExposureTracker};
use tracing::{debug, info};

use super::common::load_config;
use crate::error::CliError;
use crate::trace::Trace;

/// Time between passes when the trace does not record timestamps.
const FRAME_MILLIS: i64 = 16;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON trace to replay
    pub trace: PathBuf,

    /// Config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// History retention cap (overrides config)
    #[arg(long)]
    pub history: Option<usize>,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Only print the final history and counters
    #[arg(long, short)]
    pub quiet: bool,
}

/// Replay a trace file.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(capacity) = args.history {
        if capacity == 0 {
            return Err(CliError::InvalidArgument(
                "--history must be at least 1".to_string(),
            ));
        }
        config.history_capacity = capacity;
    }
    if args.utc {
        config.timezone = TimeZoneMode::Utc;
    }

    let trace = Trace::load(&args.trace)?;
    info!(
        path = %args.trace.display(),
        passes = trace.passes.len(),
        "Replaying trace"
    );

    let logger = Arc::new(ExposureLogger::new(&config));
    if !args.quiet {
        logger.subscribe_fn(|_, line| println!("{}", line));
    }

    let metrics = replay_trace(&trace, &config, Arc::clone(&logger));

    println!();
    println!("History (newest first)");
    println!("======================");
    for line in logger.history_snapshot() {
        println!("{}", line);
    }
    println!();
    println!("{}", metrics);

    Ok(())
}

/// Run every pass of `trace` through a tracker publishing to `logger`.
///
/// Recorded pass timestamps drive a manual clock; a trace without them
/// advances one frame per pass when the config asks for a manual clock,
/// and uses the system clock otherwise.
pub fn replay_trace(
    trace: &Trace,
    config: &EngineConfig,
    logger: Arc<ExposureLogger>,
) -> MetricsSnapshot {
    let effective = if trace.has_timestamps() {
        config.clone().with_clock(ClockSource::Manual)
    } else {
        config.clone()
    };
    let mut tracker = ExposureTracker::from_config(logger, &effective);
    let manual = tracker.manual_clock();
    if let Some(clock) = &manual {
        clock.set(trace.first_timestamp().unwrap_or(0));
    }

    for (index, pass) in trace.passes.iter().enumerate() {
        if let Some(clock) = &manual {
            match pass.at_millis {
                Some(at) => clock.set(at),
                None if index > 0 => clock.advance(FRAME_MILLIS),
                None => {}
            }
        }

        let emitted = tracker.sample_and_emit(pass.viewport_or(&trace.viewport), &pass.items);
        debug!(pass = index, items = pass.items.len(), emitted, "Replayed pass");
    }

    tracker.metrics()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"{
        "viewport": { "left": 0, "top": 0, "right": 400, "bottom": 1000 },
        "passes": [
            { "at_millis": 1709296496789, "items": [
                { "id": "card-1", "position": 0, "title": "Hello", "category": 2,
                  "bounds": { "left": 0, "top": 970, "right": 400, "bottom": 1070 },
                  "height": 100 }
            ] },
            { "at_millis": 1709296496805, "items": [
                { "id": "card-1", "position": 0, "title": "Hello", "category": 2,
                  "bounds": { "left": 0, "top": 900, "right": 400, "bottom": 1000 },
                  "height": 100 }
            ] },
            { "items": [] }
        ]
    }"#;

    fn utc_config() -> EngineConfig {
        EngineConfig::default().with_timezone(TimeZoneMode::Utc)
    }

    #[test]
    fn test_replay_emits_expected_history() {
        let trace = Trace::from_json_str(TRACE).unwrap();
        let logger = Arc::new(ExposureLogger::new(&utc_config()));

        let metrics = replay_trace(&trace, &utc_config(), Arc::clone(&logger));

        assert_eq!(
            logger.history_snapshot(),
            vec![
                "[12:34:56.821] pos=-1 type=UNKNOWN title= stage=EXIT".to_string(),
                "[12:34:56.805] pos=0 type=VIDEO title=Hello stage=FULL".to_string(),
                "[12:34:56.789] pos=0 type=VIDEO title=Hello stage=ENTER".to_string(),
            ]
        );
        assert_eq!(metrics.passes, 3);
        assert_eq!(metrics.events_emitted, 3);
        assert_eq!(metrics.disappearance_exits, 1);
    }

    #[test]
    fn test_manual_clock_without_timestamps_starts_at_zero() {
        let trace = Trace::from_json_str(
            r#"{
                "viewport": { "left": 0, "top": 0, "right": 400, "bottom": 1000 },
                "passes": [
                    { "items": [
                        { "id": "a", "position": 3,
                          "bounds": { "left": 0, "top": 0, "right": 400, "bottom": 100 },
                          "height": 100 }
                    ] },
                    { "items": [] }
                ]
            }"#,
        )
        .unwrap();
        let config = utc_config().with_clock(ClockSource::Manual);
        let logger = Arc::new(ExposureLogger::new(&config));

        replay_trace(&trace, &config, Arc::clone(&logger));

        let history = logger.history_snapshot();
        assert!(history[0].starts_with("[00:00:00.016]"));
        assert!(history[1].starts_with("[00:00:00.000]"));
    }

    #[test]
    fn test_empty_trace_is_quiet() {
        let trace = Trace::from_json_str(
            r#"{ "viewport": { "left": 0, "top": 0, "right": 400, "bottom": 800 } }"#,
        )
        .unwrap();
        let logger = Arc::new(ExposureLogger::new(&utc_config()));

        let metrics = replay_trace(&trace, &utc_config(), Arc::clone(&logger));

        assert_eq!(metrics, MetricsSnapshot::default());
        assert_eq!(logger.history_len(), 0);
    }

    #[test]
    fn test_run_rejects_zero_history() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.ini");
        std::fs::write(&config_path, "").unwrap();

        let args = ReplayArgs {
            trace: dir.path().join("trace.json"),
            config: Some(config_path),
            history: Some(0),
            utc: true,
            quiet: true,
        };
        assert!(matches!(run(args), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_run_replays_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.ini");
        std::fs::write(&config_path, "[history]\ncapacity = 2\n").unwrap();
        let trace_path = dir.path().join("trace.json");
        std::fs::write(&trace_path, TRACE).unwrap();

        let args = ReplayArgs {
            trace: trace_path,
            config: Some(config_path),
            history: None,
            utc: true,
            quiet: true,
        };
        assert!(run(args).is_ok());
    }
}
