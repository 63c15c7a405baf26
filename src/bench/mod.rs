//! Automated culling benchmark harness
//!
//! A small state machine layered over the scene's culling mutators. Started
//! from the frame loop, it walks the five culling modes in fixed order,
//! collects a fixed-size frame-time sample set per mode, aggregates the
//! statistics, and persists a comparative report.

pub mod report;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scene::{CullingMode, Scene, UniformSink};

/// Frame-time samples collected per mode. A measurement-design constant:
/// runs are only comparable when every report row aggregates the same count.
pub const SAMPLES_PER_MODE: usize = 300;

/// Aggregated measurement for one completed culling mode
#[derive(Clone, Debug, Serialize)]
pub struct PerformanceResult {
    pub mode: CullingMode,
    pub sample_count: usize,
    pub average_frame_time_ms: f64,
    pub fps: f64,
}

enum SessionState {
    Idle,
    Recording {
        mode_index: usize,
        samples: Vec<f64>,
    },
}

/// Benchmark session state machine.
///
/// Drives device state only through the scene's culling mutators; the
/// write-through guarantee of those mutators is what makes each mode's
/// samples measure the configuration they claim to.
pub struct BenchmarkSession {
    state: SessionState,
    results: Vec<PerformanceResult>,
    report_path: PathBuf,
}

impl BenchmarkSession {
    /// Create an idle session that will persist its report to `report_path`
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            state: SessionState::Idle,
            results: Vec::new(),
            report_path: report_path.into(),
        }
    }

    /// Start a benchmark run. A no-op while a run is already recording:
    /// re-triggering neither queues nor resets the run in progress.
    pub fn start<S: UniformSink>(&mut self, scene: &mut Scene<S>) {
        if !matches!(self.state, SessionState::Idle) {
            return;
        }

        log::info!("=== STARTING PERFORMANCE TEST ===");
        log::info!(
            "Testing {} culling modes with {} frames each...",
            CullingMode::ORDER.len(),
            SAMPLES_PER_MODE
        );
        log::info!("Please don't move the camera during testing!");

        self.results.clear();
        self.state = SessionState::Recording {
            mode_index: 0,
            samples: Vec::with_capacity(SAMPLES_PER_MODE),
        };

        let first = CullingMode::ORDER[0];
        scene.set_culling_mode(first);
        log::info!("Testing: {}", first.name());
    }

    /// Feed one frame's elapsed time into the session. A no-op while idle.
    ///
    /// The 300th sample of a mode finalizes it: the aggregate is appended to
    /// the results and either the next mode's culling configuration is
    /// applied or, after the last mode, the report is persisted, culling is
    /// forced back to all-enabled, and the session returns to idle.
    pub fn record_frame<S: UniformSink>(&mut self, frame_time_ms: f64, scene: &mut Scene<S>) {
        let SessionState::Recording { mode_index, samples } = &mut self.state else {
            return;
        };

        samples.push(frame_time_ms);
        if samples.len() < SAMPLES_PER_MODE {
            return;
        }

        let mode_index = *mode_index;
        let samples = std::mem::take(samples);

        let mode = CullingMode::ORDER[mode_index];
        let average = samples.iter().sum::<f64>() / samples.len() as f64;
        let fps = 1000.0 / average;
        log::info!("{} - Avg: {:.4} ms ({:.1} FPS)", mode.name(), average, fps);

        self.results.push(PerformanceResult {
            mode,
            sample_count: samples.len(),
            average_frame_time_ms: average,
            fps,
        });

        if mode_index + 1 < CullingMode::ORDER.len() {
            let next = CullingMode::ORDER[mode_index + 1];
            self.state = SessionState::Recording {
                mode_index: mode_index + 1,
                samples: Vec::with_capacity(SAMPLES_PER_MODE),
            };
            scene.set_culling_mode(next);
            log::info!("Testing: {}", next.name());
        } else {
            self.finalize(scene);
        }
    }

    /// Persist results, restore all culling, return to idle. A report write
    /// failure is logged and otherwise ignored: results stay in memory and
    /// the render loop keeps running.
    fn finalize<S: UniformSink>(&mut self, scene: &mut Scene<S>) {
        match report::save(&self.report_path, &self.results) {
            Ok(()) => {
                log::info!("Performance results saved to {}", self.report_path.display())
            }
            Err(e) => log::error!(
                "Failed to write {}: {} (results retained in memory)",
                self.report_path.display(),
                e
            ),
        }
        report::print(&self.results);

        scene.set_all_culling(true);
        self.state = SessionState::Idle;
    }

    /// Whether a run is in progress
    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Recording { .. })
    }

    /// Active mode and samples collected so far, for the liveness display
    pub fn progress(&self) -> Option<(CullingMode, usize)> {
        match &self.state {
            SessionState::Recording { mode_index, samples } => {
                Some((CullingMode::ORDER[*mode_index], samples.len()))
            }
            SessionState::Idle => None,
        }
    }

    /// Results of the most recent completed (or in-progress) run
    pub fn results(&self) -> &[PerformanceResult] {
        &self.results
    }

    /// Report destination
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneUniform;
    use std::cell::RefCell;

    struct SpySink {
        writes: RefCell<Vec<SceneUniform>>,
    }

    impl SpySink {
        fn new() -> Self {
            Self {
                writes: RefCell::new(Vec::new()),
            }
        }
    }

    impl UniformSink for SpySink {
        fn write(&self, record: &SceneUniform) {
            self.writes.borrow_mut().push(*record);
        }
    }

    fn scene() -> Scene<SpySink> {
        Scene::new(SpySink::new())
    }

    fn session(dir: &tempfile::TempDir) -> BenchmarkSession {
        BenchmarkSession::new(dir.path().join("results.csv"))
    }

    /// Drive one full mode with a constant frame time
    fn drive_mode(session: &mut BenchmarkSession, scene: &mut Scene<SpySink>, ms: f64) {
        for _ in 0..SAMPLES_PER_MODE {
            session.record_frame(ms, scene);
        }
    }

    #[test]
    fn test_start_enters_mode_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);

        assert!(session.is_recording());
        assert_eq!(session.progress(), Some((CullingMode::None, 0)));
        assert_eq!(&scene.uniform().culling_flags[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_start_while_recording_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        for _ in 0..10 {
            session.record_frame(8.0, &mut scene);
        }
        // Partial culling change so a reset would be observable
        scene.set_frustum_culling(true);

        session.start(&mut scene);

        assert_eq!(session.progress(), Some((CullingMode::None, 10)));
        assert_eq!(scene.uniform().culling_flags[1], 1.0);
    }

    #[test]
    fn test_record_frame_while_idle_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.record_frame(8.0, &mut scene);

        assert!(!session.is_recording());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_full_run_produces_five_results_in_mode_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        for ms in [12.0, 9.0, 7.0, 8.0, 5.0] {
            drive_mode(&mut session, &mut scene, ms);
        }

        assert!(!session.is_recording());
        let results = session.results();
        assert_eq!(results.len(), 5);
        for (result, expected_mode) in results.iter().zip(CullingMode::ORDER) {
            assert_eq!(result.mode, expected_mode);
            assert_eq!(result.sample_count, SAMPLES_PER_MODE);
        }
        // Session ends with all culling restored
        assert_eq!(&scene.uniform().culling_flags[..3], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mode_transitions_apply_culling_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        drive_mode(&mut session, &mut scene, 10.0);
        // Mode 1 (Orientation) is now active
        assert_eq!(session.progress(), Some((CullingMode::Orientation, 0)));
        assert_eq!(&scene.uniform().culling_flags[..3], &[1.0, 0.0, 0.0]);

        drive_mode(&mut session, &mut scene, 10.0);
        assert_eq!(&scene.uniform().culling_flags[..3], &[0.0, 1.0, 0.0]);

        drive_mode(&mut session, &mut scene, 10.0);
        assert_eq!(&scene.uniform().culling_flags[..3], &[0.0, 0.0, 1.0]);

        drive_mode(&mut session, &mut scene, 10.0);
        assert_eq!(&scene.uniform().culling_flags[..3], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_constant_frame_times_aggregate_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        for _ in 0..5 {
            drive_mode(&mut session, &mut scene, 10.0);
        }

        let first = &session.results()[0];
        assert_eq!(first.average_frame_time_ms, 10.0);
        assert_eq!(first.fps, 100.0);
    }

    #[test]
    fn test_outlier_frame_shifts_average() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        // Mode None: 299 fast frames plus one stall
        for _ in 0..SAMPLES_PER_MODE - 1 {
            session.record_frame(5.0, &mut scene);
        }
        session.record_frame(15.0, &mut scene);
        for _ in 0..4 {
            drive_mode(&mut session, &mut scene, 10.0);
        }

        let first = &session.results()[0];
        let expected_avg = (5.0 * 299.0 + 15.0) / 300.0;
        assert!((first.average_frame_time_ms - expected_avg).abs() < 1e-9);
        assert!((first.fps - 1000.0 / expected_avg).abs() < 1e-6);
        assert!((first.fps - 198.68).abs() < 0.01);
    }

    #[test]
    fn test_report_written_on_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        for _ in 0..5 {
            drive_mode(&mut session, &mut scene, 4.0);
        }

        let contents = std::fs::read_to_string(session.report_path()).unwrap();
        assert_eq!(contents.lines().count(), 6);
    }

    #[test]
    fn test_report_failure_still_returns_to_idle() {
        // Point the report at a directory that does not exist
        let mut session = BenchmarkSession::new("/nonexistent/dir/results.csv");
        let mut scene = scene();

        session.start(&mut scene);
        for _ in 0..5 {
            drive_mode(&mut session, &mut scene, 4.0);
        }

        assert!(!session.is_recording());
        assert_eq!(session.results().len(), 5);
        assert_eq!(&scene.uniform().culling_flags[..3], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_restart_after_completion_clears_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut scene = scene();

        session.start(&mut scene);
        for _ in 0..5 {
            drive_mode(&mut session, &mut scene, 4.0);
        }
        assert_eq!(session.results().len(), 5);

        session.start(&mut scene);
        assert!(session.results().is_empty());
        assert_eq!(session.progress(), Some((CullingMode::None, 0)));
    }
}
