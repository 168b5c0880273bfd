//! Pairwise strategic conflict detection.
//!
//! Every unordered pair of planned trajectories is sampled at synchronized
//! times across the window in which both missions are airborne, and each
//! sample closer than the safety distance becomes a conflict event.

use crate::fleet::Fleet;
use crate::geometry::distance;
use crate::models::Point;
use crate::report::{ConflictEvent, Report};
use crate::rules::{effective_step, ConfigError, DetectionSettings};
use crate::trajectory::{Trajectory, TrajectoryCursor};
use rayon::prelude::*;

/// Check a fleet with default sampling policy.
///
/// Never fails: degenerate trajectories, pairs that never share airspace
/// time and non-positive effective steps are skipped silently.
pub fn detect<P: Point>(fleet: &Fleet<P>, safety_distance: f64, time_step: f64) -> Report<P> {
    let settings = DetectionSettings {
        safety_distance_m: safety_distance,
        time_step_s: time_step,
        ..DetectionSettings::default()
    };
    ConflictDetector::new(settings).detect(fleet)
}

/// Why a pair produced no samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSkip {
    /// One of the trajectories has fewer than two waypoints
    Degenerate,
    /// The missions are never airborne at the same time
    NoOverlap,
    /// Sampling step collapsed to zero or below
    NonPositiveStep,
}

/// Overlap window of two trajectories and the step used to sample it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingWindow {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SamplingWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Strategic (pre-flight) conflict detection engine.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    settings: DetectionSettings,
}

impl ConflictDetector {
    /// Detector with the given settings, unchecked.
    pub fn new(settings: DetectionSettings) -> Self {
        Self { settings }
    }

    /// Detector with validated settings.
    pub fn try_new(settings: DetectionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    /// Overlap window and effective step for a pair, or the reason to skip it.
    pub fn sampling_window<P: Point>(
        &self,
        path1: &Trajectory<P>,
        path2: &Trajectory<P>,
    ) -> Result<SamplingWindow, PairSkip> {
        if path1.is_degenerate() || path2.is_degenerate() {
            return Err(PairSkip::Degenerate);
        }
        let (Some(start1), Some(end1), Some(start2), Some(end2)) = (
            path1.start_time(),
            path1.end_time(),
            path2.start_time(),
            path2.end_time(),
        ) else {
            return Err(PairSkip::Degenerate);
        };

        let start = start1.max(start2);
        let end = end1.min(end2);
        let duration = end - start;
        if !(duration > 0.0) {
            return Err(PairSkip::NoOverlap);
        }

        let step = effective_step(
            self.settings.time_step_s,
            duration,
            self.settings.adaptive_divisor,
        );
        if !(step > 0.0) {
            return Err(PairSkip::NonPositiveStep);
        }

        Ok(SamplingWindow { start, end, step })
    }

    /// Check all unordered pairs of the fleet, in fleet order.
    pub fn detect<P: Point>(&self, fleet: &Fleet<P>) -> Report<P> {
        let entries = fleet.entries();
        let pairs: Vec<(usize, usize)> = (0..entries.len())
            .flat_map(|i| (i + 1..entries.len()).map(move |j| (i, j)))
            .collect();

        let check = |&(i, j): &(usize, usize)| {
            let (id1, path1) = &entries[i];
            let (id2, path2) = &entries[j];
            self.check_pair(id1, path1, id2, path2)
        };

        // Indexed collection keeps pair order, so both branches agree.
        let per_pair: Vec<Vec<ConflictEvent<P>>> = if self.settings.parallel {
            pairs.par_iter().map(check).collect()
        } else {
            pairs.iter().map(check).collect()
        };

        let conflicts: Vec<ConflictEvent<P>> = per_pair.into_iter().flatten().collect();
        tracing::info!(
            "Checked {} aircraft ({} pairs): {} conflict sample(s)",
            entries.len(),
            pairs.len(),
            conflicts.len()
        );

        Report::new(conflicts)
    }

    /// Sample one pair across its overlap window.
    ///
    /// Samples start one step after the window opens. The window end is only
    /// sampled when the marching lands on it, unless
    /// `sample_end_boundary` is set.
    pub fn check_pair<P: Point>(
        &self,
        drone1_id: &str,
        path1: &Trajectory<P>,
        drone2_id: &str,
        path2: &Trajectory<P>,
    ) -> Vec<ConflictEvent<P>> {
        let window = match self.sampling_window(path1, path2) {
            Ok(window) => window,
            Err(reason) => {
                tracing::debug!("Skipping {} <-> {}: {:?}", drone1_id, drone2_id, reason);
                return Vec::new();
            }
        };

        let mut sampler = PairSampler {
            cursor1: path1.cursor(),
            cursor2: path2.cursor(),
            safety_distance_m: self.settings.safety_distance_m,
            drone1_id,
            drone2_id,
            conflicts: Vec::new(),
        };

        let mut t = window.start + window.step;
        let mut last_sampled = None;
        while t <= window.end {
            sampler.sample(t);
            last_sampled = Some(t);

            let next = t + window.step;
            if next <= t {
                tracing::warn!(
                    "Step {}s vanishes at t={} for {} <-> {}; stopping early",
                    window.step,
                    t,
                    drone1_id,
                    drone2_id
                );
                break;
            }
            t = next;
        }

        if self.settings.sample_end_boundary && last_sampled != Some(window.end) {
            sampler.sample(window.end);
        }

        tracing::debug!(
            "{} <-> {}: window [{}, {}] step {}s, {} conflict sample(s)",
            drone1_id,
            drone2_id,
            window.start,
            window.end,
            window.step,
            sampler.conflicts.len()
        );

        sampler.conflicts
    }
}

struct PairSampler<'a, P> {
    cursor1: TrajectoryCursor<'a, P>,
    cursor2: TrajectoryCursor<'a, P>,
    safety_distance_m: f64,
    drone1_id: &'a str,
    drone2_id: &'a str,
    conflicts: Vec<ConflictEvent<P>>,
}

impl<P: Point> PairSampler<'_, P> {
    fn sample(&mut self, t: f64) {
        let (Some(pos1), Some(pos2)) = (self.cursor1.position_at(t), self.cursor2.position_at(t))
        else {
            return;
        };

        let separation = distance(&pos1, &pos2);
        if separation <= self.safety_distance_m {
            self.conflicts.push(ConflictEvent::new(
                t,
                pos1,
                separation,
                self.drone1_id,
                self.drone2_id,
            ));
        }
    }
}
