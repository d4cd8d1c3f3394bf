//! Day/night segmentation of the sun's daily trajectory.

use super::direction::{solar_direction, SolarVector};
use crate::core::Location;
use crate::time::{clamp_day_of_year, SimulatedInstantBuilder, MINUTES_PER_DAY};

/// Simulated minutes between path samples.
pub const SAMPLE_INTERVAL_MINUTES: u16 = 15;
/// Samples across the day, both midnights included.
pub const SAMPLE_COUNT: usize = (MINUTES_PER_DAY / SAMPLE_INTERVAL_MINUTES) as usize + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// Altitude >= 0.
    Day,
    /// Altitude < 0.
    Night,
}

impl PathKind {
    /// Classification of a single sample. The horizon itself counts as day.
    #[inline]
    pub fn of(direction: SolarVector) -> Self {
        if direction.y >= 0.0 { PathKind::Day } else { PathKind::Night }
    }
}

/// Contiguous run of samples on one side of the horizon.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    pub kind: PathKind,
    pub points: Vec<SolarVector>,
}

/// The sampled trajectory split into alternating day and night runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SunPath {
    /// All runs in time order.
    pub segments: Vec<PathSegment>,
}

impl SunPath {
    /// Split an ordered trajectory at every change of horizon side.
    pub fn from_samples(samples: impl IntoIterator<Item = SolarVector>) -> Self {
        let mut segments: Vec<PathSegment> = Vec::new();
        let mut current: Option<PathSegment> = None;

        for point in samples {
            let kind = PathKind::of(point);
            match current.as_mut() {
                Some(run) if run.kind == kind => run.points.push(point),
                _ => {
                    if let Some(done) = current.take() {
                        segments.push(done);
                    }
                    current = Some(PathSegment { kind, points: vec![point] });
                }
            }
        }
        segments.extend(current);

        Self { segments }
    }

    pub fn day_segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().filter(|s| s.kind == PathKind::Day)
    }

    pub fn night_segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().filter(|s| s.kind == PathKind::Night)
    }

    /// Total samples across all runs.
    pub fn sample_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }
}

/// Sampled sun path for `day_of_year` at `location`, from target-local
/// midnight through the following midnight.
pub fn sun_path_segments(builder: &SimulatedInstantBuilder, day_of_year: u16, location: &Location) -> SunPath {
    let day = clamp_day_of_year(day_of_year as i64);
    let difference = builder.offset_difference_minutes(day, &location.time_zone);
    sun_path_segments_with_offset(builder, day, difference, location)
}

/// [`sun_path_segments`] with a precomputed offset difference.
pub fn sun_path_segments_with_offset(
    builder: &SimulatedInstantBuilder,
    day_of_year: u16,
    offset_difference: i32,
    location: &Location,
) -> SunPath {
    let samples = (0..SAMPLE_COUNT).map(|i| {
        let minute = i as i64 * SAMPLE_INTERVAL_MINUTES as i64;
        let instant = builder.build_with_offset(day_of_year, minute, offset_difference);
        solar_direction(&instant, location)
    });
    SunPath::from_samples(samples)
}

/// Current-sun marker drawn on the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunMarker {
    pub position: SolarVector,
    pub below_horizon: bool,
}

impl SunMarker {
    pub fn new(direction: SolarVector) -> Self {
        Self {
            position: direction,
            below_horizon: direction.y < 0.0,
        }
    }
}
