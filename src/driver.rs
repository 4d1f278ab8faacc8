//! Frame sequencing: how a time axis turns into composed and written frames.
//!
//! A [`Schedule`] yields [`Tick`]s. Each tick is composed once and written
//! `writes` times, so the replicate strategy amortizes composition over a second.

use crate::encode::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::surface::Surface;

/// Direction of the displayed time value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeAxis {
    /// Counts down from `start_secs`, clamped at zero.
    CountDown { start_secs: f64 },
    CountUp,
}

impl TimeAxis {
    /// Displayed seconds after `elapsed` seconds of output.
    pub fn seconds_at(self, elapsed: f64) -> f64 {
        match self {
            Self::CountDown { start_secs } => (start_secs - elapsed).max(0.0),
            Self::CountUp => elapsed.max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Compose every frame in `0..=end_frame`.
    PerFrame { end_frame: u64 },
    /// Compose once per whole second and write it `fps` times.
    Replicate { seconds: u64 },
    /// Compose every frame in `0..total_frames`.
    Bounded { total_frames: u64 },
}

/// One composition step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// First output frame this step produces.
    pub frame: FrameIndex,
    /// Index of this step within the run.
    pub step: u64,
    /// Displayed time value.
    pub seconds: f64,
    /// How many output frames this composition fills.
    pub writes: u32,
}

/// Bounded, forward-only run of indices. Not `Clone`: a consumed counter stays consumed.
#[derive(Debug)]
pub struct FrameCounter {
    next: u64,
    total: u64,
}

impl FrameCounter {
    pub fn new(total: u64) -> Self {
        Self { next: 0, total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.next
    }
}

impl Iterator for FrameCounter {
    type Item = FrameIndex;

    fn next(&mut self) -> Option<FrameIndex> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(FrameIndex(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// A strategy bound to a frame rate and time axis, consumed by [`run`].
#[derive(Debug)]
pub struct Schedule {
    fps: Fps,
    axis: TimeAxis,
    strategy: Strategy,
    steps: FrameCounter,
}

impl Schedule {
    pub fn new(fps: Fps, axis: TimeAxis, strategy: Strategy) -> Self {
        let steps = match strategy {
            Strategy::PerFrame { end_frame } => end_frame.saturating_add(1),
            Strategy::Replicate { seconds } => seconds,
            Strategy::Bounded { total_frames } => total_frames,
        };
        Self {
            fps,
            axis,
            strategy,
            steps: FrameCounter::new(steps),
        }
    }

    /// Per-frame countdown from `start_secs` that runs one second past zero and
    /// lands on a final settled frame. Saturates at `u64::MAX` frames.
    pub fn countdown_per_frame(fps: Fps, start_secs: u64) -> Self {
        let end_frame = start_secs
            .saturating_add(1)
            .saturating_mul(u64::from(fps.get()));
        Self::new(
            fps,
            TimeAxis::CountDown {
                start_secs: start_secs as f64,
            },
            Strategy::PerFrame { end_frame },
        )
    }

    /// One composition per second from `start_secs` down to zero inclusive.
    pub fn countdown_replicate(fps: Fps, start_secs: u64) -> Self {
        Self::new(
            fps,
            TimeAxis::CountDown {
                start_secs: start_secs as f64,
            },
            Strategy::Replicate {
                seconds: start_secs.saturating_add(1),
            },
        )
    }

    pub fn bounded(fps: Fps, axis: TimeAxis, total_frames: u64) -> Self {
        Self::new(fps, axis, Strategy::Bounded { total_frames })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn axis(&self) -> TimeAxis {
        self.axis
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of output frames the whole schedule writes.
    pub fn total_frames(&self) -> u64 {
        match self.strategy {
            Strategy::Replicate { seconds } => seconds.saturating_mul(u64::from(self.fps.get())),
            _ => self.steps.total(),
        }
    }

    fn tick_at(&self, step: u64) -> Tick {
        match self.strategy {
            Strategy::Replicate { .. } => Tick {
                frame: FrameIndex(step.saturating_mul(u64::from(self.fps.get()))),
                step,
                seconds: self.axis.seconds_at(step as f64),
                writes: self.fps.get(),
            },
            Strategy::PerFrame { .. } | Strategy::Bounded { .. } => Tick {
                frame: FrameIndex(step),
                step,
                seconds: self.axis.seconds_at(self.fps.frames_to_secs(step)),
                writes: 1,
            },
        }
    }

    /// Move to the next step, or `None` once the schedule is exhausted.
    pub fn advance(&mut self) -> Option<Tick> {
        let step = self.steps.next()?;
        Some(self.tick_at(step.0))
    }

    /// The tick whose composition produces output frame `frame`.
    pub fn tick_for_frame(&self, frame: FrameIndex) -> TestCardResult<Tick> {
        if frame.0 >= self.total_frames() {
            return Err(TestCardError::invalid_argument(format!(
                "frame {} is outside a {}-frame run",
                frame.0,
                self.total_frames()
            )));
        }
        let step = match self.strategy {
            Strategy::Replicate { .. } => self.fps.whole_secs(frame.0),
            _ => frame.0,
        };
        Ok(self.tick_at(step))
    }
}

impl Iterator for Schedule {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.advance()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames_composed: u64,
    pub frames_written: u64,
}

/// Begin `sink`, run `body`, then end the sink whether `body` failed or not.
///
/// A failure in `body` wins over a failure to end.
pub fn with_sink<K, R>(
    sink: &mut K,
    config: SinkConfig,
    body: impl FnOnce(&mut K) -> TestCardResult<R>,
) -> TestCardResult<R>
where
    K: FrameSink + ?Sized,
{
    sink.begin(config)?;
    match body(sink) {
        Ok(out) => {
            sink.end()?;
            Ok(out)
        }
        Err(err) => {
            if let Err(end_err) = sink.end() {
                tracing::warn!(error = %end_err, "failed to end sink after error");
            }
            Err(err)
        }
    }
}

fn write_frames<S, K>(surface: &mut S, sink: &mut K, writes: u32) -> TestCardResult<()>
where
    S: Surface + ?Sized,
    K: FrameSink + ?Sized,
{
    let frame = surface.snapshot()?;
    if writes == 1 {
        sink.push_frame(&frame)
    } else {
        sink.push_repeated(&frame, writes)
    }
}

/// Drive a whole schedule: compose each tick, snapshot, write.
#[tracing::instrument(
    skip_all,
    fields(fps = schedule.fps().get(), frames = schedule.total_frames())
)]
pub fn run<S, K, F>(
    mut schedule: Schedule,
    surface: &mut S,
    sink: &mut K,
    mut compose: F,
) -> TestCardResult<RunStats>
where
    S: Surface + ?Sized,
    K: FrameSink + ?Sized,
    F: FnMut(&mut S, &Tick) -> TestCardResult<()>,
{
    let (width, height) = surface.raster_size();
    let config = SinkConfig {
        width,
        height,
        fps: schedule.fps(),
    };

    let stats = with_sink(sink, config, |sink| {
        let mut stats = RunStats::default();
        for tick in schedule.by_ref() {
            compose(surface, &tick)
                .and_then(|()| write_frames(surface, sink, tick.writes))
                .map_err(|e| e.at_frame(tick.frame.0, tick.seconds))?;
            if tick.writes > 1 {
                tracing::debug!(
                    frame = tick.frame.0,
                    seconds = tick.seconds,
                    writes = tick.writes,
                    "replicated frame"
                );
            }
            stats.frames_composed += 1;
            stats.frames_written += u64::from(tick.writes);
        }
        Ok(stats)
    })?;

    tracing::info!(
        composed = stats.frames_composed,
        written = stats.frames_written,
        "run complete"
    );
    Ok(stats)
}

/// Compose each segment once and hold it for `seconds × fps` frames.
#[tracing::instrument(skip_all, fields(fps = fps.get(), segments = segments.len()))]
pub fn write_held<S, K, F>(
    surface: &mut S,
    sink: &mut K,
    fps: Fps,
    segments: &[u64],
    mut compose: F,
) -> TestCardResult<RunStats>
where
    S: Surface + ?Sized,
    K: FrameSink + ?Sized,
    F: FnMut(&mut S, usize) -> TestCardResult<()>,
{
    let (width, height) = surface.raster_size();
    let config = SinkConfig { width, height, fps };

    let stats = with_sink(sink, config, |sink| {
        let mut stats = RunStats::default();
        for (i, &seconds) in segments.iter().enumerate() {
            let first_frame = stats.frames_written;
            let writes = seconds
                .checked_mul(u64::from(fps.get()))
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    TestCardError::invalid_argument(format!("segment {i} is too long"))
                })?;
            compose(surface, i)
                .and_then(|()| write_frames(surface, sink, writes))
                .map_err(|e| e.at_frame(first_frame, fps.frames_to_secs(first_frame)))?;
            tracing::debug!(segment = i, writes, "held segment");
            stats.frames_composed += 1;
            stats.frames_written += u64::from(writes);
        }
        Ok(stats)
    })?;

    tracing::info!(
        composed = stats.frames_composed,
        written = stats.frames_written,
        "run complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use crate::encode::InMemorySink;
    use crate::foundation::core::Size;
    use crate::render::CpuCanvas;

    fn fps30() -> Fps {
        Fps::new(30).unwrap()
    }

    #[test]
    fn counter_is_bounded_and_single_use() {
        let mut c = FrameCounter::new(3);
        assert_eq!(c.size_hint(), (3, Some(3)));
        let seen: Vec<u64> = c.by_ref().map(|f| f.0).collect();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(c.next(), None);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn per_frame_countdown_frame_count_and_clamp() {
        let schedule = Schedule::countdown_per_frame(fps30(), 10);
        assert_eq!(schedule.total_frames(), 331);
        let ticks: Vec<Tick> = schedule.collect();
        assert_eq!(ticks.len(), 331);
        assert_eq!(ticks[0].seconds, 10.0);
        assert!((ticks[15].seconds - 9.5).abs() < 1e-12);
        assert_eq!(ticks[300].seconds, 0.0);
        assert!(ticks[300..].iter().all(|t| t.seconds == 0.0 && t.writes == 1));
    }

    #[test]
    fn replicate_composes_once_per_second() {
        let schedule = Schedule::countdown_replicate(fps30(), 3);
        assert_eq!(schedule.total_frames(), 120);
        let ticks: Vec<Tick> = schedule.collect();
        let secs: Vec<f64> = ticks.iter().map(|t| t.seconds).collect();
        assert_eq!(secs, vec![3.0, 2.0, 1.0, 0.0]);
        assert!(ticks.iter().all(|t| t.writes == 30));
        assert_eq!(ticks[2].frame, FrameIndex(60));
    }

    #[test]
    fn tick_for_frame_maps_back_to_its_second() {
        let schedule = Schedule::countdown_replicate(fps30(), 3);
        let tick = schedule.tick_for_frame(FrameIndex(59)).unwrap();
        assert_eq!(tick.step, 1);
        assert_eq!(tick.seconds, 2.0);
        assert!(schedule.tick_for_frame(FrameIndex(120)).is_err());
    }

    #[test]
    fn oversized_countdowns_saturate() {
        let per_frame = Schedule::countdown_per_frame(fps30(), u64::MAX);
        assert_eq!(per_frame.total_frames(), u64::MAX);
        let mut replicate = Schedule::countdown_replicate(fps30(), u64::MAX);
        assert_eq!(replicate.total_frames(), u64::MAX);
        assert_eq!(replicate.advance().map(|t| t.writes), Some(30));
    }

    #[test]
    fn count_up_runs_forward() {
        let ticks: Vec<Tick> = Schedule::bounded(fps30(), TimeAxis::CountUp, 4).collect();
        assert_eq!(ticks.len(), 4);
        assert!((ticks[3].seconds - 0.1).abs() < 1e-12);
    }

    #[test]
    fn run_writes_every_frame_and_ends_sink() {
        let mut canvas = CpuCanvas::new(Size::new(64.0, 32.0), 0.25).unwrap();
        let mut sink = InMemorySink::new();
        let stats = run(
            Schedule::countdown_replicate(Fps::new(5).unwrap(), 2),
            &mut canvas,
            &mut sink,
            |s, tick| {
                s.clear(Colour::grey((tick.seconds * 100.0) as i32));
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(
            stats,
            RunStats {
                frames_composed: 3,
                frames_written: 15
            }
        );
        assert_eq!(sink.frames_written(), 15);
        assert!(sink.is_ended());
        assert_eq!(sink.config().map(|c| (c.width, c.height)), Some((16, 8)));
    }

    #[test]
    fn failure_is_tagged_with_frame_and_sink_still_ended() {
        let mut canvas = CpuCanvas::new(Size::new(16.0, 16.0), 1.0).unwrap();
        let mut sink = InMemorySink::new();
        let err = run(
            Schedule::countdown_per_frame(Fps::new(2).unwrap(), 1),
            &mut canvas,
            &mut sink,
            |s, tick| {
                if tick.step == 2 {
                    return Err(TestCardError::invalid_argument("boom"));
                }
                s.clear(Colour::BLACK);
                Ok(())
            },
        )
        .unwrap_err();
        assert!(matches!(err, TestCardError::Frame { frame: 2, .. }));
        assert!(matches!(err.innermost(), TestCardError::InvalidArgument(_)));
        assert!(sink.is_ended());
        assert_eq!(sink.frames_written(), 2);
    }

    #[test]
    fn held_segments_replicate_one_composition() {
        let mut canvas = CpuCanvas::new(Size::new(8.0, 8.0), 1.0).unwrap();
        let mut sink = InMemorySink::new();
        let stats = write_held(&mut canvas, &mut sink, Fps::new(4).unwrap(), &[1, 2], |s, i| {
            s.clear(if i == 0 { Colour::RED } else { Colour::BLUE });
            Ok(())
        })
        .unwrap();
        assert_eq!(stats.frames_written, 12);
        assert_eq!(sink.runs().len(), 2);
        assert_eq!(sink.runs()[1].1, 8);
    }
}
