//! Serializable run descriptions and the code that renders them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cards::{SlicerTiming, TestCard, uhd_with_slicer};
use crate::clock::{
    RingStyle, RingTime, countdown_clock_face, dial_background, dial_foreground, old_film_frame,
    ring_countdown, second_hand,
};
use crate::colour::Colour;
use crate::driver::{RunStats, Schedule, Tick, TimeAxis, run, write_held};
use crate::encode::FrameSink;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::layout::{Resolution, raster_size};
use crate::render::CpuCanvas;
use crate::surface::Surface;

/// A complete render run: canvas, rate, optional font and what to draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneSpec {
    #[serde(default)]
    pub resolution: Resolution,
    /// Raster pixels per reference unit. Layout stays at the reference size.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub fps: Fps,
    /// TTF/OTF face for numerals and counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    pub scene: Scene,
}

fn default_scale() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_ring_colours() -> Vec<Colour> {
    RingStyle::default().colours
}

fn default_ring_base() -> Colour {
    RingStyle::default().base
}

fn default_film_colour() -> Colour {
    Colour::BLACK
}

fn default_seconds() -> u64 {
    5
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownStrategy {
    /// Recompose every frame.
    #[default]
    PerFrame,
    /// Compose once per second and repeat it. Stepped hands only.
    Replicate,
    /// Recompose every frame, driven by a bounded frame counter.
    Bounded,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Scene {
    Card {
        card: TestCard,
        #[serde(default = "default_seconds")]
        seconds: u64,
    },
    CardSequence {
        cards: Vec<TestCard>,
        #[serde(default = "default_seconds")]
        seconds_per_card: u64,
    },
    UhdSlicer {
        #[serde(default = "default_seconds")]
        seconds: u64,
    },
    Countdown {
        start_secs: u64,
        #[serde(default)]
        smooth: bool,
        #[serde(default)]
        strategy: CountdownStrategy,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        backdrop: Option<TestCard>,
    },
    OldFilm {
        seconds: u64,
        #[serde(default = "default_film_colour")]
        colour: Colour,
    },
    RingCountdown {
        minutes: u32,
        #[serde(default = "default_true")]
        show_frames: bool,
        #[serde(default = "default_ring_colours")]
        colours: Vec<Colour>,
        #[serde(default = "default_ring_base")]
        base_colour: Colour,
    },
}

/// How a scene turns into frames.
enum Plan {
    /// Each card composed once and held for its duration in seconds.
    Held(Vec<(TestCard, u64)>),
    Scheduled(Schedule),
}

impl Scene {
    pub fn validate(&self) -> TestCardResult<()> {
        let bad = |msg: &str| -> TestCardResult<()> { Err(TestCardError::invalid_argument(msg)) };
        match self {
            Self::Card { seconds: 0, .. } => bad("card scene needs seconds > 0"),
            Self::CardSequence { cards, .. } if cards.is_empty() => {
                bad("card sequence needs at least one card")
            }
            Self::CardSequence {
                seconds_per_card: 0,
                ..
            } => bad("card sequence needs seconds_per_card > 0"),
            Self::UhdSlicer { seconds: 0 } => bad("uhd slicer scene needs seconds > 0"),
            Self::Countdown {
                smooth: true,
                strategy: CountdownStrategy::Replicate,
                ..
            } => bad("a smooth hand changes within a second and cannot use the replicate strategy"),
            Self::RingCountdown { minutes: 0, .. } => bad("ring countdown needs minutes > 0"),
            Self::RingCountdown { .. } => self.ring_style().map_or(Ok(()), |s| s.validate()),
            _ => Ok(()),
        }
    }

    fn ring_style(&self) -> Option<RingStyle> {
        match self {
            Self::RingCountdown {
                show_frames,
                colours,
                base_colour,
                ..
            } => Some(RingStyle {
                colours: colours.clone(),
                base: *base_colour,
                show_frames: *show_frames,
            }),
            _ => None,
        }
    }

    fn plan(&self, fps: Fps) -> TestCardResult<Plan> {
        let per_second = u64::from(fps.get());
        let frames = |seconds: Option<u64>| {
            seconds.and_then(|s| s.checked_mul(per_second)).ok_or_else(|| {
                TestCardError::invalid_argument("duration overflows the frame count")
            })
        };
        Ok(match self {
            Self::Card { card, seconds } => Plan::Held(vec![(*card, *seconds)]),
            Self::CardSequence {
                cards,
                seconds_per_card,
            } => Plan::Held(cards.iter().map(|&c| (c, *seconds_per_card)).collect()),
            Self::UhdSlicer { seconds } => Plan::Scheduled(Schedule::bounded(
                fps,
                TimeAxis::CountUp,
                frames(Some(*seconds))?,
            )),
            Self::Countdown {
                start_secs,
                strategy,
                ..
            } => {
                let total = frames(start_secs.checked_add(1))?;
                Plan::Scheduled(match strategy {
                    CountdownStrategy::PerFrame => Schedule::countdown_per_frame(fps, *start_secs),
                    CountdownStrategy::Replicate => Schedule::countdown_replicate(fps, *start_secs),
                    CountdownStrategy::Bounded => Schedule::bounded(
                        fps,
                        TimeAxis::CountDown {
                            start_secs: *start_secs as f64,
                        },
                        total,
                    ),
                })
            }
            Self::OldFilm { seconds, .. } => Plan::Scheduled(Schedule::bounded(
                fps,
                TimeAxis::CountUp,
                frames(seconds.checked_add(1))?,
            )),
            Self::RingCountdown { minutes, .. } => Plan::Scheduled(Schedule::bounded(
                fps,
                TimeAxis::CountUp,
                frames(Some(u64::from(*minutes) * 60))?,
            )),
        })
    }

    /// Number of frames a full run writes.
    pub fn frame_count(&self, fps: Fps) -> TestCardResult<u64> {
        match self.plan(fps)? {
            Plan::Held(segments) => segments.iter().try_fold(0u64, |total, (_, seconds)| {
                seconds
                    .checked_mul(u64::from(fps.get()))
                    .and_then(|n| total.checked_add(n))
                    .ok_or_else(|| TestCardError::invalid_argument("card sequence is too long"))
            }),
            Plan::Scheduled(schedule) => Ok(schedule.total_frames()),
        }
    }

    fn compose_tick<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        fps: Fps,
        tick: &Tick,
    ) -> TestCardResult<()> {
        let frame = tick.frame.0;
        match self {
            Self::Card { .. } | Self::CardSequence { .. } => Err(
                TestCardError::invalid_argument("static cards are held, not scheduled"),
            ),
            Self::UhdSlicer { .. } => uhd_with_slicer(
                surface,
                SlicerTiming {
                    frame_rate: fps.get(),
                    frame_number: frame,
                },
            ),
            Self::Countdown {
                smooth, backdrop, ..
            } => {
                match backdrop {
                    Some(card) => card.draw(surface)?,
                    None => surface.clear(Colour::BLACK),
                }
                let centre = surface.centre();
                let radius = centre.x.min(centre.y) / 2.0;
                dial_background(surface, centre, radius, Colour::BLACK)?;
                dial_foreground(surface, centre, radius, Colour::WHITE)?;
                countdown_clock_face(surface, centre, radius)?;
                second_hand(surface, centre, radius, *smooth, tick.seconds)
            }
            Self::OldFilm { seconds, colour } => {
                let second = seconds.saturating_sub(fps.whole_secs(frame));
                old_film_frame(surface, second, fps.frame_in_second(frame), fps.get(), *colour)
            }
            Self::RingCountdown { minutes, .. } => {
                let style = self
                    .ring_style()
                    .ok_or_else(|| TestCardError::invalid_argument("not a ring scene"))?;
                let elapsed = fps.whole_secs(frame);
                let minute_index = u32::try_from(elapsed / 60)
                    .map_err(|_| TestCardError::invalid_argument("ring countdown too long"))?;
                let time = RingTime {
                    minutes: minutes.saturating_sub(minute_index + 1),
                    seconds: 59 - (elapsed % 60) as u32,
                    frame: fps.frame_in_second(frame),
                };
                ring_countdown(surface, &style, time, fps.get())
            }
        }
    }
}

impl SceneSpec {
    /// Checks the canvas, the scene parameters and that the frame count fits in a `u64`.
    pub fn validate(&self) -> TestCardResult<()> {
        raster_size(self.resolution.size(), self.scale)?;
        self.scene.validate()?;
        self.frame_count().map(drop)
    }

    pub fn frame_count(&self) -> TestCardResult<u64> {
        self.scene.frame_count(self.fps)
    }

    /// A fresh CPU canvas at the configured size, with the font loaded when set.
    pub fn canvas(&self) -> TestCardResult<CpuCanvas> {
        let canvas = CpuCanvas::new(self.resolution.size(), self.scale)?;
        match &self.font {
            Some(path) => canvas.with_font_file(path),
            None => Ok(canvas),
        }
    }

    /// Built-in scenes, by name.
    pub fn preset(name: &str) -> Option<Self> {
        let scene = match name {
            "smpte" | "ebu" | "ebu_with_black" | "bbc_unknown" | "uhd" => Scene::Card {
                card: TestCard::ALL.into_iter().find(|c| c.name() == name)?,
                seconds: default_seconds(),
            },
            "test_cards" => Scene::CardSequence {
                cards: vec![
                    TestCard::Smpte,
                    TestCard::Ebu,
                    TestCard::BbcUnknown,
                    TestCard::Uhd,
                ],
                seconds_per_card: default_seconds(),
            },
            "uhd_slicer" => Scene::UhdSlicer { seconds: 10 },
            "countdown" => Scene::Countdown {
                start_secs: 10,
                smooth: false,
                strategy: CountdownStrategy::PerFrame,
                backdrop: None,
            },
            "countdown_smooth" => Scene::Countdown {
                start_secs: 10,
                smooth: true,
                strategy: CountdownStrategy::Bounded,
                backdrop: None,
            },
            "countdown_fast" => Scene::Countdown {
                start_secs: 10,
                smooth: false,
                strategy: CountdownStrategy::Replicate,
                backdrop: None,
            },
            "old_film" => Scene::OldFilm {
                seconds: 3,
                colour: Colour::BLACK,
            },
            "ring_countdown" => Scene::RingCountdown {
                minutes: 5,
                show_frames: true,
                colours: default_ring_colours(),
                base_colour: default_ring_base(),
            },
            _ => return None,
        };
        Some(Self {
            resolution: Resolution::default(),
            scale: default_scale(),
            fps: Fps::DEFAULT,
            font: None,
            scene,
        })
    }

    pub const PRESETS: [&'static str; 12] = [
        "smpte",
        "ebu",
        "ebu_with_black",
        "bbc_unknown",
        "uhd",
        "test_cards",
        "uhd_slicer",
        "countdown",
        "countdown_smooth",
        "countdown_fast",
        "old_film",
        "ring_countdown",
    ];
}

/// Render the whole scene into `sink`.
#[tracing::instrument(skip_all, fields(fps = spec.fps.get()))]
pub fn render_scene<S, K>(
    spec: &SceneSpec,
    surface: &mut S,
    sink: &mut K,
) -> TestCardResult<RunStats>
where
    S: Surface + ?Sized,
    K: FrameSink + ?Sized,
{
    spec.validate()?;
    let fps = spec.fps;
    match spec.scene.plan(fps)? {
        Plan::Held(segments) => {
            let seconds: Vec<u64> = segments.iter().map(|(_, s)| *s).collect();
            write_held(surface, sink, fps, &seconds, |s, i| match segments.get(i) {
                Some((card, _)) => card.draw(s),
                None => Err(TestCardError::invalid_argument(format!("no segment {i}"))),
            })
        }
        Plan::Scheduled(schedule) => run(schedule, surface, sink, |s, tick| {
            spec.scene.compose_tick(s, fps, tick)
        }),
    }
}

/// Compose output frame `index` of the scene onto `surface` without writing it.
pub fn compose_frame<S: Surface + ?Sized>(
    spec: &SceneSpec,
    surface: &mut S,
    index: FrameIndex,
) -> TestCardResult<()> {
    spec.validate()?;
    let fps = spec.fps;
    let total = spec.frame_count()?;
    if index.0 >= total {
        return Err(TestCardError::invalid_argument(format!(
            "frame {} is outside a {total}-frame scene",
            index.0
        )));
    }
    match spec.scene.plan(fps)? {
        Plan::Held(segments) => {
            let mut start = 0u64;
            for (card, seconds) in segments {
                start = start.saturating_add(seconds.saturating_mul(u64::from(fps.get())));
                if index.0 < start {
                    return card.draw(surface);
                }
            }
            Err(TestCardError::invalid_argument(format!(
                "frame {} is past the last card",
                index.0
            )))
        }
        Plan::Scheduled(schedule) => {
            let tick = schedule.tick_for_frame(index)?;
            spec.scene
                .compose_tick(surface, fps, &tick)
                .map_err(|e| e.at_frame(index.0, tick.seconds))
        }
    }
}
