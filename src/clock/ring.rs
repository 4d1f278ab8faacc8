//! Ring countdown: a coloured arc that fills and empties around a digital readout.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, Circle, Shape};
use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::surface::{FontSpec, LineCap, Surface, scoped};

const READOUT_FONT: FontSpec = FontSpec::new(120.0);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingStyle {
    /// Arc colours, each shown for two seconds in turn.
    pub colours: Vec<Colour>,
    /// Colour of the ring under the arc.
    pub base: Colour,
    /// Append a frames-remaining field to the readout.
    pub show_frames: bool,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            colours: vec![Colour::YELLOW, Colour::WHITE],
            base: Colour::GREY,
            show_frames: true,
        }
    }
}

impl RingStyle {
    pub fn validate(&self) -> TestCardResult<()> {
        if self.colours.is_empty() {
            return Err(TestCardError::invalid_argument("ring countdown needs at least one colour"));
        }
        Ok(())
    }

    fn colour_for(&self, second: u32) -> Colour {
        self.colours[(second as usize / 2) % self.colours.len()]
    }
}

/// Position within a ring countdown. `frame` counts up within the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingTime {
    pub minutes: u32,
    pub seconds: u32,
    pub frame: u32,
}

/// `MM:SS`, or `MM:SS:FF` when a frame field is given.
pub fn format_clock(minutes: u32, seconds: u32, frames: Option<u32>) -> String {
    match frames {
        Some(ff) => format!("{minutes:02}:{seconds:02}:{ff:02}"),
        None => format!("{minutes:02}:{seconds:02}"),
    }
}

/// Sweep of the arc in radians, clockwise from 12 o'clock when positive.
///
/// Odd seconds grow the arc from nothing; even seconds draw the complement so the
/// arc is wiped away over the second.
fn arc_sweep(time: RingTime, frame_rate: u32) -> f64 {
    let mut sweep = f64::from(time.frame) * TAU / f64::from(frame_rate);
    if time.seconds % 2 == 0 {
        sweep -= TAU;
    }
    sweep
}

pub fn ring_countdown<S: Surface + ?Sized>(
    surface: &mut S,
    style: &RingStyle,
    time: RingTime,
    frame_rate: u32,
) -> TestCardResult<()> {
    style.validate()?;
    if frame_rate == 0 || time.frame >= frame_rate {
        return Err(TestCardError::invalid_argument(format!(
            "frame {} is outside a {frame_rate} fps second",
            time.frame
        )));
    }

    let c = surface.centre();
    let radius = c.x.min(c.y) * 0.6;
    let line_width = c.x.min(c.y) * 0.05;

    surface.clear(Colour::BLACK);

    scoped(surface, |s| {
        s.set_stroke_colour(style.base);
        s.set_line_width(line_width);
        s.stroke(&Circle::new(c, radius).to_path(0.1));
        Ok(())
    })?;

    let sweep = arc_sweep(time, frame_rate);
    if sweep != 0.0 {
        scoped(surface, |s| {
            s.translate(c.to_vec2());
            s.rotate(-FRAC_PI_2);
            s.set_stroke_colour(style.colour_for(time.seconds));
            s.set_line_width(line_width);
            s.set_line_cap(LineCap::Butt);
            let arc = Arc {
                center: Point::ORIGIN,
                radii: Vec2::new(radius, radius),
                start_angle: 0.0,
                sweep_angle: sweep,
                x_rotation: 0.0,
            };
            s.stroke(&arc.to_path(0.1));
            Ok(())
        })?;
    }

    let frames = style
        .show_frames
        .then(|| frame_rate - time.frame - 1);
    let text = format_clock(time.minutes, time.seconds, frames);
    scoped(surface, |s| {
        s.set_stroke_colour(Colour::BLUE);
        s.set_fill_colour(Colour::WHITE);
        s.fill_text(c, &READOUT_FONT, &text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::{DrawCommand, RecordingSurface};

    fn time(seconds: u32, frame: u32) -> RingTime {
        RingTime {
            minutes: 4,
            seconds,
            frame,
        }
    }

    fn draw(style: &RingStyle, t: RingTime) -> RecordingSurface {
        let mut s = RecordingSurface::new(Size::new(3840.0, 2160.0));
        ring_countdown(&mut s, style, t, 30).unwrap();
        s
    }

    #[test]
    fn clock_formats() {
        assert_eq!(format_clock(4, 9, None), "04:09");
        assert_eq!(format_clock(0, 59, Some(29)), "00:59:29");
    }

    #[test]
    fn odd_second_starts_empty_and_even_starts_full() {
        assert_eq!(arc_sweep(time(59, 0), 30), 0.0);
        assert_eq!(arc_sweep(time(58, 0), 30), -TAU);
        assert!((arc_sweep(time(59, 15), 30) - std::f64::consts::PI).abs() < 1e-12);
        assert!((arc_sweep(time(58, 15), 30) + std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn empty_arc_is_not_stroked() {
        let s = draw(&RingStyle::default(), time(59, 0));
        assert_eq!(s.strokes().count(), 1);
        let s = draw(&RingStyle::default(), time(59, 1));
        assert_eq!(s.strokes().count(), 2);
    }

    #[test]
    fn arc_uses_butt_cap_and_cycled_colour() {
        let style = RingStyle::default();
        let s = draw(&style, time(57, 3));
        let DrawCommand::Stroke { colour, cap, .. } = s.strokes().nth(1).unwrap() else {
            unreachable!()
        };
        assert_eq!(*cap, LineCap::Butt);
        // 57 / 2 = 28, even, so the first colour.
        assert_eq!(*colour, Colour::YELLOW);
        let s = draw(&style, time(55, 3));
        let DrawCommand::Stroke { colour, .. } = s.strokes().nth(1).unwrap() else {
            unreachable!()
        };
        assert_eq!(*colour, Colour::WHITE);
    }

    #[test]
    fn readout_counts_frames_down() {
        let s = draw(&RingStyle::default(), time(7, 0));
        assert_eq!(s.texts().collect::<Vec<_>>(), vec!["04:07:29"]);
        let style = RingStyle {
            show_frames: false,
            ..RingStyle::default()
        };
        let s = draw(&style, time(7, 29));
        assert_eq!(s.texts().collect::<Vec<_>>(), vec!["04:07"]);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let style = RingStyle {
            colours: Vec::new(),
            ..RingStyle::default()
        };
        let mut s = RecordingSurface::new(Size::new(100.0, 100.0));
        assert!(ring_countdown(&mut s, &style, time(1, 0), 30).is_err());
    }
}
