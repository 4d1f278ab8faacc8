//! Old-film leader: a dimming radial wipe with rings and a large seconds numeral.

use kurbo::{Circle, Shape};

use crate::colour::Colour;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::surface::{FontSpec, Surface, scoped};

pub const SWIPE_COLOUR: Colour = Colour::rgb(0x40, 0x40, 0x40).with_alpha(0x40);
const COUNTER_FONT: FontSpec = FontSpec::new(560.0);

/// Outline of the wipe at `frame` within a second, or `None` on the first frame.
///
/// The slice starts at 12 o'clock and sweeps clockwise, passing through each canvas
/// corner once the angle reaches 45, 135, 225 and 315 degrees (inclusive), and ends on
/// the circle through the corners.
pub fn swipe_path(bounds: Rect, frame: u32, frame_rate: u32) -> TestCardResult<Option<BezPath>> {
    if frame_rate == 0 {
        return Err(TestCardError::invalid_argument("swipe frame rate must be > 0"));
    }
    let deg = 360.0 * f64::from(frame) / f64::from(frame_rate);
    let theta = deg.to_radians();
    if theta <= 0.00001 {
        return Ok(None);
    }

    let c = bounds.center();
    let radius = (bounds.width() / 2.0).hypot(bounds.height() / 2.0);

    let mut path = BezPath::new();
    path.move_to(c);
    path.line_to((c.x, bounds.y0));
    let corners = [
        (45.0, Point::new(bounds.x1, bounds.y0)),
        (135.0, Point::new(bounds.x1, bounds.y1)),
        (225.0, Point::new(bounds.x0, bounds.y1)),
        (315.0, Point::new(bounds.x0, bounds.y0)),
    ];
    for (threshold, corner) in corners {
        if deg >= threshold {
            path.line_to(corner);
        }
    }
    let (sin, cos) = theta.sin_cos();
    path.line_to((c.x + radius * sin, c.y - radius * cos));
    path.close_path();
    Ok(Some(path))
}

/// Dim the part of the frame swept so far this second.
pub fn old_film_swipe<S: Surface + ?Sized>(
    surface: &mut S,
    frame: u32,
    frame_rate: u32,
) -> TestCardResult<()> {
    let Some(path) = swipe_path(surface.bounds(), frame, frame_rate)? else {
        return Ok(());
    };
    scoped(surface, |s| {
        s.set_fill_colour(SWIPE_COLOUR);
        s.fill(&path);
        Ok(())
    })
}

pub fn film_background<S: Surface + ?Sized>(surface: &mut S) {
    surface.clear(Colour::GREY);
}

/// Two 20-unit rings about the centre.
pub fn film_circles<S: Surface + ?Sized>(surface: &mut S, colour: Colour) -> TestCardResult<()> {
    let c = surface.centre();
    let outer = c.x.min(c.y) * 0.9;
    scoped(surface, |s| {
        s.set_line_width(20.0);
        s.set_stroke_colour(colour);
        s.set_fill_colour(colour);
        s.stroke(&Circle::new(c, outer).to_path(0.1));
        s.stroke(&Circle::new(c, outer - 60.0).to_path(0.1));
        Ok(())
    })
}

/// The remaining seconds, large and centred.
pub fn film_counter<S: Surface + ?Sized>(
    surface: &mut S,
    second: u64,
    colour: Colour,
) -> TestCardResult<()> {
    let c = surface.centre();
    scoped(surface, |s| {
        s.set_stroke_colour(colour);
        s.set_fill_colour(colour);
        s.fill_text(c, &COUNTER_FONT, &second.to_string())
    })
}

/// One leader frame: the background, every wipe step up to `frame` layered on top
/// so the sweep darkens as it goes, then rings and counter.
pub fn old_film_frame<S: Surface + ?Sized>(
    surface: &mut S,
    second: u64,
    frame: u32,
    frame_rate: u32,
    colour: Colour,
) -> TestCardResult<()> {
    if frame >= frame_rate {
        return Err(TestCardError::invalid_argument(format!(
            "frame {frame} is outside a {frame_rate} fps second"
        )));
    }
    film_background(surface);
    for f in 1..=frame {
        old_film_swipe(surface, f, frame_rate)?;
    }
    film_circles(surface, colour)?;
    film_counter(surface, second, colour)
}
