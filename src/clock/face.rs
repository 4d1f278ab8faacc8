use kurbo::{Circle, Shape};

use crate::colour::Colour;
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::layout::{ClockGeometry, tick_angle_deg};
use crate::surface::{FontSpec, Surface, scoped};

const LEGEND_FONT: FontSpec = FontSpec::new(30.0);
/// Half the angular width of a tick, in degrees.
const TICK_HALF_WIDTH_DEG: f64 = 0.25;

/// Which seconds get ticks, and which of those are long and numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockFace {
    pub major_step: u32,
    pub minor_max: u32,
}

impl ClockFace {
    /// A tick every second, long ones every five.
    pub const CLOCK: Self = Self {
        major_step: 5,
        minor_max: 60,
    };
    /// Long ticks every ten seconds plus every second up to ten.
    pub const COUNTDOWN: Self = Self {
        major_step: 10,
        minor_max: 10,
    };

    pub fn new(major_step: u32, minor_max: u32) -> TestCardResult<Self> {
        if major_step == 0 {
            return Err(TestCardError::invalid_argument("clock face major step must be > 0"));
        }
        Ok(Self {
            major_step,
            minor_max,
        })
    }

    pub fn has_tick(self, second: u32) -> bool {
        second % self.major_step == 0 || second <= self.minor_max
    }

    /// Long ticks, which also carry a numeral.
    pub fn is_major(self, second: u32) -> bool {
        second == 5 || second % self.major_step == 0
    }

    pub fn ticks(self) -> impl Iterator<Item = u32> {
        (0..ClockGeometry::TICKS).filter(move |&s| self.has_tick(s))
    }
}

/// Outer and inner dial rings, tick marks and numerals.
///
/// `radius` is the dial's outer bound; rings sit [`ClockGeometry::INSET`] inside it.
pub fn clock_face<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: f64,
    face: ClockFace,
) -> TestCardResult<()> {
    let face = ClockFace::new(face.major_step, face.minor_max)?;
    let g = ClockGeometry::new(centre, radius);

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::WHITE);
        s.set_fill_colour(Colour::WHITE);
        s.set_line_width(5.0);
        s.stroke(&Circle::new(centre, g.radius).to_path(0.1));
        s.stroke(&Circle::new(centre, g.radius_inner).to_path(0.1));

        let mut ticks = BezPath::new();
        for sec in face.ticks() {
            let deg = tick_angle_deg(f64::from(sec));
            let (r1, r2) = if face.is_major(sec) {
                (g.radius + 15.0, g.radius - 15.0)
            } else {
                (g.radius, g.radius - 10.0)
            };
            let a1 = deg - TICK_HALF_WIDTH_DEG;
            let a2 = deg + TICK_HALF_WIDTH_DEG;
            ticks.move_to(g.point_at(r1, a1));
            ticks.line_to(g.point_at(r2, a1));
            ticks.line_to(g.point_at(r2, a2));
            ticks.line_to(g.point_at(r1, a2));
            ticks.close_path();
        }
        s.fill(&ticks);
        s.stroke(&ticks);
        Ok(())
    })?;

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::BLUE);
        s.set_fill_colour(Colour::WHITE);
        let r = g.radius + 38.0;
        for sec in (0..ClockGeometry::TICKS).filter(|&sec| face.is_major(sec)) {
            let rad = tick_angle_deg(f64::from(sec)).to_radians();
            let at = g.point_at(r, tick_angle_deg(f64::from(sec)));
            scoped(s, |s| {
                s.translate(Vec2::new(at.x, at.y));
                // Numerals stand upright relative to the rim.
                s.rotate(rad + std::f64::consts::FRAC_PI_2);
                s.fill_text(Point::ORIGIN, &LEGEND_FONT, &sec.to_string())
            })?;
        }
        Ok(())
    })
}

/// Countdown face: long ticks every 10 s, short ticks for the last ten seconds.
pub fn countdown_clock_face<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: f64,
) -> TestCardResult<()> {
    clock_face(surface, centre, radius, ClockFace::COUNTDOWN)
}

/// Solid disc behind a dial.
pub fn dial_background<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: f64,
    fill: Colour,
) -> TestCardResult<()> {
    scoped(surface, |s| {
        s.set_fill_colour(fill);
        s.fill(&Circle::new(centre, radius).to_path(0.1));
        Ok(())
    })
}

/// 10-unit ring around a dial.
pub fn dial_foreground<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: f64,
    stroke: Colour,
) -> TestCardResult<()> {
    scoped(surface, |s| {
        s.set_line_width(10.0);
        s.set_stroke_colour(stroke);
        s.stroke(&Circle::new(centre, radius).to_path(0.1));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::{DrawCommand, RecordingSurface};
    use kurbo::PathEl;

    fn tick_path(s: &RecordingSurface) -> BezPath {
        s.fills().next().map(|(p, _)| p.clone()).unwrap()
    }

    fn subpaths(path: &BezPath) -> usize {
        path.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    #[test]
    fn countdown_face_tick_selection() {
        let ticks: Vec<u32> = ClockFace::COUNTDOWN.ticks().collect();
        assert_eq!(ticks, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 30, 40, 50]);
        assert!(ClockFace::COUNTDOWN.is_major(5));
        assert!(!ClockFace::COUNTDOWN.is_major(7));
        assert_eq!(ClockFace::CLOCK.ticks().count(), 60);
    }

    #[test]
    fn draws_one_quad_per_tick_and_numerals() {
        let mut s = RecordingSurface::new(Size::new(3840.0, 2160.0));
        countdown_clock_face(&mut s, Point::new(1920.0, 1080.0), 540.0).unwrap();
        assert_eq!(subpaths(&tick_path(&s)), 15);
        let numerals: Vec<&str> = s.texts().collect();
        assert_eq!(numerals, vec!["0", "5", "10", "20", "30", "40", "50"]);
    }

    #[test]
    fn second_zero_tick_points_up() {
        let mut s = RecordingSurface::new(Size::new(1000.0, 1000.0));
        let centre = Point::new(500.0, 500.0);
        clock_face(&mut s, centre, 460.0, ClockFace::new(5, 0).unwrap()).unwrap();
        let path = tick_path(&s);
        let Some(PathEl::MoveTo(p)) = path.elements().first().copied() else {
            panic!("tick path must start with a move");
        };
        // Long tick at second 0: outer end 15 beyond the 400 dial radius, straight up.
        assert!((p.x - 500.0).abs() < 2.0);
        assert!((p.y - (500.0 - 415.0)).abs() < 0.1);
    }

    #[test]
    fn numerals_are_rotated_upright() {
        let mut s = RecordingSurface::new(Size::new(1000.0, 1000.0));
        clock_face(&mut s, Point::new(500.0, 500.0), 460.0, ClockFace::COUNTDOWN).unwrap();
        let zero = s
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, transform, at, .. } if text == "0" => {
                    Some((*transform, *at))
                }
                _ => None,
            })
            .unwrap();
        let (transform, at) = zero;
        // Second 0 sits above centre at radius 400 + 38 and needs no net rotation.
        assert!((at.x - 500.0).abs() < 1e-6);
        assert!((at.y - (500.0 - 438.0)).abs() < 1e-6);
        let [a, b, ..] = transform.as_coeffs();
        assert!((a - 1.0).abs() < 1e-9);
        assert!(b.abs() < 1e-9);
    }

    #[test]
    fn zero_major_step_is_rejected() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        let face = ClockFace {
            major_step: 0,
            minor_max: 3,
        };
        assert!(clock_face(&mut s, Point::new(5.0, 5.0), 100.0, face).is_err());
    }

    #[test]
    fn dial_layers_restore_state() {
        let mut s = RecordingSurface::new(Size::new(100.0, 100.0));
        dial_background(&mut s, Point::new(50.0, 50.0), 40.0, Colour::BLACK).unwrap();
        dial_foreground(&mut s, Point::new(50.0, 50.0), 40.0, Colour::WHITE).unwrap();
        s.stroke(&BezPath::new());
        let widths: Vec<f64> = s
            .strokes()
            .map(|c| match c {
                DrawCommand::Stroke { width, .. } => *width,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(widths, vec![10.0, 1.0]);
    }
}
