use crate::colour::Colour;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::layout::{ClockGeometry, tick_angle_deg};
use crate::surface::{Surface, scoped};

/// Drawing angle of the second hand. Stepped hands snap to whole seconds.
pub fn hand_angle_deg(smooth: bool, second: f64) -> f64 {
    let second = if smooth { second } else { second.floor() };
    tick_angle_deg(second)
}

/// Red second hand from just outside the inner ring to just inside the dial.
pub fn second_hand<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: f64,
    smooth: bool,
    second: f64,
) -> TestCardResult<()> {
    if !second.is_finite() {
        return Err(TestCardError::invalid_argument(format!(
            "second hand position must be finite, got {second}"
        )));
    }
    let g = ClockGeometry::new(centre, radius);
    let angle = hand_angle_deg(smooth, second);

    let mut hand = BezPath::new();
    hand.move_to(g.point_at(g.radius_inner + 10.0, angle));
    hand.line_to(g.point_at(g.radius - 20.0, angle));

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::RED);
        s.set_fill_colour(Colour::RED);
        s.set_line_width(5.0);
        s.stroke(&hand);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::RecordingSurface;

    fn draw(smooth: bool, second: f64) -> RecordingSurface {
        let mut s = RecordingSurface::new(Size::new(3840.0, 2160.0));
        second_hand(&mut s, Point::new(1920.0, 1080.0), 540.0, smooth, second).unwrap();
        s
    }

    #[test]
    fn stepped_hand_ignores_fraction() {
        assert_eq!(draw(false, 29.9).commands(), draw(false, 29.0).commands());
        assert_eq!(hand_angle_deg(false, 29.9), hand_angle_deg(false, 29.0));
    }

    #[test]
    fn smooth_hand_moves_continuously() {
        assert_ne!(draw(true, 29.9).commands(), draw(true, 29.0).commands());
        let delta = hand_angle_deg(true, 29.0) - hand_angle_deg(true, 29.5);
        assert!((delta - 3.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_second_is_rejected() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        let err = second_hand(&mut s, Point::new(5.0, 5.0), 100.0, true, f64::NAN).unwrap_err();
        assert!(matches!(err, TestCardError::InvalidArgument(_)));
    }
}
