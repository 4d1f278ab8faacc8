//! Drawing idioms shared by every card: rectangles, colour bars and relative polylines.

use crate::colour::Colour;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::surface::Surface;

/// Pitch of a run of colour bars: the size of one band and how many were drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPitch {
    pub size: f64,
    pub count: usize,
}

impl BarPitch {
    /// Offset of the start of band `n` from the start of the run.
    pub fn offset(&self, n: usize) -> f64 {
        self.size * n as f64
    }
}

/// Closed rectangle outline at `(x, y)` with size `w` x `h`.
pub fn rectangle_path(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    push_rectangle(&mut path, x, y, w, h);
    path
}

pub fn push_rectangle(path: &mut BezPath, x: f64, y: f64, w: f64, h: f64) {
    path.move_to((x, y));
    path.line_to((x + w, y));
    path.line_to((x + w, y + h));
    path.line_to((x, y + h));
    path.close_path();
}

/// Fill an axis-aligned rectangle and return its right and bottom edges.
pub fn fill_rect<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    colour: Colour,
) -> (f64, f64) {
    surface.set_fill_colour(colour);
    surface.fill(&rectangle_path(x, y, w, h));
    (x + w, y + h)
}

/// Tile `bounds` left to right with one equal-width band per colour.
///
/// Band edges are computed from the band index, so the last band ends exactly on
/// `bounds.x1` with no accumulated drift.
pub fn colour_bars<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    colours: &[Colour],
) -> TestCardResult<BarPitch> {
    let n = bars_len(colours)?;
    let w = bounds.width();
    let edge = |i: usize| {
        if i == n {
            bounds.x1
        } else {
            bounds.x0 + w * i as f64 / n as f64
        }
    };
    for (i, &colour) in colours.iter().enumerate() {
        let band = Rect::new(edge(i), bounds.y0, edge(i + 1), bounds.y1);
        fill_box(surface, band, colour);
    }
    Ok(BarPitch {
        size: w / n as f64,
        count: n,
    })
}

/// Tile `bounds` top to bottom with one equal-height band per colour.
pub fn colour_bars_vertical<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    colours: &[Colour],
) -> TestCardResult<BarPitch> {
    let n = bars_len(colours)?;
    let h = bounds.height();
    let edge = |i: usize| {
        if i == n {
            bounds.y1
        } else {
            bounds.y0 + h * i as f64 / n as f64
        }
    };
    for (i, &colour) in colours.iter().enumerate() {
        let band = Rect::new(bounds.x0, edge(i), bounds.x1, edge(i + 1));
        fill_box(surface, band, colour);
    }
    Ok(BarPitch {
        size: h / n as f64,
        count: n,
    })
}

fn fill_box<S: Surface + ?Sized>(surface: &mut S, r: Rect, colour: Colour) {
    let mut path = BezPath::new();
    path.move_to((r.x0, r.y0));
    path.line_to((r.x1, r.y0));
    path.line_to((r.x1, r.y1));
    path.line_to((r.x0, r.y1));
    path.close_path();
    surface.set_fill_colour(colour);
    surface.fill(&path);
}

fn bars_len(colours: &[Colour]) -> TestCardResult<usize> {
    if colours.is_empty() {
        return Err(TestCardError::invalid_argument("colour bars need at least one colour"));
    }
    Ok(colours.len())
}

/// Append an open polyline: move to `start`, then line to each cumulative delta.
///
/// Returns the final point.
pub fn push_rel_polyline(path: &mut BezPath, start: Point, deltas: &[(f64, f64)]) -> Point {
    path.move_to(start);
    let mut at = start;
    for &(dx, dy) in deltas {
        at = Point::new(at.x + dx, at.y + dy);
        path.line_to(at);
    }
    at
}

/// Stroke one relative polyline with the current stroke state.
pub fn stroke_rel_polyline<S: Surface + ?Sized>(
    surface: &mut S,
    start: Point,
    deltas: &[(f64, f64)],
) {
    let mut path = BezPath::new();
    push_rel_polyline(&mut path, start, deltas);
    surface.stroke(&path);
}

/// Fill the closed polygon through `start` and each cumulative delta.
pub fn fill_poly_rel<S: Surface + ?Sized>(
    surface: &mut S,
    colour: Colour,
    start: Point,
    deltas: &[(f64, f64)],
) {
    let mut path = BezPath::new();
    push_rel_polyline(&mut path, start, deltas);
    path.close_path();
    surface.set_fill_colour(colour);
    surface.fill(&path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::surface::LineCap;
    use kurbo::{PathEl, Shape};

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Size::new(1000.0, 1000.0))
    }

    #[test]
    fn fill_rect_returns_far_edges() {
        let mut s = surface();
        let (x, y) = fill_rect(&mut s, 10.0, 20.0, 30.0, 40.0, Colour::RED);
        assert_eq!((x, y), (40.0, 60.0));
        let (path, colour) = s.fills().next().unwrap();
        assert_eq!(colour, Colour::RED);
        assert_eq!(path.bounding_box(), Rect::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn bars_tile_without_gaps() {
        let mut s = surface();
        let colours = [Colour::WHITE, Colour::YELLOW, Colour::CYAN];
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let pitch = colour_bars(&mut s, bounds, &colours).unwrap();
        assert_eq!(pitch.count, 3);
        assert!((pitch.size - 100.0 / 3.0).abs() < 1e-12);

        let boxes: Vec<Rect> = s.fills().map(|(p, _)| p.bounding_box()).collect();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].x0, 0.0);
        for pair in boxes.windows(2) {
            assert_eq!(pair[0].x1, pair[1].x0);
        }
        assert_eq!(boxes[2].x1, 100.0);
        let colours_drawn: Vec<Colour> = s.fills().map(|(_, c)| c).collect();
        assert_eq!(colours_drawn, colours);
    }

    #[test]
    fn vertical_bars_tile_without_gaps() {
        let mut s = surface();
        let bounds = Rect::new(0.0, 80.0, 128.0, 2080.0);
        let colours = [Colour::LIGHT_GREEN, Colour::RED, Colour::BLACK];
        let pitch = colour_bars_vertical(&mut s, bounds, &colours).unwrap();
        assert_eq!(pitch.count, 3);
        let boxes: Vec<Rect> = s.fills().map(|(p, _)| p.bounding_box()).collect();
        assert_eq!(boxes[0].y0, 80.0);
        assert_eq!(boxes[2].y1, 2080.0);
        assert!(boxes.iter().all(|b| b.x0 == 0.0 && b.x1 == 128.0));
    }

    #[test]
    fn empty_bars_are_rejected() {
        let mut s = surface();
        let err = colour_bars(&mut s, Rect::new(0.0, 0.0, 1.0, 1.0), &[]).unwrap_err();
        assert!(matches!(err, TestCardError::InvalidArgument(_)));
        assert!(s.commands().is_empty());
    }

    #[test]
    fn rel_polyline_accumulates() {
        let mut path = BezPath::new();
        let end = push_rel_polyline(
            &mut path,
            Point::new(1.0, 1.0),
            &[(2.0, 0.0), (0.0, 3.0), (-1.0, -1.0)],
        );
        assert_eq!(end, Point::new(2.0, 3.0));
        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(
            els,
            vec![
                PathEl::MoveTo(Point::new(1.0, 1.0)),
                PathEl::LineTo(Point::new(3.0, 1.0)),
                PathEl::LineTo(Point::new(3.0, 4.0)),
                PathEl::LineTo(Point::new(2.0, 3.0)),
            ]
        );
    }

    #[test]
    fn stroke_rel_polyline_uses_current_stroke_state() {
        let mut s = surface();
        s.set_stroke_colour(Colour::BLUE);
        s.set_line_width(4.0);
        s.set_line_cap(LineCap::Butt);
        stroke_rel_polyline(&mut s, Point::new(10.0, 10.0), &[(5.0, 0.0), (0.0, 5.0)]);

        assert_eq!(s.commands().len(), 1);
        let mut expected = BezPath::new();
        expected.move_to((10.0, 10.0));
        expected.line_to((15.0, 10.0));
        expected.line_to((15.0, 15.0));
        assert_eq!(
            s.commands()[0],
            DrawCommand::Stroke {
                path: expected,
                colour: Colour::BLUE,
                width: 4.0,
                cap: LineCap::Butt,
            }
        );
    }

    #[test]
    fn poly_rel_is_closed_and_filled() {
        let mut s = surface();
        fill_poly_rel(
            &mut s,
            Colour::WHITE,
            Point::new(0.0, 540.0),
            &[(128.0, -53.0), (116.0, 53.0), (-116.0, 53.0)],
        );
        let (path, colour) = s.fills().next().unwrap();
        assert_eq!(colour, Colour::WHITE);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 487.0, 244.0, 593.0));
    }
}
