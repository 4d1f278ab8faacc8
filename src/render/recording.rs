//! A surface that records what was drawn instead of rasterizing it.
//!
//! Paths and text anchors are stored in reference coordinates with the current
//! transform already applied, so layouts can be checked geometrically.

use crate::colour::Colour;
use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Size};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::foundation::math::Fnv1a64;
use crate::surface::{FontSpec, LineCap, StateStack, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Colour),
    Fill {
        path: BezPath,
        colour: Colour,
    },
    Stroke {
        path: BezPath,
        colour: Colour,
        width: f64,
        cap: LineCap,
    },
    Text {
        /// Full transform in effect, for checking rotation of rotated numerals.
        transform: Affine,
        at: Point,
        size: f32,
        text: String,
        colour: Colour,
    },
}

#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            state: StateStack::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Filled paths with their colours, in drawing order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Colour)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, colour } => Some((path, *colour)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Stable digest of the recorded display list.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear(c) => {
                    h.write_bytes(&[0]);
                    write_colour(&mut h, *c);
                }
                DrawCommand::Fill { path, colour } => {
                    h.write_bytes(&[1]);
                    write_colour(&mut h, *colour);
                    write_path(&mut h, path);
                }
                DrawCommand::Stroke {
                    path,
                    colour,
                    width,
                    cap,
                } => {
                    h.write_bytes(&[2, *cap as u8]);
                    write_colour(&mut h, *colour);
                    h.write_f64(*width);
                    write_path(&mut h, path);
                }
                DrawCommand::Text {
                    transform,
                    at,
                    size,
                    text,
                    colour,
                } => {
                    h.write_bytes(&[3]);
                    for c in transform.as_coeffs() {
                        h.write_f64(c);
                    }
                    h.write_f64(at.x);
                    h.write_f64(at.y);
                    h.write_f64(f64::from(*size));
                    h.write_bytes(text.as_bytes());
                    write_colour(&mut h, *colour);
                }
            }
        }
        h.finish()
    }

    fn transformed(&self, path: &BezPath) -> BezPath {
        let mut path = path.clone();
        path.apply_affine(self.state.current.transform);
        path
    }
}

fn write_colour(h: &mut Fnv1a64, c: Colour) {
    h.write_bytes(&c.to_rgba8());
}

fn write_path(h: &mut Fnv1a64, path: &BezPath) {
    use kurbo::PathEl;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => write_points(h, 0, &[p]),
            PathEl::LineTo(p) => write_points(h, 1, &[p]),
            PathEl::QuadTo(p1, p2) => write_points(h, 2, &[p1, p2]),
            PathEl::CurveTo(p1, p2, p3) => write_points(h, 3, &[p1, p2, p3]),
            PathEl::ClosePath => write_points(h, 4, &[]),
        }
    }
}

fn write_points(h: &mut Fnv1a64, tag: u8, points: &[Point]) {
    h.write_bytes(&[tag]);
    for p in points {
        h.write_f64(p.x);
        h.write_f64(p.y);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn raster_size(&self) -> (u32, u32) {
        (
            self.size.width.round().max(1.0) as u32,
            self.size.height.round().max(1.0) as u32,
        )
    }

    fn clear(&mut self, colour: Colour) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(colour));
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.state.current.fill = colour;
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.state.current.stroke = colour;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.current.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.current.cap = cap;
    }

    fn fill(&mut self, path: &BezPath) {
        let path = self.transformed(path);
        self.commands.push(DrawCommand::Fill {
            path,
            colour: self.state.current.fill,
        });
    }

    fn stroke(&mut self, path: &BezPath) {
        let path = self.transformed(path);
        let st = self.state.current;
        self.commands.push(DrawCommand::Stroke {
            path,
            colour: st.stroke,
            width: st.line_width,
            cap: st.cap,
        });
    }

    fn transform(&mut self, affine: Affine) {
        self.state.current.transform *= affine;
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn fill_text(&mut self, at: Point, font: &FontSpec, text: &str) -> TestCardResult<()> {
        let transform = self.state.current.transform;
        self.commands.push(DrawCommand::Text {
            transform,
            at: transform * at,
            size: font.size,
            text: text.to_owned(),
            colour: self.state.current.fill,
        });
        Ok(())
    }

    fn snapshot(&mut self) -> TestCardResult<FrameRGBA> {
        Err(TestCardError::resource("recording surface has no raster; use CpuCanvas for frames"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Rect, Vec2};
    use crate::surface::scoped;
    use kurbo::Shape;

    #[test]
    fn records_transformed_paths() {
        let mut s = RecordingSurface::new(Size::new(100.0, 100.0));
        s.translate(Vec2::new(10.0, 20.0));
        s.set_fill_colour(Colour::RED);
        s.fill(&Rect::new(0.0, 0.0, 5.0, 5.0).to_path(0.1));
        let (path, colour) = s.fills().next().unwrap();
        assert_eq!(colour, Colour::RED);
        assert_eq!(path.bounding_box(), Rect::new(10.0, 20.0, 15.0, 25.0));
    }

    #[test]
    fn scoped_restores_on_error() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        s.set_line_width(3.0);
        let res: TestCardResult<()> = scoped(&mut s, |s| {
            s.set_line_width(9.0);
            s.translate(Vec2::new(4.0, 4.0));
            Err(TestCardError::invalid_argument("stop"))
        });
        assert!(res.is_err());
        s.stroke(&Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1));
        let Some(DrawCommand::Stroke { path, width, .. }) = s.strokes().next() else {
            panic!("expected a stroke");
        };
        assert_eq!(*width, 3.0);
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn clear_drops_earlier_commands() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        s.fill(&Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1));
        s.clear(Colour::GREY);
        assert_eq!(s.commands(), &[DrawCommand::Clear(Colour::GREY)]);
    }

    #[test]
    fn digest_tracks_geometry() {
        let draw = |x: f64| {
            let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
            s.fill(&Rect::new(x, 0.0, 1.0, 1.0).to_path(0.1));
            s.digest()
        };
        assert_eq!(draw(0.0), draw(0.0));
        assert_ne!(draw(0.0), draw(0.5));
    }

    #[test]
    fn snapshot_is_unsupported() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        assert!(matches!(s.snapshot(), Err(TestCardError::ResourceAcquisition(_))));
    }
}
