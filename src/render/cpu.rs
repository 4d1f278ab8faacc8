use std::path::Path;

use anyhow::Context;

use crate::colour::Colour;
use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Size};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::layout::raster_size;
use crate::render::text::{TextBrush, TextEngine};
use crate::surface::{FontSpec, LineCap, StateStack, Surface};

/// vello_cpu-backed raster surface.
///
/// Drawing accumulates in one render context until [`Surface::clear`]; every
/// [`Surface::snapshot`] rasterizes the whole display list into a fresh pixmap, so
/// snapshots are deterministic for a given command sequence.
pub struct CpuCanvas {
    reference: Size,
    width: u16,
    height: u16,
    base: Affine,
    ctx: vello_cpu::RenderContext,
    state: StateStack,
    text: Option<TextEngine>,
    warned_no_font: bool,
}

impl CpuCanvas {
    /// Canvas with `reference` coordinates rasterized at `scale` pixels per unit.
    pub fn new(reference: Size, scale: f64) -> TestCardResult<Self> {
        let (w, h) = raster_size(reference, scale)?;
        let width = u16::try_from(w)
            .map_err(|_| TestCardError::invalid_argument("raster width exceeds u16"))?;
        let height = u16::try_from(h)
            .map_err(|_| TestCardError::invalid_argument("raster height exceeds u16"))?;
        let base = Affine::scale_non_uniform(
            f64::from(width) / reference.width,
            f64::from(height) / reference.height,
        );
        tracing::debug!(width, height, scale, "created cpu canvas");
        Ok(Self {
            reference,
            width,
            height,
            base,
            ctx: vello_cpu::RenderContext::new(width, height),
            state: StateStack::default(),
            text: None,
            warned_no_font: false,
        })
    }

    /// Use the first face in `font_bytes` (TTF/OTF) for all text.
    pub fn with_font_bytes(mut self, font_bytes: Vec<u8>) -> TestCardResult<Self> {
        self.text = Some(TextEngine::from_bytes(font_bytes)?);
        Ok(self)
    }

    pub fn with_font_file(self, path: &Path) -> TestCardResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font {}", path.display()))
            .map_err(|e| TestCardError::resource(format!("{e:#}")))?;
        self.with_font_bytes(bytes)
    }

    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn device_transform(&self) -> vello_cpu::kurbo::Affine {
        affine_to_cpu(self.base * self.state.current.transform)
    }
}

impl Surface for CpuCanvas {
    fn size(&self) -> Size {
        self.reference
    }

    fn raster_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self, colour: Colour) {
        self.ctx.reset();
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(colour_to_cpu(colour));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
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
        self.ctx.set_transform(self.device_transform());
        self.ctx.set_paint(colour_to_cpu(self.state.current.fill));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke(&mut self, path: &BezPath) {
        let st = self.state.current;
        let mut stroke = vello_cpu::kurbo::Stroke::new(st.line_width);
        stroke.join = vello_cpu::kurbo::Join::Round;
        stroke.start_cap = cap_to_cpu(st.cap);
        stroke.end_cap = cap_to_cpu(st.cap);

        self.ctx.set_transform(self.device_transform());
        self.ctx.set_paint(colour_to_cpu(st.stroke));
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(&bezpath_to_cpu(path));
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
        let Some(engine) = self.text.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!(text, "no font configured; skipping text");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = engine.layout(text, font.size, TextBrush::from(self.state.current.fill))?;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let origin = Affine::translate((at.x - w / 2.0, at.y - h / 2.0));
        self.ctx
            .set_transform(affine_to_cpu(self.base * self.state.current.transform * origin));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn snapshot(&mut self) -> TestCardResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn colour_to_cpu(c: Colour) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn cap_to_cpu(cap: LineCap) -> vello_cpu::kurbo::Cap {
    match cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Rect;
    use kurbo::Shape;

    fn canvas() -> CpuCanvas {
        CpuCanvas::new(Size::new(400.0, 200.0), 0.25).unwrap()
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut c = canvas();
        assert_eq!(c.raster_size(), (100, 50));
        c.clear(Colour::RED);
        let frame = c.snapshot().unwrap();
        assert_eq!(frame.data.len(), 100 * 50 * 4);
        assert!(frame.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn reference_coordinates_are_scaled() {
        let mut c = canvas();
        c.clear(Colour::BLACK);
        c.set_fill_colour(Colour::WHITE);
        c.fill(&Rect::new(200.0, 0.0, 400.0, 200.0).to_path(0.1));
        let frame = c.snapshot().unwrap();
        assert_eq!(frame.pixel(10, 25), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(90, 25), Some([255, 255, 255, 255]));
    }

    #[test]
    fn snapshot_is_repeatable() {
        let mut c = canvas();
        c.clear(Colour::GREY);
        c.set_stroke_colour(Colour::WHITE);
        c.set_line_width(8.0);
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((400.0, 200.0));
        c.stroke(&p);
        let a = c.snapshot().unwrap();
        let b = c.snapshot().unwrap();
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut c = canvas();
        c.clear(Colour::BLACK);
        let before = c.snapshot().unwrap();
        c.set_fill_colour(Colour::WHITE);
        c.fill_text(Point::new(200.0, 100.0), &FontSpec::new(30.0), "10")
            .unwrap();
        assert!(!c.has_font());
        assert_eq!(c.snapshot().unwrap(), before);
    }

    #[test]
    fn missing_font_file_is_resource_error() {
        let err = canvas()
            .with_font_file(Path::new("/nonexistent/font.ttf"))
            .err()
            .unwrap();
        assert!(matches!(err, TestCardError::ResourceAcquisition(_)));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(canvas().with_font_bytes(vec![0u8; 16]).is_err());
    }
}
