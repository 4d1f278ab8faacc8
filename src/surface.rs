//! The drawing-surface contract every card and clock paints through.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Rect, Size, Vec2};
use crate::foundation::error::TestCardResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Font request for centred text. Surfaces hold the face; this selects the size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub size: f32,
}

impl FontSpec {
    pub const fn new(size: f32) -> Self {
        Self { size }
    }
}

/// A 2-D vector canvas with a save/restore state stack.
///
/// Coordinates are reference units; implementations map them to their raster.
/// State covers fill colour, stroke colour, line width, line cap and transform.
pub trait Surface {
    /// Size of the reference coordinate space.
    fn size(&self) -> Size;

    /// Pixel size of the frames produced by [`Surface::snapshot`].
    fn raster_size(&self) -> (u32, u32);

    /// Replace everything drawn so far with a flat colour.
    fn clear(&mut self, colour: Colour);

    fn set_fill_colour(&mut self, colour: Colour);
    fn set_stroke_colour(&mut self, colour: Colour);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);

    fn fill(&mut self, path: &BezPath);
    fn stroke(&mut self, path: &BezPath);

    /// Post-multiply the current transform.
    fn transform(&mut self, affine: Affine);

    fn save(&mut self);
    fn restore(&mut self);

    /// Draw `text` in the fill colour, centred on `at` in both axes.
    fn fill_text(&mut self, at: Point, font: &FontSpec, text: &str) -> TestCardResult<()>;

    /// Rasterize everything drawn so far.
    fn snapshot(&mut self) -> TestCardResult<FrameRGBA>;

    fn translate(&mut self, by: Vec2) {
        self.transform(Affine::translate(by));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform(Affine::rotate(radians));
    }

    fn bounds(&self) -> Rect {
        self.size().to_rect()
    }

    fn centre(&self) -> Point {
        self.bounds().center()
    }
}

/// Saves surface state on creation and restores it on drop, including early returns.
pub struct SavedState<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Run `f` between a save and a restore.
pub fn scoped<S, R>(
    surface: &mut S,
    f: impl FnOnce(&mut S) -> TestCardResult<R>,
) -> TestCardResult<R>
where
    S: Surface + ?Sized,
{
    let mut guard = SavedState::new(surface);
    f(&mut *guard)
}

/// Drawing state carried by both backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DrawState {
    pub(crate) fill: Colour,
    pub(crate) stroke: Colour,
    pub(crate) line_width: f64,
    pub(crate) cap: LineCap,
    pub(crate) transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Colour::BLACK,
            stroke: Colour::BLACK,
            line_width: 1.0,
            cap: LineCap::Round,
            transform: Affine::IDENTITY,
        }
    }
}

/// State stack shared by the surface implementations.
#[derive(Clone, Debug, Default)]
pub(crate) struct StateStack {
    pub(crate) current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub(crate) fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores leave the state untouched.
    pub(crate) fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        } else {
            tracing::warn!("restore without matching save");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_stack_round_trips() {
        let mut s = StateStack::default();
        s.current.line_width = 5.0;
        s.save();
        s.current.line_width = 10.0;
        s.current.fill = Colour::RED;
        s.restore();
        assert_eq!(s.current.line_width, 5.0);
        assert_eq!(s.current.fill, Colour::BLACK);
        s.restore();
        assert_eq!(s.current.line_width, 5.0);
    }
}
