//! BBC "unknown" card: a white grid broken into blocks, over two bar rows.

use crate::colour::Colour;
use crate::compose::{colour_bars, push_rel_polyline};
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::TestCardResult;
use crate::layout::{BbcGrid, rect};
use crate::surface::{Surface, scoped};

const MAIN_BARS: [Colour; 8] = [
    Colour::WHITE,
    Colour::YELLOW,
    Colour::CYAN,
    Colour::GREEN,
    Colour::MAGENTA,
    Colour::RED,
    Colour::BLUE,
    Colour::BLACK,
];

const LOW_BARS: [Colour; 9] = [
    Colour::BLUE,
    Colour::BLACK,
    Colour::MAGENTA,
    Colour::BLACK,
    Colour::CYAN,
    Colour::BLACK,
    Colour::LIGHT_GREY,
    Colour::BLACK,
    Colour::WHITE,
];

/// The BBC "unknown" card: white grid on black with two colour-bar rows.
pub fn bbc_unknown<S: Surface + ?Sized>(surface: &mut S) -> TestCardResult<()> {
    let size = surface.size();
    let g = BbcGrid::new(size.width, size.height);
    surface.clear(Colour::BLACK);

    scoped(surface, |s| {
        let mut grid = BezPath::new();
        for i in 0..BbcGrid::COLS {
            let x = g.offset_x + g.cell_w * i as f64;
            push_rel_polyline(&mut grid, Point::new(x, 0.0), &[(0.0, g.height)]);
        }
        for i in 0..BbcGrid::ROWS {
            let y = g.offset_y + g.cell_h * i as f64;
            push_rel_polyline(&mut grid, Point::new(0.0, y), &[(g.width, 0.0)]);
        }
        s.set_stroke_colour(Colour::WHITE);
        s.set_line_width(2.0);
        s.stroke(&grid);

        // Wide black spacers on the cell boundaries break the grid into blocks.
        let mut spacers = BezPath::new();
        for i in 1..BbcGrid::COLS {
            let x = g.cell_w * i as f64;
            push_rel_polyline(&mut spacers, Point::new(x, 0.0), &[(0.0, g.height)]);
        }
        s.set_stroke_colour(Colour::BLACK);
        s.set_line_width(20.0);
        s.stroke(&spacers);
        Ok(())
    })?;

    let main = colour_bars(
        surface,
        rect(10.0, g.cell_h * 7.0, g.width - 10.0, g.cell_h * 9.0),
        &MAIN_BARS,
    )?;
    colour_bars(
        surface,
        rect(0.0, g.cell_h * 9.0, g.width - 50.0 + main.size, g.cell_h * 10.0),
        &LOW_BARS,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::{DrawCommand, RecordingSurface};
    use kurbo::PathEl;

    #[test]
    fn grid_then_spacers_then_bars() {
        let mut s = RecordingSurface::new(Size::new(1920.0, 1080.0));
        bbc_unknown(&mut s).unwrap();
        let strokes: Vec<(f64, usize)> = s
            .strokes()
            .map(|c| match c {
                DrawCommand::Stroke { width, path, .. } => (
                    *width,
                    path.elements()
                        .iter()
                        .filter(|el| matches!(el, PathEl::MoveTo(_)))
                        .count(),
                ),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(strokes, vec![(2.0, 16 + 12), (20.0, 15)]);
        assert_eq!(s.fills().count(), 8 + 9);
    }
}
