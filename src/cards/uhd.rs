//! The UHD card, drawn as ordered layers over a shared [`UhdLayout`].
//!
//! Each layer paints over the previous one, so layers must run in
//! [`UhdLayer`] order. The slicer layers are optional and slot in after
//! `Lower` and `Upper` respectively.

use crate::colour::{Colour, Gradient};
use crate::compose::{
    colour_bars, colour_bars_vertical, fill_poly_rel, fill_rect, push_rectangle,
    push_rel_polyline, rectangle_path, stroke_rel_polyline,
};
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{TestCardError, TestCardResult};
use crate::layout::{UhdLayout, rect};
use crate::surface::{Surface, scoped};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UhdLayer {
    Base,
    Lower,
    SlicerLower,
    Upper,
    SlicerUpper,
    Top,
}

impl UhdLayer {
    pub const CARD: [UhdLayer; 4] = [Self::Base, Self::Lower, Self::Upper, Self::Top];
    pub const WITH_SLICER: [UhdLayer; 6] = [
        Self::Base,
        Self::Lower,
        Self::SlicerLower,
        Self::Upper,
        Self::SlicerUpper,
        Self::Top,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Lower => "lower",
            Self::SlicerLower => "slicer_lower",
            Self::Upper => "upper",
            Self::SlicerUpper => "slicer_upper",
            Self::Top => "top",
        }
    }
}

/// Frame position driving the slicer progress bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlicerTiming {
    pub frame_rate: u32,
    pub frame_number: u64,
}

impl SlicerTiming {
    /// Fill fraction of the slicer bar.
    ///
    /// The frame inside the second is divided by `frame_rate - 1`, so the first
    /// frame of a second is empty and the last one is exactly full.
    pub fn fraction(self) -> TestCardResult<f64> {
        match self.frame_rate {
            0 => Err(TestCardError::invalid_argument("slicer frame rate must be > 0")),
            1 => Ok(1.0),
            fr => {
                let in_second = self.frame_number % u64::from(fr);
                Ok(in_second as f64 / f64::from(fr - 1))
            }
        }
    }
}

/// The complete card without slicer.
pub fn uhd<S: Surface + ?Sized>(surface: &mut S) -> TestCardResult<()> {
    let layout = UhdLayout::from_size(surface.size());
    draw_layers(surface, &layout, &UhdLayer::CARD, None)
}

/// The complete card with the slicer at `timing`.
pub fn uhd_with_slicer<S: Surface + ?Sized>(
    surface: &mut S,
    timing: SlicerTiming,
) -> TestCardResult<()> {
    let layout = UhdLayout::from_size(surface.size());
    draw_layers(surface, &layout, &UhdLayer::WITH_SLICER, Some(timing))
}

/// Draw `layers`, which must be in strictly increasing [`UhdLayer`] order.
pub fn draw_layers<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &UhdLayout,
    layers: &[UhdLayer],
    slicer: Option<SlicerTiming>,
) -> TestCardResult<()> {
    if let Some(pair) = layers.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(TestCardError::invalid_argument(format!(
            "uhd layer {} cannot follow {}",
            pair[1].name(),
            pair[0].name()
        )));
    }

    for &layer in layers {
        let drawn = match layer {
            UhdLayer::Base => {
                base(surface);
                Ok(())
            }
            UhdLayer::Lower => lower(surface, layout),
            UhdLayer::SlicerLower => slicer_lower(surface, layout),
            UhdLayer::Upper => upper(surface, layout),
            UhdLayer::SlicerUpper => match slicer {
                Some(timing) => slicer_upper(surface, layout, timing),
                None => Err(TestCardError::invalid_argument("slicer layer needs frame timing")),
            },
            UhdLayer::Top => top(surface, layout),
        };
        drawn.map_err(|e| e.in_layer(layer.name()))?;
    }
    Ok(())
}

pub fn base<S: Surface + ?Sized>(surface: &mut S) {
    surface.clear(Colour::GREY);
}

/// White grid lines. The fifth row is inset and the middle columns stop short,
/// leaving room for the slicer.
pub fn lower<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    scoped(surface, |s| {
        s.set_stroke_colour(Colour::WHITE);
        s.set_line_width(10.0);
        s.stroke(&rectangle_path(l.dw, l.dh, l.w - l.dw * 2.0, l.h - l.dh * 2.0));

        let mut grid = BezPath::new();
        let mut y = l.dh;
        for i in 0..8 {
            if i == 4 {
                grid.move_to((l.dd, y));
                grid.line_to((l.w - l.dd, y));
            } else {
                grid.move_to((0.0, y));
                grid.line_to((l.w, y));
            }
            y += l.dy;
        }

        let mut x = l.dw;
        for i in 0..15 {
            let y1 = if i > 3 && i < 12 { y - l.dy } else { l.h };
            grid.move_to((x, 0.0));
            grid.line_to((x, y1));
            x += l.dx;
        }
        s.stroke(&grid);
        Ok(())
    })
}

/// Black notch outlines around the central block.
pub fn upper<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    let (w, h, dw, dh, dx, dy) = (l.w, l.h, l.dw, l.dh, l.dx, l.dy);
    // Notch inset, also the line width.
    let dd = 7.0;

    let mut notches: Vec<(Point, Vec<(f64, f64)>)> = Vec::with_capacity(16);
    let mut line = |x: f64, y: f64, deltas: &[(f64, f64)]| {
        notches.push((Point::new(x, y), deltas.to_vec()));
    };

    // Top row.
    line(dw, dh + 2.0 * dy - dd, &[(3.0 * dx - dd, 0.0), (0.0, dd - 2.0 * dy)]);
    for (left, run) in [(3.0, 4.0), (7.0, 1.0), (8.0, 4.0)] {
        line(
            dw + left * dx + dd,
            dh,
            &[(0.0, 2.0 * dy - dd), (run * dx - 2.0 * dd, 0.0), (0.0, dd - 2.0 * dy)],
        );
    }
    line(
        dw + 12.0 * dx + dd,
        dh,
        &[(0.0, 2.0 * dy - dd), (3.0 * dx + dd, 0.0)],
    );

    // Bottom row.
    line(
        dw,
        h - dh - 2.0 * dy + dd,
        &[(3.0 * dx - dd, 0.0), (0.0, 2.0 * dy)],
    );
    line(
        dw + 3.0 * dx + dd,
        h - dh + 2.0 * dd,
        &[(0.0, -2.0 * dy - dd), (4.0 * dx, 0.0), (0.0, dy - dd)],
    );
    line(
        dw + 7.0 * dx + dd,
        h - dh - dy + dd,
        &[(0.0, -dy + 2.0 * dd), (dx, 0.0), (0.0, dy - dd)],
    );
    line(
        dw + 8.0 * dx + dd,
        h - dh - dy + dd,
        &[(0.0, -dy + 2.0 * dd), (4.0 * dx, 0.0), (0.0, 2.0 * dy - dd)],
    );
    line(
        dw + 12.0 * dx + dd,
        h - dh - dd,
        &[(0.0, -2.0 * dy + 2.0 * dd), (3.0 * dx - 2.0 * dd, 0.0)],
    );

    // Sides.
    let side = [
        (3.0 * dx - dd, 0.0),
        (0.0, 2.0 * dy - 2.0 * dd),
        (-dx + 2.0 * dd, 0.0),
        (0.0, -dy / 2.0),
    ];
    let mirror = |sx: f64, sy: f64| side.map(|(x, y)| (x * sx, y * sy));
    line(dw, dh + 2.0 * dy + dd, &side);
    line(dw, h - (dh + 2.0 * dy + dd), &mirror(1.0, -1.0));
    line(w - dw, dh + 2.0 * dy + dd, &mirror(-1.0, 1.0));
    line(w - dw, h - (dh + 2.0 * dy + dd), &mirror(-1.0, -1.0));

    // Short uprights either side of centre.
    line(dw + 2.0 * dx - dd, dh + 3.5 * dy - dd, &[(0.0, dy + 2.0 * dd)]);
    line(w - dw - 2.0 * dx - dd, dh + 3.5 * dy - dd, &[(0.0, dy + 2.0 * dd)]);

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::BLACK);
        s.set_line_width(dd);
        for (start, deltas) in &notches {
            stroke_rel_polyline(s, *start, deltas);
        }
        Ok(())
    })
}

/// White backing plate for the slicer, drawn before `Upper`.
pub fn slicer_lower<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    fill_rect(
        surface,
        l.dw + 5.8 * l.dx,
        l.dh + 0.6 * l.dy,
        3.4 * l.dx,
        0.8 * l.dy,
        Colour::WHITE,
    );
    Ok(())
}

/// Black track with a light-green bar proportional to [`SlicerTiming::fraction`].
pub fn slicer_upper<S: Surface + ?Sized>(
    surface: &mut S,
    l: &UhdLayout,
    timing: SlicerTiming,
) -> TestCardResult<()> {
    let sz = timing.fraction()?;
    let x = l.dw + 6.4 * l.dx;
    let y = l.dh + 0.8 * l.dy;
    fill_rect(surface, x, y, 2.2 * l.dx, 0.4 * l.dy, Colour::BLACK);
    if sz > 0.0001 {
        fill_rect(
            surface,
            x + 10.0,
            y + 10.0,
            (2.2 * l.dx - 20.0) * sz,
            0.4 * l.dy - 20.0,
            Colour::LIGHT_GREEN,
        );
    }
    Ok(())
}

/// Calibration marks, ramps, colour borders and centre markers.
pub fn top<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    corner_marks(surface, l)?;
    left_ramp(surface, l);
    resolution_wedge(surface, l)?;

    fill_rect(surface, 0.0, l.h - l.dh, l.w, l.dh, Colour::BLACK);

    fill_rect(surface, 0.0, 0.0, l.dw2, l.dh, Colour::WHITE);
    fill_rect(surface, l.w - l.dw2, 0.0, l.dw2, l.dh, Colour::WHITE);
    fill_rect(surface, l.w - l.dw, l.h - l.dh, l.dw, l.dh, Colour::WHITE);

    colour_bars(
        surface,
        rect(l.dw2, 0.0, l.w - l.dw2, l.dh),
        &[
            Colour::YELLOW,
            Colour::CYAN,
            Colour::GREEN,
            Colour::MAGENTA,
            Colour::RED,
            Colour::BLUE,
            Colour::BLACK,
        ],
    )?;
    colour_bars_vertical(
        surface,
        rect(0.0, l.dh, l.dw, l.h - l.dh),
        &[
            Colour::LIGHT_GREEN,
            Colour::RED,
            Colour::BLACK,
            Colour::LIGHT_BLUE,
            Colour::DARK_GREEN,
        ],
    )?;
    colour_bars_vertical(
        surface,
        rect(l.w - l.dw, l.dh, l.w, l.h - l.dh),
        &[
            Colour::YELLOW,
            Colour::CYAN,
            Colour::GREEN,
            Colour::MAGENTA,
            Colour::RED,
            Colour::BLUE,
            Colour::BLACK,
        ],
    )?;

    bottom_borders(surface, l)?;

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::WHITE);
        s.set_line_width(10.0);
        s.stroke(&rectangle_path(l.dw, l.dh, l.w - l.dw * 2.0, l.h - l.dh * 2.0));
        Ok(())
    })?;

    centre_markers(surface, l);
    Ok(())
}

/// White plates with nine fine black lines, rotated into each image corner.
fn corner_marks<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    let corners = [
        (l.dw, -l.dh, 45.0),
        (l.w + l.dw * 0.25 + 20.0, l.dh + 10.0, 135.0),
        (l.dw - l.dx * 0.75, l.h - l.dh - 15.0, -45.0),
        (l.w + l.dw * 0.25 - l.dx * 0.7 + 10.0, l.h + l.dh, -135.0),
    ];
    let bw = 2.45 * l.dx;
    let bh = l.dy;

    for (tx, ty, deg) in corners {
        scoped(surface, |s| {
            s.translate(Vec2::new(tx, ty));
            s.rotate(f64::to_radians(deg));
            fill_rect(s, 0.0, 0.0, bw, bh, Colour::WHITE);

            let mut lines = BezPath::new();
            for i in 1..=9 {
                let y = l.dy * f64::from(i) / 10.0;
                push_rel_polyline(&mut lines, Point::new(0.0, y), &[(bw - l.dy / 10.0, 0.0)]);
            }
            s.set_stroke_colour(Colour::BLACK);
            s.set_line_width(10.0);
            s.stroke(&lines);
            Ok(())
        })?;
    }
    Ok(())
}

/// Seven grey steps from white down to black.
fn left_ramp<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) {
    const ROWS: usize = 7;
    let x = l.dw + 3.0 * l.dx + 5.0;
    let mut y = l.dh + 2.0 * l.dy + 5.0;
    let dc = 256.0 / (ROWS - 1) as f64;
    let cdy = (4.0 * l.dy - 10.0) / ROWS as f64;

    let mut c: f64 = 255.0;
    for _ in 0..ROWS {
        fill_rect(surface, x, y, l.dx - 10.0, cdy, Colour::grey(c as i32));
        y += cdy;
        c = (c - dc).max(0.0);
    }
}

/// Six rows of black lines, each row roughly twice as dense as the last.
fn resolution_wedge<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    const ROWS: usize = 6;
    let x = l.dw + 11.0 * l.dx + 5.0;
    let y1 = l.dh + 2.0 * l.dy + 8.0;
    let cdy = (4.0 * l.dy - 10.0) / ROWS as f64;

    fill_rect(surface, x, y1, l.dx - 10.0, cdy * ROWS as f64, Colour::WHITE);

    scoped(surface, |s| {
        s.set_stroke_colour(Colour::BLACK);
        let mut y = y1;
        let mut cols: u32 = 7;
        for _ in 0..ROWS {
            let cdx = (l.dx - 15.0) / f64::from(cols);
            let mut cx = if cols % 2 == 0 { cdx / 2.0 } else { 0.0 };

            let mut row = BezPath::new();
            for _ in 0..=cols {
                push_rel_polyline(&mut row, Point::new(x + cx + 5.0, y), &[(0.0, cdy)]);
                cx += cdx;
            }
            s.set_line_width(cdx / 2.0);
            s.stroke(&row);

            y += cdy;
            cols += cols - 1;
        }

        s.set_stroke_colour(Colour::WHITE);
        s.set_line_width(10.0);
        let mut border = BezPath::new();
        push_rectangle(&mut border, x - 5.0, y1 - 5.0, l.dx, cdy * ROWS as f64 + 5.0);
        s.stroke(&border);
        Ok(())
    })
}

/// Luminance ramps bottom left, four colour gradients bottom right.
fn bottom_borders<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) -> TestCardResult<()> {
    let top = l.h - l.dh;
    let mid = l.h - l.dh_half;

    let mut x = 0.0;
    let dx = (l.w2 - l.dw) / 256.0;
    for i in (1..=255).rev() {
        fill_rect(surface, x, top, dx, l.dh_half, Colour::grey(32 + (255 - i) / 2));
        (x, _) = fill_rect(surface, x, mid, dx, l.dh_half, Colour::grey(i));
    }

    let g1 = Gradient::new(256, Colour::rgb(0x3c, 0xad, 0x7c), Colour::GREY)?;
    let g2 = Gradient::new(256, Colour::GREY, Colour::rgb(0xd2, 0x55, 0x80))?;
    let g3 = Gradient::new(256, Colour::rgb(0x82, 0x96, 0x00), Colour::GREY)?;
    let g4 = Gradient::new(256, Colour::GREY, Colour::rgb(0x7a, 0x6b, 0xf1))?;

    let mut x = l.w2 + l.dw;
    let mut dw = (l.w2 + l.dw2) / 2.0;
    let dx = dw / 256.0;
    dw -= l.dw2;
    let ramps = g1.iter().zip(g2.iter()).zip(g3.iter()).zip(g4.iter());
    for (((c1, c2), c3), c4) in ramps {
        fill_rect(surface, x, top, dx, l.dh_half, c1);
        fill_rect(surface, x + dw, top, dx, l.dh_half, c2);
        fill_rect(surface, x, mid, dx, l.dh_half, c3);
        fill_rect(surface, x + dw, mid, dx, l.dh_half, c4);
        // Steps overlap by one unit.
        x = x + dx - 1.0;
    }
    Ok(())
}

/// Diamonds and triangles on the horizontal and vertical centre lines.
fn centre_markers<S: Surface + ?Sized>(surface: &mut S, l: &UhdLayout) {
    let dia_dw = l.dw - 12.0;
    let diamond = [
        (l.dw, -l.dh_two_thirds),
        (dia_dw, l.dh_two_thirds),
        (-dia_dw, l.dh_two_thirds),
    ];
    for x in [
        0.0,
        l.dw2 - 15.0,
        l.w - l.dw2,
        l.w - l.dw2 - l.dw2 + 17.0,
    ] {
        fill_poly_rel(surface, Colour::WHITE, Point::new(x, l.h2), &diamond);
    }

    fill_poly_rel(
        surface,
        Colour::WHITE,
        Point::new(l.dw2 * 2.0 - 30.0, l.h2),
        &[(l.dw - 2.0, -l.dh_two_thirds), (0.0, l.dh_two_thirds * 2.0)],
    );
    fill_poly_rel(
        surface,
        Colour::WHITE,
        Point::new(l.w - l.dw2 * 2.0 + 30.0 - 12.0, l.h2),
        &[(-dia_dw + 2.0, -l.dh_two_thirds), (0.0, l.dh_two_thirds * 2.0)],
    );

    fill_poly_rel(
        surface,
        Colour::WHITE,
        Point::new(l.w2, l.h - 1.0),
        &[(-l.dh / 2.0, -l.dh), (l.dh, 0.0)],
    );
    fill_poly_rel(
        surface,
        Colour::WHITE,
        Point::new(l.w2, 0.0),
        &[(-l.dh / 2.0, l.dh), (l.dh, 0.0)],
    );
}
