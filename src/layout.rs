//! Geometry shared by the cards and clocks.
//!
//! Every layout is expressed in reference units (the 4K reference canvas by default);
//! rasterizers scale to the output size.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{TestCardError, TestCardResult};

/// Rectangle from two corners in any order.
pub fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
    Rect::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
}

/// Reference canvas sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Hd1080,
    #[default]
    #[serde(rename = "4k")]
    Uhd4k,
}

impl Resolution {
    pub fn size(self) -> Size {
        match self {
            Self::Hd720 => Size::new(1280.0, 720.0),
            Self::Hd1080 => Size::new(1920.0, 1080.0),
            Self::Uhd4k => Size::new(3840.0, 2160.0),
        }
    }
}

/// Pixel size of a raster covering `reference` at `scale`, at least 1x1.
pub fn raster_size(reference: Size, scale: f64) -> TestCardResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TestCardError::invalid_argument(format!(
            "scale must be finite and > 0, got {scale}"
        )));
    }
    let w = (reference.width * scale).round().max(1.0);
    let h = (reference.height * scale).round().max(1.0);
    if w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
        return Err(TestCardError::invalid_argument(format!(
            "raster {w}x{h} exceeds the {0}x{0} limit",
            u16::MAX
        )));
    }
    Ok((w as u32, h as u32))
}

/// The three stacked SMPTE bands: 336/504, 96/504 and the remainder of the height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmpteBands {
    pub upper: Rect,
    pub middle: Rect,
    pub lower: Rect,
}

impl SmpteBands {
    pub fn new(width: f64, height: f64) -> Self {
        let upper = rect(0.0, 0.0, width, height * 336.0 / 504.0);
        let middle = rect(0.0, upper.y1, width, upper.y1 + height * 96.0 / 504.0);
        let lower = rect(0.0, middle.y1, width, height);
        Self {
            upper,
            middle,
            lower,
        }
    }
}

/// 16x12 cell grid of the BBC "unknown" card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BbcGrid {
    pub width: f64,
    pub height: f64,
    pub cell_w: f64,
    pub cell_h: f64,
    /// Half a cell; grid lines run through cell centres.
    pub offset_x: f64,
    pub offset_y: f64,
}

impl BbcGrid {
    pub const COLS: usize = 16;
    pub const ROWS: usize = 12;

    pub fn new(width: f64, height: f64) -> Self {
        let cell_w = width / Self::COLS as f64;
        let cell_h = height / Self::ROWS as f64;
        Self {
            width,
            height,
            cell_w,
            cell_h,
            offset_x: cell_w / 2.0,
            offset_y: cell_h / 2.0,
        }
    }
}

/// Derived measures of the UHD card; every layer is positioned from these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UhdLayout {
    pub w: f64,
    pub h: f64,
    pub w2: f64,
    pub h2: f64,
    /// Border column width, `w / 30`.
    pub dw: f64,
    /// Border row height, `h / 27`.
    pub dh: f64,
    pub dw2: f64,
    pub dh2: f64,
    pub dh_half: f64,
    pub dh_two_thirds: f64,
    /// Inner grid column pitch.
    pub dx: f64,
    /// Inner grid row pitch.
    pub dy: f64,
    /// Inset of the broken fifth grid row.
    pub dd: f64,
}

impl UhdLayout {
    pub fn new(w: f64, h: f64) -> Self {
        let dw = w / 30.0;
        let dh = h / 27.0;
        let dw2 = dw * 2.0;
        let dh2 = dh * 2.0;
        let dx = (w - dw2) / 15.0;
        Self {
            w,
            h,
            w2: w / 2.0,
            h2: h / 2.0,
            dw,
            dh,
            dw2,
            dh2,
            dh_half: dh / 2.0,
            dh_two_thirds: dh * 2.0 / 3.0,
            dx,
            dy: (h - dh2) / 8.0,
            dd: dw + 2.0 * dx,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Radius and centre of a clock dial.
///
/// Angles follow the drawing convention: 0 degrees points right and values grow
/// clockwise on screen (y down). Second `s` sits at `360 * (45 - s) / 60`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockGeometry {
    pub centre: Point,
    /// Dial radius after the fixed inset.
    pub radius: f64,
    pub radius_inner: f64,
}

impl ClockGeometry {
    /// Inset between the supplied radius and the drawn dial.
    pub const INSET: f64 = 60.0;
    pub const TICKS: u32 = 60;

    pub fn new(centre: Point, radius: f64) -> Self {
        let radius = radius - Self::INSET;
        Self {
            centre,
            radius,
            radius_inner: radius / 2.0,
        }
    }

    pub fn point_at(&self, radius: f64, angle_deg: f64) -> Point {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Point::new(self.centre.x + radius * cos, self.centre.y + radius * sin)
    }
}

/// Drawing angle, in degrees, of second `s` on a 60-tick dial.
///
/// Screen space is y-down, so this is `360·(45 − s)/60` reduced to `(-90, 270]`.
pub fn tick_angle_deg(second: f64) -> f64 {
    270.0 - dial_angle_deg(second)
}

/// Dial position of second `s`, measured counter-clockwise from 12 o'clock in `[0, 360)`.
///
/// The dial runs counter-clockwise on screen: second 15 sits at 90 (9 o'clock) and
/// second 45 at 270 (3 o'clock), so a countdown hand sweeps clockwise.
pub fn dial_angle_deg(second: f64) -> f64 {
    (360.0 / f64::from(ClockGeometry::TICKS) * second).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalizes_corners() {
        assert_eq!(rect(10.0, 20.0, 0.0, 5.0), Rect::new(0.0, 5.0, 10.0, 20.0));
    }

    #[test]
    fn smpte_bands_partition_height() {
        let b = SmpteBands::new(3840.0, 2160.0);
        assert_eq!(b.upper.y1, b.middle.y0);
        assert_eq!(b.middle.y1, b.lower.y0);
        assert_eq!(b.lower.y1, 2160.0);
        assert!((b.upper.height() - 1440.0).abs() < 1e-9);
        assert!((b.middle.height() - 411.428_571).abs() < 1e-3);
    }

    #[test]
    fn uhd_layout_at_4k() {
        let l = UhdLayout::new(3840.0, 2160.0);
        assert_eq!(l.dw, 128.0);
        assert_eq!(l.dh, 80.0);
        assert!((l.dx - (3840.0 - 256.0) / 15.0).abs() < 1e-9);
        assert_eq!(l.dy, (2160.0 - 160.0) / 8.0);
        assert!((l.dd - (128.0 + 2.0 * l.dx)).abs() < 1e-9);
    }

    #[test]
    fn resolution_presets_parse() {
        let r: Resolution = serde_json::from_str("\"1080p\"").unwrap();
        assert_eq!(r.size(), Size::new(1920.0, 1080.0));
        assert_eq!(serde_json::to_string(&Resolution::Uhd4k).unwrap(), "\"4k\"");
    }

    #[test]
    fn raster_size_scales_and_validates() {
        let s = Resolution::Uhd4k.size();
        assert_eq!(raster_size(s, 1.0).unwrap(), (3840, 2160));
        assert_eq!(raster_size(s, 0.05).unwrap(), (192, 108));
        assert!(raster_size(s, 0.0).is_err());
        assert!(raster_size(s, f64::NAN).is_err());
        assert!(raster_size(s, 100.0).is_err());
    }

    #[test]
    fn angle_conventions_agree() {
        for s in 0..60 {
            let s = f64::from(s);
            // Screen angle is clockwise from 3 o'clock; dial angle is ccw from 12.
            let clockwise_from_top = (tick_angle_deg(s) + 90.0).rem_euclid(360.0);
            let dial = (360.0 - clockwise_from_top).rem_euclid(360.0);
            assert!(
                (dial - dial_angle_deg(s)).abs() < 1e-9,
                "second {s}: {dial} vs {}",
                dial_angle_deg(s)
            );
        }
        assert_eq!(dial_angle_deg(0.0), 0.0);
        assert_eq!(dial_angle_deg(15.0), 90.0);
        assert_eq!(dial_angle_deg(45.0), 270.0);
        assert_eq!(tick_angle_deg(45.0), 0.0);
        assert_eq!(tick_angle_deg(75.0), tick_angle_deg(15.0));
    }

    #[test]
    fn clock_geometry_insets_radius() {
        let g = ClockGeometry::new(Point::new(100.0, 100.0), 160.0);
        assert_eq!(g.radius, 100.0);
        assert_eq!(g.radius_inner, 50.0);
        let top = g.point_at(g.radius, tick_angle_deg(0.0));
        assert!((top.x - 100.0).abs() < 1e-9);
        assert!((top.y - 0.0).abs() < 1e-9);
    }
}
