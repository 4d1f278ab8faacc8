//! SMPTE colour bars: main bars, the reversed middle band and a PLUGE set.

use crate::colour::Colour;
use crate::compose::colour_bars;
use crate::foundation::error::TestCardResult;
use crate::layout::{SmpteBands, rect};
use crate::surface::Surface;

const TOP_YELLOW: Colour = Colour::rgb(0xc0, 0xc0, 0x00);
const TOP_CYAN: Colour = Colour::rgb(0x00, 0xc0, 0xc0);
const TOP_GREEN: Colour = Colour::rgb(0x00, 0xc0, 0x00);
const TOP_MAGENTA: Colour = Colour::rgb(0xc0, 0x00, 0xc0);
const TOP_RED: Colour = Colour::rgb(0xc0, 0x00, 0x00);
const TOP_BLUE: Colour = Colour::rgb(0x00, 0x00, 0xc0);

pub(crate) const UPPER: [Colour; 7] = [
    Colour::WHITE,
    TOP_YELLOW,
    TOP_CYAN,
    TOP_GREEN,
    TOP_MAGENTA,
    TOP_RED,
    TOP_BLUE,
];

pub(crate) const MIDDLE: [Colour; 7] = [
    TOP_BLUE,
    Colour::BLACK,
    TOP_MAGENTA,
    Colour::BLACK,
    TOP_CYAN,
    Colour::BLACK,
    Colour::SILVER,
];

pub(crate) const LOWER: [Colour; 5] = [
    Colour::rgb(0x00, 0x21, 0x4c),
    Colour::WHITE,
    Colour::rgb(0x32, 0x00, 0x6a),
    Colour::BLACK,
    Colour::BLACK,
];

/// Below-black, black, above-black set inside the last lower band.
pub(crate) const PLUGE: [Colour; 4] = [
    Colour::rgb(0x09, 0x09, 0x09),
    Colour::BLACK,
    Colour::rgb(0x1d, 0x1d, 0x1d),
    Colour::BLACK,
];

/// SMPTE colour bars: three stacked bands plus the PLUGE set in the last lower bar.
pub fn smpte<S: Surface + ?Sized>(surface: &mut S) -> TestCardResult<()> {
    let size = surface.size();
    let bands = SmpteBands::new(size.width, size.height);
    surface.clear(Colour::BLACK);

    colour_bars(surface, bands.upper, &UPPER)?;
    colour_bars(surface, bands.middle, &MIDDLE)?;
    let lower = colour_bars(surface, bands.lower, &LOWER)?;

    let pluge = rect(
        bands.lower.x0 + lower.offset(lower.count - 1),
        bands.lower.y0,
        bands.lower.x1,
        bands.lower.y1,
    );
    colour_bars(surface, pluge, &PLUGE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Rect, Size};
    use crate::render::RecordingSurface;
    use kurbo::Shape;

    #[test]
    fn draws_all_bands_in_order() {
        let mut s = RecordingSurface::new(Size::new(3840.0, 2160.0));
        smpte(&mut s).unwrap();
        let colours: Vec<Colour> = s.fills().map(|(_, c)| c).collect();
        let expected: Vec<Colour> = UPPER
            .iter()
            .chain(&MIDDLE)
            .chain(&LOWER)
            .chain(&PLUGE)
            .copied()
            .collect();
        assert_eq!(colours, expected);
    }

    #[test]
    fn pluge_spans_last_lower_band() {
        let mut s = RecordingSurface::new(Size::new(3840.0, 2160.0));
        smpte(&mut s).unwrap();
        let boxes: Vec<Rect> = s.fills().map(|(p, _)| p.bounding_box()).collect();
        let last_lower = boxes[7 + 7 + 4];
        let pluge: Vec<Rect> = boxes[7 + 7 + 5..].to_vec();
        assert_eq!(pluge.len(), 4);
        assert!((pluge[0].x0 - last_lower.x0).abs() < 1e-9);
        assert_eq!(pluge[3].x1, 3840.0);
        assert_eq!(pluge[0].y1, 2160.0);
    }
}
