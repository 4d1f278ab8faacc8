//! EBU full-field colour bars, with an optional trailing black bar.

use crate::colour::Colour;
use crate::compose::colour_bars;
use crate::foundation::error::TestCardResult;
use crate::surface::Surface;

pub(crate) const BARS: [Colour; 7] = [
    Colour::WHITE,
    Colour::rgb(0xc0, 0xc0, 0x00),
    Colour::rgb(0x00, 0xc0, 0xc0),
    Colour::rgb(0x00, 0xc0, 0x00),
    Colour::rgb(0xc0, 0x00, 0xc0),
    Colour::rgb(0xc0, 0x00, 0x00),
    Colour::rgb(0x00, 0x00, 0xc0),
];

/// EBU 75% colour bars over the full frame.
pub fn ebu<S: Surface + ?Sized>(surface: &mut S) -> TestCardResult<()> {
    let bounds = surface.bounds();
    surface.clear(Colour::BLACK);
    colour_bars(surface, bounds, &BARS)?;
    Ok(())
}

/// EBU bars with a trailing black bar (eight bands).
pub fn ebu_with_black<S: Surface + ?Sized>(surface: &mut S) -> TestCardResult<()> {
    let mut bars = BARS.to_vec();
    bars.push(Colour::BLACK);
    let bounds = surface.bounds();
    surface.clear(Colour::BLACK);
    colour_bars(surface, bounds, &bars)?;
    Ok(())
}
