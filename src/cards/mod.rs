//! Catalogue of static test cards.

pub mod bbc;
pub mod ebu;
pub mod smpte;
pub mod uhd;

use serde::{Deserialize, Serialize};

use crate::foundation::error::TestCardResult;
use crate::surface::Surface;

pub use bbc::bbc_unknown;
pub use ebu::{ebu, ebu_with_black};
pub use smpte::smpte;
pub use uhd::{SlicerTiming, UhdLayer, uhd, uhd_with_slicer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCard {
    Smpte,
    Ebu,
    EbuWithBlack,
    BbcUnknown,
    Uhd,
}

impl TestCard {
    pub const ALL: [TestCard; 5] = [
        Self::Smpte,
        Self::Ebu,
        Self::EbuWithBlack,
        Self::BbcUnknown,
        Self::Uhd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Smpte => "smpte",
            Self::Ebu => "ebu",
            Self::EbuWithBlack => "ebu_with_black",
            Self::BbcUnknown => "bbc_unknown",
            Self::Uhd => "uhd",
        }
    }

    /// Paint the whole card, replacing anything already on `surface`.
    pub fn draw<S: Surface + ?Sized>(self, surface: &mut S) -> TestCardResult<()> {
        match self {
            Self::Smpte => smpte(surface),
            Self::Ebu => ebu(surface),
            Self::EbuWithBlack => ebu_with_black(surface),
            Self::BbcUnknown => bbc_unknown(surface),
            Self::Uhd => uhd(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::render::{DrawCommand, RecordingSurface};

    #[test]
    fn every_card_clears_first() {
        for card in TestCard::ALL {
            let mut s = RecordingSurface::new(Size::new(1920.0, 1080.0));
            s.set_line_width(3.0);
            card.draw(&mut s).unwrap();
            assert!(
                matches!(s.commands().first(), Some(DrawCommand::Clear(_))),
                "{} did not clear",
                card.name()
            );
        }
    }

    #[test]
    fn names_match_serde() {
        for card in TestCard::ALL {
            let json = serde_json::to_string(&card).unwrap();
            assert_eq!(json, format!("\"{}\"", card.name()));
        }
    }

    #[test]
    fn ebu_variants_differ_by_black_bar() {
        let mut a = RecordingSurface::new(Size::new(800.0, 600.0));
        TestCard::Ebu.draw(&mut a).unwrap();
        let mut b = RecordingSurface::new(Size::new(800.0, 600.0));
        TestCard::EbuWithBlack.draw(&mut b).unwrap();
        assert_eq!(a.fills().count(), 7);
        assert_eq!(b.fills().count(), 8);
        assert_eq!(b.fills().last().map(|(_, c)| c), Some(crate::colour::Colour::BLACK));
    }
}
