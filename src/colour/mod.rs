//! Colour model: parsing of hex and named colour specs, grey ramps and linear gradients.

mod names;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{TestCardError, TestCardResult};
use crate::foundation::math::lerp_channel;

/// Straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const TRANSPARENT: Colour = Colour::rgba(0, 0, 0, 0);
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(0xff, 0xff, 0xff);
    pub const GREY: Colour = Colour::rgb(0x80, 0x80, 0x80);
    pub const SILVER: Colour = Colour::rgb(0xc0, 0xc0, 0xc0);
    pub const LIGHT_GREY: Colour = Colour::rgb(0xd3, 0xd3, 0xd3);
    pub const RED: Colour = Colour::rgb(0xff, 0, 0);
    pub const GREEN: Colour = Colour::rgb(0, 0x80, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 0xff);
    pub const YELLOW: Colour = Colour::rgb(0xff, 0xff, 0);
    pub const CYAN: Colour = Colour::rgb(0, 0xff, 0xff);
    pub const MAGENTA: Colour = Colour::rgb(0xff, 0, 0xff);
    pub const LIGHT_GREEN: Colour = Colour::rgb(0x90, 0xee, 0x90);
    pub const LIGHT_BLUE: Colour = Colour::rgb(0xad, 0xd8, 0xe6);
    pub const DARK_GREEN: Colour = Colour::rgb(0, 0x64, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey with every channel set to `intensity`, clamped to `0..=255`.
    pub fn grey(intensity: i32) -> Self {
        let v = intensity.clamp(0, 255) as u8;
        Self::rgb(v, v, v)
    }

    /// Parse `#RRGGBBAA`, `#RRGGBB`, `#RGBA`, `#RGB`, an SVG colour name or `transparent`.
    ///
    /// Names are matched case-insensitively after trimming surrounding whitespace.
    pub fn parse(spec: &str) -> TestCardResult<Self> {
        if spec.is_empty() {
            return Err(TestCardError::colour_spec("empty colour spec"));
        }
        match spec.strip_prefix('#') {
            Some(hex) => parse_hex(spec, hex),
            None => Self::named(spec).ok_or_else(|| {
                TestCardError::colour_spec(format!("unknown colour name \"{spec}\""))
            }),
        }
    }

    /// Look up an SVG colour name; `transparent` maps to fully transparent black.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        names::NAMED
            .binary_search_by(|(n, _)| n.cmp(&name.as_str()))
            .ok()
            .map(|i| names::NAMED[i].1)
    }

    /// First SVG name (alphabetically) whose value equals this colour.
    pub fn name(self) -> Option<&'static str> {
        if self == Self::TRANSPARENT {
            return Some("transparent");
        }
        names::NAMED
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(n, _)| *n)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn parse_hex(spec: &str, hex: &str) -> TestCardResult<Colour> {
    let nibbles = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| TestCardError::colour_spec(format!("invalid hex digit in \"{spec}\"")))?;

    let byte = |i: usize| (nibbles[i] << 4) | nibbles[i + 1];
    // Short forms scale each digit by 17 (0xF -> 0xFF).
    let short = |i: usize| nibbles[i] * 17;

    match nibbles.len() {
        8 => Ok(Colour::rgba(byte(0), byte(2), byte(4), byte(6))),
        6 => Ok(Colour::rgb(byte(0), byte(2), byte(4))),
        4 => Ok(Colour::rgba(short(0), short(1), short(2), short(3))),
        3 => Ok(Colour::rgb(short(0), short(1), short(2))),
        _ => Err(TestCardError::colour_spec(format!(
            "\"{spec}\" must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA"
        ))),
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            ),
        }
    }
}

impl std::str::FromStr for Colour {
    type Err = TestCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = TestCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Colour> for String {
    fn from(value: Colour) -> Self {
        value.to_string()
    }
}

/// A fixed run of colours stepping linearly from one colour to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    colours: Vec<Colour>,
}

impl Gradient {
    /// `steps` colours where the first is `from`, the last is `to`, and each channel
    /// moves linearly between them (rounded to nearest).
    pub fn new(steps: usize, from: Colour, to: Colour) -> TestCardResult<Self> {
        if steps == 0 {
            return Err(TestCardError::invalid_argument("gradient needs at least one step"));
        }
        let colours = (0..steps)
            .map(|i| Colour {
                r: lerp_channel(from.r, to.r, i, steps),
                g: lerp_channel(from.g, to.g, i, steps),
                b: lerp_channel(from.b, to.b, i, steps),
                a: lerp_channel(from.a, to.a, i, steps),
            })
            .collect();
        Ok(Self { colours })
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn as_slice(&self) -> &[Colour] {
        &self.colours
    }

    pub fn iter(&self) -> impl Iterator<Item = Colour> + '_ {
        self.colours.iter().copied()
    }
}

impl std::ops::Index<usize> for Gradient {
    type Output = Colour;

    fn index(&self, index: usize) -> &Self::Output {
        &self.colours[index]
    }
}
