use {
    serde::{Deserialize, Serialize},
    std::fmt::{self, Write},
};

/// An 8-bit RGBA color.
///
/// Colors are compared by their exact channel values, so two colors that
/// only differ in one bit of one channel are different colors.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "&str", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, u8::MAX])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Converts 16-bit channel samples to a color.
    /// Each sample is scaled down by integer division.
    pub const fn from_wide([r, g, b, a]: [u16; 4]) -> Self {
        const SCALE: u16 = u16::MAX / u8::MAX as u16;

        Self([
            (r / SCALE) as u8,
            (g / SCALE) as u8,
            (b / SCALE) as u8,
            (a / SCALE) as u8,
        ])
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 4] {
        self.0
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0[3]
    }
}

impl From<[u8; 4]> for Color {
    fn from(col: [u8; 4]) -> Self {
        Self(col)
    }
}

impl From<Color> for [u8; 4] {
    fn from(Color(col): Color) -> Self {
        col
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn to_hex(v: u8) -> u8 {
            match v {
                0..=9 => b'0' + v,
                10..=15 => b'A' + v - 10,
                _ => unreachable!(),
            }
        }

        let bytes = if self.alpha() == u8::MAX {
            &self.0[..3]
        } else {
            &self.0[..]
        };

        for &byte in bytes {
            let a = byte >> 4;
            let b = byte & 0b1111;
            f.write_char(to_hex(a) as char)?;
            f.write_char(to_hex(b) as char)?;
        }

        Ok(())
    }
}

impl<'a> TryFrom<&'a str> for Color {
    type Error = ParseError<'a>;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        fn from_hex(v: u8) -> Option<u8> {
            match v {
                b'0'..=b'9' => Some(v - b'0'),
                b'a'..=b'f' => Some(v - b'a' + 10),
                b'A'..=b'F' => Some(v - b'A' + 10),
                _ => None,
            }
        }

        let bytes = s.as_bytes();
        if bytes.len() != 6 && bytes.len() != 8 {
            return Err(ParseError(s));
        }

        let mut col = [u8::MAX; 4];
        for (pair, colbyte) in bytes.chunks(2).zip(&mut col) {
            let &[a, b] = pair else {
                return Err(ParseError(s));
            };

            *colbyte =
                (from_hex(a).ok_or(ParseError(s))? << 4) | from_hex(b).ok_or(ParseError(s))?;
        }

        Ok(Self(col))
    }
}

impl From<Color> for String {
    fn from(col: Color) -> Self {
        col.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError<'a>(&'a str);

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to parse {:?} to rgba color", self.0)
    }
}

/// A pixel that can be read as a [`Color`].
pub trait Sample {
    fn color(&self) -> Color;
}

impl Sample for image::Rgba<u8> {
    fn color(&self) -> Color {
        Color(self.0)
    }
}

impl Sample for image::Rgb<u8> {
    fn color(&self) -> Color {
        let [r, g, b] = self.0;
        Color::rgb(r, g, b)
    }
}

impl Sample for image::Rgba<u16> {
    fn color(&self) -> Color {
        Color::from_wide(self.0)
    }
}

impl Sample for image::Rgb<u16> {
    fn color(&self) -> Color {
        let [r, g, b] = self.0;
        Color::from_wide([r, g, b, u16::MAX])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        let str = "FF0023";
        let col = Color::try_from(str).expect("parse color");
        assert_eq!(col, Color([0xFF, 0x00, 0x23, 0xFF]));
    }

    #[test]
    fn from_str_with_alpha() {
        let col = Color::try_from("ff002380").expect("parse color");
        assert_eq!(col, Color([0xFF, 0x00, 0x23, 0x80]));
    }

    #[test]
    fn from_invalid_str() {
        assert_eq!(Color::try_from("FF00"), Err(ParseError("FF00")));
        assert_eq!(Color::try_from("FF00GG"), Err(ParseError("FF00GG")));
        assert_eq!(Color::try_from("FF002"), Err(ParseError("FF002")));
    }

    #[test]
    fn to_str() {
        let col = Color([0xFF, 0x00, 0x23, 0xFF]);
        let str = String::from(col);
        assert_eq!(str, "FF0023");

        let col = Color([0xFF, 0x00, 0x23, 0x00]);
        assert_eq!(col.to_string(), "FF002300");
    }

    #[test]
    fn wide_samples() {
        assert_eq!(Color::from_wide([0xFFFF; 4]), Color([0xFF; 4]));
        assert_eq!(Color::from_wide([0, 256, 257, 514]), Color([0, 0, 1, 2]));
    }

    #[test]
    fn rgb_samples_are_opaque() {
        assert_eq!(image::Rgb([1u8, 2, 3]).color(), Color([1, 2, 3, 0xFF]));
        assert_eq!(image::Rgb([0u16, 0, 0xFFFF]).color(), Color([0, 0, 0xFF, 0xFF]));
    }
}
