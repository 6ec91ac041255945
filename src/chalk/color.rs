//! Terminal colours and the SGR wrapping algorithm.

use std::fmt;
use std::str::FromStr;

use super::ChalkError;

/// A terminal style or colour.
///
/// The declaration order is the order the generator emits functions in.
///
/// # Examples
///
/// ```rust
/// use chainwrap::chalk::Color;
///
/// assert_eq!(Color::Red.paint("hi"), "\x1b[31mhi\x1b[39m");
/// assert_eq!(Color::Red.paint(""), "");
/// assert_eq!("bgBlueBright".parse::<Color>().unwrap(), Color::BgBlueBright);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Color {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Inverse,
    Hidden,
    Strikethrough,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,
    BlackBright,
    RedBright,
    GreenBright,
    YellowBright,
    BlueBright,
    MagentaBright,
    CyanBright,
    WhiteBright,
    BgBlackBright,
    BgRedBright,
    BgGreenBright,
    BgYellowBright,
    BgBlueBright,
    BgMagentaBright,
    BgCyanBright,
    BgWhiteBright,
}

impl Color {
    /// Every colour, in generation order.
    pub const ALL: [Self; 41] = [
        Self::Reset,
        Self::Bold,
        Self::Dim,
        Self::Italic,
        Self::Underline,
        Self::Inverse,
        Self::Hidden,
        Self::Strikethrough,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Gray,
        Self::BgBlack,
        Self::BgRed,
        Self::BgGreen,
        Self::BgYellow,
        Self::BgBlue,
        Self::BgMagenta,
        Self::BgCyan,
        Self::BgWhite,
        Self::BlackBright,
        Self::RedBright,
        Self::GreenBright,
        Self::YellowBright,
        Self::BlueBright,
        Self::MagentaBright,
        Self::CyanBright,
        Self::WhiteBright,
        Self::BgBlackBright,
        Self::BgRedBright,
        Self::BgGreenBright,
        Self::BgYellowBright,
        Self::BgBlueBright,
        Self::BgMagentaBright,
        Self::BgCyanBright,
        Self::BgWhiteBright,
    ];

    /// The camelCase name used for the generated function.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Inverse => "inverse",
            Self::Hidden => "hidden",
            Self::Strikethrough => "strikethrough",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::BgBlack => "bgBlack",
            Self::BgRed => "bgRed",
            Self::BgGreen => "bgGreen",
            Self::BgYellow => "bgYellow",
            Self::BgBlue => "bgBlue",
            Self::BgMagenta => "bgMagenta",
            Self::BgCyan => "bgCyan",
            Self::BgWhite => "bgWhite",
            Self::BlackBright => "blackBright",
            Self::RedBright => "redBright",
            Self::GreenBright => "greenBright",
            Self::YellowBright => "yellowBright",
            Self::BlueBright => "blueBright",
            Self::MagentaBright => "magentaBright",
            Self::CyanBright => "cyanBright",
            Self::WhiteBright => "whiteBright",
            Self::BgBlackBright => "bgBlackBright",
            Self::BgRedBright => "bgRedBright",
            Self::BgGreenBright => "bgGreenBright",
            Self::BgYellowBright => "bgYellowBright",
            Self::BgBlueBright => "bgBlueBright",
            Self::BgMagentaBright => "bgMagentaBright",
            Self::BgCyanBright => "bgCyanBright",
            Self::BgWhiteBright => "bgWhiteBright",
        }
    }

    /// The SGR parameters that open and close this style.
    pub const fn codes(self) -> (u8, u8) {
        match self {
            Self::Reset => (0, 0),
            Self::Bold => (1, 22),
            Self::Dim => (2, 22),
            Self::Italic => (3, 23),
            Self::Underline => (4, 24),
            Self::Inverse => (7, 27),
            Self::Hidden => (8, 28),
            Self::Strikethrough => (9, 29),
            Self::Black => (30, 39),
            Self::Red => (31, 39),
            Self::Green => (32, 39),
            Self::Yellow => (33, 39),
            Self::Blue => (34, 39),
            Self::Magenta => (35, 39),
            Self::Cyan => (36, 39),
            Self::White => (37, 39),
            Self::Gray | Self::BlackBright => (90, 39),
            Self::BgBlack => (40, 49),
            Self::BgRed => (41, 49),
            Self::BgGreen => (42, 49),
            Self::BgYellow => (43, 49),
            Self::BgBlue => (44, 49),
            Self::BgMagenta => (45, 49),
            Self::BgCyan => (46, 49),
            Self::BgWhite => (47, 49),
            Self::RedBright => (91, 39),
            Self::GreenBright => (92, 39),
            Self::YellowBright => (93, 39),
            Self::BlueBright => (94, 39),
            Self::MagentaBright => (95, 39),
            Self::CyanBright => (96, 39),
            Self::WhiteBright => (97, 39),
            Self::BgBlackBright => (100, 49),
            Self::BgRedBright => (101, 49),
            Self::BgGreenBright => (102, 49),
            Self::BgYellowBright => (103, 49),
            Self::BgBlueBright => (104, 49),
            Self::BgMagentaBright => (105, 49),
            Self::BgCyanBright => (106, 49),
            Self::BgWhiteBright => (107, 49),
        }
    }

    /// The escape sequence that opens this style.
    pub fn open(self) -> String {
        sgr(self.codes().0)
    }

    /// The escape sequence that closes this style.
    pub fn close(self) -> String {
        sgr(self.codes().1)
    }

    /// A replacement for nested close sequences, where reopening needs more
    /// than this style's own open sequence.
    ///
    /// Bold and dim share their close code, so closing one inside the other
    /// has to restore the outer style explicitly.
    pub const fn replacement(self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("\x1b[22m\x1b[1m"),
            Self::Dim => Some("\x1b[22m\x1b[2m"),
            _ => None,
        }
    }

    /// Wraps `text` in this style.
    ///
    /// Empty text stays empty. Any close sequence of this style already inside
    /// `text` is replaced so the style resumes after a nested span ends.
    ///
    /// ```rust
    /// use chainwrap::chalk::Color;
    ///
    /// let inner = format!("a{}b", Color::Blue.paint("x"));
    /// assert_eq!(
    ///     Color::Red.paint(&inner),
    ///     "\x1b[31ma\x1b[34mx\x1b[31mb\x1b[39m"
    /// );
    /// ```
    pub fn paint(self, text: &str) -> String {
        let open = self.open();
        let replace = self.replacement().map_or_else(|| open.clone(), str::to_owned);
        filter_empty(&open, &self.close(), text, &replace)
    }
}

fn sgr(code: u8) -> String {
    format!("\x1b[{code}m")
}

fn filter_empty(open: &str, close: &str, text: &str, replace: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match find_from(text, close, open.len() + 1) {
        Some(index) => format!("{open}{}{close}", replace_close(index, text, close, replace)),
        None => format!("{open}{text}{close}"),
    }
}

fn replace_close(mut index: usize, text: &str, close: &str, replace: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        replaced.push_str(&rest[..index]);
        replaced.push_str(replace);
        rest = &rest[index + close.len()..];
        match rest.find(close) {
            Some(next) => index = next,
            None => {
                replaced.push_str(rest);
                return replaced;
            }
        }
    }
}

// Byte search, so a start offset inside a multi-byte character is harmless.
fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    haystack
        .as_bytes()
        .get(start..)?
        .windows(needle.len())
        .position(|window| window == needle.as_bytes())
        .map(|offset| start + offset)
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ChalkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == name)
            .ok_or_else(|| ChalkError::UnknownColor(name.to_owned()))
    }
}
