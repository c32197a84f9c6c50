// Style module: the fixed set of stylistic filters the remote service
// understands. The wire tag is what goes into the `style` form field, the
// label is what the menu shows.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the stylistic transforms offered by the stylization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Ghibli,
    Comic,
    ThreeD,
    Pixar,
    Disney,
}

impl Style {
    /// Every style, in the order the menu lists them.
    pub const ALL: [Style; 5] = [
        Style::Ghibli,
        Style::Comic,
        Style::ThreeD,
        Style::Pixar,
        Style::Disney,
    ];

    /// Identifier sent to the service.
    pub fn tag(self) -> &'static str {
        match self {
            Style::Ghibli => "ghibli",
            Style::Comic => "comic",
            Style::ThreeD => "3d",
            Style::Pixar => "pixar",
            Style::Disney => "disney",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Style::Ghibli => "Ghibli",
            Style::Comic => "Comic Book",
            Style::ThreeD => "3D",
            Style::Pixar => "Pixar",
            Style::Disney => "Disney",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Style {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownStyle(wanted.to_string()))
    }
}
