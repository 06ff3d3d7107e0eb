use crate::consts::{MEDIA_AND, MOBILE_MAX_WIDTH, PIXEL_UNIT};
use crate::prelude::*;
use crate::{ParseError, Signal};
use std::str::FromStr;

/// A single width condition inside a media query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MediaFeature {
    #[display(fmt = "(min-width: {_0}px)")]
    MinWidth(u32),
    #[display(fmt = "(max-width: {_0}px)")]
    MaxWidth(u32),
}

impl MediaFeature {
    pub const fn matches(self, width: u32) -> bool {
        match self {
            Self::MinWidth(min) => width >= min,
            Self::MaxWidth(max) => width <= max,
        }
    }
}

/// Width-only media query such as `screen and (max-width: 480px)`.
/// All conditions must hold; an empty query matches every width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaQuery {
    features: Vec<MediaFeature>,
}

impl MediaQuery {
    /// Query requiring every feature in `features`
    pub fn new(features: Vec<MediaFeature>) -> Self {
        Self { features }
    }

    /// Conditions, in written order
    pub fn features(&self) -> &[MediaFeature] {
        &self.features
    }

    /// Whether every condition holds at `width`
    pub fn matches(&self, width: u32) -> bool {
        self.features.iter().all(|feature| feature.matches(width))
    }

    fn parse_feature(part: &str) -> Result<MediaFeature, ParseError> {
        let inner = part
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseError::InvalidMediaQuery(part.to_owned()))?;
        let (name, value) = inner
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidMediaQuery(part.to_owned()))?;

        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "min-width" => Ok(MediaFeature::MinWidth(Self::parse_pixels(value)?)),
            "max-width" => Ok(MediaFeature::MaxWidth(Self::parse_pixels(value)?)),
            other => Err(ParseError::UnsupportedMediaFeature(other.to_owned())),
        }
    }

    fn parse_pixels(value: &str) -> Result<u32, ParseError> {
        value
            .strip_suffix(PIXEL_UNIT)
            .and_then(|number| number.trim().parse().ok())
            .ok_or_else(|| ParseError::InvalidLength(value.to_owned()))
    }
}

impl FromStr for MediaQuery {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidMediaQuery(s.to_owned()));
        }

        let features = trimmed
            .split(MEDIA_AND)
            .map(str::trim)
            .enumerate()
            .filter(|(i, part)| !(*i == 0 && matches!(*part, "all" | "screen")))
            .map(|(_, part)| Self::parse_feature(part))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { features })
    }
}

impl std::fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.features.is_empty() {
            return f.write_str("all");
        }
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str(MEDIA_AND)?;
            }
            write!(f, "{feature}")?;
        }
        Ok(())
    }
}

/// A media query evaluated against a live viewport width
#[derive(Debug, Clone)]
pub struct MediaQueryFlag {
    query: MediaQuery,
    width: Signal<u32>,
}

impl MediaQueryFlag {
    /// Flag tracking `width` against `query`
    pub fn new(query: MediaQuery, width: Signal<u32>) -> Self {
        Self { query, width }
    }

    /// Query being evaluated
    pub const fn query(&self) -> &MediaQuery {
        &self.query
    }

    /// Whether the query holds for the viewport width right now
    pub fn matches(&self) -> bool {
        self.width.with(|width| self.query.matches(*width))
    }
}

/// Flag that is set while the viewport is phone-sized (`<= 480px`)
pub fn is_mobile(width: Signal<u32>) -> MediaQueryFlag {
    MediaQueryFlag::new(
        MediaQuery::new(vec![MediaFeature::MaxWidth(MOBILE_MAX_WIDTH)]),
        width,
    )
}
