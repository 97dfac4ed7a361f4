//! Rating keys, rating values and slider presentation.
//!
//! The question list is fixed at build time: every survey response carries
//! the same seven rating keys, each holding an integer from 0 to 5.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rating keys
// ---------------------------------------------------------------------------

/// One of the fixed survey questions.
///
/// Declaration order is question order, so `BTreeMap<RatingKey, _>` iterates
/// the way the survey form lists its questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatingKey {
    Quality,
    Timeline,
    BrandAlignment,
    Communication,
    Feedback,
    Contribution,
    Trust,
}

impl RatingKey {
    /// Every rating key, in question order.
    pub const ALL: [RatingKey; 7] = [
        RatingKey::Quality,
        RatingKey::Timeline,
        RatingKey::BrandAlignment,
        RatingKey::Communication,
        RatingKey::Feedback,
        RatingKey::Contribution,
        RatingKey::Trust,
    ];

    /// Wire name used in form fields, stored JSON and CSV headers.
    pub fn as_str(self) -> &'static str {
        match self {
            RatingKey::Quality => "quality",
            RatingKey::Timeline => "timeline",
            RatingKey::BrandAlignment => "brandAlignment",
            RatingKey::Communication => "communication",
            RatingKey::Feedback => "feedback",
            RatingKey::Contribution => "contribution",
            RatingKey::Trust => "trust",
        }
    }

    /// Look up a key by its wire name. Matching is exact.
    pub fn parse(name: &str) -> Option<RatingKey> {
        RatingKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// The question shown above the slider.
    pub fn question(self) -> &'static str {
        match self {
            RatingKey::Quality => {
                "How satisfied are you with the overall quality of the work delivered?"
            }
            RatingKey::Timeline => "Were the timelines communicated and maintained effectively?",
            RatingKey::BrandAlignment => {
                "How well did the creative output align with your brand expectations?"
            }
            RatingKey::Communication => {
                "How would you rate the clarity and responsiveness of our communication?"
            }
            RatingKey::Feedback => {
                "Did you feel your feedback was understood and acted upon thoughtfully?"
            }
            RatingKey::Contribution => {
                "Do you feel the creative work contributed to your marketing or business goals?"
            }
            RatingKey::Trust => "I see Madarth as a trusted creative partner.",
        }
    }

    /// Column header for document exports (`brandAlignment` -> `brand Alignment`).
    pub fn header_label(self) -> String {
        split_camel_case(self.as_str())
    }

    /// Human label for cards, tables and the detail view
    /// (`brandAlignment` -> `Brand Alignment`).
    pub fn display_label(self) -> String {
        humanize_key(self.as_str())
    }
}

impl fmt::Display for RatingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert a space before every uppercase letter.
pub fn split_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Insert a space before every uppercase letter, then capitalize the first
/// character.
pub fn humanize_key(key: &str) -> String {
    let spaced = split_camel_case(key);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Rating values
// ---------------------------------------------------------------------------

/// Lowest selectable rating.
pub const MIN_RATING: u8 = 0;
/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;

/// Parse a rating from its text form. Returns `None` unless the value is an
/// integer in `[MIN_RATING, MAX_RATING]`.
pub fn parse_rating(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|v| (MIN_RATING..=MAX_RATING).contains(v))
}

// ---------------------------------------------------------------------------
// Slider presentation
// ---------------------------------------------------------------------------

/// Fill colour per rating value, indexed 0..=5.
pub const SLIDER_COLORS: [&str; 6] = [
    "#d1d5db", "#FF0000", "#FF8000", "#FF8C00", "#FFFF00", "#22c55e",
];

/// Colour of the unfilled part of the track.
pub const TRACK_COLOR: &str = "#d1d5db";

/// Everything the view needs to draw one rating slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderDisplay {
    /// Fill colour from [`SLIDER_COLORS`].
    pub color: &'static str,
    /// Width of the filled track, `value / 5 * 100`.
    pub fill_percent: f64,
    /// Horizontal tooltip anchor. Always equal to `fill_percent`.
    pub tooltip_left_percent: f64,
    /// Text inside the tooltip: the current value as entered.
    pub label: String,
}

impl SliderDisplay {
    /// Derive slider presentation for a raw form value.
    ///
    /// Unparsable or out-of-range values draw as an empty grey track.
    pub fn for_value(value: &str) -> Self {
        let (color, fill) = match parse_rating(value) {
            Some(v) => (
                SLIDER_COLORS[usize::from(v)],
                f64::from(v) / f64::from(MAX_RATING) * 100.0,
            ),
            None => (TRACK_COLOR, 0.0),
        };
        Self {
            color,
            fill_percent: fill,
            tooltip_left_percent: fill,
            label: value.to_string(),
        }
    }

    /// CSS `background` value for the slider track.
    pub fn track_background(&self) -> String {
        format!(
            "linear-gradient(to right, {c} 0%, {c} {p}%, {t} {p}%, {t} 100%)",
            c = self.color,
            p = self.fill_percent,
            t = TRACK_COLOR,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
