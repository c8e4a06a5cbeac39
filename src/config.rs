use clap::ValueEnum;
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::path::PathBuf;

/// Configuration for the `grow` command
#[derive(Clone, Debug)]
pub struct GrowConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub style: Option<Style>,
    pub print: bool,
    pub color: bool,
    /// `Some(None)` = save under a timestamped name
    pub save: Option<Option<PathBuf>>,
}

/// Growth styles for the trunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Young,    // thin, short trunk
    Mature,   // thick, tall trunk
    Dense,    // tight S-curve
    Wild,     // large swings, wide length spread
    Elegant,  // tall and slender
    Default,
}

/// Numeric ranges that drive trunk synthesis for one style
#[derive(Clone, Debug, PartialEq)]
pub struct StyleParams {
    /// Extra rows added to the 40%-of-height trunk length; never negative
    pub length_offset: RangeInclusive<i32>,
    pub base_thickness: RangeInclusive<i32>,
    pub amplitude: RangeInclusive<f64>,
    pub frequency: Range<f64>,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Young,
        Style::Mature,
        Style::Dense,
        Style::Wild,
        Style::Elegant,
        Style::Default,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn params(self) -> StyleParams {
        match self {
            Style::Young => StyleParams {
                length_offset: 0..=2,
                base_thickness: 6..=8,
                amplitude: 8.0..=10.0,
                frequency: 1.5..1.9,
            },
            Style::Mature => StyleParams {
                length_offset: 2..=6,
                base_thickness: 12..=16,
                amplitude: 8.0..=11.0,
                frequency: 1.5..2.0,
            },
            Style::Dense => StyleParams {
                length_offset: 0..=4,
                base_thickness: 10..=14,
                amplitude: 9.0..=12.0,
                frequency: 1.8..2.3,
            },
            Style::Wild => StyleParams {
                length_offset: 0..=8,
                base_thickness: 8..=14,
                amplitude: 10.0..=13.0,
                frequency: 2.0..2.5,
            },
            Style::Elegant => StyleParams {
                length_offset: 4..=8,
                base_thickness: 6..=10,
                amplitude: 8.0..=11.0,
                frequency: 1.5..2.0,
            },
            Style::Default => StyleParams {
                length_offset: 0..=4,
                base_thickness: 8..=12,
                amplitude: 8.0..=13.0,
                frequency: 1.5..2.5,
            },
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Young => "young",
            Style::Mature => "mature",
            Style::Dense => "dense",
            Style::Wild => "wild",
            Style::Elegant => "elegant",
            Style::Default => "default",
        };
        f.write_str(name)
    }
}
