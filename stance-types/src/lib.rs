//! Core types for the stance dataset cleaning pipeline.
//!
//! This crate holds the plain data that flows between the loader, the
//! cleaner and the batch driver in `stance-core`. Keeping types separate
//! means:
//!
//! - **Stable contracts**: the nested token-group shape and the numeric label
//!   encoding live in one place
//! - **Cross-crate compatibility**: the library and the CLI share the same types
//! - **Clean boundaries**: no dependency on csv, serde or logging here

#![warn(missing_docs)]

use core::fmt;

use smallvec::SmallVec;

/// Tokens produced from one source token.
///
/// Almost every group holds exactly one token; only normalization-table
/// expansions produce more, so the first slot is stored inline.
/// A group is never empty.
pub type TokenGroup = SmallVec<[String; 1]>;

/// Cleaned output for one input string, one group per lexed token.
pub type TokenSequence = Vec<TokenGroup>;

/// Stance of a text towards its target.
///
/// `#[repr(u8)]` pins the numeric encoding used by downstream models:
/// AGAINST = 0, FAVOR = 1, NONE = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Stance {
    /// Text argues against the target.
    Against = 0,
    /// Text argues for the target.
    Favor = 1,
    /// Text takes no position.
    None = 2,
}

impl Stance {
    /// All stances in code order.
    pub const ALL: [Stance; 3] = [Stance::Against, Stance::Favor, Stance::None];

    /// Maps a raw dataset label to a stance.
    ///
    /// Matching is exact: `"favor"` or `" FAVOR"` are not recognised.
    #[inline]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "AGAINST" => Some(Stance::Against),
            "FAVOR" => Some(Stance::Favor),
            "NONE" => Some(Stance::None),
            _ => None,
        }
    }

    /// Numeric code of this stance.
    #[must_use]
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Label string as it appears in the dataset.
    pub const fn as_str(self) -> &'static str {
        match self {
            Stance::Against => "AGAINST",
            Stance::Favor => "FAVOR",
            Stance::None => "NONE",
        }
    }
}

impl TryFrom<u8> for Stance {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Stance::Against),
            1 => Ok(Stance::Favor),
            2 => Ok(Stance::None),
            other => Err(other),
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record label after mapping.
///
/// Mapping is total: anything that is not one of the three canonical strings
/// is kept verbatim as [`Label::Unknown`] instead of failing the load. The
/// caller decides whether an unknown label is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// One of the canonical stances.
    Known(Stance),
    /// A label string outside the canonical set.
    Unknown(Box<str>),
}

impl Label {
    /// Maps a raw label string.
    pub fn parse(raw: &str) -> Self {
        match Stance::from_label(raw) {
            Some(stance) => Label::Known(stance),
            None => Label::Unknown(raw.into()),
        }
    }

    /// Numeric code, or `None` for an unknown label.
    #[inline]
    pub fn code(&self) -> Option<u8> {
        match self {
            Label::Known(stance) => Some(stance.code()),
            Label::Unknown(_) => None,
        }
    }

    /// Returns the stance if the label was recognised.
    #[inline]
    pub fn stance(&self) -> Option<Stance> {
        match self {
            Label::Known(stance) => Some(*stance),
            Label::Unknown(_) => None,
        }
    }

    /// Whether the label fell outside the canonical set.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Label::Unknown(_))
    }
}

impl From<Stance> for Label {
    #[inline]
    fn from(stance: Stance) -> Self {
        Label::Known(stance)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Known(stance) => write!(f, "{}", stance.code()),
            Label::Unknown(raw) => write!(f, "{:?}", raw),
        }
    }
}

/// One row of a stance dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Raw tweet text.
    pub text: String,
    /// Mapped stance label.
    pub label: Label,
    /// Raw target the stance refers to.
    pub target: String,
    /// Whether the record was already observed during training.
    pub seen: bool,
}

/// Aggregate statistics over a cleaned corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusStats {
    /// Number of samples cleaned.
    pub num_samples: usize,
    /// Sum of token-group counts over all cleaned texts.
    pub total_groups: usize,
    /// Mean token-group count per text; `None` for an empty corpus.
    pub mean_groups: Option<f64>,
}

impl CorpusStats {
    /// Builds stats from per-sample group counts.
    pub fn from_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut num_samples = 0usize;
        let mut total_groups = 0usize;
        for len in lengths {
            num_samples += 1;
            total_groups += len;
        }

        let mean_groups = if num_samples == 0 {
            None
        } else {
            Some(total_groups as f64 / num_samples as f64)
        };

        Self {
            num_samples,
            total_groups,
            mean_groups,
        }
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples, mean length ", self.num_samples)?;
        match self.mean_groups {
            Some(mean) => write!(f, "{:.3}", mean),
            None => f.write_str("n/a"),
        }
    }
}
