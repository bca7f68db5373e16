//! Canonical identity for recording channels and sorted units.
//!
//! Recordings arrive under two independent encodings: raw hardware channels
//! carry zero-padded numeric tokens (`C-003`) while manually sorted units are
//! labeled by key strings embedding a channel number and a unit index
//! (`elec_C003_unit1`). Both normalize to a [`ChannelKey`] so lookups go
//! through direct key equality rather than scanning and comparing.

use std::fmt::{Display, Formatter, Result as FmtResult};
use crate::error::ChannelError;


/// Identity of one recording source, either a raw hardware channel or a
/// spike-sorted single unit derived from one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKey {
    /// Raw hardware channel identified by its channel number
    Raw(u16),
    /// Sorted unit, distinguished from other units on the same electrode
    /// by its unit index
    Unit {
        /// Underlying hardware channel number
        channel: u16,
        /// Unit index within the channel
        unit: u16,
    },
}

impl ChannelKey {
    /// Parses a raw hardware channel token of the form `<letters>-<digits>`,
    /// (e.g. `C-003`), leading zeros are irrelevant
    pub fn parse_raw(token: &str) -> Result<ChannelKey, ChannelError> {
        let (prefix, digits) = match token.split_once('-') {
            Some(parts) => parts,
            None => return Err(ChannelError::InvalidRawChannel(token.to_string())),
        };

        if prefix.is_empty() || !prefix.chars().all(|i| i.is_ascii_alphabetic()) {
            return Err(ChannelError::InvalidRawChannel(token.to_string()));
        }

        match parse_digit_run(digits) {
            Some(channel) => Ok(ChannelKey::Raw(channel)),
            None => Err(ChannelError::InvalidRawChannel(token.to_string())),
        }
    }

    /// Parses a sorted unit key of the form `<prefix>_<letter><digits>_<suffix>`
    /// (e.g. `elec_C003_unit1`), the channel number is the digit run
    /// immediately following the letter token of the second segment and the
    /// unit index is the digit run of the final segment
    pub fn parse_unit_key(key: &str) -> Result<ChannelKey, ChannelError> {
        let segments: Vec<&str> = key.split('_').collect();

        if segments.len() < 3 {
            return Err(ChannelError::InvalidUnitKey(key.to_string()));
        }

        let channel = match parse_letter_then_digits(segments[1]) {
            Some(value) => value,
            None => return Err(ChannelError::InvalidUnitKey(key.to_string())),
        };

        let last = segments[segments.len() - 1];
        let unit = match parse_letter_then_digits(last) {
            Some(value) => value,
            None => return Err(ChannelError::InvalidUnitKey(key.to_string())),
        };

        Ok(ChannelKey::Unit { channel, unit })
    }

    /// Returns the underlying hardware channel number
    pub fn channel_number(&self) -> u16 {
        match self {
            ChannelKey::Raw(channel) => *channel,
            ChannelKey::Unit { channel, .. } => *channel,
        }
    }

    /// Whether two keys reference the same underlying electrode, compared
    /// numerically on the channel number alone so unit distinctions and
    /// leading zeros are ignored
    pub fn same_electrode(&self, other: &ChannelKey) -> bool {
        self.channel_number() == other.channel_number()
    }
}

impl Display for ChannelKey {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ChannelKey::Raw(channel) => write!(f, "C-{:03}", channel),
            ChannelKey::Unit { channel, unit } => write!(f, "elec_C{:03}_unit{}", channel, unit),
        }
    }
}

fn parse_digit_run(digits: &str) -> Option<u16> {
    if digits.is_empty() || !digits.chars().all(|i| i.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u16>().ok()
}

// strips the leading letter token and parses the remaining digit run,
// requires at least one leading letter
fn parse_letter_then_digits(segment: &str) -> Option<u16> {
    let digits_at = segment.find(|i: char| !i.is_ascii_alphabetic())?;

    if digits_at == 0 {
        return None;
    }

    parse_digit_run(&segment[digits_at..])
}
