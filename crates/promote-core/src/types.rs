use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Release maturity stage, ordered from least to most stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Edge,
    Beta,
    Candidate,
    Stable,
}

impl Channel {
    pub fn all() -> &'static [Channel] {
        &[
            Channel::Edge,
            Channel::Beta,
            Channel::Candidate,
            Channel::Stable,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The immediate successor in promotion order. `None` for stable.
    pub fn next(self) -> Option<Channel> {
        Channel::all().get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Edge => "edge",
            Channel::Beta => "beta",
            Channel::Candidate => "candidate",
            Channel::Stable => "stable",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = crate::error::PromoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edge" => Ok(Channel::Edge),
            "beta" => Ok(Channel::Beta),
            "candidate" => Ok(Channel::Candidate),
            "stable" => Ok(Channel::Stable),
            _ => Err(crate::error::PromoteError::InvalidChannel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PromotionChoice
// ---------------------------------------------------------------------------

/// The promotion an operator picks when triggering a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionChoice {
    EdgeToBeta,
    BetaToCandidate,
    CandidateToStable,
}

impl PromotionChoice {
    pub fn all() -> &'static [PromotionChoice] {
        &[
            PromotionChoice::EdgeToBeta,
            PromotionChoice::BetaToCandidate,
            PromotionChoice::CandidateToStable,
        ]
    }

    /// Source and destination channels. The destination is always
    /// `from.next()`.
    pub fn channels(self) -> (Channel, Channel) {
        match self {
            PromotionChoice::EdgeToBeta => (Channel::Edge, Channel::Beta),
            PromotionChoice::BetaToCandidate => (Channel::Beta, Channel::Candidate),
            PromotionChoice::CandidateToStable => (Channel::Candidate, Channel::Stable),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromotionChoice::EdgeToBeta => "edge -> beta",
            PromotionChoice::BetaToCandidate => "beta -> candidate",
            PromotionChoice::CandidateToStable => "candidate -> stable",
        }
    }
}

impl fmt::Display for PromotionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromotionChoice {
    type Err = crate::error::PromoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromotionChoice::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::error::PromoteError::InvalidChoice(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

pub const LATEST_TRACK: &str = "latest";

/// Release line a promotion happens within.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Track {
    Latest,
    Named(String),
}

impl Track {
    pub fn as_str(&self) -> &str {
        match self {
            Track::Latest => LATEST_TRACK,
            Track::Named(name) => name,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Track {
    fn from(s: String) -> Self {
        if s == LATEST_TRACK {
            Track::Latest
        } else {
            Track::Named(s)
        }
    }
}

impl From<Track> for String {
    fn from(t: Track) -> Self {
        match t {
            Track::Latest => LATEST_TRACK.to_string(),
            Track::Named(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// PromotionAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionAction {
    pub from_channel: Channel,
    pub to_channel: Channel,
    pub track: Track,
}

impl PromotionAction {
    /// `<track>/<channel>` for the source side, e.g. `latest/edge`.
    pub fn from_ref(&self) -> String {
        format!("{}/{}", self.track, self.from_channel)
    }

    pub fn to_ref(&self) -> String {
        format!("{}/{}", self.track, self.to_channel)
    }

    /// The action as named fields, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from_channel", self.from_channel.to_string()),
            ("to_channel", self.to_channel.to_string()),
            ("track", self.track.to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
