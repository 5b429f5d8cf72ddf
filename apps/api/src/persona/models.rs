//! Persona data model: eight fixed, weighted identity traits.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder option meaning "unset / neutral". Never reaches a prompt.
pub const SENTINEL: &str = "Prefer not to say";

/// How strongly a trait shapes the persona's worldview, 0 (irrelevant) to 10 (dominant).
///
/// Out-of-range values are rejected at deserialization, so a `Significance`
/// held anywhere in the crate is always within `0..=10`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Significance(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("significance must be between 0 and {max}, got {0}", max = Significance::MAX)]
pub struct SignificanceOutOfRange(pub u8);

impl Significance {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, SignificanceOutOfRange> {
        if value > Self::MAX {
            return Err(SignificanceOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[cfg(test)]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Significance {
    type Error = SignificanceOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Significance> for u8 {
    fn from(value: Significance) -> Self {
        value.0
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single weighted trait value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTrait {
    pub value: String,
    pub significance: Significance,
}

impl PersonaTrait {
    pub fn new(value: impl Into<String>, significance: Significance) -> Self {
        Self {
            value: value.into(),
            significance,
        }
    }

    /// An enumerated trait left at the sentinel.
    pub fn unset() -> Self {
        Self::new(SENTINEL, Significance(1))
    }
}

/// The eight trait slots, in the order they are presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitKind {
    Age,
    Sex,
    Nationality,
    Profession,
    Sexuality,
    Religion,
    PoliticalView,
    Other,
}

impl TraitKind {
    /// Fixed presentation order. The model sees traits in exactly this order.
    pub const ALL: [TraitKind; 8] = [
        TraitKind::Age,
        TraitKind::Sex,
        TraitKind::Nationality,
        TraitKind::Profession,
        TraitKind::Sexuality,
        TraitKind::Religion,
        TraitKind::PoliticalView,
        TraitKind::Other,
    ];

    /// Label used in the formatted persona block.
    pub fn display_name(self) -> &'static str {
        match self {
            TraitKind::Age => "Age",
            TraitKind::Sex => "Sex",
            TraitKind::Nationality => "Nationality",
            TraitKind::Profession => "Profession",
            TraitKind::Sexuality => "Sexuality",
            TraitKind::Religion => "Religion/Philosophy",
            TraitKind::PoliticalView => "Political View",
            TraitKind::Other => "Other Traits",
        }
    }

    /// JSON key of the trait inside a persona object.
    pub fn key(self) -> &'static str {
        match self {
            TraitKind::Age => "age",
            TraitKind::Sex => "sex",
            TraitKind::Nationality => "nationality",
            TraitKind::Profession => "profession",
            TraitKind::Sexuality => "sexuality",
            TraitKind::Religion => "religion",
            TraitKind::PoliticalView => "politicalView",
            TraitKind::Other => "other",
        }
    }

    /// `Other` is free text; every other trait draws from a fixed option set.
    pub fn is_free_text(self) -> bool {
        matches!(self, TraitKind::Other)
    }
}

/// A bundle of weighted identity traits used to bias the model's interpretive stance.
///
/// Exactly eight slots exist; `other` holds a comma-separated list of labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub age: PersonaTrait,
    pub sex: PersonaTrait,
    pub nationality: PersonaTrait,
    pub profession: PersonaTrait,
    pub sexuality: PersonaTrait,
    pub religion: PersonaTrait,
    pub political_view: PersonaTrait,
    pub other: PersonaTrait,
}

impl Default for Persona {
    /// Every enumerated trait at the sentinel (significance 1), `other` empty (significance 0).
    fn default() -> Self {
        Self {
            age: PersonaTrait::unset(),
            sex: PersonaTrait::unset(),
            nationality: PersonaTrait::unset(),
            profession: PersonaTrait::unset(),
            sexuality: PersonaTrait::unset(),
            religion: PersonaTrait::unset(),
            political_view: PersonaTrait::unset(),
            other: PersonaTrait::new("", Significance::default()),
        }
    }
}

impl Persona {
    pub fn get(&self, kind: TraitKind) -> &PersonaTrait {
        match kind {
            TraitKind::Age => &self.age,
            TraitKind::Sex => &self.sex,
            TraitKind::Nationality => &self.nationality,
            TraitKind::Profession => &self.profession,
            TraitKind::Sexuality => &self.sexuality,
            TraitKind::Religion => &self.religion,
            TraitKind::PoliticalView => &self.political_view,
            TraitKind::Other => &self.other,
        }
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, kind: TraitKind) -> &mut PersonaTrait {
        match kind {
            TraitKind::Age => &mut self.age,
            TraitKind::Sex => &mut self.sex,
            TraitKind::Nationality => &mut self.nationality,
            TraitKind::Profession => &mut self.profession,
            TraitKind::Sexuality => &mut self.sexuality,
            TraitKind::Religion => &mut self.religion,
            TraitKind::PoliticalView => &mut self.political_view,
            TraitKind::Other => &mut self.other,
        }
    }

    /// All eight traits in presentation order.
    pub fn traits(&self) -> impl Iterator<Item = (TraitKind, &PersonaTrait)> + '_ {
        TraitKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Builder-style setter for fixtures.
    #[cfg(test)]
    pub fn with_trait(mut self, kind: TraitKind, value: &str, significance: Significance) -> Self {
        *self.get_mut(kind) = PersonaTrait::new(value, significance);
        self
    }
}
