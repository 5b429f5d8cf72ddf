//! Trait catalog: the fixed option sets and explanatory tooltips for each trait.
//!
//! Every enumerated set contains the sentinel. `Other` has no option set.

use crate::errors::AppError;
use crate::persona::models::{Persona, TraitKind, SENTINEL};

const AGE_OPTIONS: &[&str] = &[
    SENTINEL, "Under 18", "18-24", "25-34", "35-44", "45-54", "55-64", "65+",
];

const SEX_OPTIONS: &[&str] = &["Male", "Female", "Non-binary", SENTINEL, "Other"];

const NATIONALITY_OPTIONS: &[&str] = &[
    SENTINEL,
    "American",
    "British",
    "Canadian",
    "Australian",
    "German",
    "French",
    "Japanese",
    "Chinese",
    "Indian",
    "Brazilian",
    "Nigerian",
    "South African",
    "Other",
];

const PROFESSION_OPTIONS: &[&str] = &[
    SENTINEL,
    "Software Engineer",
    "Doctor",
    "Teacher",
    "Artist",
    "Lawyer",
    "Accountant",
    "Marketing Manager",
    "Construction Worker",
    "Stay-at-home Parent",
    "Student",
    "Retired",
    "Other",
];

const SEXUALITY_OPTIONS: &[&str] = &[
    "Heterosexual",
    "Homosexual",
    "Bisexual",
    "Pansexual",
    "Asexual",
    SENTINEL,
    "Other",
];

const RELIGION_OPTIONS: &[&str] = &[
    SENTINEL,
    "Christianity",
    "Islam",
    "Hinduism",
    "Buddhism",
    "Judaism",
    "Atheist",
    "Agnostic",
    "Spiritual but not religious",
    "Other",
];

const POLITICAL_VIEW_OPTIONS: &[&str] = &[
    SENTINEL,
    "Left-wing",
    "Centrist",
    "Right-wing",
    "Libertarian",
    "Green",
    "Socialist",
    "Progressive",
    "Conservative",
    "Not politically engaged",
    "Other",
];

/// Allowed values for an enumerated trait, `None` for free text.
pub fn options(kind: TraitKind) -> Option<&'static [&'static str]> {
    match kind {
        TraitKind::Age => Some(AGE_OPTIONS),
        TraitKind::Sex => Some(SEX_OPTIONS),
        TraitKind::Nationality => Some(NATIONALITY_OPTIONS),
        TraitKind::Profession => Some(PROFESSION_OPTIONS),
        TraitKind::Sexuality => Some(SEXUALITY_OPTIONS),
        TraitKind::Religion => Some(RELIGION_OPTIONS),
        TraitKind::PoliticalView => Some(POLITICAL_VIEW_OPTIONS),
        TraitKind::Other => None,
    }
}

/// Short explanation of why a trait matters, shown next to the input in the UI.
pub fn tooltip(kind: TraitKind) -> &'static str {
    match kind {
        TraitKind::Age => "Age can influence perspective based on generational experiences, life stage priorities (e.g., career-building vs. retirement), and cultural touchstones. For example, a younger person might prioritize social change, while an older person might value stability.",
        TraitKind::Sex => "Gender identity can shape experiences with social structures, stereotypes, and interpersonal dynamics. A text about workplace dynamics might be read very differently based on one's gender.",
        TraitKind::Nationality => "Nationality and cultural background affect social norms, political assumptions, historical context, and language. A discussion about freedom might mean different things to someone from the US versus someone from China.",
        TraitKind::Profession => "A person's job influences their daily concerns, expertise, and socioeconomic standing. An article about economic policy will be viewed differently by a teacher versus a hedge fund manager.",
        TraitKind::Sexuality => "Sexual orientation can impact experiences of acceptance, discrimination, and community. A story about a family might be interpreted differently based on one's own experiences with societal norms around relationships.",
        TraitKind::Religion => "Religious or philosophical beliefs provide a moral framework and shape values. A text discussing ethics or mortality will be filtered through this lens.",
        TraitKind::PoliticalView => "Political alignment shapes views on governance, social justice, and economic policy. A news report about a protest will be seen differently by someone who is progressive versus someone who is conservative.",
        TraitKind::Other => "Unique personal roles or identities (e.g., parent, veteran, artist, activist) can add powerful, specific layers to a person's worldview. A parent might focus on themes of safety and the future for children.",
    }
}

/// Rejects enumerated trait values that are not part of the trait's option set.
///
/// An empty value is accepted and treated like the sentinel. `label` prefixes
/// the error so the caller can tell which persona was malformed.
pub fn validate_persona(persona: &Persona, label: &str) -> Result<(), AppError> {
    for (kind, t) in persona.traits() {
        let Some(allowed) = options(kind) else {
            continue;
        };
        if !t.value.is_empty() && !allowed.contains(&t.value.as_str()) {
            return Err(AppError::Validation(format!(
                "{label}.{}: '{}' is not a recognised option",
                kind.key(),
                t.value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::models::Significance;

    #[test]
    fn test_every_enumerated_trait_offers_the_sentinel() {
        for kind in TraitKind::ALL {
            if let Some(opts) = options(kind) {
                assert!(opts.contains(&SENTINEL), "{kind:?} is missing the sentinel");
            }
        }
    }

    #[test]
    fn test_other_is_free_text() {
        assert!(options(TraitKind::Other).is_none());
        assert!(TraitKind::Other.is_free_text());
    }

    #[test]
    fn test_every_trait_has_a_tooltip() {
        for kind in TraitKind::ALL {
            assert!(!tooltip(kind).is_empty());
        }
    }

    #[test]
    fn test_default_persona_is_valid() {
        assert!(validate_persona(&Persona::default(), "persona1").is_ok());
    }

    #[test]
    fn test_unknown_option_is_rejected_with_path() {
        let persona = Persona::default().with_trait(
            TraitKind::Religion,
            "Pastafarian",
            Significance::new(5).unwrap(),
        );
        let err = validate_persona(&persona, "persona2").unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.starts_with("persona2.religion"));
                assert!(msg.contains("Pastafarian"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_enumerated_value_is_accepted() {
        let persona =
            Persona::default().with_trait(TraitKind::Age, "", Significance::new(3).unwrap());
        assert!(validate_persona(&persona, "persona1").is_ok());
    }

    #[test]
    fn test_free_text_other_is_never_rejected() {
        let persona = Persona::default().with_trait(
            TraitKind::Other,
            "veteran, beekeeper",
            Significance::new(4).unwrap(),
        );
        assert!(validate_persona(&persona, "persona1").is_ok());
    }
}
