//! Descriptive traits derived from the compound score.
//!
//! Traits only look at the compound score (Source C), the subjectivity
//! (Source B) and the agreement count. They never look at the final label, so
//! a Neutral verdict can still carry a Joy emotion.

use crate::domain::{Emotion, Intensity, Strength, SubjectivityLabel, Tier, TraitBundle};

pub const JOY_MIN: f64 = 0.6;
pub const SADNESS_MAX: f64 = -0.6;
pub const ANGER_MAX: f64 = -0.2;
pub const SUBJECTIVE_MIN: f64 = 0.5;
/// Upper bound (exclusive) of the low magnitude tier.
pub const TIER_LOW_MAX: f64 = 0.3;
/// Upper bound (exclusive) of the middle magnitude tier.
pub const TIER_MID_MAX: f64 = 0.6;

/// Derive the full trait bundle.
pub fn derive_traits(compound: f64, subjectivity: f64, agreement_count: u8) -> TraitBundle {
    let tier = magnitude_tier(compound);
    TraitBundle {
        emotion: emotion(compound),
        subjectivity_label: subjectivity_label(subjectivity),
        intensity: Intensity::from(tier),
        strength: Strength::from(tier),
        confidence_percent: confidence_percent(agreement_count),
    }
}

pub fn emotion(compound: f64) -> Emotion {
    if compound >= JOY_MIN {
        Emotion::Joy
    } else if compound <= SADNESS_MAX {
        Emotion::Sadness
    } else if compound < ANGER_MAX {
        Emotion::Anger
    } else {
        Emotion::Neutral
    }
}

pub fn subjectivity_label(subjectivity: f64) -> SubjectivityLabel {
    if subjectivity > SUBJECTIVE_MIN {
        SubjectivityLabel::Subjective
    } else {
        SubjectivityLabel::Objective
    }
}

pub fn magnitude_tier(compound: f64) -> Tier {
    let abs_score = compound.abs();
    if abs_score < TIER_LOW_MAX {
        Tier::Low
    } else if abs_score < TIER_MID_MAX {
        Tier::Mid
    } else {
        Tier::High
    }
}

/// Share of agreeing sources as a floored percentage.
pub fn confidence_percent(agreement_count: u8) -> u8 {
    // Integer floor of agreement * 100 / 3: 1 -> 33, 2 -> 66, 3 -> 100.
    (u16::from(agreement_count.min(3)) * 100 / 3) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_boundaries() {
        assert_eq!(emotion(0.6), Emotion::Joy);
        assert_eq!(emotion(0.59), Emotion::Neutral);
        assert_eq!(emotion(-0.6), Emotion::Sadness);
        assert_eq!(emotion(-0.59), Emotion::Anger);
        assert_eq!(emotion(-0.21), Emotion::Anger);
        assert_eq!(emotion(-0.2), Emotion::Neutral);
        assert_eq!(emotion(0.0), Emotion::Neutral);
        assert_eq!(emotion(-1.0), Emotion::Sadness);
    }

    #[test]
    fn subjectivity_is_strictly_above_half() {
        assert_eq!(subjectivity_label(0.5), SubjectivityLabel::Objective);
        assert_eq!(subjectivity_label(0.51), SubjectivityLabel::Subjective);
        assert_eq!(subjectivity_label(0.0), SubjectivityLabel::Objective);
    }

    #[test]
    fn tiers_use_absolute_value() {
        assert_eq!(magnitude_tier(0.29), Tier::Low);
        assert_eq!(magnitude_tier(-0.3), Tier::Mid);
        assert_eq!(magnitude_tier(0.59), Tier::Mid);
        assert_eq!(magnitude_tier(-0.6), Tier::High);
        assert_eq!(magnitude_tier(1.0), Tier::High);
    }

    #[test]
    fn intensity_and_strength_agree_across_range() {
        for i in -100..=100 {
            let compound = i as f64 / 100.0;
            let traits = derive_traits(compound, 0.5, 2);
            assert_eq!(traits.intensity.tier(), traits.strength.tier(), "compound={compound}");
        }
    }

    #[test]
    fn confidence_values_are_floored_and_monotonic() {
        assert_eq!(confidence_percent(1), 33);
        assert_eq!(confidence_percent(2), 66);
        assert_eq!(confidence_percent(3), 100);
        let mut prev = 0;
        for n in 1..=3 {
            let c = confidence_percent(n);
            assert!(c >= prev);
            prev = c;
        }
    }

    #[test]
    fn strong_positive_bundle() {
        let traits = derive_traits(0.8, 0.7, 3);
        assert_eq!(traits.emotion, Emotion::Joy);
        assert_eq!(traits.subjectivity_label, SubjectivityLabel::Subjective);
        assert_eq!(traits.intensity, Intensity::High);
        assert_eq!(traits.strength, Strength::Strong);
        assert_eq!(traits.confidence_percent, 100);
    }
}
