use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{self, KindRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxonomyKind {
    Gender,
    SexualOrientation,
    InterestedIn,
    LookingFor,
    Lifestyle,
    ThingsYouLove,
    IdealPartner,
    LoyaltyImportance,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 8] = [
        TaxonomyKind::Gender,
        TaxonomyKind::SexualOrientation,
        TaxonomyKind::InterestedIn,
        TaxonomyKind::LookingFor,
        TaxonomyKind::Lifestyle,
        TaxonomyKind::ThingsYouLove,
        TaxonomyKind::IdealPartner,
        TaxonomyKind::LoyaltyImportance,
    ];

    /// URL segment under `/api`, also the stored kind key.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::SexualOrientation => "sexual-orientation",
            Self::InterestedIn => "interested-in",
            Self::LookingFor => "looking-for",
            Self::Lifestyle => "lifestyle",
            Self::ThingsYouLove => "things-you-love",
            Self::IdealPartner => "ideal-partner",
            Self::LoyaltyImportance => "loyalty-importance",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Module name guarding this kind in the capability matrix.
    pub fn module(&self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::SexualOrientation => "Sexual Orientation",
            Self::InterestedIn => "Interested In",
            Self::LookingFor => "Looking For",
            Self::Lifestyle => "Lifestyle",
            Self::ThingsYouLove => "Things You Love",
            Self::IdealPartner => "Ideal Partner",
            Self::LoyaltyImportance => "Loyalty Importance",
        }
    }

    /// Kinds that hold at most one document.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Gender | Self::Lifestyle | Self::ThingsYouLove)
    }

    /// Kinds whose options are sections carrying points.
    pub fn has_sections(&self) -> bool {
        self.rules().points.is_some()
    }

    pub fn rules(&self) -> &'static KindRules {
        match self {
            Self::Gender => &rules::GENDER,
            Self::SexualOrientation => &rules::SEXUAL_ORIENTATION,
            Self::InterestedIn => &rules::INTERESTED_IN,
            Self::LookingFor => &rules::LOOKING_FOR,
            Self::Lifestyle | Self::ThingsYouLove => &rules::SECTIONED,
            Self::IdealPartner | Self::LoyaltyImportance => &rules::PREFERENCE_SCALE,
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.module())
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module())
    }
}
