use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Angry,
    Focused,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 6] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Energetic,
        MoodLabel::Relaxed,
        MoodLabel::Angry,
        MoodLabel::Focused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Energetic => "energetic",
            MoodLabel::Relaxed => "relaxed",
            MoodLabel::Angry => "angry",
            MoodLabel::Focused => "focused",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "Happy",
            MoodLabel::Sad => "Sad",
            MoodLabel::Energetic => "Energetic",
            MoodLabel::Relaxed => "Relaxed",
            MoodLabel::Angry => "Angry",
            MoodLabel::Focused => "Focused",
        }
    }

    pub fn profile(&self) -> &'static MoodProfile {
        match self {
            MoodLabel::Happy => &HAPPY,
            MoodLabel::Sad => &SAD,
            MoodLabel::Energetic => &ENERGETIC,
            MoodLabel::Relaxed => &RELAXED,
            MoodLabel::Angry => &ANGRY,
            MoodLabel::Focused => &FOCUSED,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        MoodLabel::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFeature {
    Valence,
    Energy,
    Tempo,
    Acousticness,
    Instrumentalness,
    Speechiness,
}

impl AudioFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFeature::Valence => "valence",
            AudioFeature::Energy => "energy",
            AudioFeature::Tempo => "tempo",
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Speechiness => "speechiness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureBound {
    Min,
    Max,
    Target,
}

impl FeatureBound {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureBound::Min => "min",
            FeatureBound::Max => "max",
            FeatureBound::Target => "target",
        }
    }
}

/// One audio-feature constraint sent to the recommendation endpoint,
/// e.g. `min_valence=0.7`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureTarget {
    pub feature: AudioFeature,
    pub bound: FeatureBound,
    pub value: f64,
}

impl FeatureTarget {
    const fn new(bound: FeatureBound, feature: AudioFeature, value: f64) -> Self {
        Self {
            feature,
            bound,
            value,
        }
    }

    pub fn param_name(&self) -> String {
        format!("{}_{}", self.bound.as_str(), self.feature.as_str())
    }
}

#[derive(Debug)]
pub struct MoodProfile {
    pub label: MoodLabel,
    /// Ranked, the first keyword is the primary one.
    pub keywords: &'static [&'static str],
    pub features: &'static [FeatureTarget],
    /// Known playlist ids used when every playlist search comes back empty.
    pub fallback_playlists: &'static [&'static str],
}

impl MoodProfile {
    pub fn primary_keyword(&self) -> &'static str {
        self.keywords.first().copied().unwrap_or(self.label.as_str())
    }

    /// Search query built from the top `count` ranked keywords.
    pub fn keyword_query(&self, count: usize) -> String {
        self.keywords
            .iter()
            .take(count)
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

use AudioFeature::*;
use FeatureBound::*;

static HAPPY: MoodProfile = MoodProfile {
    label: MoodLabel::Happy,
    keywords: &["happy", "upbeat", "feel good", "sunshine"],
    features: &[
        FeatureTarget::new(Min, Valence, 0.7),
        FeatureTarget::new(Target, Energy, 0.8),
    ],
    fallback_playlists: &[
        "37i9dQZF1DXdPec7aLTmlC",
        "37i9dQZF1DX3rxVfibe1L0",
        "37i9dQZF1DX9XIFQuFvzM4",
    ],
};

static SAD: MoodProfile = MoodProfile {
    label: MoodLabel::Sad,
    keywords: &["sad", "melancholy", "heartbreak", "rainy day"],
    features: &[
        FeatureTarget::new(Max, Valence, 0.4),
        FeatureTarget::new(Target, Energy, 0.4),
    ],
    fallback_playlists: &[
        "37i9dQZF1DX7qK8ma5wgG1",
        "37i9dQZF1DX3YSRoSdA634",
        "37i9dQZF1DWSqBruwoIXkA",
    ],
};

static ENERGETIC: MoodProfile = MoodProfile {
    label: MoodLabel::Energetic,
    keywords: &["energy", "workout", "power", "pump up"],
    features: &[
        FeatureTarget::new(Min, Energy, 0.8),
        FeatureTarget::new(Target, Tempo, 120.0),
    ],
    fallback_playlists: &[
        "37i9dQZF1DX76Wlfdnj7AP",
        "37i9dQZF1DWUVpAXiEPK8P",
        "37i9dQZF1DX70RN3TfWWJh",
    ],
};

static RELAXED: MoodProfile = MoodProfile {
    label: MoodLabel::Relaxed,
    keywords: &["chill", "relax", "ambient", "calm"],
    features: &[
        FeatureTarget::new(Max, Energy, 0.4),
        FeatureTarget::new(Target, Acousticness, 0.7),
    ],
    fallback_playlists: &[
        "37i9dQZF1DX4WYpdgoIcn6",
        "37i9dQZF1DX4sWSpwq3LiO",
        "37i9dQZF1DWTwnEm1IYyoj",
    ],
};

static ANGRY: MoodProfile = MoodProfile {
    label: MoodLabel::Angry,
    keywords: &["angry", "rage", "metal", "hard rock"],
    features: &[
        FeatureTarget::new(Min, Energy, 0.8),
        FeatureTarget::new(Max, Valence, 0.4),
    ],
    fallback_playlists: &[
        "37i9dQZF1DWWJOmJ7nRx0C",
        "37i9dQZF1DWTcqUzwhNmKv",
        "37i9dQZF1DX1tyCD9QhIWF",
    ],
};

static FOCUSED: MoodProfile = MoodProfile {
    label: MoodLabel::Focused,
    keywords: &["focus", "study", "concentration", "deep work"],
    features: &[
        FeatureTarget::new(Target, Instrumentalness, 0.5),
        FeatureTarget::new(Max, Speechiness, 0.1),
    ],
    fallback_playlists: &[
        "37i9dQZF1DX8NTLI2TIfZs",
        "37i9dQZF1DWZeKCadgRdKQ",
        "37i9dQZF1DX3PFzdbtx1Us",
    ],
};
