use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}

impl fmt::Display for ToppingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topping#{}", self.0)
    }
}

/// Affinity of one participant for one topping.
///
/// `Allergy` is a hard constraint and never takes part in scoring; the other
/// levels map onto the integer codes returned by [`Preference::value`].
/// Orders may spell a preference either by name (`"like"`) or by that code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "PreferenceRepr")]
pub enum Preference {
    Allergy,
    Dislike,
    Neutral,
    Like,
}

impl Preference {
    pub const fn value(self) -> i8 {
        match self {
            Preference::Allergy => -2,
            Preference::Dislike => -1,
            Preference::Neutral => 0,
            Preference::Like => 1,
        }
    }

    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            -2 => Some(Preference::Allergy),
            -1 => Some(Preference::Dislike),
            0 => Some(Preference::Neutral),
            1 => Some(Preference::Like),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PreferenceRepr {
    Code(i8),
    Name(String),
}

impl TryFrom<PreferenceRepr> for Preference {
    type Error = String;

    fn try_from(repr: PreferenceRepr) -> Result<Self, Self::Error> {
        match repr {
            PreferenceRepr::Code(code) => Preference::from_value(code)
                .ok_or_else(|| format!("unknown preference code {code}")),
            PreferenceRepr::Name(name) => match name.as_str() {
                "allergy" => Ok(Preference::Allergy),
                "dislike" => Ok(Preference::Dislike),
                "neutral" => Ok(Preference::Neutral),
                "like" => Ok(Preference::Like),
                _ => Err(format!("unknown preference `{name}`")),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preferences: FxHashMap<ToppingId, Preference>,
    #[serde(default)]
    pub unrated_is_dislike: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            preferences: FxHashMap::default(),
            unrated_is_dislike: false,
        }
    }

    pub fn with_preference(mut self, topping: ToppingId, preference: Preference) -> Self {
        self.preferences.insert(topping, preference);
        self
    }

    pub fn with_unrated_is_dislike(mut self, unrated_is_dislike: bool) -> Self {
        self.unrated_is_dislike = unrated_is_dislike;
        self
    }

    /// Preference used when the participant never rated a topping.
    pub fn unrated_default(&self) -> Preference {
        if self.unrated_is_dislike {
            Preference::Dislike
        } else {
            Preference::Neutral
        }
    }

    /// Explicit preference for `topping`, falling back to [`Self::unrated_default`].
    pub fn preference_for(&self, topping: ToppingId) -> Preference {
        self.preferences
            .get(&topping)
            .copied()
            .unwrap_or_else(|| self.unrated_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub id: ToppingId,
    #[serde(default)]
    pub name: String,
}

impl Topping {
    pub fn new(id: ToppingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// Maximize the summed score over all pizzas.
    MaximizeLikes,
    /// Maximize the score of the worst pizza.
    #[default]
    MinimizeDislikes,
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationMode::MaximizeLikes => f.write_str("maximize_likes"),
            OptimizationMode::MinimizeDislikes => f.write_str("minimize_dislikes"),
        }
    }
}

/// Everything one order contributes to a solve. Read-only during optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    pub participants: Vec<Participant>,
    pub toppings: Vec<Topping>,
    pub num_pizzas: usize,
    #[serde(default)]
    pub optimization_mode: OptimizationMode,
    #[serde(default)]
    pub shareability_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pizza {
    pub participants: Vec<ParticipantId>,
    pub toppings: Vec<ToppingId>,
}

impl Pizza {
    pub fn has_participant(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&participant)
    }

    pub fn has_topping(&self, topping: ToppingId) -> bool {
        self.toppings.contains(&topping)
    }
}
