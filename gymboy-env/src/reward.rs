//! Reward and termination rules evaluated on [`StateSnapshot`]s.
//!
//! Titles declare their reward as a list of [`RewardTerm`]s and their episode end as
//! a list of [`Predicate`]s. The only state carried across steps is the
//! [`EpisodeContext`], the values of tracked fields captured at `reset`.
use crate::memory::StateSnapshot;
use gymboy_core::record::{Record, RecordValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;

/// A named contribution to the reward.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RewardComponent {
    Score,
    Coins,
    Lives,
    Time,
    Badges,
    Money,
    TeamSize,
    Levels,
    Hps,
    Pps,
    SeenPokemon,
    Events,
    TimeOver,
    LevelFinished,
    GameOver,
}

/// Weight factors of reward components. Components without an entry weigh 1.0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardWeights(BTreeMap<RewardComponent, f32>);

impl RewardWeights {
    /// Weight of a component.
    pub fn weight(&self, component: RewardComponent) -> f32 {
        self.0.get(&component).copied().unwrap_or(1.0)
    }

    /// Overrides the weight of a component.
    pub fn set(mut self, component: RewardComponent, weight: f32) -> Self {
        self.0.insert(component, weight);
        self
    }
}

/// Values of tracked fields at the most recent reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeContext {
    reset_values: BTreeMap<&'static str, Vec<u64>>,
}

impl EpisodeContext {
    /// Captures `fields` from the snapshot taken at reset.
    pub fn capture(fields: &[&'static str], snapshot: &StateSnapshot) -> Self {
        let reset_values = fields
            .iter()
            .filter_map(|&f| snapshot.get(f).map(|v| (f, v.to_vec())))
            .collect();
        Self { reset_values }
    }

    /// Value of a field at reset.
    pub fn get(&self, name: &str) -> Option<&[u64]> {
        self.reset_values.get(name).map(|v| v.as_slice())
    }
}

/// A boolean condition on a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// The field equals `value`.
    Equals { field: &'static str, value: u64 },
    /// The field equals one of `values`.
    OneOf {
        field: &'static str,
        values: &'static [u64],
    },
    /// The field lies in `low..=high`.
    InRange {
        field: &'static str,
        low: u64,
        high: u64,
    },
    /// The field differs from its value at the last reset.
    ChangedSinceReset { field: &'static str },
    /// All predicates hold.
    AllOf(Vec<Predicate>),
}

impl Predicate {
    /// Evaluates the predicate.
    pub fn holds(&self, snapshot: &StateSnapshot, context: &EpisodeContext) -> bool {
        match self {
            Self::Equals { field, value } => snapshot.scalar(field) == *value,
            Self::OneOf { field, values } => values.contains(&snapshot.scalar(field)),
            Self::InRange { field, low, high } => {
                let v = snapshot.scalar(field);
                *low <= v && v <= *high
            }
            Self::ChangedSinceReset { field } => match (context.get(field), snapshot.get(field)) {
                (Some(before), Some(now)) => before != now,
                _ => false,
            },
            Self::AllOf(predicates) => predicates.iter().all(|p| p.holds(snapshot, context)),
        }
    }

    /// Fields the predicate reads.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Equals { field, .. }
            | Self::OneOf { field, .. }
            | Self::InRange { field, .. }
            | Self::ChangedSinceReset { field } => vec![*field],
            Self::AllOf(predicates) => predicates.iter().flat_map(|p| p.fields()).collect(),
        }
    }

    /// Fields that must be captured at reset.
    pub fn tracked_fields(&self) -> Vec<&'static str> {
        match self {
            Self::ChangedSinceReset { field } => vec![*field],
            Self::AllOf(predicates) => predicates.iter().flat_map(|p| p.tracked_fields()).collect(),
            _ => vec![],
        }
    }
}

/// One normalized term of a title's reward.
#[derive(Clone, Debug, PartialEq)]
pub enum RewardTerm {
    /// Sum of the field divided by a fixed denominator.
    Normalized {
        component: RewardComponent,
        field: &'static str,
        denominator: f32,
    },
    /// Sum of one field over the sum of another, clamped to `[0, 1]`.
    /// A zero denominator yields 0.
    Ratio {
        component: RewardComponent,
        numerator: &'static str,
        denominator: &'static str,
    },
    /// `value` while the predicate holds, 0 otherwise.
    Flag {
        component: RewardComponent,
        when: Predicate,
        value: f32,
    },
}

impl RewardTerm {
    /// Component the term contributes to.
    pub fn component(&self) -> RewardComponent {
        match self {
            Self::Normalized { component, .. }
            | Self::Ratio { component, .. }
            | Self::Flag { component, .. } => *component,
        }
    }

    /// Unweighted value of the term.
    pub fn evaluate(&self, snapshot: &StateSnapshot, context: &EpisodeContext) -> f32 {
        match self {
            Self::Normalized {
                field, denominator, ..
            } => snapshot.sum(field) as f32 / denominator,
            Self::Ratio {
                numerator,
                denominator,
                ..
            } => match snapshot.sum(denominator) {
                0 => 0.0,
                d => (snapshot.sum(numerator) as f32 / d as f32).min(1.0),
            },
            Self::Flag { when, value, .. } => {
                if when.holds(snapshot, context) {
                    *value
                } else {
                    0.0
                }
            }
        }
    }

    /// Fields the term reads.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Normalized { field, .. } => vec![*field],
            Self::Ratio {
                numerator,
                denominator,
                ..
            } => vec![*numerator, *denominator],
            Self::Flag { when, .. } => when.fields(),
        }
    }
}

/// Weighted contributions of one step.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardComponents(Vec<(RewardComponent, f32)>);

impl RewardComponents {
    /// Sum of the weighted contributions.
    pub fn total(&self) -> f32 {
        self.0.iter().map(|(_, v)| v).sum()
    }

    /// Weighted contribution of a component.
    pub fn get(&self, component: RewardComponent) -> Option<f32> {
        self.0.iter().find(|(c, _)| *c == component).map(|(_, v)| *v)
    }

    /// Iterates over the weighted contributions.
    pub fn iter(&self) -> impl Iterator<Item = &(RewardComponent, f32)> {
        self.0.iter()
    }

    /// Every contribution under its name, plus the total under `"reward"`.
    pub fn to_record(&self) -> Record {
        let mut record = Record::empty();
        for (component, value) in self.0.iter() {
            record.insert(component.to_string(), RecordValue::Scalar(*value));
        }
        record.insert("reward", RecordValue::Scalar(self.total()));
        record
    }
}

/// Computes the reward of a title and owns the per-episode context.
pub struct RewardCalculator {
    terms: Vec<RewardTerm>,
    weights: RewardWeights,
    tracked: Vec<&'static str>,
    context: EpisodeContext,
}

impl RewardCalculator {
    /// Creates a calculator. `tracked` lists the fields captured at every reset.
    pub fn new(terms: Vec<RewardTerm>, weights: RewardWeights, tracked: Vec<&'static str>) -> Self {
        Self {
            terms,
            weights,
            tracked,
            context: EpisodeContext::default(),
        }
    }

    /// Starts a new episode from the snapshot taken at reset.
    pub fn reset(&mut self, snapshot: &StateSnapshot) {
        self.context = EpisodeContext::capture(&self.tracked, snapshot);
    }

    /// The context captured at the last reset.
    pub fn context(&self) -> &EpisodeContext {
        &self.context
    }

    /// Weighted contributions of every term.
    pub fn components(&self, snapshot: &StateSnapshot) -> RewardComponents {
        RewardComponents(
            self.terms
                .iter()
                .map(|t| {
                    let c = t.component();
                    (c, self.weights.weight(c) * t.evaluate(snapshot, &self.context))
                })
                .collect(),
        )
    }
}

/// Ends an episode when any of the predicates holds. No predicate means never.
#[derive(Clone, Debug, PartialEq)]
pub struct Termination(Vec<Predicate>);

impl Termination {
    /// Ends the episode as soon as one of `any_of` holds.
    pub fn new(any_of: Vec<Predicate>) -> Self {
        Self(any_of)
    }

    /// Whether the episode has ended.
    pub fn is_terminated(&self, snapshot: &StateSnapshot, context: &EpisodeContext) -> bool {
        self.0.iter().any(|p| p.holds(snapshot, context))
    }
}
