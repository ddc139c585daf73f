use crate::question::{Question, QuestionConstraints};
use intervallo_domain_theory::{Direction, NoteName, Pitch};
use intervallo_ports::settings::{DirectionPolicy, StartNote};
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no interval selected")]
    EmptySelection,
    #[error("no question fits the selected octaves after {attempts} attempts")]
    NoValidQuestion { attempts: u32 },
}

/// Draws questions by rejection sampling until both pitches fit the octave window.
pub struct QuestionGenerator<R: Rng = StdRng> {
    rng: R,
    max_attempts: u32,
}

impl QuestionGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn generate(&mut self, constraints: &QuestionConstraints) -> Result<Question, GenerateError> {
        let intervals = constraints.enabled_intervals();
        if intervals.is_empty() {
            return Err(GenerateError::EmptySelection);
        }
        let Some((low, high)) = constraints.bounds() else {
            return Err(GenerateError::NoValidQuestion { attempts: 0 });
        };

        // One direction per question, drawn before sampling.
        let direction = self.resolve_direction(constraints.direction);

        for _ in 0..self.max_attempts {
            let name = match constraints.start {
                StartNote::Random => NoteName::ALL[self.rng.gen_range(0..NoteName::ALL.len())],
                StartNote::Fixed(name) => name,
            };
            let Some(&octave) = constraints.octaves.iter().choose(&mut self.rng) else {
                break;
            };
            let Some(&interval) = intervals.choose(&mut self.rng) else {
                break;
            };

            let question = Question::new(Pitch::new(name, octave), interval, direction);
            let start = question.start.absolute_index();
            let target = question.target().absolute_index();
            if (low..=high).contains(&start) && (low..=high).contains(&target) {
                return Ok(question);
            }
        }

        tracing::warn!(
            attempts = self.max_attempts,
            ?direction,
            "no question fits the selected octaves"
        );
        Err(GenerateError::NoValidQuestion {
            attempts: self.max_attempts,
        })
    }

    fn resolve_direction(&mut self, policy: DirectionPolicy) -> Direction {
        match policy {
            DirectionPolicy::Ascending => Direction::Ascending,
            DirectionPolicy::Descending => Direction::Descending,
            DirectionPolicy::Both => {
                if self.rng.gen_bool(0.5) {
                    Direction::Ascending
                } else {
                    Direction::Descending
                }
            }
        }
    }
}
