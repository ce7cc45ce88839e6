use std::fmt;

use crate::quiz::UserAnswer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tier {
    Perfect,
    Excellent,
    Good,
    NeedsPractice,
}

impl Tier {
    /// Bands are inclusive on their lower bound.
    pub fn from_score(score: f64) -> Self {
        if score == 10.0 {
            Tier::Perfect
        } else if score >= 8.0 {
            Tier::Excellent
        } else if score >= 5.0 {
            Tier::Good
        } else {
            Tier::NeedsPractice
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::NeedsPractice => "needs practice",
        }
    }

    pub fn cheer(&self) -> &'static str {
        match self {
            Tier::Perfect => "🏆 Бездоганно!",
            Tier::Excellent => "🌟 Чудово!",
            Tier::Good => "👍 Непогано!",
            Tier::NeedsPractice => "💪 Треба ще потренуватися!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Out of 10.
    pub score: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub tier: Tier,
}

/// Scores the answers that were actually given, so a quiz left early is
/// scored against the answered questions only.
pub fn summarize(answers: &[UserAnswer]) -> Summary {
    let total = answers.len();
    let correct = answers.iter().filter(|a| a.is_correct).count();
    let score = if total == 0 {
        0.0
    } else {
        10.0 * correct as f64 / total as f64
    };

    Summary {
        score,
        correct,
        incorrect: total - correct,
        tier: Tier::from_score(score),
    }
}
