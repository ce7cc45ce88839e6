pub mod catalog;
pub mod checker;
pub mod score;
pub mod session;

/// One irregular verb. Each form may hold several accepted spellings
/// separated by `/` or `,`, e.g. `dreamed/dreamt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Verb {
    pub v1: String,
    pub v2: String,
    pub v3: String,
    pub meaning: String,
}

impl Verb {
    pub fn new(v1: &str, v2: &str, v3: &str, meaning: &str) -> Self {
        Self {
            v1: v1.to_string(),
            v2: v2.to_string(),
            v3: v3.to_string(),
            meaning: meaning.to_string(),
        }
    }

    /// True only if every one of the three forms matches on its own.
    pub fn check(&self, v1: &str, v2: &str, v3: &str) -> bool {
        let results = [
            checker::matches(v1, &self.v1),
            checker::matches(v2, &self.v2),
            checker::matches(v3, &self.v3),
        ];
        results.iter().all(|ok| *ok)
    }

    pub fn forms(&self) -> String {
        format!("{} – {} – {}", self.v1, self.v2, self.v3)
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub id: usize,
    pub name: String,
    pub verbs: Vec<Verb>,
}

/// The result of one answered question. `question_index` is the position of
/// the verb in the quiz, starting from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserAnswer {
    pub question_index: usize,
    pub v1: String,
    pub v2: String,
    pub v3: String,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_is_correct_only_when_all_forms_match() {
        let verb = Verb::new("dream", "dreamed/dreamt", "dreamed/dreamt", "мріяти");

        assert!(verb.check("dream", "dreamt", "Dreamed"));
        assert!(!verb.check("dream", "dreamt", "dreamd"));
        assert!(!verb.check("", "dreamt", "dreamt"));
    }

    #[test]
    fn forms_are_joined_for_display() {
        let verb = Verb::new("go", "went", "gone", "йти");
        assert_eq!(verb.forms(), "go – went – gone");
    }
}
