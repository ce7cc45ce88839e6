use crate::quiz::{score, UserAnswer, Verb};

/// One of the three principal forms asked for every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Form {
    V1,
    V2,
    V3,
}

impl Form {
    pub const ALL: [Form; 3] = [Form::V1, Form::V2, Form::V3];

    pub fn label(&self) -> &'static str {
        match self {
            Form::V1 => "V1 (інфінітив)",
            Form::V2 => "V2 (минулий час)",
            Form::V3 => "V3 (дієприкметник минулого часу)",
        }
    }
}

/// What happened to a piece of text handed to [`QuizSession::enter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The text was buffered; this form is asked next.
    Pending(Form),
    /// The third form arrived and the question was scored.
    Scored(UserAnswer),
    /// Feedback is on screen or there is no question to answer.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved on; holds the index of the new current question.
    Next(usize),
    /// The current question has no answer yet, nothing changed.
    Unanswered,
    Finished,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    title: String,
    verbs: Vec<Verb>,
    index: usize,
    inputs: Vec<String>,
    feedback: Option<bool>,
    answers: Vec<UserAnswer>,
    finished: bool,
}

impl QuizSession {
    pub fn new(title: impl Into<String>, verbs: Vec<Verb>) -> Self {
        Self {
            title: title.into(),
            verbs,
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// 1-based number of the current question, for display.
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    pub fn current_verb(&self) -> Option<&Verb> {
        if self.finished {
            return None;
        }
        self.verbs.get(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.verbs.len()
    }

    /// `Some(is_correct)` while feedback for the current question is shown.
    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The form the next call to [`enter`](Self::enter) will fill.
    pub fn pending_form(&self) -> Option<Form> {
        if self.feedback.is_some() || self.current_verb().is_none() {
            return None;
        }
        Form::ALL.get(self.inputs.len()).copied()
    }

    /// Buffers one answer. The question is scored as soon as all three forms
    /// are in.
    pub fn enter(&mut self, text: &str) -> Entry {
        if self.pending_form().is_none() {
            return Entry::Ignored;
        }
        self.inputs.push(text.to_string());

        if let Some(form) = self.pending_form() {
            return Entry::Pending(form);
        }

        let (v1, v2, v3) = (
            self.inputs[0].clone(),
            self.inputs[1].clone(),
            self.inputs[2].clone(),
        );
        match self.submit(&v1, &v2, &v3) {
            Some(answer) => Entry::Scored(answer.clone()),
            None => Entry::Ignored,
        }
    }

    /// Scores the current question. Does nothing and returns `None` while
    /// feedback is already shown, so a question is answered at most once.
    pub fn submit(&mut self, v1: &str, v2: &str, v3: &str) -> Option<&UserAnswer> {
        if self.feedback.is_some() {
            return None;
        }
        let verb = self.current_verb()?;
        let is_correct = verb.check(v1, v2, v3);

        self.answers.push(UserAnswer {
            question_index: self.index,
            v1: v1.to_string(),
            v2: v2.to_string(),
            v3: v3.to_string(),
            is_correct,
        });
        self.feedback = Some(is_correct);
        self.answers.last()
    }

    pub fn advance(&mut self) -> Progress {
        if self.finished || self.verbs.is_empty() {
            self.finished = true;
            return Progress::Finished;
        }
        if self.feedback.is_none() {
            return Progress::Unanswered;
        }

        self.inputs.clear();
        self.feedback = None;
        if self.is_last() {
            self.finished = true;
            return Progress::Finished;
        }
        self.index += 1;
        Progress::Next(self.index)
    }

    pub fn summary(&self) -> score::Summary {
        score::summarize(&self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::score::Tier;

    fn verbs() -> Vec<Verb> {
        vec![
            Verb::new("go", "went", "gone", "йти"),
            Verb::new("be", "was/were", "been", "бути"),
            Verb::new("dream", "dreamed/dreamt", "dreamed/dreamt", "мріяти"),
        ]
    }

    #[test]
    fn enter_asks_for_forms_in_order() {
        let mut session = QuizSession::new("Урок 1", verbs());

        assert_eq!(session.pending_form(), Some(Form::V1));
        assert_eq!(session.enter("go"), Entry::Pending(Form::V2));
        assert_eq!(session.enter("went"), Entry::Pending(Form::V3));

        match session.enter(" Gone ") {
            Entry::Scored(answer) => {
                assert_eq!(answer.question_index, 0);
                assert_eq!(answer.v3, " Gone ");
                assert!(answer.is_correct);
            }
            other => panic!("expected a scored answer, got {:?}", other),
        }
        assert_eq!(session.feedback(), Some(true));
        assert_eq!(session.pending_form(), None);
    }

    #[test]
    fn one_wrong_form_fails_the_question() {
        let mut session = QuizSession::new("Урок 1", verbs());
        let answer = session.submit("go", "goed", "gone").cloned();

        assert_eq!(answer.map(|a| a.is_correct), Some(false));
        assert_eq!(session.feedback(), Some(false));
    }

    #[test]
    fn resubmission_while_feedback_is_shown_is_ignored() {
        let mut session = QuizSession::new("Урок 1", verbs());
        session.submit("go", "went", "gone");

        assert!(session.submit("go", "went", "gone").is_none());
        assert_eq!(session.enter("go"), Entry::Ignored);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = QuizSession::new("Урок 1", verbs());
        assert_eq!(session.advance(), Progress::Unanswered);

        session.enter("go");
        assert_eq!(session.advance(), Progress::Unanswered);
        assert_eq!(session.question_number(), 1);
    }

    #[test]
    fn advance_clears_buffers_and_feedback() {
        let mut session = QuizSession::new("Урок 1", verbs());
        session.enter("go");
        session.enter("went");
        session.enter("gone");

        assert_eq!(session.advance(), Progress::Next(1));
        assert_eq!(session.feedback(), None);
        assert_eq!(session.pending_form(), Some(Form::V1));
        assert_eq!(session.current_verb().map(|v| v.v1.as_str()), Some("be"));
    }

    #[test]
    fn completed_session_has_contiguous_indices() {
        let mut session = QuizSession::new("Урок 1", verbs());
        let replies = [
            ["go", "went", "gone"],
            ["be", "were", "been"],
            ["dream", "dreamd", "dreamt"],
        ];

        for reply in replies {
            for form in reply {
                session.enter(form);
            }
            session.advance();
        }

        assert!(session.is_finished());
        assert_eq!(session.current_verb(), None);
        let indices: Vec<usize> = session.answers().iter().map(|a| a.question_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        let summary = session.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.tier, Tier::Good);
    }

    #[test]
    fn finished_session_ignores_input() {
        let mut session = QuizSession::new("Урок 1", vec![Verb::new("go", "went", "gone", "йти")]);
        session.submit("go", "went", "gone");
        assert!(session.is_last());
        assert_eq!(session.advance(), Progress::Finished);

        assert_eq!(session.enter("go"), Entry::Ignored);
        assert_eq!(session.advance(), Progress::Finished);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn ten_correct_answers_are_perfect() {
        let verbs = vec![Verb::new("go", "went", "gone", "йти"); 10];
        let mut session = QuizSession::new("Урок 1", verbs);

        for _ in 0..10 {
            session.submit("go", "went", "gone");
            session.advance();
        }

        let summary = session.summary();
        assert!(session.is_finished());
        assert_eq!(summary.score, 10.0);
        assert_eq!(summary.correct, 10);
        assert_eq!(summary.incorrect, 0);
        assert_eq!(summary.tier, Tier::Perfect);
    }

    #[test]
    fn empty_session_finishes_with_zero_score() {
        let mut session = QuizSession::new("Порожній урок", Vec::new());

        assert_eq!(session.pending_form(), None);
        assert_eq!(session.enter("go"), Entry::Ignored);
        assert_eq!(session.advance(), Progress::Finished);

        let summary = session.summary();
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.tier, Tier::NeedsPractice);
    }
}
