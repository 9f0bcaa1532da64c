//! Static question bank and the quiz walk-through.

use super::answers::AnswerRecord;

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOption {
    /// Text shown on the option
    pub text: &'static str,
    /// Reply revealed once the option is picked
    pub response: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: &'static str,
    pub options: &'static [QuizOption],
}

const fn opt(text: &'static str, response: &'static str) -> QuizOption {
    QuizOption { text, response }
}

/// Questions from this index on use the deeper confetti palette
pub const INTIMATE_FROM: usize = 3;

pub static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: 1,
        prompt: "What's the vibe today?",
        options: &[
            opt("Cozy and cute", "I'll hug you and never let go."),
            opt("Chaotic but adorable", "My favorite kind of chaos."),
            opt("Romantic and extra", "You'll fly over clouds."),
        ],
    },
    QuizQuestion {
        id: 2,
        prompt: "Pick a date energy:",
        options: &[
            opt("Coffee + long walk", "Classic."),
            opt("Dinner + dessert mission", "The sweetest mission."),
            opt("Surprise me", "I've got ideas..."),
        ],
    },
    QuizQuestion {
        id: 3,
        prompt: "One thing you deserve more of:",
        options: &[
            opt("Flowers", "A garden's worth coming up."),
            opt("Kisses", "Infinite supply available."),
            opt("All of the above", "Correct answer!"),
        ],
    },
    QuizQuestion {
        id: 4,
        prompt: "Be honest... how much do you miss me?",
        options: &[
            opt("A little.", "Liar. You miss me more than that."),
            opt("More than I admit.", "I knew it. But I miss you more."),
            opt("Way too much.", "Good. Because I miss you even more."),
        ],
    },
    QuizQuestion {
        id: 5,
        prompt: "If I whisper in your ear right now...",
        options: &[
            opt("I'd melt.", "I'll put you back together."),
            opt("I'd blush.", "You'd look cute blushing."),
            opt("I'd pull you closer.", "That's dangerous."),
        ],
    },
    QuizQuestion {
        id: 6,
        prompt: "If I pulled you closer and kissed you?",
        options: &[
            opt("I wouldn't stop you.", "That's bold."),
            opt("I'd kiss you back.", "I like that."),
            opt("I'd make you regret starting it.", "Now I'm curious."),
        ],
    },
];

/// What happened when the player asked to move on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Nothing selected yet, the request was ignored
    NeedsSelection,
    /// Moved to the next question
    NextQuestion(usize),
    /// The last question was answered
    Completed,
}

/// Progress through a question bank.
///
/// Answers accumulate locally and are only handed out once the quiz is complete.
#[derive(Debug, Clone)]
pub struct QuizProgress {
    questions: &'static [QuizQuestion],
    index: usize,
    selected: Option<usize>,
    answers: AnswerRecord,
    completed: bool,
}

impl QuizProgress {
    pub fn new() -> Self {
        Self::with_questions(QUESTIONS)
    }

    pub fn with_questions(questions: &'static [QuizQuestion]) -> Self {
        Self {
            questions,
            index: 0,
            selected: None,
            answers: AnswerRecord::new(),
            completed: questions.is_empty(),
        }
    }

    pub fn current(&self) -> Option<&'static QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&'static QuizOption> {
        let question = self.current()?;
        question.options.get(self.selected?)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the current question uses the intimate palette
    pub fn is_intimate(&self) -> bool {
        self.index >= INTIMATE_FROM
    }

    /// Select an option of the current question. Out-of-range picks are ignored.
    pub fn select(&mut self, option: usize) -> bool {
        match self.current() {
            Some(question) if option < question.options.len() => {
                self.selected = Some(option);
                true
            }
            _ => false,
        }
    }

    /// Move the selection by `delta`, wrapping around the option list
    pub fn cycle_selection(&mut self, delta: isize) {
        let Some(question) = self.current() else {
            return;
        };
        let len = question.options.len() as isize;
        if len == 0 {
            return;
        }
        let next = match self.selected {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(next as usize);
    }

    /// Record the selected answer and move to the next question
    pub fn next(&mut self) -> QuizStep {
        let (Some(question), Some(option)) = (self.current(), self.selected_option()) else {
            return QuizStep::NeedsSelection;
        };
        self.answers.record(question.prompt, option.text);
        self.selected = None;

        if self.index + 1 < self.questions.len() {
            self.index += 1;
            QuizStep::NextQuestion(self.index)
        } else {
            self.completed = true;
            QuizStep::Completed
        }
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }
}

impl Default for QuizProgress {
    fn default() -> Self {
        Self::new()
    }
}
