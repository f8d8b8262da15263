use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A multiple-choice question with its answer key.
#[derive(Debug)]
pub struct Question {
    pub id: i64,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options` of the correct choice.
    pub answer: usize,
}

/// A question as shown to quiz takers, without the answer.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PublicQuestion {
    pub id: i64,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

pub static QUESTIONS: [Question; 10] = [
    Question {
        id: 1,
        prompt: "What is the capital of France?",
        options: &["Paris", "London", "Rome", "Berlin"],
        answer: 0,
    },
    Question {
        id: 2,
        prompt: "Which planet is known as the Red Planet?",
        options: &["Earth", "Mars", "Venus", "Jupiter"],
        answer: 1,
    },
    Question {
        id: 3,
        prompt: "2 + 2 * 2 = ?",
        options: &["6", "8", "4", "2"],
        answer: 0,
    },
    Question {
        id: 4,
        prompt: "Which language runs in a browser?",
        options: &["Python", "C++", "JavaScript", "Java"],
        answer: 2,
    },
    Question {
        id: 5,
        prompt: "Who wrote 'Romeo and Juliet'?",
        options: &["Shakespeare", "Dickens", "Tolkien", "Austen"],
        answer: 0,
    },
    Question {
        id: 6,
        prompt: "H2O is the chemical formula for?",
        options: &["Salt", "Oxygen", "Water", "Hydrogen"],
        answer: 2,
    },
    Question {
        id: 7,
        prompt: "Which animal is known as the King of the Jungle?",
        options: &["Tiger", "Elephant", "Lion", "Giraffe"],
        answer: 2,
    },
    Question {
        id: 8,
        prompt: "What does CSS stand for?",
        options: &[
            "Cascading Style Sheets",
            "Computer Style Sheets",
            "Colorful Style System",
            "Creative Style Sheets",
        ],
        answer: 0,
    },
    Question {
        id: 9,
        prompt: "Which is a JavaScript framework?",
        options: &["Django", "Flask", "React", "Laravel"],
        answer: 2,
    },
    Question {
        id: 10,
        prompt: "What is 10 squared?",
        options: &["100", "20", "1000", "10"],
        answer: 0,
    },
];

/// Read-only view over a fixed question set.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    questions: &'static [Question],
}

impl Catalog {
    pub const fn new(questions: &'static [Question]) -> Self {
        Self { questions }
    }

    /// The built-in general knowledge quiz.
    pub fn standard() -> Self {
        Self::new(&QUESTIONS)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn find(&self, id: i64) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn public_view(&self) -> Vec<PublicQuestion> {
        self.questions
            .iter()
            .map(|q| PublicQuestion {
                id: q.id,
                prompt: q.prompt,
                options: q.options,
            })
            .collect()
    }

    /// A missing id never matches a question; a missing selection is simply wrong.
    pub fn check_answer(
        &self,
        question_id: Option<i64>,
        selected_index: Option<i64>,
    ) -> AppResult<bool> {
        let question = question_id
            .and_then(|id| self.find(id))
            .ok_or_else(|| AppError::NotFound("Question not found".into()))?;
        Ok(selected_index.map_or(false, |i| question.is_correct(i)))
    }
}

impl Question {
    pub fn is_correct(&self, selected_index: i64) -> bool {
        usize::try_from(selected_index).map_or(false, |i| i == self.answer)
    }
}
