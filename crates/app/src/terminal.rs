use std::io::{self, BufRead, Write};

use quiz_core::model::{AnswerFeedback, QuestionType, QuizGrade, QuizResult, QuizSession};
use services::{QuizService, QuizView};

/// What the player typed at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Choice(usize),
    Next,
    Quit,
}

/// How an interactive run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(QuizResult),
    /// Player quit; the saved quiz picks up from here next time.
    Paused,
}

/// Line-oriented quiz presenter.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn show_question(&mut self, view: &QuizView<'_>) -> io::Result<()> {
        let Some(question) = view.current_question else {
            return Ok(());
        };
        let prompt = match question.question_type {
            QuestionType::WordToDefinition => "What does this word mean?",
            QuestionType::DefinitionToWord => "Which word matches this definition?",
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Question {} of {}  (score {})",
            view.question_number(),
            view.total_questions,
            view.score
        )?;
        writeln!(self.output, "{prompt}")?;
        writeln!(self.output, "  {}", question.question_text)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option.text)?;
        }
        Ok(())
    }

    /// Ask for an option number until a valid one (or `q`) is entered.
    ///
    /// End of input counts as quitting.
    pub fn read_choice(&mut self, option_count: usize) -> io::Result<Input> {
        loop {
            write!(self.output, "Your answer [1-{option_count}, q to quit]: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Input::Quit);
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(Input::Quit);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=option_count).contains(&n) => return Ok(Input::Choice(n - 1)),
                _ => writeln!(self.output, "Please enter a number from 1 to {option_count}.")?,
            }
        }
    }

    pub fn show_feedback(&mut self, feedback: &AnswerFeedback) -> io::Result<()> {
        if feedback.is_correct {
            writeln!(self.output, "Correct!")?;
        } else {
            writeln!(
                self.output,
                "Not quite. The answer was: {}",
                feedback.correct_answer
            )?;
        }
        if !feedback.example.trim().is_empty() {
            writeln!(self.output, "Example ({}): {}", feedback.word, feedback.example)?;
        }
        Ok(())
    }

    pub fn wait_for_next(&mut self, is_last: bool) -> io::Result<Input> {
        let label = if is_last { "see results" } else { "continue" };
        write!(self.output, "Press Enter to {label}, q to quit: ")?;
        self.output.flush()?;

        match self.read_line()? {
            Some(line) if line.eq_ignore_ascii_case("q") => Ok(Input::Quit),
            Some(_) => Ok(Input::Next),
            None => Ok(Input::Quit),
        }
    }

    pub fn show_result(&mut self, result: &QuizResult) -> io::Result<()> {
        let verdict = match result.grade {
            QuizGrade::Excellent => "Excellent work!",
            QuizGrade::Good => "Good job!",
            QuizGrade::KeepPracticing => "Keep practicing!",
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "You scored {} out of {} ({}%). {verdict}",
            result.score, result.total, result.percentage
        )?;
        if !result.missed.is_empty() {
            writeln!(self.output, "Review these:")?;
            for question in &result.missed {
                writeln!(self.output, "  {}: {}", question.word, question.correct_answer)?;
            }
        }
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

/// Drive `session` to completion or until the player quits.
///
/// A resumed session whose current question is already answered goes
/// straight to the "next" prompt.
///
/// # Errors
///
/// Returns terminal I/O errors and service failures.
pub async fn run_quiz<R: BufRead, W: Write>(
    quiz: &QuizService,
    session: &mut QuizSession,
    terminal: &mut Terminal<R, W>,
) -> Result<RunOutcome, Box<dyn std::error::Error>> {
    loop {
        if let Some(result) = session.result() {
            terminal.show_result(&result)?;
            return Ok(RunOutcome::Completed(result));
        }

        let view = quiz.view(session);
        if !view.is_current_answered {
            let option_count = view.current_question.map_or(0, |q| q.options.len());
            terminal.show_question(&view)?;
            match terminal.read_choice(option_count)? {
                Input::Choice(index) => {
                    let feedback = quiz.choose_option(session, index).await?;
                    terminal.show_feedback(&feedback)?;
                }
                Input::Next | Input::Quit => return Ok(RunOutcome::Paused),
            }
        }

        let is_last = session.current_question_index() + 1 == session.total_questions();
        match terminal.wait_for_next(is_last)? {
            Input::Quit => return Ok(RunOutcome::Paused),
            Input::Next | Input::Choice(_) => quiz.advance(session).await?,
        }
    }
}
