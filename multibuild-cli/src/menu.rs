//! Blocking question/answer prompts.
//!
//! [`Interaction`] is the port to the terminal; [`Menu`] builds the
//! numbered-choice questions on top of it and keeps asking until the answer
//! is valid.

use std::fmt::Display;
use std::str::FromStr;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

use multibuild_core::{BranchName, DEFAULT_BRANCH, DEFAULT_BRANCH_SHORTCUT};

pub const ANSWER_PROMPT: &str = "R: ";

const HEADER: &str = "#######################################################\n\
                      ####### Multiple Builder - Choose Your Options ########\n\
                      #######################################################";

/// The user left the prompt, or the terminal failed.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("interrupted by CTRL+C")]
    Interrupted,

    #[error("input closed (CTRL+D / CTRL+Z)")]
    Eof,

    #[error("terminal error: {0}")]
    Terminal(#[source] ReadlineError),
}

impl From<ReadlineError> for PromptError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => PromptError::Interrupted,
            ReadlineError::Eof => PromptError::Eof,
            other => PromptError::Terminal(other),
        }
    }
}

/// One line in, text out.
pub trait Interaction {
    /// Read one answer line after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Show a message that needs no answer.
    fn show(&mut self, message: &str);
}

/// [`Interaction`] over the real terminal. The line editor is only opened
/// once a question is actually asked.
#[derive(Default)]
pub struct TerminalInteraction {
    editor: Option<DefaultEditor>,
}

impl Interaction for TerminalInteraction {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        if self.editor.is_none() {
            self.editor = Some(DefaultEditor::new()?);
        }
        match self.editor.as_mut() {
            Some(editor) => Ok(editor.readline(prompt)?),
            None => Err(PromptError::Eof),
        }
    }

    fn show(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Numbered-choice questions over an [`Interaction`].
pub struct Menu<I> {
    io: I,
}

impl<I: Interaction> Menu<I> {
    pub fn new(io: I) -> Self {
        Self { io }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> I {
        self.io
    }

    pub fn header(&mut self) {
        self.io.show(HEADER);
    }

    /// Ask until one of `options`' keys is typed; returns that key.
    pub fn choose_one<K: MenuKey>(
        &mut self,
        question: &str,
        options: &[(K, &str)],
    ) -> Result<K, PromptError> {
        self.io.show(&render(question, options));
        loop {
            let answer = self.io.read_line(ANSWER_PROMPT)?;
            match parse_choice(answer.trim(), options) {
                Some(key) => return Ok(key),
                None => invalid_choice(&answer),
            }
        }
    }

    /// Ask until a space-separated list of valid keys is typed. Keys come
    /// back deduplicated, in the order of `options`.
    pub fn choose_many<K: MenuKey>(
        &mut self,
        question: &str,
        options: &[(K, &str)],
    ) -> Result<Vec<K>, PromptError> {
        self.io.show(&render(question, options));
        loop {
            let answer = self.io.read_line(ANSWER_PROMPT)?;
            let picked: Option<Vec<K>> = answer
                .split_whitespace()
                .map(|token| parse_choice(token, options))
                .collect();
            match picked {
                Some(picked) if !picked.is_empty() => {
                    return Ok(options
                        .iter()
                        .map(|(key, _)| *key)
                        .filter(|key| picked.contains(key))
                        .collect());
                }
                _ => invalid_choice(&answer),
            }
        }
    }

    /// `1 - Yes` / `2 - No`.
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        Ok(self.choose_one(question, &[(1u8, "Yes"), (2, "No")])? == 1)
    }

    /// Ask for a branch; `M` (any case) selects the default branch.
    pub fn ask_branch(&mut self) -> Result<BranchName, PromptError> {
        self.io.show(&format!(
            "Which branch should all the repositories build?\n\
             Type {DEFAULT_BRANCH_SHORTCUT} for the default branch {DEFAULT_BRANCH} or type the desired branch name:"
        ));
        loop {
            let answer = self.io.read_line(ANSWER_PROMPT)?;
            let answer = answer.trim();
            if answer.eq_ignore_ascii_case(DEFAULT_BRANCH_SHORTCUT) {
                return Ok(BranchName::default());
            }
            match BranchName::new(answer) {
                Ok(branch) => return Ok(branch),
                Err(err) => tracing::warn!("Invalid branch: {err}. Please type a valid branch name"),
            }
        }
    }
}

/// A numbered option key: typed by the user, printed in the menu.
pub trait MenuKey: Copy + PartialEq + FromStr + Display {}

impl<K: Copy + PartialEq + FromStr + Display> MenuKey for K {}

fn render<K: MenuKey>(question: &str, options: &[(K, &str)]) -> String {
    let mut text = question.to_string();
    for (key, label) in options {
        text.push_str(&format!("\n{key} - {label}"));
    }
    text
}

fn parse_choice<K: MenuKey>(token: &str, options: &[(K, &str)]) -> Option<K> {
    let key = token.parse::<K>().ok()?;
    options.iter().any(|(k, _)| *k == key).then_some(key)
}

fn invalid_choice(answer: &str) {
    tracing::warn!(
        "Invalid choice '{}': not a valid option. Please choose a valid option",
        answer.trim()
    );
}
