use crate::error::RagError;
use crate::types::Result;
use dialoguer::Input;
use std::io::{BufRead, IsTerminal};

/// Read the user's question: an interactive prompt on a terminal, a single
/// line otherwise. Surrounding whitespace is dropped.
pub fn ask_question(prompt: &str) -> Result<String> {
    let stdin = std::io::stdin();
    let line = if stdin.is_terminal() {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| std::io::Error::other(err.to_string()))?
    } else {
        eprintln!("{prompt}:");
        read_question(stdin.lock())?
    };
    normalize_question(&line)
}

pub fn read_question(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

pub fn normalize_question(raw: &str) -> Result<String> {
    let question = raw.trim();
    if question.is_empty() {
        return Err(RagError::EmptyQuestion);
    }
    Ok(question.to_string())
}
