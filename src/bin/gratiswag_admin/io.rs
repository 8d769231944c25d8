#![deny(clippy::all, clippy::pedantic)]

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::client::CliError;

pub async fn read_file(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })
}

/// Inline value or file contents, the file taking precedence.
pub async fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    match file {
        Some(path) => Ok(Some(read_file(&path).await?)),
        None => Ok(val),
    }
}

/// Lines of stdin, read on demand.
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn line(&mut self, prompt: &str) -> Result<String, CliError> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(format!("{prompt}: ").as_bytes())
            .await
            .map_err(CliError::Stdin)?;
        stderr.flush().await.map_err(CliError::Stdin)?;
        let line = self.lines.next_line().await.map_err(CliError::Stdin)?;
        Ok(line.unwrap_or_default().trim_end_matches('\r').to_string())
    }

    /// Secret from a file (first line) or, without one, from stdin.
    pub async fn secret(&mut self, file: Option<&Path>, prompt: &str) -> Result<String, CliError> {
        match file {
            Some(path) => Ok(first_line(&read_file(path).await?)),
            None => self.line(prompt).await,
        }
    }

    pub async fn confirm(&mut self, question: &str) -> Result<bool, CliError> {
        let answer = self.line(&format!("{question} [y/N]")).await?;
        Ok(is_yes(&answer))
    }
}

fn first_line(contents: &str) -> String {
    contents
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
        .to_string()
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
