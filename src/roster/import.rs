use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::{Gender, PlayerDraft, SkillLevel};

/// Turns pasted text into a batch of players sharing one level and gender.
///
/// Each non-blank line is one player, except that `Guest 3` expands to
/// `Guest 1`, `Guest 2`, `Guest 3`.
pub struct BatchParser {
    repeat_regex: Regex,
}

impl BatchParser {
    pub fn new() -> Result<Self> {
        let repeat_regex = Self::compile_regex()?;
        Ok(Self { repeat_regex })
    }

    pub fn parse(&self, text: &str, level: SkillLevel, gender: Gender) -> Vec<PlayerDraft> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .flat_map(|line| self.expand_line(line))
            .map(|name| PlayerDraft::new(name, level, gender))
            .collect()
    }

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^(?P<base>.*\S)\s+(?P<count>\d+)$")
            .context("Failed to compile batch repeat regex")
    }

    fn expand_line(&self, line: &str) -> Vec<String> {
        match self.parse_repeat(line) {
            Some((base, count)) => (1..=count).map(|i| format!("{} {}", base, i)).collect(),
            None => vec![line.to_string()],
        }
    }

    fn parse_repeat(&self, line: &str) -> Option<(String, u32)> {
        let captures = self.repeat_regex.captures(line)?;
        let count: u32 = captures["count"].parse().ok()?;
        if count == 0 {
            return None;
        }

        let base = captures["base"].split_whitespace().collect::<Vec<_>>().join(" ");
        Some((base, count))
    }
}
