use crate::error::{ContribError, Result};
use regex::Regex;

/// Keeps or drops file paths by regular expression. Exclusion wins over
/// inclusion; an empty include list keeps everything not excluded.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    exclude: Vec<Regex>,
    include: Vec<Regex>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(exclude: &[S], include: &[S]) -> Result<Self> {
        Ok(Self {
            exclude: compile(exclude)?,
            include: compile(include)?,
        })
    }

    pub fn keep(&self, path: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(path))
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            Regex::new(pattern).map_err(|source| ContribError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}
