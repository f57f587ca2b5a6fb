//! Test id filtering for `--filter` expressions
//!
//! An expression is a comma-separated list of items:
//! - `api.test_login`: exact test id
//! - `re:^api\.`: regular expression matched against the test id
//! - `!item`: exclude tests matching `item` (either form above)
//!
//! A test is kept when it matches at least one include item (or there are
//! none) and no exclude item. Regexes cannot contain commas.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct Matcher {
    ids: HashSet<String>,
    patterns: Vec<Regex>,
}

impl Matcher {
    fn new() -> Self {
        Self {
            ids: HashSet::new(),
            patterns: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.patterns.is_empty()
    }

    fn matches(&self, test_id: &str) -> bool {
        self.ids.contains(test_id) || self.patterns.iter().any(|re| re.is_match(test_id))
    }

    fn add(&mut self, item: &str) -> Result<()> {
        if let Some(pattern) = item.strip_prefix("re:") {
            if pattern.is_empty() {
                bail!("Empty regex in filter expression");
            }
            let re = Regex::new(pattern)
                .with_context(|| format!("Invalid regex in filter expression: {}", pattern))?;
            self.patterns.push(re);
        } else {
            self.ids.insert(item.to_string());
        }
        Ok(())
    }
}

/// Filter that decides which tests enter aggregation
#[derive(Debug, Clone)]
pub struct TestFilter {
    include: Matcher,
    exclude: Matcher,
}

impl TestFilter {
    /// Create a filter that keeps every test
    pub fn all() -> Self {
        Self {
            include: Matcher::new(),
            exclude: Matcher::new(),
        }
    }

    /// Parse a filter expression like "re:^api\.,!api.test_legacy"
    pub fn from_expr(expr: &str) -> Result<Self> {
        let mut filter = Self::all();

        for part in expr.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some(negated) = part.strip_prefix('!') {
                let negated = negated.trim();
                if negated.is_empty() {
                    bail!("Invalid filter expression: '!' must be followed by a test id or regex");
                }
                filter.exclude.add(negated)?;
            } else {
                filter.include.add(part)?;
            }
        }

        if filter.include.is_empty() && filter.exclude.is_empty() {
            bail!("Invalid filter expression: {:?} selects nothing", expr);
        }

        Ok(filter)
    }

    /// Check if a test should be analyzed
    pub fn should_analyze(&self, test_id: &str) -> bool {
        if self.exclude.matches(test_id) {
            return false;
        }
        self.include.is_empty() || self.include.matches(test_id)
    }
}
