//! Stable, collision-free class names.

use crate::error::Result;
use convert_case::{Case, Casing};
use regex::Regex;
use std::collections::HashSet;

/// Mints class names from node names in first-come order.
#[derive(Debug, Clone)]
pub struct ClassNamer {
    prefix: String,
    separators: Regex,
    used: HashSet<String>,
}

impl ClassNamer {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            prefix: prefix.into(),
            separators: Regex::new(r"[^A-Za-z0-9]+")?,
            used: HashSet::new(),
        })
    }

    /// Kebab-case identifier for `name`, or `fallback` when nothing usable remains.
    pub fn sanitize(&self, name: &str, fallback: &str) -> String {
        let spaced = self.separators.replace_all(name, " ");
        let kebab = spaced.trim().to_case(Case::Kebab);
        let base = if kebab.is_empty() {
            fallback.to_string()
        } else {
            kebab
        };
        if base.starts_with(|c: char| c.is_ascii_digit()) {
            format!("n-{}", base)
        } else {
            base
        }
    }

    /// Reserve a new class name; repeated names get `-2`, `-3`, ...
    pub fn mint(&mut self, name: &str, fallback: &str) -> String {
        let base = format!("{}{}", self.prefix, self.sanitize(name, fallback));
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}
