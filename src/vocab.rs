//! Keyword and rule tables
//!
//! The fixed pattern tables behind the lexer's domain guess and the
//! validator's heuristics, modeled as data rather than inline conditionals.
//! Both tables ship with compiled-in defaults and can be loaded from YAML
//! so deployments extend or localize them without touching control flow.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::schema::Domain;

/// Ordered domain keyword table
///
/// Entry order is significant: the domain guess only replaces its current
/// best on a strictly greater hit count, so ties keep the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainLexicon {
    pub domains: Vec<LexiconEntry>,
}

/// Keywords that vote for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub domain: Domain,
    pub keywords: Vec<String>,
}

impl Default for DomainLexicon {
    fn default() -> Self {
        let entry = |domain: Domain, keywords: &[&str]| LexiconEntry {
            domain,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };

        Self {
            domains: vec![
                entry(
                    Domain::Coding,
                    &["codeforces", "leetcode", "dsa", "contest", "div2", "div 2", "cp"],
                ),
                entry(
                    Domain::Study,
                    &["study", "learn", "chapter", "topic", "eigen", "exam", "sheet"],
                ),
                entry(
                    Domain::Fitness,
                    &["run", "marathon", "gym", "workout", "lift", "stamina"],
                ),
            ],
        }
    }
}

impl DomainLexicon {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, VocabError> {
        let content = std::fs::read_to_string(path).map_err(|e| VocabError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        info!("Loaded domain lexicon from {}", path.display());
        Self::load_from_str(&content)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, VocabError> {
        serde_yaml::from_str(yaml).map_err(|e| VocabError::ParseError(e.to_string()))
    }

    /// Guess the domain of a piece of text by keyword hits
    ///
    /// Substring containment against the lowercased text, counted per
    /// domain; the strictly highest count wins and zero hits everywhere
    /// yields no guess.
    pub fn guess(&self, text: &str) -> Option<Domain> {
        let t = text.to_lowercase();
        let mut best: Option<Domain> = None;
        let mut best_hits = 0usize;

        for entry in &self.domains {
            let hits = entry
                .keywords
                .iter()
                .filter(|kw| t.contains(kw.as_str()))
                .count();
            if hits > best_hits {
                best_hits = hits;
                best = Some(entry.domain);
            }
        }

        best
    }
}

/// Pattern tables for the intent validator
///
/// Patterns are regular expressions matched against trimmed, lowercased
/// text, so they are written in lowercase with explicit word bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    /// Objectives matching any of these are rejected outright
    pub reject_objective: Vec<String>,
    /// Success definitions matching any of these need clarification
    pub vague_success: Vec<String>,
}

impl Default for RuleBook {
    fn default() -> Self {
        let patterns = |ps: &[&str]| ps.iter().map(|p| p.to_string()).collect();

        Self {
            reject_objective: patterns(&[
                r"\bmillionaire\b",
                r"\brich\b",
                r"\bwealthy\b",
                r"\bsuccessful\b",
                r"\bchange my life\b",
                r"\bfix my life\b",
                r"\bbe happy\b",
                r"\bget a girlfriend\b",
                r"\bcareer\b",
            ]),
            vague_success: patterns(&[
                r"\bget better\b",
                r"\bimprove\b",
                r"\bunderstand well\b",
                r"\bmaster\b",
                r"\bbe good at\b",
                r"\blearn\b$",
            ]),
        }
    }
}

impl RuleBook {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, VocabError> {
        let content = std::fs::read_to_string(path).map_err(|e| VocabError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        info!("Loaded rule book from {}", path.display());
        Self::load_from_str(&content)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, VocabError> {
        serde_yaml::from_str(yaml).map_err(|e| VocabError::ParseError(e.to_string()))
    }
}

/// Errors that can occur when loading vocabulary tables
#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("Failed to read file {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LEXICON: &str = r#"
domains:
  - domain: coding
    keywords: [codeforces, leetcode, contest]
  - domain: study
    keywords: [study, exam]
  - domain: fitness
    keywords: [run, gym]
"#;

    #[test]
    fn test_default_guess_coding() {
        let lexicon = DomainLexicon::default();
        assert_eq!(
            lexicon.guess("Prepare for Codeforces Div 2 in 14 days"),
            Some(Domain::Coding)
        );
    }

    #[test]
    fn test_default_guess_study() {
        let lexicon = DomainLexicon::default();
        assert_eq!(lexicon.guess("Study eigenvalues this week"), Some(Domain::Study));
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let lexicon = DomainLexicon::default();
        assert_eq!(lexicon.guess("GYM WORKOUT PLAN"), Some(Domain::Fitness));
    }

    #[test]
    fn test_guess_none_on_zero_hits() {
        let lexicon = DomainLexicon::default();
        assert_eq!(lexicon.guess("water the plants"), None);
    }

    #[test]
    fn test_tie_keeps_first_declared_domain() {
        // One coding hit and one study hit: coding is declared first and a
        // tie never replaces the current best.
        let lexicon = DomainLexicon::default();
        assert_eq!(lexicon.guess("study codeforces"), Some(Domain::Coding));
    }

    #[test]
    fn test_strictly_more_hits_wins() {
        let lexicon = DomainLexicon::default();
        // Two study hits beat one coding hit regardless of declaration order.
        assert_eq!(
            lexicon.guess("study the exam chapter on codeforces"),
            Some(Domain::Study)
        );
    }

    #[test]
    fn test_load_lexicon_from_str() {
        let lexicon = DomainLexicon::load_from_str(SAMPLE_LEXICON).unwrap();
        assert_eq!(lexicon.domains.len(), 3);
        assert_eq!(lexicon.domains[0].domain, Domain::Coding);
        assert_eq!(lexicon.guess("codeforces contest"), Some(Domain::Coding));
    }

    #[test]
    fn test_load_lexicon_rejects_bad_yaml() {
        let err = DomainLexicon::load_from_str("domains: [").unwrap_err();
        assert!(matches!(err, VocabError::ParseError(_)));
    }

    #[test]
    fn test_default_lexicon_survives_yaml_roundtrip() {
        let lexicon = DomainLexicon::default();
        let yaml = serde_yaml::to_string(&lexicon).unwrap();
        let reloaded = DomainLexicon::load_from_str(&yaml).unwrap();
        assert_eq!(reloaded, lexicon);
    }

    #[test]
    fn test_load_rulebook_from_str() {
        let yaml = r#"
reject_objective:
  - '\bwin the lottery\b'
vague_success:
  - '\bsomeday\b'
"#;
        let rules = RuleBook::load_from_str(yaml).unwrap();
        assert_eq!(rules.reject_objective.len(), 1);
        assert_eq!(rules.vague_success.len(), 1);
    }

    #[test]
    fn test_default_rulebook_has_both_tables() {
        let rules = RuleBook::default();
        assert!(rules.reject_objective.contains(&r"\bmillionaire\b".to_string()));
        assert!(rules.vague_success.contains(&r"\blearn\b$".to_string()));
    }
}
