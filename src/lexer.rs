//! Intent lexer
//!
//! Extracts the known, structured pieces of a free-text intent (time
//! horizon, daily time budget, domain) and leaves everything else behind as
//! the objective string. Deterministic and total: a missing pattern yields
//! an absent field, never an error.
//!
//! Each extraction takes only the first match of its pattern and then
//! overwrites the matched span with equal-length whitespace in a working
//! copy, so byte offsets of later matches stay valid against the original
//! text and consumed tokens can neither be re-matched nor leak into the
//! objective. Time-horizon extraction runs before budget extraction so a
//! number belonging to an "N weeks" phrase is never captured as a budget.
//!
//! # Usage
//!
//! ```
//! use intent_core::lexer::lex_intent;
//!
//! let out = lex_intent("Prepare for Div2 for 4 weeks, 30 min/day");
//! assert_eq!(out.time_horizon_days, Some(28));
//! assert_eq!(out.constraints, vec!["30 min/day".to_string()]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::Domain;
use crate::vocab::DomainLexicon;

/// One piece of structured data extracted from raw text, with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    /// Byte span in the original input
    pub span: (usize, usize),
    /// The raw matched substring
    pub raw: String,
}

/// What a token carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenKind {
    /// Total days available, already converted from weeks where needed
    TimeHorizon { days: u32 },
    /// Daily time budget, normalized to `"<minutes> min/day"`
    Budget { normalized: String },
}

/// Output of lexing one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexedIntent {
    /// Everything that was not consumed as a token; falls back to the
    /// trimmed original text when the tokens consumed the whole input
    pub objective_raw: String,
    pub time_horizon_days: Option<u32>,
    pub constraints: Vec<String>,
    pub domain_guess: Option<Domain>,
    /// Extraction audit trail, in extraction order
    pub tokens: Vec<Token>,
}

/// The intent lexer
///
/// Compiles its two fixed patterns once; reusable and thread-safe.
pub struct IntentLexer {
    time_re: Regex,
    budget_re: Regex,
    lexicon: DomainLexicon,
}

static DEFAULT_LEXER: Lazy<IntentLexer> = Lazy::new(IntentLexer::default);

/// Lex an intent with the default domain lexicon
pub fn lex_intent(text: &str) -> LexedIntent {
    DEFAULT_LEXER.lex(text)
}

impl Default for IntentLexer {
    fn default() -> Self {
        Self::new(DomainLexicon::default())
    }
}

impl IntentLexer {
    /// Create a lexer with a custom domain lexicon
    pub fn new(lexicon: DomainLexicon) -> Self {
        Self {
            time_re: Regex::new(r"(?i)(\d+)\s*(day|days|week|weeks)\b").unwrap(),
            budget_re: Regex::new(
                r"(?i)(\d+)\s*(min|mins|minute|minutes|h|hr|hrs|hour|hours)\s*/\s*day\b",
            )
            .unwrap(),
            lexicon,
        }
    }

    /// Lex a free-text intent statement
    pub fn lex(&self, text: &str) -> LexedIntent {
        let mut tokens = Vec::new();
        let mut constraints = Vec::new();
        let mut working = text.to_string();

        let time_horizon_days = self.extract_time_horizon(&mut working, &mut tokens);
        if let Some(budget) = self.extract_budget(&mut working, &mut tokens) {
            constraints.push(budget);
        }

        // The guess scans the original, unmasked text: masking is an
        // extraction concern, not a classification one.
        let domain_guess = self.lexicon.guess(text);

        let objective_raw = residual_objective(&working, text);

        LexedIntent {
            objective_raw,
            time_horizon_days,
            constraints,
            domain_guess,
            tokens,
        }
    }

    fn extract_time_horizon(&self, working: &mut String, tokens: &mut Vec<Token>) -> Option<u32> {
        let caps = self.time_re.captures(working.as_str())?;
        let m = caps.get(0).unwrap();
        let n: u32 = caps[1].parse().ok()?;
        let unit = caps[2].to_lowercase();
        let days = if unit.starts_with("week") {
            n.saturating_mul(7)
        } else {
            n
        };
        let (start, end) = (m.start(), m.end());
        let raw = m.as_str().to_string();

        debug!("lexed time horizon {:?} as {} days", raw, days);
        tokens.push(Token {
            kind: TokenKind::TimeHorizon { days },
            span: (start, end),
            raw,
        });
        mask_span(working, start, end);
        Some(days)
    }

    fn extract_budget(&self, working: &mut String, tokens: &mut Vec<Token>) -> Option<String> {
        let caps = self.budget_re.captures(working.as_str())?;
        let m = caps.get(0).unwrap();
        let value: u32 = caps[1].parse().ok()?;
        let unit = caps[2].to_lowercase();
        let normalized = normalize_budget(value, &unit);
        let (start, end) = (m.start(), m.end());
        let raw = m.as_str().to_string();

        debug!("lexed budget {:?} as {:?}", raw, normalized);
        tokens.push(Token {
            kind: TokenKind::Budget {
                normalized: normalized.clone(),
            },
            span: (start, end),
            raw,
        });
        mask_span(working, start, end);
        Some(normalized)
    }
}

/// Overwrite a consumed span with spaces, keeping all byte offsets stable
fn mask_span(text: &mut String, start: usize, end: usize) {
    text.replace_range(start..end, &" ".repeat(end - start));
}

/// Normalize a budget to minutes per day
fn normalize_budget(value: u32, unit: &str) -> String {
    let minutes = match unit {
        "h" | "hr" | "hrs" | "hour" | "hours" => value.saturating_mul(60),
        _ => value,
    };
    format!("{} min/day", minutes)
}

/// The objective is everything that was not a token
fn residual_objective(working: &str, original: &str) -> String {
    let collapsed = working.replace(',', " ");
    let objective = collapsed.split_whitespace().collect::<Vec<_>>().join(" ");
    if objective.is_empty() {
        original.trim().to_string()
    } else {
        objective
    }
}
