//! Intent validator
//!
//! Decides whether a structurally valid `IntentFrame` is actionable, needs
//! clarification, or must be rejected. Pure and total: dispositions are
//! ordinary return values, never errors.
//!
//! # Decision order
//!
//! 1. Hard reject: unbounded / life-goal objectives (short-circuits)
//! 2. Hard reject: time horizon above 365 days (short-circuits)
//! 3. Soft issues, accumulated: vague success definition, then
//!    domain-specific missing information
//! 4. Any accumulated question resolves to needs-clarification, otherwise
//!    the intent is valid
//!
//! # Usage
//!
//! ```
//! use intent_core::schema::{Domain, IntentFrame};
//! use intent_core::validator::{validate_intent, ValidationStatus};
//!
//! let intent = IntentFrame::new(
//!     "Prepare for Codeforces Div 2",
//!     Domain::Coding,
//!     14,
//!     "Solve 4/6 problems in a Div 2 contest",
//! )
//! .unwrap()
//! .with_constraints(vec!["90 min/day".into()]);
//!
//! assert_eq!(validate_intent(&intent).status, ValidationStatus::Valid);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::schema::{Domain, IntentFrame};
use crate::vocab::RuleBook;

// =============================================================================
// VALIDATION RESULT
// =============================================================================

/// Disposition of a validated intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    NeedsClarification,
    Rejected,
}

/// Result of validating an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    /// Human-readable diagnostics, in check order
    pub reasons: Vec<String>,
    /// Follow-up questions; populated only for needs-clarification
    pub clarification_questions: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            status: ValidationStatus::Valid,
            reasons: vec![],
            clarification_questions: vec![],
        }
    }

    /// Create a rejected result
    pub fn rejected(reasons: Vec<String>) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            reasons,
            clarification_questions: vec![],
        }
    }

    /// Create a needs-clarification result
    pub fn needs_clarification(reasons: Vec<String>, questions: Vec<String>) -> Self {
        Self {
            status: ValidationStatus::NeedsClarification,
            reasons,
            clarification_questions: questions,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    pub fn is_rejected(&self) -> bool {
        self.status == ValidationStatus::Rejected
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

/// The intent validator
///
/// Compiles its rule book once; reusable and thread-safe.
pub struct IntentValidator {
    reject_objective: Vec<Regex>,
    vague_success: Vec<Regex>,
}

static DEFAULT_VALIDATOR: Lazy<IntentValidator> = Lazy::new(IntentValidator::default);

/// Validate an intent against the default rule book
pub fn validate_intent(intent: &IntentFrame) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(intent)
}

impl Default for IntentValidator {
    fn default() -> Self {
        Self::new(&RuleBook::default())
    }
}

impl IntentValidator {
    /// Create a validator from a rule book
    ///
    /// Unparseable patterns are skipped with a warning rather than failing
    /// the whole table.
    pub fn new(rules: &RuleBook) -> Self {
        Self {
            reject_objective: compile_patterns(&rules.reject_objective),
            vague_success: compile_patterns(&rules.vague_success),
        }
    }

    /// Validate a structurally valid intent
    pub fn validate(&self, intent: &IntentFrame) -> ValidationResult {
        // 1) Hard reject: unbounded / existential objectives
        if matches_any(&self.reject_objective, intent.objective()) {
            debug!("rejecting unbounded objective {:?}", intent.objective());
            return ValidationResult::rejected(vec![
                "Objective is not task-shaped (unbounded / life-goal).".to_string(),
                "Reformulate as a bounded, time-scoped objective with measurable success."
                    .to_string(),
            ]);
        }

        // 2) Sanity bounds
        if intent.time_horizon_days() > 365 {
            debug!("rejecting {}-day horizon", intent.time_horizon_days());
            return ValidationResult::rejected(vec![
                "Time horizon too large for v1 (must be <= 365 days).".to_string(),
            ]);
        }

        let mut reasons = Vec::new();
        let mut questions = Vec::new();

        // 3) Success definition must be testable-ish
        if matches_any(&self.vague_success, intent.success_definition()) {
            questions.push(
                "Define success in a testable way (e.g., 'solve X problems', \
                 'run Y km continuously', 'score Z on a mock')."
                    .to_string(),
            );
            reasons.push("Success definition is too vague.".to_string());
        }

        // 4) Domain-specific missing info
        match intent.domain() {
            Domain::Fitness => {
                if intent.starting_state().is_none() {
                    questions.push(
                        "What is your current level? (e.g., 'can run 2km', 'lift X kg', etc.)"
                            .to_string(),
                    );
                    reasons.push("Missing starting_state for fitness intent.".to_string());
                }
                if intent.constraints().is_empty() {
                    questions.push(
                        "Any constraints? (minutes per day, days per week, injuries, equipment)"
                            .to_string(),
                    );
                    reasons.push("Missing constraints (optional but recommended).".to_string());
                }
            }
            Domain::Study | Domain::Coding => {
                if intent.constraints().is_empty() {
                    questions.push(
                        "Any constraints? (available minutes/day, schedule limits, resources)"
                            .to_string(),
                    );
                    reasons.push("Missing constraints (optional but recommended).".to_string());
                }
            }
            // General intents get no extra checks
            Domain::General => {}
        }

        // 5) Decide status
        if !questions.is_empty() {
            debug!("intent needs clarification: {} question(s)", questions.len());
            return ValidationResult::needs_clarification(reasons, questions);
        }

        ValidationResult::valid()
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("skipping unparseable rule pattern {:?}: {}", p, e);
                None
            }
        })
        .collect()
}

/// Patterns are written for trimmed, lowercased text
fn matches_any(patterns: &[Regex], text: &str) -> bool {
    let t = text.trim().to_lowercase();
    patterns.iter().any(|re| re.is_match(&t))
}

// =============================================================================
// TESTS
// =============================================================================
