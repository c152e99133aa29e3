//! intent-core: Core intent lexer, schema, and validator
//!
//! This crate contains the pure intent-structuring logic with NO persistence
//! dependencies:
//! - Canonical schema types (IntentFrame, Task, ProtocolDay, ProtocolPlan)
//!   with constructor-time invariant enforcement
//! - Regex-based lexer that extracts time horizon, daily budget, and a
//!   domain guess from free text, leaving the remainder as the objective
//! - Rule-based validator issuing a tri-state disposition
//!   (valid / needs clarification / rejected)
//! - Declarative keyword and rule tables, loadable from YAML
//!
//! The lexer and validator never call each other; they compose only through
//! the schema. Plan synthesis, storage, and any front end live outside this
//! crate and consume the validated `IntentFrame` it produces.

pub mod lexer;
pub mod schema;
pub mod validator;
pub mod vocab;

// Re-export commonly used types
pub use lexer::{lex_intent, IntentLexer, LexedIntent, Token, TokenKind};
pub use schema::{Domain, IntentFrame, ProtocolDay, ProtocolPlan, SchemaError, Task, TaskType};
pub use validator::{validate_intent, IntentValidator, ValidationResult, ValidationStatus};
pub use vocab::{DomainLexicon, LexiconEntry, RuleBook, VocabError};
