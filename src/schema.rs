//! Canonical intent and protocol schema
//!
//! Structural definitions shared by the lexer, the validator, and downstream
//! consumers:
//! - **Vocabulary**: `Domain` and `TaskType` closed enumerations
//! - **IntentFrame**: the canonical, validated user intent
//! - **Task / ProtocolDay / ProtocolPlan**: the execution-plan shapes a
//!   validated intent feeds into
//!
//! Every entity enforces its field bounds at construction time and returns
//! `SchemaError` on violation. Deserialization runs through the same
//! constructors (`try_from` shadow structs), so a document that violates a
//! bound fails to load instead of producing an invalid record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// VOCABULARY
// =============================================================================

/// High-level category of an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Study,
    Fitness,
    Coding,
    General,
}

/// Kind of a single executable unit inside a protocol
///
/// Consumed by plan synthesis; carried here because it is part of the
/// serialized plan contract. `Conceptual` keeps its historical wire name
/// `conceptual_pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[serde(rename = "conceptual_pass")]
    Conceptual,
    Practice,
    Review,
    Test,
    Execute,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Structural error raised when constructing a schema entity
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("objective must not be empty")]
    EmptyObjective,

    #[error("success_definition must not be empty")]
    EmptySuccessDefinition,

    #[error("time_horizon_days must be greater than zero")]
    NonPositiveTimeHorizon,

    #[error("duration_min must be greater than zero")]
    NonPositiveDuration,

    #[error("count must be greater than zero")]
    NonPositiveCount,

    #[error("day index must be greater than zero")]
    NonPositiveDayIndex,

    #[error("a protocol day requires at least one task")]
    EmptyTaskList,

    #[error("a protocol plan requires at least one day")]
    EmptyDayList,
}

// =============================================================================
// INTENT FRAME
// =============================================================================

/// Canonical, validated representation of a user intent
///
/// Constructed once per request from lexer output plus caller-supplied
/// fields, then passed immutably through validation. A rejected or
/// to-be-clarified intent is discarded and re-elicited, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIntentFrame")]
pub struct IntentFrame {
    objective: String,
    domain: Domain,
    time_horizon_days: u32,
    starting_state: Option<String>,
    constraints: Vec<String>,
    success_definition: String,
}

impl IntentFrame {
    /// Create a frame from its required fields
    ///
    /// `objective` and `success_definition` must contain non-whitespace text;
    /// `time_horizon_days` must be positive.
    pub fn new(
        objective: impl Into<String>,
        domain: Domain,
        time_horizon_days: u32,
        success_definition: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let objective = objective.into();
        if objective.trim().is_empty() {
            return Err(SchemaError::EmptyObjective);
        }
        let success_definition = success_definition.into();
        if success_definition.trim().is_empty() {
            return Err(SchemaError::EmptySuccessDefinition);
        }
        if time_horizon_days == 0 {
            return Err(SchemaError::NonPositiveTimeHorizon);
        }

        Ok(Self {
            objective,
            domain,
            time_horizon_days,
            starting_state: None,
            constraints: Vec::new(),
            success_definition,
        })
    }

    /// Attach the user's current capability or context
    pub fn with_starting_state(mut self, state: impl Into<String>) -> Self {
        self.starting_state = Some(state.into());
        self
    }

    /// Attach hard constraints (time, energy, environment), in display order
    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }

    /// What the user is trying to achieve
    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Total number of days available
    pub fn time_horizon_days(&self) -> u32 {
        self.time_horizon_days
    }

    pub fn starting_state(&self) -> Option<&str> {
        self.starting_state.as_deref()
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// What success concretely looks like
    pub fn success_definition(&self) -> &str {
        &self.success_definition
    }
}

#[derive(Deserialize)]
struct RawIntentFrame {
    objective: String,
    domain: Domain,
    time_horizon_days: u32,
    #[serde(default)]
    starting_state: Option<String>,
    #[serde(default)]
    constraints: Vec<String>,
    success_definition: String,
}

impl TryFrom<RawIntentFrame> for IntentFrame {
    type Error = SchemaError;

    fn try_from(raw: RawIntentFrame) -> Result<Self, Self::Error> {
        let mut frame = IntentFrame::new(
            raw.objective,
            raw.domain,
            raw.time_horizon_days,
            raw.success_definition,
        )?
        .with_constraints(raw.constraints);
        if let Some(state) = raw.starting_state {
            frame = frame.with_starting_state(state);
        }
        Ok(frame)
    }
}

// =============================================================================
// PROTOCOL SHAPES
// =============================================================================

/// A single executable unit inside a protocol
///
/// Either, both, or neither of `duration_min` and `count` may be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    #[serde(rename = "type")]
    task_type: TaskType,
    description: Option<String>,
    duration_min: Option<u32>,
    count: Option<u32>,
}

impl Task {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            description: None,
            duration_min: None,
            count: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Allocate time to this task; must be positive
    pub fn with_duration_min(mut self, duration_min: u32) -> Result<Self, SchemaError> {
        if duration_min == 0 {
            return Err(SchemaError::NonPositiveDuration);
        }
        self.duration_min = Some(duration_min);
        Ok(self)
    }

    /// Set a repetition count; must be positive
    pub fn with_count(mut self, count: u32) -> Result<Self, SchemaError> {
        if count == 0 {
            return Err(SchemaError::NonPositiveCount);
        }
        self.count = Some(count);
        Ok(self)
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn duration_min(&self) -> Option<u32> {
        self.duration_min
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }
}

#[derive(Deserialize)]
struct RawTask {
    #[serde(rename = "type")]
    task_type: TaskType,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration_min: Option<u32>,
    #[serde(default)]
    count: Option<u32>,
}

impl TryFrom<RawTask> for Task {
    type Error = SchemaError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let mut task = Task::new(raw.task_type);
        if let Some(d) = raw.description {
            task = task.with_description(d);
        }
        if let Some(m) = raw.duration_min {
            task = task.with_duration_min(m)?;
        }
        if let Some(n) = raw.count {
            task = task.with_count(n)?;
        }
        Ok(task)
    }
}

/// One day in the protocol timeline, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProtocolDay")]
pub struct ProtocolDay {
    day: u32,
    focus: Option<String>,
    tasks: Vec<Task>,
}

impl ProtocolDay {
    pub fn new(day: u32, tasks: Vec<Task>) -> Result<Self, SchemaError> {
        if day == 0 {
            return Err(SchemaError::NonPositiveDayIndex);
        }
        if tasks.is_empty() {
            return Err(SchemaError::EmptyTaskList);
        }
        Ok(Self {
            day,
            focus: None,
            tasks,
        })
    }

    /// Primary focus of the day
    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

#[derive(Deserialize)]
struct RawProtocolDay {
    day: u32,
    #[serde(default)]
    focus: Option<String>,
    tasks: Vec<Task>,
}

impl TryFrom<RawProtocolDay> for ProtocolDay {
    type Error = SchemaError;

    fn try_from(raw: RawProtocolDay) -> Result<Self, Self::Error> {
        let mut day = ProtocolDay::new(raw.day, raw.tasks)?;
        if let Some(f) = raw.focus {
            day = day.with_focus(f);
        }
        Ok(day)
    }
}

/// Fully structured execution protocol
///
/// Owns the intent it was compiled from. Construction logic (plan synthesis)
/// lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProtocolPlan")]
pub struct ProtocolPlan {
    intent: IntentFrame,
    days: Vec<ProtocolDay>,
}

impl ProtocolPlan {
    pub fn new(intent: IntentFrame, days: Vec<ProtocolDay>) -> Result<Self, SchemaError> {
        if days.is_empty() {
            return Err(SchemaError::EmptyDayList);
        }
        Ok(Self { intent, days })
    }

    pub fn intent(&self) -> &IntentFrame {
        &self.intent
    }

    pub fn days(&self) -> &[ProtocolDay] {
        &self.days
    }
}

#[derive(Deserialize)]
struct RawProtocolPlan {
    intent: IntentFrame,
    days: Vec<ProtocolDay>,
}

impl TryFrom<RawProtocolPlan> for ProtocolPlan {
    type Error = SchemaError;

    fn try_from(raw: RawProtocolPlan) -> Result<Self, Self::Error> {
        ProtocolPlan::new(raw.intent, raw.days)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_frame_valid_minimal() {
        let intent = IntentFrame::new(
            "Prepare for Codeforces Div 2",
            Domain::Coding,
            14,
            "Can solve 4/6 problems in a Div 2",
        )
        .unwrap();

        assert!(intent.objective().starts_with("Prepare"));
        assert_eq!(intent.time_horizon_days(), 14);
        assert!(intent.constraints().is_empty());
        assert!(intent.starting_state().is_none());
    }

    #[test]
    fn test_intent_frame_rejects_zero_time_horizon() {
        let err = IntentFrame::new(
            "Learn eigenvalues",
            Domain::Study,
            0,
            "Solve tutorial sheet questions",
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::NonPositiveTimeHorizon);
    }

    #[test]
    fn test_intent_frame_rejects_blank_objective() {
        let err = IntentFrame::new("   ", Domain::General, 7, "Done").unwrap_err();
        assert_eq!(err, SchemaError::EmptyObjective);
    }

    #[test]
    fn test_intent_frame_rejects_blank_success_definition() {
        let err = IntentFrame::new("Run 5k", Domain::Fitness, 7, "").unwrap_err();
        assert_eq!(err, SchemaError::EmptySuccessDefinition);
    }

    #[test]
    fn test_task_with_duration_only() {
        let task = Task::new(TaskType::Conceptual).with_duration_min(60).unwrap();
        assert_eq!(task.duration_min(), Some(60));
        assert_eq!(task.count(), None);
    }

    #[test]
    fn test_task_with_count_only() {
        let task = Task::new(TaskType::Practice).with_count(10).unwrap();
        assert_eq!(task.count(), Some(10));
        assert_eq!(task.duration_min(), None);
    }

    #[test]
    fn test_task_rejects_zero_duration() {
        let err = Task::new(TaskType::Review).with_duration_min(0).unwrap_err();
        assert_eq!(err, SchemaError::NonPositiveDuration);
    }

    #[test]
    fn test_task_rejects_zero_count() {
        let err = Task::new(TaskType::Practice).with_count(0).unwrap_err();
        assert_eq!(err, SchemaError::NonPositiveCount);
    }

    #[test]
    fn test_protocol_day_requires_at_least_one_task() {
        let err = ProtocolDay::new(1, vec![]).unwrap_err();
        assert_eq!(err, SchemaError::EmptyTaskList);
    }

    #[test]
    fn test_protocol_day_rejects_zero_index() {
        let err = ProtocolDay::new(0, vec![Task::new(TaskType::Review)]).unwrap_err();
        assert_eq!(err, SchemaError::NonPositiveDayIndex);
    }

    #[test]
    fn test_protocol_plan_requires_at_least_one_day() {
        let intent =
            IntentFrame::new("Run 10km", Domain::Fitness, 28, "Complete a 10km run").unwrap();
        let err = ProtocolPlan::new(intent, vec![]).unwrap_err();
        assert_eq!(err, SchemaError::EmptyDayList);
    }

    #[test]
    fn test_task_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskType::Conceptual).unwrap(),
            "\"conceptual_pass\""
        );
        assert_eq!(serde_json::to_string(&TaskType::Execute).unwrap(), "\"execute\"");
        assert_eq!(
            serde_json::from_str::<TaskType>("\"conceptual_pass\"").unwrap(),
            TaskType::Conceptual
        );
    }

    #[test]
    fn test_deserialize_runs_constructor_gate() {
        // Zero horizon must fail on the deserialize path too
        let doc = r#"{
            "objective": "Prepare for Codeforces Div 2",
            "domain": "coding",
            "time_horizon_days": 0,
            "success_definition": "Solve 4/6 problems"
        }"#;
        assert!(serde_json::from_str::<IntentFrame>(doc).is_err());

        let doc = r#"{"day": 1, "tasks": []}"#;
        assert!(serde_json::from_str::<ProtocolDay>(doc).is_err());
    }

    #[test]
    fn test_intent_frame_roundtrip_json() {
        let intent = IntentFrame::new(
            "Build running stamina to 10km",
            Domain::Fitness,
            28,
            "Complete 10km continuous run",
        )
        .unwrap()
        .with_starting_state("Can run 2km comfortably")
        .with_constraints(vec!["evenings only".into(), "max 30 min/day".into()]);

        let payload = serde_json::to_string(&intent).unwrap();
        let reloaded: IntentFrame = serde_json::from_str(&payload).unwrap();
        assert_eq!(reloaded, intent);
    }
}
