//! Workflow stages and the pipeline data bag

use serde::{Deserialize, Serialize};

/// The five-stage linear cycle plus idle. Transitions are strictly
/// sequential: idle either stays put or re-enters intent (continuous
/// mode); archival always returns to idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStage {
    Idle,
    Intent,
    Planning,
    Execution,
    Optimization,
    Archival,
}

impl WorkflowStage {
    pub fn next(self) -> Self {
        match self {
            WorkflowStage::Idle => WorkflowStage::Idle,
            WorkflowStage::Intent => WorkflowStage::Planning,
            WorkflowStage::Planning => WorkflowStage::Execution,
            WorkflowStage::Execution => WorkflowStage::Optimization,
            WorkflowStage::Optimization => WorkflowStage::Archival,
            WorkflowStage::Archival => WorkflowStage::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStage::Idle => "idle",
            WorkflowStage::Intent => "intent",
            WorkflowStage::Planning => "planning",
            WorkflowStage::Execution => "execution",
            WorkflowStage::Optimization => "optimization",
            WorkflowStage::Archival => "archival",
        }
    }

    /// Stage-specific task description handed to the generation client.
    pub fn task(self) -> Option<&'static str> {
        match self {
            WorkflowStage::Intent => Some(
                "Survey current goals and derive the single highest-leverage \
                 intent for this cycle.",
            ),
            WorkflowStage::Planning => {
                Some("Break the chosen intent into an ordered, concrete execution plan.")
            }
            WorkflowStage::Execution => Some("Carry out the plan and report the work produced."),
            WorkflowStage::Optimization => Some(
                "Review the execution output, score its quality, and propose refinements.",
            ),
            WorkflowStage::Idle | WorkflowStage::Archival => None,
        }
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-text output of each generative stage, consumed by the next one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineData {
    pub intent: Option<String>,
    pub planning: Option<String>,
    pub execution: Option<String>,
    pub optimization: Option<String>,
}

impl PipelineData {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, stage: WorkflowStage, text: String) {
        match stage {
            WorkflowStage::Intent => self.intent = Some(text),
            WorkflowStage::Planning => self.planning = Some(text),
            WorkflowStage::Execution => self.execution = Some(text),
            WorkflowStage::Optimization => self.optimization = Some(text),
            WorkflowStage::Idle | WorkflowStage::Archival => {}
        }
    }

    /// Context fed into a stage's generation call. Optimization always
    /// reads the execution output, not whatever stage ran last.
    pub fn context_for(&self, stage: WorkflowStage) -> Option<&str> {
        match stage {
            WorkflowStage::Planning => self.intent.as_deref(),
            WorkflowStage::Execution => self.planning.as_deref(),
            WorkflowStage::Optimization => self.execution.as_deref(),
            _ => None,
        }
    }
}
