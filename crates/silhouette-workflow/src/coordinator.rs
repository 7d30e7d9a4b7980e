//! WorkflowCoordinator — tick-driven stage dispatch with safety limits

use crate::stage::{PipelineData, WorkflowStage};
use chrono::{DateTime, Utc};
use serde::Serialize;
use silhouette_consciousness::IntrospectionFilter;
use silhouette_core::WorkflowConfig;
use silhouette_llm::{GenMessage, GenerationProvider, GenerationRequest};
use silhouette_memory::{ContinuumMemory, MemoryTier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, error, info, warn};

const ARCHIVAL_NOTE: &str = "Cycle archived: pipeline outputs committed to episodic memory.";

/// Snapshot of the coordinator for status queries and the scorer.
#[derive(Clone, Debug, Serialize)]
pub struct WorkflowStatus {
    pub stage: WorkflowStage,
    pub enabled: bool,
    pub continuous: bool,
    pub tokens_used: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub last_optimization_score: f64,
    pub last_thought: Option<String>,
    pub pipeline: PipelineData,
}

struct EngineState {
    stage: WorkflowStage,
    pipeline: PipelineData,
    config: WorkflowConfig,
    tokens_used: u64,
    started_at: Option<Instant>,
    started_wall: Option<DateTime<Utc>>,
    last_optimization_score: f64,
    last_thought: Option<String>,
}

/// Single-slot in-flight handle. A tick that finds the slot taken is
/// dropped outright; nothing queues behind it. Cancellation or timeouts
/// can later wrap the guarded section without touching the tick contract.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

enum Action {
    Noop,
    Generate {
        stage: WorkflowStage,
        task: &'static str,
        context: Option<String>,
        model: String,
        max_tokens: u32,
    },
    Archive,
}

pub struct WorkflowCoordinator {
    provider: Arc<dyn GenerationProvider>,
    memory: Arc<ContinuumMemory>,
    filter: IntrospectionFilter,
    state: Mutex<EngineState>,
    in_flight: AtomicBool,
}

impl WorkflowCoordinator {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        memory: Arc<ContinuumMemory>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            provider,
            memory,
            filter: IntrospectionFilter::default(),
            state: Mutex::new(EngineState {
                stage: WorkflowStage::Idle,
                pipeline: PipelineData::default(),
                config,
                tokens_used: 0,
                started_at: None,
                started_wall: None,
                last_optimization_score: 0.0,
                last_thought: None,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// One coordinator step. No-op when disabled; trips the safety limits
    /// before anything else; drops the tick when a stage call is already
    /// in flight.
    pub async fn tick(&self) {
        let Some(_slot) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("tick dropped: stage call already in flight");
            return;
        };

        match self.plan_tick() {
            Action::Noop => {}
            Action::Archive => self.archive(),
            Action::Generate {
                stage,
                task,
                context,
                model,
                max_tokens,
            } => self.run_stage(stage, task, context, model, max_tokens).await,
        }
    }

    /// Wholesale config replacement. Takes effect on the next tick; the
    /// token counter and process clock survive the swap.
    pub fn update_config(&self, config: WorkflowConfig) {
        let mut state = self.lock();
        info!(
            "workflow config replaced: enabled={} continuous={} budget={}",
            config.enabled, config.continuous, config.max_daily_tokens
        );
        state.config = config;
    }

    pub fn status(&self) -> WorkflowStatus {
        let state = self.lock();
        WorkflowStatus {
            stage: state.stage,
            enabled: state.config.enabled,
            continuous: state.config.continuous,
            tokens_used: state.tokens_used,
            started_at: state.started_wall,
            last_optimization_score: state.last_optimization_score,
            last_thought: state.last_thought.clone(),
            pipeline: state.pipeline.clone(),
        }
    }

    /// Decide this tick's work under the state lock. The provider call
    /// itself happens outside it.
    fn plan_tick(&self) -> Action {
        let mut state = self.lock();

        if !state.config.enabled {
            return Action::Noop;
        }

        if state.tokens_used >= state.config.max_daily_tokens {
            warn!(
                "token budget exhausted ({}/{}), disabling workflow",
                state.tokens_used, state.config.max_daily_tokens
            );
            state.config.enabled = false;
            return Action::Noop;
        }

        if state.config.max_runtime_hours > 0.0 {
            if let Some(started) = state.started_at {
                let hours = started.elapsed().as_secs_f64() / 3600.0;
                if hours >= state.config.max_runtime_hours {
                    warn!(
                        "runtime limit reached ({:.2}h/{:.2}h), disabling workflow",
                        hours, state.config.max_runtime_hours
                    );
                    state.config.enabled = false;
                    return Action::Noop;
                }
            }
        }

        match state.stage {
            WorkflowStage::Idle => {
                if state.config.continuous {
                    state.pipeline.reset();
                    if state.started_at.is_none() {
                        state.started_at = Some(Instant::now());
                        state.started_wall = Some(Utc::now());
                    }
                    state.stage = WorkflowStage::Intent;
                    info!("cycle start: idle -> intent");
                }
                Action::Noop
            }
            WorkflowStage::Archival => Action::Archive,
            stage => match stage.task() {
                Some(task) => Action::Generate {
                    stage,
                    task,
                    context: state.pipeline.context_for(stage).map(str::to_string),
                    model: state.config.model.clone(),
                    max_tokens: state.config.max_tokens_per_call,
                },
                None => Action::Noop,
            },
        }
    }

    async fn run_stage(
        &self,
        stage: WorkflowStage,
        task: &str,
        context: Option<String>,
        model: String,
        max_tokens: u32,
    ) {
        let memory_context = self
            .memory
            .retrieve(stage.as_str())
            .into_iter()
            .take(3)
            .map(|r| r.content)
            .collect::<Vec<_>>()
            .join("\n");
        let system = self
            .filter
            .build_prompt("the autonomous workflow engine", &memory_context);

        let mut user = task.to_string();
        if let Some(context) = context {
            user.push_str("\n\nPrevious stage output:\n");
            user.push_str(&context);
        }

        let request = GenerationRequest {
            model,
            messages: vec![GenMessage::user(user)],
            system: Some(system),
            max_tokens,
            temperature: None,
        };

        match self.provider.complete(request).await {
            Ok(completion) => {
                let introspection = self.filter.process(&completion.text);
                let mut state = self.lock();
                state.tokens_used += completion.usage.total();
                if let Some(thought) = introspection.thoughts.last() {
                    state.last_thought = Some(thought.clone());
                }
                if stage == WorkflowStage::Optimization {
                    state.last_optimization_score = introspection.coherence * 100.0;
                }
                state.pipeline.set(stage, introspection.clean_output);
                state.stage = stage.next();
                info!(
                    "stage {} complete ({} tokens), next: {}",
                    stage,
                    completion.usage.total(),
                    state.stage
                );
            }
            Err(e) => {
                // A single upstream failure halts all autonomous cycles
                // until someone re-enables via config.
                error!("stage {} failed, disabling workflow: {}", stage, e);
                let mut state = self.lock();
                state.config.enabled = false;
                state.stage = WorkflowStage::Idle;
            }
        }
    }

    fn archive(&self) {
        self.memory.store(
            ARCHIVAL_NOTE,
            MemoryTier::Episodic,
            vec!["archival".into(), "workflow".into()],
        );
        debug!("cycle cleanup complete");

        let mut state = self.lock();
        state.stage = WorkflowStage::Idle;
        info!("archival -> idle");
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
