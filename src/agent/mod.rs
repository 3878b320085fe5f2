//! Agent runner
//!
//! Drives a zero-shot ReAct loop: the model reads textual tool descriptions,
//! picks an action, sees the observation and repeats until it produces a
//! final answer or the iteration limit is reached.

mod parser;
mod prompt;

pub use parser::AgentDecision;

use crate::chat_model::{ChatModel, Message};
use crate::error::AgentError;
use crate::plugins::{ToolInvoker, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Answer returned when the loop runs out of iterations
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

/// Default number of Thought/Action rounds
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Behavioural strategy of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentStrategy {
    /// Reason then act, choosing tools from their descriptions alone
    #[default]
    ZeroShotReactDescription,
}

impl fmt::Display for AgentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroShotReactDescription => write!(f, "zero-shot-react-description"),
        }
    }
}

/// A tool call the model asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub tool: String,
    pub tool_input: String,
    /// Raw model output that produced this action
    pub log: String,
}

/// One completed round of the loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    pub action: AgentAction,
    pub observation: String,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Answer,
    IterationLimit,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub output: String,
    pub steps: Vec<AgentStep>,
    pub finish: FinishReason,
}

/// An agent session: one model, one tool registry, one strategy
pub struct Agent<M: ChatModel> {
    model: M,
    registry: ToolRegistry,
    invoker: ToolInvoker,
    strategy: AgentStrategy,
    max_iterations: usize,
}

impl<M: ChatModel> Agent<M> {
    /// Create an agent. The registry must already hold the plugin tool.
    pub fn new(
        model: M,
        registry: ToolRegistry,
        strategy: AgentStrategy,
    ) -> Result<Self, AgentError> {
        if registry.is_empty() {
            return Err(AgentError::EmptyRegistry);
        }
        if !registry.has_plugin_tool() {
            return Err(AgentError::MissingPluginTool);
        }

        Ok(Self {
            model,
            registry,
            invoker: ToolInvoker::new(reqwest::Client::new()),
            strategy,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Use a specific invoker (shares the caller's HTTP client)
    pub fn with_invoker(mut self, invoker: ToolInvoker) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one task to completion
    pub async fn run(&self, task: &str) -> Result<AgentRun, AgentError> {
        info!(
            "Running {} agent with tools [{}]",
            self.strategy,
            self.registry.names().join(", ")
        );

        let mut steps: Vec<AgentStep> = Vec::new();

        for iteration in 1..=self.max_iterations {
            let rendered = prompt::render(&self.registry, task, &steps);
            debug!("Iteration {} prompt is {} bytes", iteration, rendered.len());

            let output = self
                .model
                .complete(&[Message::user(rendered)], prompt::STOP_SEQUENCES)
                .await?;

            match parser::parse(&output)? {
                AgentDecision::Finish { output, log } => {
                    info!("{}", log.trim());
                    return Ok(AgentRun {
                        output,
                        steps,
                        finish: FinishReason::Answer,
                    });
                }
                AgentDecision::Act(action) => {
                    info!("{}", action.log.trim());
                    let observation = self.observe(&action).await?;
                    info!("{}{}", prompt::OBSERVATION_PREFIX, observation);
                    steps.push(AgentStep {
                        action,
                        observation,
                    });
                }
            }
        }

        warn!("Agent stopped after {} iterations", self.max_iterations);
        Ok(AgentRun {
            output: ITERATION_LIMIT_MESSAGE.to_string(),
            steps,
            finish: FinishReason::IterationLimit,
        })
    }

    /// Execute an action. Unknown tools yield an observation naming the
    /// valid ones so the model can correct itself.
    async fn observe(&self, action: &AgentAction) -> Result<String, AgentError> {
        match self.registry.get(&action.tool) {
            Some(tool) => self
                .invoker
                .invoke(tool, &action.tool_input)
                .await
                .map_err(|source| AgentError::Tool {
                    tool: action.tool.clone(),
                    source,
                }),
            None => Ok(format!(
                "{} is not a valid tool, try one of [{}].",
                action.tool,
                self.registry.names().join(", ")
            )),
        }
    }
}
