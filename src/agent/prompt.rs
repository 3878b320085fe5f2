//! Zero-shot ReAct prompt construction

use super::AgentStep;
use crate::plugins::ToolRegistry;

const PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

const FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

pub(super) const OBSERVATION_PREFIX: &str = "Observation: ";
pub(super) const LLM_PREFIX: &str = "Thought:";

/// Generation stops before the model invents its own observation
pub(super) const STOP_SEQUENCES: &[&str] = &["\nObservation:", "\n\tObservation:"];

/// Render the full prompt for the next model call
pub(super) fn render(registry: &ToolRegistry, task: &str, steps: &[AgentStep]) -> String {
    let tool_strings = registry
        .iter()
        .map(|t| format!("{}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");
    let format_instructions =
        FORMAT_INSTRUCTIONS.replace("{tool_names}", &registry.names().join(", "));
    let suffix = format!("Begin!\n\nQuestion: {}\n{}{}", task, LLM_PREFIX, scratchpad(steps));

    [PREFIX, tool_strings.as_str(), format_instructions.as_str(), suffix.as_str()].join("\n\n")
}

/// Previous steps, written back the way the model would have continued them
fn scratchpad(steps: &[AgentStep]) -> String {
    let mut thoughts = String::new();
    for step in steps {
        thoughts.push_str(&step.action.log);
        thoughts.push('\n');
        thoughts.push_str(OBSERVATION_PREFIX);
        thoughts.push_str(&step.observation);
        thoughts.push('\n');
        thoughts.push_str(LLM_PREFIX);
    }
    thoughts
}
