//! Parsing of model output into the next agent decision

use super::AgentAction;
use crate::error::AgentError;
use once_cell::sync::Lazy;
use regex::Regex;

const FINAL_ANSWER_ACTION: &str = "Final Answer:";

static ACTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .unwrap()
});

/// What the model decided to do
#[derive(Debug, Clone, PartialEq)]
pub enum AgentDecision {
    /// Call a tool
    Act(AgentAction),
    /// Stop with an answer
    Finish { output: String, log: String },
}

/// Parse a completion. A completion must contain either a final answer or
/// an action with its input, never both.
pub fn parse(text: &str) -> Result<AgentDecision, AgentError> {
    let includes_answer = text.contains(FINAL_ANSWER_ACTION);

    if let Some(caps) = ACTION_PATTERN.captures(text) {
        if includes_answer {
            return Err(AgentError::OutputParse(format!(
                "found both a final answer and a parse-able action: {}",
                text
            )));
        }
        let tool = caps[1].trim().to_string();
        let tool_input = caps[2].trim_matches(' ').trim_matches('"').to_string();
        return Ok(AgentDecision::Act(AgentAction {
            tool,
            tool_input,
            log: text.to_string(),
        }));
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER_ACTION)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        return Ok(AgentDecision::Finish {
            output,
            log: text.to_string(),
        });
    }

    Err(AgentError::OutputParse(text.to_string()))
}
