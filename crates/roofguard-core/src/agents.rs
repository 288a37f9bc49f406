//! Progress roster for the admin "agent crews".
//!
//! The statuses are cosmetic: the caller advances them around a single
//! gateway call and nothing checks that a transition makes sense.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Working,
    Completed,
    Error,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Completed => write!(f, "completed"),
            AgentStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachAgentTask {
    pub id: String,
    pub agent_name: String,
    pub status: AgentStatus,
    pub message: String,
}

impl OutreachAgentTask {
    fn idle(id: &str, agent_name: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            agent_name: agent_name.to_string(),
            status: AgentStatus::Idle,
            message: message.to_string(),
        }
    }
}

/// A fixed set of tasks whose identities never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCrew {
    tasks: Vec<OutreachAgentTask>,
}

impl AgentCrew {
    /// Researcher, copywriter and compliance reviewer for outreach emails.
    #[must_use]
    pub fn outreach() -> Self {
        Self {
            tasks: vec![
                OutreachAgentTask::idle("o1", "Web Researcher", "Awaiting target data."),
                OutreachAgentTask::idle("o2", "Senior Copywriter", "Ready to draft."),
                OutreachAgentTask::idle("o3", "Compliance Agent", "Standing by for review."),
            ],
        }
    }

    /// Analyst, architect and pricing strategist for the listing strategy.
    #[must_use]
    pub fn strategy() -> Self {
        Self {
            tasks: vec![
                OutreachAgentTask::idle("s1", "Market Analyst", "Awaiting directive."),
                OutreachAgentTask::idle("s2", "Growth Architect", "Ready to map growth."),
                OutreachAgentTask::idle("s3", "Pricing Strategist", "Standing by for ROI calc."),
            ],
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[OutreachAgentTask] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OutreachAgentTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Sets the status and message of task `id`. Returns `false` if no task
    /// has that id.
    pub fn update(&mut self, id: &str, status: AgentStatus, message: impl Into<String>) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                task.message = message.into();
                true
            }
            None => false,
        }
    }

    pub fn update_all(&mut self, status: AgentStatus, message: &str) {
        for task in &mut self.tasks {
            task.status = status;
            task.message = message.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crews_start_idle() {
        for crew in [AgentCrew::outreach(), AgentCrew::strategy()] {
            assert_eq!(crew.tasks().len(), 3);
            assert!(crew.tasks().iter().all(|t| t.status == AgentStatus::Idle));
        }
    }

    #[test]
    fn update_changes_only_the_named_task() {
        let mut crew = AgentCrew::outreach();
        assert!(crew.update("o2", AgentStatus::Working, "Drafting"));
        assert_eq!(crew.get("o2").unwrap().status, AgentStatus::Working);
        assert_eq!(crew.get("o2").unwrap().message, "Drafting");
        assert_eq!(crew.get("o1").unwrap().status, AgentStatus::Idle);
    }

    #[test]
    fn update_unknown_id_is_reported() {
        let mut crew = AgentCrew::strategy();
        assert!(!crew.update("o1", AgentStatus::Completed, "done"));
    }

    #[test]
    fn any_transition_is_allowed() {
        let mut crew = AgentCrew::outreach();
        crew.update_all(AgentStatus::Error, "Crew pipeline halted. Check API status.");
        assert!(crew.update("o1", AgentStatus::Idle, "reset"));
        assert_eq!(crew.get("o1").unwrap().status, AgentStatus::Idle);
        assert_eq!(crew.get("o3").unwrap().status, AgentStatus::Error);
    }
}
