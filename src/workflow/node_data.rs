use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_strategy() -> String {
    "sequential".to_string()
}

fn default_rounds() -> u32 {
    3
}

fn default_iterations() -> u32 {
    3
}

/// Configuration of a single LLM agent call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentData {
    #[serde(default, alias = "label")]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens", alias = "max_tokens")]
    pub max_tokens: u32,
    #[serde(default, alias = "system_prompt")]
    pub system_prompt: Option<String>,
}

impl AgentData {
    /// Create an agent with the given display name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// A call to a tool exposed by an external (MCP) server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalToolData {
    #[serde(default, alias = "server_id")]
    pub server_id: String,
    #[serde(default, alias = "server_name")]
    pub server_name: String,
    #[serde(default, alias = "tool_name")]
    pub tool_name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// A two-way branch on a user-written boolean expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    #[serde(default, alias = "expression")]
    pub condition: String,
    #[serde(default, alias = "true_label")]
    pub true_label: Option<String>,
    #[serde(default, alias = "false_label")]
    pub false_label: Option<String>,
}

impl ConditionData {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            true_label: None,
            false_label: None,
        }
    }
}

/// How a Parallel node combines the results of its branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    #[default]
    Concat,
    First,
    Last,
    Custom,
}

impl MergePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MergePolicy::Concat => "concat",
            MergePolicy::First => "first",
            MergePolicy::Last => "last",
            MergePolicy::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelData {
    #[serde(default, alias = "mergeStrategy", alias = "merge_strategy")]
    pub merge: MergePolicy,
}

/// A loop that re-runs its body until the stop condition holds or the cap is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopData {
    #[serde(default = "default_iterations", alias = "max_iterations")]
    pub max_iterations: u32,
    #[serde(default, alias = "stop_condition")]
    pub stop_condition: String,
}

impl LoopData {
    pub fn new(max_iterations: u32, stop_condition: impl Into<String>) -> Self {
        Self {
            max_iterations,
            stop_condition: stop_condition.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[serde(alias = "scheduled", alias = "cron")]
    Schedule,
    Webhook,
}

/// An entry point that starts the workflow on a schedule or an incoming request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerData {
    #[serde(alias = "triggerType", alias = "trigger_type")]
    pub kind: TriggerKind,
    #[serde(default, alias = "cron")]
    pub schedule: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl TriggerData {
    pub fn schedule(expression: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Schedule,
            schedule: Some(expression.into()),
            path: None,
        }
    }

    pub fn webhook(path: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Webhook,
            schedule: None,
            path: Some(path.into()),
        }
    }

    /// The schedule expression or webhook path, whichever the kind uses.
    pub fn detail(&self) -> &str {
        let detail = match self.kind {
            TriggerKind::Schedule => self.schedule.as_deref(),
            TriggerKind::Webhook => self.path.as_deref(),
        };
        detail.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default, alias = "system_prompt")]
    pub system_prompt: Option<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            model: default_model(),
            temperature: default_temperature(),
            system_prompt: None,
        }
    }
}

/// A group of agents coordinated as one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    #[serde(default, alias = "label")]
    pub name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_rounds", alias = "max_rounds")]
    pub max_rounds: u32,
}

impl TeamData {
    pub fn new(name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            name: name.into(),
            members,
            strategy: default_strategy(),
            max_rounds: default_rounds(),
        }
    }
}
