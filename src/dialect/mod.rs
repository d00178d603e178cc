//! Surface syntax for the generated program.
//!
//! The compiler runs one algorithm for every target; a [`Dialect`] only decides how
//! each construct is spelled. Multi-line constructs are written straight into the
//! shared [`CodeWriter`] at the indentation the walker asks for.

use crate::compiler::{CodeWriter, CompilerOptions};
use crate::workflow::MergePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

mod python;
mod typescript;

pub use python::PythonDialect;
pub use typescript::TypeScriptDialect;

/// What the import section has to make available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportNeeds {
    /// Any Agent, ExternalTool or Team node is present.
    pub concurrency: bool,
    pub chain: bool,
    pub team: bool,
}

/// The fields of an agent declaration, shared by hoisted agents and team members.
#[derive(Debug, Clone, Copy)]
pub struct AgentSpec<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub model: &'a str,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<&'a str>,
}

/// The aggregate object a Team node configures.
#[derive(Debug, Clone, Copy)]
pub struct TeamSpec<'a> {
    pub name: &'a str,
    pub members: &'a [String],
    pub strategy: &'a str,
    pub max_rounds: u32,
}

/// The syntax strategy behind one output language.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;

    /// Renders a single-line comment. Line breaks in `text` must not end the comment.
    fn comment(&self, text: &str) -> String;

    /// Renders a string literal. JSON escaping is valid in both built-in targets.
    fn string_literal(&self, value: &str) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
    }

    fn false_literal(&self) -> &'static str;

    fn imports(&self, out: &mut CodeWriter, needs: ImportNeeds, options: &CompilerOptions);

    fn agent_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, agent: AgentSpec<'_>);

    fn team_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, team: TeamSpec<'_>);

    /// The declarative aggregate of the chain format.
    fn chain_declaration(&self, out: &mut CodeWriter, ident: &str, agents: &[String], flow: &str);

    /// A call expression running `target` on `input`.
    fn invoke(&self, target: &str, input: &str, awaited: bool) -> String;

    fn assign(&self, var: &str, expr: &str) -> String;

    fn function_open(
        &self,
        out: &mut CodeWriter,
        name: &str,
        param: &str,
        locals: &[&str],
        is_async: bool,
    );

    fn function_close(&self, out: &mut CodeWriter, result: &str);

    fn if_open(&self, condition: &str) -> String;
    fn else_open(&self) -> String;
    fn loop_open(&self, counter: &str, cap: u32) -> String;

    /// Closing line for a block, if the language has one.
    fn block_close(&self) -> Option<String>;

    fn break_statement(&self) -> String;

    /// A statement that does nothing, valid as the sole content of a block.
    fn noop(&self, reason: &str) -> String;

    /// Awaits all `calls` at once and binds the collection to `var`.
    fn fan_out(&self, out: &mut CodeWriter, indent: usize, var: &str, calls: &[String]);

    /// Expression combining the fan-out collection according to `policy`.
    fn merge(&self, policy: MergePolicy, collection: &str) -> String;

    /// The non-executable call skeleton for an external tool, as uncommented lines.
    fn tool_call_skeleton(&self, server: &str, tool: &str, parameters: &str) -> Vec<String>;

    /// The guarded entry block for the chain format.
    fn chain_entrypoint(&self, out: &mut CodeWriter, target: &str, sample_input: &str);

    /// The guarded entry block for the procedural format.
    fn procedural_entrypoint(
        &self,
        out: &mut CodeWriter,
        function: &str,
        sample_input: &str,
        is_async: bool,
    );
}

/// The built-in dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectChoice {
    #[default]
    Python,
    TypeScript,
}

impl DialectChoice {
    pub fn into_dialect(self) -> Box<dyn Dialect> {
        match self {
            DialectChoice::Python => Box::new(PythonDialect),
            DialectChoice::TypeScript => Box::new(TypeScriptDialect),
        }
    }
}

impl fmt::Display for DialectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectChoice::Python => f.write_str("python"),
            DialectChoice::TypeScript => f.write_str("typescript"),
        }
    }
}

/// Folds line breaks into spaces so user text stays inside a single-line comment.
pub(crate) fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a float so it always reads as a number with a fractional part.
pub(crate) fn number_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
