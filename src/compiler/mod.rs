use crate::dialect::{AgentSpec, Dialect, DialectChoice, ImportNeeds};
use crate::graph::NodeIndex;
use crate::workflow::{NodeKind, NodeType, Workflow, WorkflowEdge, WorkflowNode};
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

mod assembler;
mod builder;
mod context;
mod format;
pub mod naming;
mod options;
mod walker;

pub use assembler::{CodeWriter, Sections};
pub use builder::CompilerBuilder;
pub use format::{OutputFormat, select_format};
pub use options::CompilerOptions;

use context::TraversalContext;
use walker::{FAN_OUT, GraphWalker, LOOP_COUNTER, LOOP_INPUT, RESULT};

/// Name of the aggregate object in the chain format.
const CHAIN_IDENT: &str = "workflow";
/// Parameter of the generated function in the procedural format.
const INPUT_PARAM: &str = "input_data";
/// Names the generated program binds itself. Resolved identifiers never equal one
/// of these, nor the configured function name.
const RESERVED_NAMES: &[&str] = &[
    RESULT,
    INPUT_PARAM,
    LOOP_INPUT,
    FAN_OUT,
    LOOP_COUNTER,
    CHAIN_IDENT,
    "output",
    "asyncio",
];
const BANNER: &str = "Generated by hensei from a workflow graph. Do not edit by hand.";

/// The shared contract of every output target.
pub trait CodeGenerator {
    fn generate(&self, nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> String;
}

/// The result of compiling one workflow snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledWorkflow {
    pub source: String,
    pub format: OutputFormat,
    pub dialect: &'static str,
    pub sections: Sections,
    /// Node ids in dependency order.
    pub order: Vec<String>,
    /// Number of nodes the walker emitted a construct for.
    pub emitted_nodes: usize,
}

/// Compiles workflow graphs into source text for one dialect.
///
/// A `Compiler` carries configuration only. Every call builds its own traversal
/// state, so one instance can serve any number of threads.
pub struct Compiler {
    dialect: Box<dyn Dialect>,
    options: CompilerOptions,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Compiler {
    pub fn new(dialect: DialectChoice) -> Self {
        Self::builder().dialect(dialect).build()
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn compile(&self, workflow: &Workflow) -> CompiledWorkflow {
        self.compile_graph(&workflow.nodes, &workflow.edges)
    }

    pub fn compile_graph(&self, nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> CompiledWorkflow {
        let mut reserved: Vec<&str> = RESERVED_NAMES.to_vec();
        reserved.push(self.options.function_name.as_str());
        let mut ctx = TraversalContext::new(nodes, edges, &reserved);
        let format = select_format(nodes);
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            ordered = ctx.order.len(),
            %format,
            dialect = self.dialect.name(),
            "Compiling workflow"
        );

        let is_async = ctx.any_of(NodeType::is_suspending);
        let agent_count = ctx.agents.len();
        let needs = ImportNeeds {
            concurrency: is_async,
            chain: format == OutputFormat::Chain && agent_count > 1,
            team: ctx.any_of(|t| t == NodeType::Team),
        };

        let sections = Sections {
            imports: self.imports(needs),
            declarations: self.declarations(&ctx),
            body: String::new(),
            entrypoint: String::new(),
        };
        let sections = match format {
            OutputFormat::Chain => self.chain_sections(&ctx, sections),
            OutputFormat::Procedural => self.procedural_sections(&mut ctx, sections, is_async),
        };

        CompiledWorkflow {
            source: sections.assemble(),
            format,
            dialect: self.dialect.name(),
            sections,
            order: ctx
                .order
                .iter()
                .map(|&i| ctx.graph.node(i).id.clone())
                .collect(),
            emitted_nodes: ctx.emitted(),
        }
    }

    fn writer(&self) -> CodeWriter {
        CodeWriter::new(self.options.indent_width)
    }

    fn imports(&self, needs: ImportNeeds) -> String {
        let mut out = self.writer();
        if self.options.header {
            out.comment(0, self.dialect.comment(BANNER));
        }
        self.dialect.imports(&mut out, needs, &self.options);
        out.into_text()
    }

    /// One top-level declaration per Agent node, in declaration order.
    fn declarations(&self, ctx: &TraversalContext<'_>) -> String {
        let mut out = self.writer();
        for (position, &index) in ctx.agents.iter().enumerate() {
            if let NodeKind::Agent(data) = &ctx.graph.node(index).kind {
                if position > 0 {
                    out.blank();
                }
                self.dialect.agent_declaration(
                    &mut out,
                    0,
                    ctx.identifier(index),
                    AgentSpec {
                        name: &data.name,
                        role: &data.role,
                        model: &data.model,
                        temperature: data.temperature,
                        max_tokens: Some(data.max_tokens),
                        system_prompt: data.system_prompt.as_deref(),
                    },
                );
            }
        }
        out.into_text()
    }

    fn chain_sections(&self, ctx: &TraversalContext<'_>, mut sections: Sections) -> Sections {
        let sample = &self.options.sample_input;
        match ctx.agents.as_slice() {
            [] => {}
            [single] => {
                let mut entry = self.writer();
                self.dialect
                    .chain_entrypoint(&mut entry, ctx.identifier(*single), sample);
                sections.entrypoint = entry.into_text();
            }
            agents => {
                let idents: Vec<String> = agents
                    .iter()
                    .map(|&i| ctx.identifier(i).to_string())
                    .collect();
                let flow = chain_flow(ctx);

                let mut body = self.writer();
                self.dialect
                    .chain_declaration(&mut body, CHAIN_IDENT, &idents, &flow);
                sections.body = body.into_text();

                let mut entry = self.writer();
                self.dialect.chain_entrypoint(&mut entry, CHAIN_IDENT, sample);
                sections.entrypoint = entry.into_text();
            }
        }
        sections
    }

    fn procedural_sections(
        &self,
        ctx: &mut TraversalContext<'_>,
        mut sections: Sections,
        is_async: bool,
    ) -> Sections {
        let function = &self.options.function_name;

        let mut body = self.writer();
        self.dialect.function_open(
            &mut body,
            function,
            INPUT_PARAM,
            &[RESULT, FAN_OUT, LOOP_INPUT],
            is_async,
        );
        GraphWalker::new(ctx, self.dialect.as_ref(), is_async).walk_entry_points(&mut body, INPUT_PARAM);
        self.dialect.function_close(&mut body, RESULT);
        sections.body = body.into_text();

        let mut entry = self.writer();
        self.dialect.procedural_entrypoint(
            &mut entry,
            function,
            &self.options.sample_input,
            is_async,
        );
        sections.entrypoint = entry.into_text();
        sections
    }
}

/// The dependency order restricted to Agent nodes, joined as `a -> b -> c`.
fn chain_flow(ctx: &TraversalContext<'_>) -> String {
    ctx.order
        .iter()
        .copied()
        .filter(|&i: &NodeIndex| ctx.graph.node(i).node_type() == NodeType::Agent)
        .map(|i| ctx.identifier(i))
        .join(" -> ")
}

impl CodeGenerator for Compiler {
    fn generate(&self, nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> String {
        self.compile_graph(nodes, edges).source
    }
}

/// Compiles a graph with the default compiler (Python dialect, default options).
pub fn generate(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> String {
    Compiler::default().generate(nodes, edges)
}

/// Compiles a graph with the default options for the chosen dialect.
pub fn generate_with(dialect: DialectChoice, nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> String {
    Compiler::new(dialect).generate(nodes, edges)
}
