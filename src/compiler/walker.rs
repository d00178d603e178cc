use super::assembler::CodeWriter;
use super::context::TraversalContext;
use super::naming;
use crate::dialect::{AgentSpec, Dialect, TeamSpec};
use crate::graph::NodeIndex;
use crate::workflow::{
    AgentData, BranchTag, ConditionData, ExternalToolData, LoopData, NodeKind, NodeType,
    ParallelData, TeamData, TriggerData, TriggerKind,
};
use tracing::trace;

pub(super) const RESULT: &str = "result";
pub(super) const LOOP_INPUT: &str = "loop_input";
pub(super) const FAN_OUT: &str = "parallel_results";
pub(super) const LOOP_COUNTER: &str = "iteration";

/// A unit of pending work. The stack replays exactly the order a recursive
/// descent would produce.
enum Step {
    Visit {
        node: NodeIndex,
        indent: usize,
        input: &'static str,
    },
    Line {
        indent: usize,
        text: String,
    },
    Comment {
        indent: usize,
        text: String,
    },
    /// Remember how many statements exist before a nested block's body.
    BeginBody,
    /// Fill the block with a no-op if its body produced no statements.
    EndBody {
        indent: usize,
    },
}

/// Lowers the graph into the statements of the generated function body.
pub(super) struct GraphWalker<'a, 'g> {
    ctx: &'a mut TraversalContext<'g>,
    dialect: &'a dyn Dialect,
    is_async: bool,
    stack: Vec<Step>,
    marks: Vec<usize>,
}

impl<'a, 'g> GraphWalker<'a, 'g> {
    pub(super) fn new(ctx: &'a mut TraversalContext<'g>, dialect: &'a dyn Dialect, is_async: bool) -> Self {
        Self {
            ctx,
            dialect,
            is_async,
            stack: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Walks the graph from every entry point, each seeded with the function input.
    pub(super) fn walk_entry_points(&mut self, out: &mut CodeWriter, param: &str) {
        let seed = self.dialect.assign(RESULT, param);
        let entries = self.ctx.graph.entry_points();
        if entries.is_empty() {
            out.line(1, &seed);
            return;
        }

        let mut steps = Vec::with_capacity(entries.len() * 2);
        for node in entries {
            steps.push(Step::Line {
                indent: 1,
                text: seed.clone(),
            });
            steps.push(Step::Visit {
                node,
                indent: 1,
                input: RESULT,
            });
        }
        self.schedule(steps);
        self.drain(out);
    }

    /// Pushes steps so that they run in the given order.
    fn schedule(&mut self, steps: Vec<Step>) {
        self.stack.extend(steps.into_iter().rev());
    }

    fn drain(&mut self, out: &mut CodeWriter) {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Visit {
                    node,
                    indent,
                    input,
                } => {
                    if !self.ctx.mark_visited(node) {
                        continue;
                    }
                    self.ctx.record_emitted();
                    let follow_up = self.emit(out, node, indent, input);
                    self.schedule(follow_up);
                }
                Step::Line { indent, text } => out.line(indent, text),
                Step::Comment { indent, text } => out.comment(indent, text),
                Step::BeginBody => self.marks.push(out.statements()),
                Step::EndBody { indent } => {
                    let mark = self.marks.pop().unwrap_or_default();
                    if out.statements() == mark {
                        out.line(indent, self.dialect.noop("nothing to run"));
                    }
                }
            }
        }
    }

    /// Writes the node's own construct and returns the steps that must follow it.
    fn emit(&mut self, out: &mut CodeWriter, node: NodeIndex, indent: usize, input: &'static str) -> Vec<Step> {
        let graph_node = self.ctx.graph.node(node);
        trace!(node_id = %graph_node.id, node_type = %graph_node.node_type(), "Emitting node");

        match &graph_node.kind {
            NodeKind::Start => {
                out.comment(indent, self.dialect.comment("Start"));
            }
            NodeKind::End => {
                out.comment(indent, self.dialect.comment("End"));
                return Vec::new();
            }
            NodeKind::Trigger(data) => self.emit_trigger(out, indent, data),
            NodeKind::Agent(data) => self.emit_agent(out, node, indent, input, data),
            NodeKind::ExternalTool(data) => self.emit_tool(out, indent, data),
            NodeKind::Team(data) => self.emit_team(out, node, indent, input, data),
            NodeKind::Condition(data) => return self.emit_condition(out, node, indent, input, data),
            NodeKind::Parallel(data) => {
                self.emit_parallel(out, node, indent, input, data);
                return Vec::new();
            }
            NodeKind::BoundedLoop(data) => return self.emit_loop(out, node, indent, input, data),
            NodeKind::Unknown { type_name } => {
                out.comment(
                    indent,
                    self.dialect.comment(&format!(
                        "Unknown node type '{}' (node {}); skipped",
                        type_name, graph_node.id
                    )),
                );
            }
        }

        self.ctx
            .graph
            .outgoing(node)
            .iter()
            .map(|link| Step::Visit {
                node: link.target,
                indent,
                input: RESULT,
            })
            .collect()
    }

    fn emit_trigger(&self, out: &mut CodeWriter, indent: usize, data: &TriggerData) {
        let kind = match data.kind {
            TriggerKind::Schedule => "schedule",
            TriggerKind::Webhook => "webhook",
        };
        out.comment(
            indent,
            self.dialect
                .comment(&format!("Trigger ({}): {}", kind, data.detail())),
        );
    }

    fn emit_agent(&self, out: &mut CodeWriter, node: NodeIndex, indent: usize, input: &str, data: &AgentData) {
        let ident = self.ctx.identifier(node);
        let label = if data.name.trim().is_empty() {
            ident
        } else {
            data.name.trim()
        };
        out.comment(indent, self.dialect.comment(&format!("Agent: {}", label)));
        out.line(
            indent,
            self.dialect
                .assign(RESULT, &self.dialect.invoke(ident, input, self.is_async)),
        );
    }

    fn emit_tool(&self, out: &mut CodeWriter, indent: usize, data: &ExternalToolData) {
        let server = if data.server_name.is_empty() {
            &data.server_id
        } else {
            &data.server_name
        };
        out.comment(
            indent,
            self.dialect
                .comment(&format!("External tool: {} / {}", server, data.tool_name)),
        );
        out.comment(
            indent,
            self.dialect
                .comment("Deferred: connect a tool client to run this call."),
        );
        let parameters =
            serde_json::to_string_pretty(&data.parameters).unwrap_or_else(|_| "{}".to_string());
        for line in self
            .dialect
            .tool_call_skeleton(&data.server_id, &data.tool_name, &parameters)
        {
            out.comment(indent, self.dialect.comment(&line));
        }
    }

    fn emit_team(&self, out: &mut CodeWriter, node: NodeIndex, indent: usize, input: &str, data: &TeamData) {
        let team_ident = self.ctx.identifier(node);
        out.comment(
            indent,
            self.dialect.comment(&format!(
                "Team: {} (strategy: {}, max rounds: {})",
                if data.name.trim().is_empty() { team_ident } else { data.name.trim() },
                data.strategy,
                data.max_rounds
            )),
        );

        let mut members = Vec::with_capacity(data.members.len());
        for (position, member) in data.members.iter().enumerate() {
            let ident = naming::avoid_reserved(
                format!("{}_{}", team_ident, naming::resolve(&member.name, position)),
                self.ctx.reserved(),
                "agent",
            );
            self.dialect.agent_declaration(
                out,
                indent,
                &ident,
                AgentSpec {
                    name: &member.name,
                    role: &member.role,
                    model: &member.model,
                    temperature: member.temperature,
                    max_tokens: None,
                    system_prompt: member.system_prompt.as_deref(),
                },
            );
            members.push(ident);
        }

        self.dialect.team_declaration(
            out,
            indent,
            team_ident,
            TeamSpec {
                name: &data.name,
                members: &members,
                strategy: &data.strategy,
                max_rounds: data.max_rounds,
            },
        );
        out.line(
            indent,
            self.dialect
                .assign(RESULT, &self.dialect.invoke(team_ident, input, self.is_async)),
        );
    }

    fn emit_condition(
        &self,
        out: &mut CodeWriter,
        node: NodeIndex,
        indent: usize,
        input: &'static str,
        data: &ConditionData,
    ) -> Vec<Step> {
        let condition = data.condition.trim();
        out.comment(
            indent,
            self.dialect.comment(&format!("Condition: {}", condition)),
        );
        let test = if condition.is_empty() {
            self.dialect.false_literal()
        } else {
            condition
        };
        out.line(indent, self.dialect.if_open(test));

        let mut steps = Vec::new();
        self.branch_body(
            &mut steps,
            self.ctx.graph.branch(node, BranchTag::True),
            data.true_label.as_deref(),
            indent + 1,
            input,
        );
        if let Some(target) = self.ctx.graph.branch(node, BranchTag::False) {
            steps.push(Step::Line {
                indent,
                text: self.dialect.else_open(),
            });
            self.branch_body(
                &mut steps,
                Some(target),
                data.false_label.as_deref(),
                indent + 1,
                input,
            );
        }
        if let Some(close) = self.dialect.block_close() {
            steps.push(Step::Line { indent, text: close });
        }
        steps
    }

    fn branch_body(
        &self,
        steps: &mut Vec<Step>,
        target: Option<NodeIndex>,
        label: Option<&str>,
        indent: usize,
        input: &'static str,
    ) {
        steps.push(Step::BeginBody);
        if let Some(label) = label.filter(|l| !l.trim().is_empty()) {
            steps.push(Step::Comment {
                indent,
                text: self.dialect.comment(label.trim()),
            });
        }
        match target {
            Some(node) => steps.push(Step::Visit {
                node,
                indent,
                input,
            }),
            None => steps.push(Step::Line {
                indent,
                text: self.dialect.noop("no true branch"),
            }),
        }
        steps.push(Step::EndBody { indent });
    }

    fn emit_parallel(
        &mut self,
        out: &mut CodeWriter,
        node: NodeIndex,
        indent: usize,
        input: &str,
        data: &ParallelData,
    ) {
        let links = self.ctx.graph.outgoing(node).to_vec();
        if links.is_empty() {
            out.comment(
                indent,
                self.dialect.comment("Parallel: no branches, nothing to run"),
            );
            return;
        }

        out.comment(
            indent,
            self.dialect.comment(&format!(
                "Parallel: {} branches (merge: {})",
                links.len(),
                data.merge.as_str()
            )),
        );

        let mut calls = Vec::with_capacity(links.len());
        for link in links {
            self.ctx.mark_visited(link.target);
            let target = self.ctx.graph.node(link.target);
            if target.node_type() == NodeType::Agent {
                calls.push(
                    self.dialect
                        .invoke(self.ctx.identifier(link.target), input, false),
                );
            } else {
                out.comment(
                    indent,
                    self.dialect.comment(&format!(
                        "Branch '{}' ({}) is not an agent; skipped in fan-out",
                        target.id,
                        target.node_type()
                    )),
                );
            }
        }

        if calls.is_empty() {
            out.line(indent, self.dialect.assign(FAN_OUT, "[]"));
        } else {
            self.dialect.fan_out(out, indent, FAN_OUT, &calls);
        }
        out.line(
            indent,
            self.dialect
                .assign(RESULT, &self.dialect.merge(data.merge, FAN_OUT)),
        );
    }

    fn emit_loop(
        &self,
        out: &mut CodeWriter,
        node: NodeIndex,
        indent: usize,
        input: &'static str,
        data: &LoopData,
    ) -> Vec<Step> {
        let stop = data.stop_condition.trim();
        let summary = if stop.is_empty() {
            format!("Loop: up to {} iterations", data.max_iterations)
        } else {
            format!(
                "Loop: up to {} iterations, stop when {}",
                data.max_iterations, stop
            )
        };
        out.comment(indent, self.dialect.comment(&summary));
        out.line(
            indent,
            self.dialect.loop_open(LOOP_COUNTER, data.max_iterations),
        );

        let body = indent + 1;
        let mut steps = vec![
            Step::Line {
                indent: body,
                text: self.dialect.assign(LOOP_INPUT, input),
            },
            Step::BeginBody,
        ];
        match self.ctx.graph.outgoing(node).first() {
            Some(link) => steps.push(Step::Visit {
                node: link.target,
                indent: body,
                input: LOOP_INPUT,
            }),
            None => steps.push(Step::Line {
                indent: body,
                text: self.dialect.noop("empty loop body"),
            }),
        }
        steps.push(Step::EndBody { indent: body });

        if !stop.is_empty() {
            steps.push(Step::Line {
                indent: body,
                text: self.dialect.if_open(stop),
            });
            steps.push(Step::Line {
                indent: body + 1,
                text: self.dialect.break_statement(),
            });
            if let Some(close) = self.dialect.block_close() {
                steps.push(Step::Line {
                    indent: body,
                    text: close,
                });
            }
        }
        if let Some(close) = self.dialect.block_close() {
            steps.push(Step::Line { indent, text: close });
        }
        steps
    }
}
