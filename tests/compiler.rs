//! Tests for format selection, declarations and procedural lowering.
mod common;
use common::*;
use hensei::prelude::*;

fn python(workflow: &Workflow) -> CompiledWorkflow {
    Compiler::new(DialectChoice::Python).compile(workflow)
}

/// Counts the lines whose trimmed text starts with `prefix`.
fn count_lines(source: &str, prefix: &str) -> usize {
    source
        .lines()
        .filter(|l| l.trim_start().starts_with(prefix))
        .count()
}

#[test]
fn test_linear_chain_uses_chain_format() {
    let workflow = linear_chain(&["Agent One", "Agent Two", "Agent Three"]);
    let compiled = python(&workflow);

    assert_eq!(compiled.format, OutputFormat::Chain);
    assert_eq!(compiled.order, vec!["a1", "a2", "a3"]);

    let declarations: Vec<&str> = compiled
        .sections
        .declarations
        .lines()
        .filter(|l| l.ends_with("= Agent("))
        .collect();
    assert_eq!(
        declarations,
        vec![
            "agent_one = Agent(",
            "agent_two = Agent(",
            "agent_three = Agent(",
        ]
    );
    assert!(
        compiled
            .source
            .contains("flow=\"agent_one -> agent_two -> agent_three\",")
    );
    assert!(
        compiled
            .source
            .contains("agents=[agent_one, agent_two, agent_three],")
    );
    assert!(compiled.source.contains("result = workflow.run(\"Hello, world!\")"));
    assert!(compiled.source.contains("from agentflow import Agent, Chain"));
}

#[test]
fn test_chain_declarations_follow_dependency_order() {
    // Input order differs from flow order.
    let workflow = Workflow::new(
        vec![agent("b", "Second"), agent("a", "First")],
        vec![edge("a", "b")],
    );
    let compiled = python(&workflow);

    let first = compiled.source.find("first = Agent(").unwrap();
    let second = compiled.source.find("second = Agent(").unwrap();
    assert!(first < second);
    assert!(compiled.source.contains("flow=\"first -> second\","));
}

#[test]
fn test_single_agent_chain_calls_agent_directly() {
    let workflow = Workflow::new(vec![agent("a", "Solo")], vec![]);
    let compiled = python(&workflow);

    assert_eq!(compiled.format, OutputFormat::Chain);
    assert!(compiled.sections.body.is_empty());
    assert!(!compiled.source.contains("Chain("));
    assert!(compiled.source.contains("result = solo.run(\"Hello, world!\")"));
}

#[test]
fn test_empty_graph_still_has_imports() {
    let source = generate(&[], &[]);
    assert!(!source.is_empty());
    assert!(source.contains("from agentflow import Agent"));
    assert!(!source.contains("__main__"));

    let bare = Compiler::builder().header(false).build().generate(&[], &[]);
    assert!(!bare.trim().is_empty());
}

#[test]
fn test_format_selector_depends_on_types_only() {
    let agents_only = vec![agent("a", "A"), WorkflowNode::start("s"), WorkflowNode::end("e")];
    assert_eq!(select_format(&agents_only), OutputFormat::Chain);
    assert_eq!(select_format(&[]), OutputFormat::Chain);

    let control = [
        condition("c", "x"),
        parallel("p", MergePolicy::Concat),
        bounded_loop("l", 2, "done"),
        WorkflowNode::new("t", NodeKind::Trigger(TriggerData::webhook("/hook"))),
        WorkflowNode::new("team", NodeKind::Team(TeamData::new("Crew", vec![]))),
        WorkflowNode::new(
            "m",
            NodeKind::ExternalTool(ExternalToolData {
                server_id: "srv".into(),
                server_name: "Server".into(),
                tool_name: "tool".into(),
                parameters: Default::default(),
            }),
        ),
    ];
    for node in control {
        assert_eq!(
            select_format(&[agent("a", "A"), node.clone()]),
            OutputFormat::Procedural,
            "{:?} should force the procedural format",
            node.node_type()
        );
    }
}

#[test]
fn test_condition_with_both_branches() {
    let compiled = python(&branching_workflow());
    let source = &compiled.source;

    assert_eq!(compiled.format, OutputFormat::Procedural);
    assert!(source.contains("    if result.score > 0.5:"));
    assert!(source.contains("    else:"));
    assert!(source.contains("        result = await writer.run(result)"));
    assert!(source.contains("        result = await editor.run(result)"));
    assert!(source.contains("async def run_workflow(input_data):"));
    assert!(source.contains("output = asyncio.run(run_workflow(\"Hello, world!\"))"));
}

#[test]
fn test_condition_without_false_branch_has_no_else() {
    let workflow = Workflow::new(
        vec![condition("c", "result.ok"), agent("a", "Handler")],
        vec![branch("c", "a", BranchTag::True)],
    );
    let source = python(&workflow).source;

    assert!(source.contains("if result.ok:"));
    assert_eq!(count_lines(&source, "else:"), 0);
}

#[test]
fn test_condition_without_true_branch_gets_placeholder() {
    let workflow = Workflow::new(
        vec![condition("c", "result.ok"), agent("a", "Fallback")],
        vec![branch("c", "a", BranchTag::False)],
    );
    let source = python(&workflow).source;

    let expected = "    if result.ok:\n        pass  # no true branch\n    else:\n        # Agent: Fallback\n        result = await fallback.run(result)";
    assert!(source.contains(expected), "unexpected output:\n{}", source);
}

#[test]
fn test_converging_branches_emit_shared_node_once() {
    let workflow = Workflow::new(
        vec![
            condition("c", "flag"),
            agent("left", "Left"),
            agent("right", "Right"),
            agent("join", "Join"),
        ],
        vec![
            branch("c", "left", BranchTag::True),
            branch("c", "right", BranchTag::False),
            edge("left", "join"),
            edge("right", "join"),
        ],
    );
    let source = python(&workflow).source;

    assert_eq!(source.matches("await join.run(").count(), 1);
    // The first branch to reach the shared node owns it.
    let left = source.find("await left.run(").unwrap();
    let join = source.find("await join.run(").unwrap();
    let else_at = source.find("else:").unwrap();
    assert!(left < join && join < else_at);
}

#[test]
fn test_branch_reaching_emitted_node_gets_noop() {
    let workflow = Workflow::new(
        vec![
            agent("a", "Shared"),
            condition("c", "flag"),
        ],
        vec![edge("c", "a").with_branch(BranchTag::True)],
    );
    // `c` is the only entry point, so the agent is emitted inside the branch.
    let source = python(&workflow).source;
    assert!(source.contains("        result = await shared.run(result)"));

    let converging = Workflow::new(
        vec![
            condition("c", "flag"),
            agent("a", "Shared"),
        ],
        vec![
            branch("c", "a", BranchTag::True),
            branch("c", "a", BranchTag::False),
        ],
    );
    let source = python(&converging).source;
    assert_eq!(source.matches("await shared.run(").count(), 1);
    assert!(source.contains("    else:\n        pass  # nothing to run"));
}

#[test]
fn test_parallel_concat_joins_with_space() {
    let source = python(&fan_out_workflow(MergePolicy::Concat)).source;

    let expected = "    parallel_results = await asyncio.gather(\n        researcher.run(result),\n        analyst.run(result),\n    )\n    result = \" \".join(str(r) for r in parallel_results)";
    assert!(source.contains(expected), "unexpected output:\n{}", source);
    // Branch agents are invoked through the fan-out only.
    assert!(!source.contains("await researcher.run("));
}

#[test]
fn test_parallel_first_and_last_index_results() {
    let first = python(&fan_out_workflow(MergePolicy::First)).source;
    assert!(first.contains("result = parallel_results[0]"));

    let last = python(&fan_out_workflow(MergePolicy::Last)).source;
    assert!(last.contains("result = parallel_results[-1]"));

    let custom = python(&fan_out_workflow(MergePolicy::Custom)).source;
    assert!(custom.contains("result = parallel_results\n"));
}

#[test]
fn test_parallel_skips_non_agent_branches() {
    let workflow = Workflow::new(
        vec![
            parallel("fan", MergePolicy::Concat),
            agent("a", "Worker"),
            condition("c", "flag"),
            agent("hidden", "Hidden"),
        ],
        vec![
            edge("fan", "a"),
            edge("fan", "c"),
            branch("c", "hidden", BranchTag::True),
        ],
    );
    let compiled = python(&workflow);

    assert!(
        compiled
            .source
            .contains("# Branch 'c' (condition) is not an agent; skipped in fan-out")
    );
    assert!(!compiled.source.contains("if flag:"));
    assert!(!compiled.source.contains("hidden.run("));
}

#[test]
fn test_parallel_without_branches_is_comment_only() {
    let workflow = Workflow::new(vec![parallel("fan", MergePolicy::First)], vec![]);
    let source = python(&workflow).source;

    assert!(source.contains("# Parallel: no branches, nothing to run"));
    assert!(!source.contains("parallel_results ="));
}

#[test]
fn test_bounded_loop_emits_cap_and_break_test() {
    let workflow = Workflow::new(
        vec![bounded_loop("l", 5, "result.done"), agent("w", "Writer")],
        vec![edge("l", "w")],
    );
    let source = python(&workflow).source;

    let expected = "    for iteration in range(5):\n        loop_input = result\n        # Agent: Writer\n        result = await writer.run(loop_input)\n        if result.done:\n            break";
    assert!(source.contains(expected), "unexpected output:\n{}", source);
}

#[test]
fn test_bounded_loop_traverses_first_edge_only() {
    let workflow = Workflow::new(
        vec![
            bounded_loop("l", 2, "result.done"),
            agent("body", "Body"),
            agent("extra", "Extra"),
        ],
        vec![edge("l", "body"), edge("l", "extra")],
    );
    let source = python(&workflow).source;

    assert!(source.contains("await body.run(loop_input)"));
    assert!(!source.contains("extra.run("));
    // Still declared at the top level.
    assert!(source.contains("extra = Agent("));
}

#[test]
fn test_bounded_loop_without_body_gets_placeholder() {
    let workflow = Workflow::new(vec![bounded_loop("l", 3, "")], vec![]);
    let source = python(&workflow).source;

    assert!(source.contains("for iteration in range(3):"));
    assert!(source.contains("pass  # empty loop body"));
    assert!(!source.contains("break"));
    // Nothing suspends, so the function is synchronous.
    assert!(source.contains("\ndef run_workflow(input_data):"));
    assert!(source.contains("output = run_workflow(\"Hello, world!\")"));
    assert!(!source.contains("import asyncio"));
}

#[test]
fn test_end_node_stops_the_path() {
    let workflow = Workflow::new(
        vec![
            condition("c", "flag"),
            WorkflowNode::end("e"),
            agent("after", "After"),
        ],
        vec![branch("c", "e", BranchTag::True), edge("e", "after")],
    );
    let source = python(&workflow).source;

    assert!(source.contains("# End"));
    assert!(!source.contains("after.run("));
}

#[test]
fn test_every_entry_point_is_seeded() {
    let workflow = Workflow::new(
        vec![
            WorkflowNode::new("t", NodeKind::Trigger(TriggerData::webhook("/hooks/new"))),
            agent("a", "Intake"),
            agent("b", "Manual"),
            WorkflowNode::end("e"),
        ],
        vec![edge("t", "a")],
    );
    let source = python(&workflow).source;

    // `e` has no incoming edge but is an End node, so it is not an entry point.
    assert_eq!(source.matches("result = input_data").count(), 2);
    assert!(source.contains("# Trigger (webhook): /hooks/new"));
    let intake = source.find("await intake.run(result)").unwrap();
    let manual = source.find("await manual.run(result)").unwrap();
    assert!(intake < manual);
    assert!(!source.contains("# End"));
}

#[test]
fn test_team_declares_members_inline() {
    let team = TeamData {
        name: "Review Board".into(),
        members: vec![TeamMember::new("Lead", "Chair"), TeamMember::new("", "Scribe")],
        strategy: "round_robin".into(),
        max_rounds: 2,
    };
    let workflow = Workflow::new(vec![WorkflowNode::new("team", NodeKind::Team(team))], vec![]);
    let compiled = python(&workflow);

    assert!(compiled.sections.declarations.is_empty());
    let body = &compiled.sections.body;
    assert!(body.contains("    review_board_lead = Agent("));
    assert!(body.contains("    review_board_agent_2 = Agent("));
    assert!(body.contains("members=[review_board_lead, review_board_agent_2],"));
    assert!(body.contains("strategy=\"round_robin\","));
    assert!(body.contains("max_rounds=2,"));
    assert!(body.contains("result = await review_board.run(result)"));
    assert!(compiled.sections.imports.contains("from agentflow import Agent, Team"));
}

#[test]
fn test_external_tool_is_never_a_live_call() {
    let mut parameters = serde_json::Map::new();
    parameters.insert("query".into(), serde_json::json!("rust"));
    let workflow = Workflow::new(
        vec![WorkflowNode::new(
            "m",
            NodeKind::ExternalTool(ExternalToolData {
                server_id: "brave".into(),
                server_name: "Brave Search".into(),
                tool_name: "web_search".into(),
                parameters,
            }),
        )],
        vec![],
    );
    let source = python(&workflow).source;

    assert!(source.contains("# External tool: Brave Search / web_search"));
    assert!(source.contains("    # result = await call_tool("));
    assert!(source.contains("    #     server=\"brave\","));
    assert!(source.contains("    #       \"query\": \"rust\""));
    assert_eq!(count_lines(&source, "result = await call_tool("), 0);
}

#[test]
fn test_unknown_type_and_dangling_edges_are_tolerated() {
    let workflow = Workflow::new(
        vec![
            WorkflowNode::new("u", NodeKind::Unknown { type_name: "webScraper".into() }),
            agent("a", "Summarizer"),
        ],
        vec![edge("u", "a"), edge("u", "ghost"), edge("ghost", "a")],
    );
    let compiled = python(&workflow);

    assert_eq!(compiled.format, OutputFormat::Procedural);
    assert!(
        compiled
            .source
            .contains("# Unknown node type 'webScraper' (node u); skipped")
    );
    assert!(compiled.source.contains("result = await summarizer.run(result)"));
}

#[test]
fn test_blank_condition_falls_back_to_false() {
    let workflow = Workflow::new(vec![condition("c", "   ")], vec![]);
    let source = python(&workflow).source;
    assert!(source.contains("if False:"));
}

#[test]
fn test_builder_options_shape_output() {
    let compiler = Compiler::builder()
        .function_name("pipeline")
        .sample_input("ping")
        .runtime_module("my_runtime.agents")
        .indent_width(2)
        .header(false)
        .build();
    let source = compiler.compile(&branching_workflow()).source;

    assert!(source.starts_with("import asyncio\nfrom my_runtime.agents import Agent"));
    assert!(source.contains("async def pipeline(input_data):\n  result = input_data"));
    assert!(source.contains("asyncio.run(pipeline(\"ping\"))"));
}

#[test]
fn test_compilation_is_deterministic() {
    let workflow = branching_workflow();
    let compiler = Compiler::default();
    assert_eq!(compiler.compile(&workflow).source, compiler.compile(&workflow).source);
    assert_eq!(
        compiler.compile(&workflow).source,
        generate(&workflow.nodes, &workflow.edges)
    );
}

#[test]
fn test_identifiers_never_shadow_generated_names() {
    let workflow = Workflow::new(
        vec![
            condition("check", "flag"),
            agent("r", "Result"),
            agent("i", "Input Data"),
        ],
        vec![
            branch("check", "r", BranchTag::True),
            branch("check", "i", BranchTag::False),
        ],
    );
    let source = python(&workflow).source;

    assert!(source.contains("result_agent = Agent(\n"));
    assert!(source.contains("input_data_agent = Agent(\n"));
    assert!(source.contains("        result = await result_agent.run(result)\n"));
    assert!(source.contains("        result = await input_data_agent.run(result)\n"));
    assert!(!source.lines().any(|l| l.starts_with("input_data = ")));

    let chain = python(&linear_chain(&["Workflow", "Writer"])).source;
    assert!(chain.contains("    agents=[workflow_agent, writer],\n    flow=\"workflow_agent -> writer\",\n"));

    let renamed = Compiler::builder()
        .function_name("planner")
        .build()
        .compile(&Workflow::new(
            vec![condition("check", "flag"), agent("p", "Planner")],
            vec![branch("check", "p", BranchTag::True)],
        ))
        .source;
    assert!(renamed.contains("async def planner(input_data):\n"));
    assert!(renamed.contains("        result = await planner_agent.run(result)\n"));
}
