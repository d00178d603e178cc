use super::{AgentSpec, Dialect, ImportNeeds, TeamSpec, number_literal, single_line};
use crate::compiler::{CodeWriter, CompilerOptions};
use crate::workflow::MergePolicy;

/// Python with `asyncio`, the default target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonDialect;

impl Dialect for PythonDialect {
    fn name(&self) -> &'static str {
        "python"
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}", single_line(text))
    }

    fn false_literal(&self) -> &'static str {
        "False"
    }

    fn imports(&self, out: &mut CodeWriter, needs: ImportNeeds, options: &CompilerOptions) {
        if needs.concurrency {
            out.line(0, "import asyncio");
        }
        let mut names = vec!["Agent"];
        if needs.chain {
            names.push("Chain");
        }
        if needs.team {
            names.push("Team");
        }
        out.line(
            0,
            format!("from {} import {}", options.runtime_module, names.join(", ")),
        );
    }

    fn agent_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, agent: AgentSpec<'_>) {
        out.line(indent, format!("{} = Agent(", ident));
        out.line(indent + 1, format!("name={},", self.string_literal(agent.name)));
        out.line(indent + 1, format!("role={},", self.string_literal(agent.role)));
        out.line(indent + 1, format!("model={},", self.string_literal(agent.model)));
        out.line(
            indent + 1,
            format!("temperature={},", number_literal(agent.temperature)),
        );
        if let Some(max_tokens) = agent.max_tokens {
            out.line(indent + 1, format!("max_tokens={},", max_tokens));
        }
        if let Some(prompt) = agent.system_prompt {
            out.line(
                indent + 1,
                format!("system_prompt={},", self.string_literal(prompt)),
            );
        }
        out.line(indent, ")");
    }

    fn team_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, team: TeamSpec<'_>) {
        out.line(indent, format!("{} = Team(", ident));
        out.line(indent + 1, format!("name={},", self.string_literal(team.name)));
        out.line(indent + 1, format!("members=[{}],", team.members.join(", ")));
        out.line(
            indent + 1,
            format!("strategy={},", self.string_literal(team.strategy)),
        );
        out.line(indent + 1, format!("max_rounds={},", team.max_rounds));
        out.line(indent, ")");
    }

    fn chain_declaration(&self, out: &mut CodeWriter, ident: &str, agents: &[String], flow: &str) {
        out.line(0, format!("{} = Chain(", ident));
        out.line(1, format!("agents=[{}],", agents.join(", ")));
        out.line(1, format!("flow={},", self.string_literal(flow)));
        out.line(0, ")");
    }

    fn invoke(&self, target: &str, input: &str, awaited: bool) -> String {
        if awaited {
            format!("await {}.run({})", target, input)
        } else {
            format!("{}.run({})", target, input)
        }
    }

    fn assign(&self, var: &str, expr: &str) -> String {
        format!("{} = {}", var, expr)
    }

    fn function_open(
        &self,
        out: &mut CodeWriter,
        name: &str,
        param: &str,
        _locals: &[&str],
        is_async: bool,
    ) {
        let keyword = if is_async { "async def" } else { "def" };
        out.line(0, format!("{} {}({}):", keyword, name, param));
    }

    fn function_close(&self, out: &mut CodeWriter, result: &str) {
        out.line(1, format!("return {}", result));
    }

    fn if_open(&self, condition: &str) -> String {
        format!("if {}:", condition)
    }

    fn else_open(&self) -> String {
        "else:".to_string()
    }

    fn loop_open(&self, counter: &str, cap: u32) -> String {
        format!("for {} in range({}):", counter, cap)
    }

    fn block_close(&self) -> Option<String> {
        None
    }

    fn break_statement(&self) -> String {
        "break".to_string()
    }

    fn noop(&self, reason: &str) -> String {
        format!("pass  {}", self.comment(reason))
    }

    fn fan_out(&self, out: &mut CodeWriter, indent: usize, var: &str, calls: &[String]) {
        out.line(indent, format!("{} = await asyncio.gather(", var));
        for call in calls {
            out.line(indent + 1, format!("{},", call));
        }
        out.line(indent, ")");
    }

    fn merge(&self, policy: MergePolicy, collection: &str) -> String {
        match policy {
            MergePolicy::Concat => format!("\" \".join(str(r) for r in {})", collection),
            MergePolicy::First => format!("{}[0]", collection),
            MergePolicy::Last => format!("{}[-1]", collection),
            MergePolicy::Custom => collection.to_string(),
        }
    }

    fn tool_call_skeleton(&self, server: &str, tool: &str, parameters: &str) -> Vec<String> {
        let mut lines = vec![
            "result = await call_tool(".to_string(),
            format!("    server={},", self.string_literal(server)),
            format!("    tool={},", self.string_literal(tool)),
        ];
        let mut params = parameters.lines();
        if let Some(first) = params.next() {
            lines.push(format!("    arguments={}", first));
            lines.extend(params.map(|l| format!("    {}", l)));
            if let Some(last) = lines.last_mut() {
                last.push(',');
            }
        }
        lines.push(")".to_string());
        lines
    }

    fn chain_entrypoint(&self, out: &mut CodeWriter, target: &str, sample_input: &str) {
        out.line(0, "if __name__ == \"__main__\":");
        out.line(
            1,
            format!(
                "result = {}",
                self.invoke(target, &self.string_literal(sample_input), false)
            ),
        );
        out.line(1, "print(result)");
    }

    fn procedural_entrypoint(
        &self,
        out: &mut CodeWriter,
        function: &str,
        sample_input: &str,
        is_async: bool,
    ) {
        let call = format!("{}({})", function, self.string_literal(sample_input));
        out.line(0, "if __name__ == \"__main__\":");
        if is_async {
            out.line(1, format!("output = asyncio.run({})", call));
        } else {
            out.line(1, format!("output = {}", call));
        }
        out.line(1, "print(output)");
    }
}

