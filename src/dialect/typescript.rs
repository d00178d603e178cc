use super::{AgentSpec, Dialect, ImportNeeds, TeamSpec, number_literal, single_line};
use crate::compiler::{CodeWriter, CompilerOptions};
use crate::workflow::MergePolicy;

/// TypeScript for a Node.js runtime. Concurrency uses the built-in `Promise.all`,
/// so the import section only pulls in the agent runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptDialect;

impl Dialect for TypeScriptDialect {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", single_line(text))
    }

    fn false_literal(&self) -> &'static str {
        "false"
    }

    fn imports(&self, out: &mut CodeWriter, needs: ImportNeeds, options: &CompilerOptions) {
        let mut names = vec!["Agent"];
        if needs.chain {
            names.push("Chain");
        }
        if needs.team {
            names.push("Team");
        }
        out.line(
            0,
            format!(
                "import {{ {} }} from {};",
                names.join(", "),
                self.string_literal(&options.runtime_module)
            ),
        );
    }

    fn agent_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, agent: AgentSpec<'_>) {
        out.line(indent, format!("const {} = new Agent({{", ident));
        out.line(indent + 1, format!("name: {},", self.string_literal(agent.name)));
        out.line(indent + 1, format!("role: {},", self.string_literal(agent.role)));
        out.line(indent + 1, format!("model: {},", self.string_literal(agent.model)));
        out.line(
            indent + 1,
            format!("temperature: {},", number_literal(agent.temperature)),
        );
        if let Some(max_tokens) = agent.max_tokens {
            out.line(indent + 1, format!("maxTokens: {},", max_tokens));
        }
        if let Some(prompt) = agent.system_prompt {
            out.line(
                indent + 1,
                format!("systemPrompt: {},", self.string_literal(prompt)),
            );
        }
        out.line(indent, "});");
    }

    fn team_declaration(&self, out: &mut CodeWriter, indent: usize, ident: &str, team: TeamSpec<'_>) {
        out.line(indent, format!("const {} = new Team({{", ident));
        out.line(indent + 1, format!("name: {},", self.string_literal(team.name)));
        out.line(indent + 1, format!("members: [{}],", team.members.join(", ")));
        out.line(
            indent + 1,
            format!("strategy: {},", self.string_literal(team.strategy)),
        );
        out.line(indent + 1, format!("maxRounds: {},", team.max_rounds));
        out.line(indent, "});");
    }

    fn chain_declaration(&self, out: &mut CodeWriter, ident: &str, agents: &[String], flow: &str) {
        out.line(0, format!("const {} = new Chain({{", ident));
        out.line(1, format!("agents: [{}],", agents.join(", ")));
        out.line(1, format!("flow: {},", self.string_literal(flow)));
        out.line(0, "});");
    }

    fn invoke(&self, target: &str, input: &str, awaited: bool) -> String {
        if awaited {
            format!("await {}.run({})", target, input)
        } else {
            format!("{}.run({})", target, input)
        }
    }

    fn assign(&self, var: &str, expr: &str) -> String {
        format!("{} = {};", var, expr)
    }

    fn function_open(
        &self,
        out: &mut CodeWriter,
        name: &str,
        param: &str,
        locals: &[&str],
        is_async: bool,
    ) {
        if is_async {
            out.line(
                0,
                format!("export async function {}({}: any): Promise<any> {{", name, param),
            );
        } else {
            out.line(0, format!("export function {}({}: any): any {{", name, param));
        }
        for local in locals {
            out.line(1, format!("let {}: any;", local));
        }
    }

    fn function_close(&self, out: &mut CodeWriter, result: &str) {
        out.line(1, format!("return {};", result));
        out.line(0, "}");
    }

    fn if_open(&self, condition: &str) -> String {
        format!("if ({}) {{", condition)
    }

    fn else_open(&self) -> String {
        "} else {".to_string()
    }

    fn loop_open(&self, counter: &str, cap: u32) -> String {
        format!("for (let {c} = 0; {c} < {}; {c}++) {{", cap, c = counter)
    }

    fn block_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn break_statement(&self) -> String {
        "break;".to_string()
    }

    fn noop(&self, reason: &str) -> String {
        self.comment(reason)
    }

    fn fan_out(&self, out: &mut CodeWriter, indent: usize, var: &str, calls: &[String]) {
        out.line(indent, format!("{} = await Promise.all([", var));
        for call in calls {
            out.line(indent + 1, format!("{},", call));
        }
        out.line(indent, "]);");
    }

    fn merge(&self, policy: MergePolicy, collection: &str) -> String {
        match policy {
            MergePolicy::Concat => format!("{}.map((r) => String(r)).join(\" \")", collection),
            MergePolicy::First => format!("{}[0]", collection),
            MergePolicy::Last => format!("{c}[{c}.length - 1]", c = collection),
            MergePolicy::Custom => collection.to_string(),
        }
    }

    fn tool_call_skeleton(&self, server: &str, tool: &str, parameters: &str) -> Vec<String> {
        let mut lines = vec![
            "result = await callTool({".to_string(),
            format!("    server: {},", self.string_literal(server)),
            format!("    tool: {},", self.string_literal(tool)),
        ];
        let mut params = parameters.lines();
        if let Some(first) = params.next() {
            lines.push(format!("    arguments: {}", first));
            lines.extend(params.map(|l| format!("    {}", l)));
            if let Some(last) = lines.last_mut() {
                last.push(',');
            }
        }
        lines.push("});".to_string());
        lines
    }

    fn chain_entrypoint(&self, out: &mut CodeWriter, target: &str, sample_input: &str) {
        out.line(0, "if (require.main === module) {");
        out.line(
            1,
            format!(
                "const result = {};",
                self.invoke(target, &self.string_literal(sample_input), false)
            ),
        );
        out.line(1, "console.log(result);");
        out.line(0, "}");
    }

    fn procedural_entrypoint(
        &self,
        out: &mut CodeWriter,
        function: &str,
        sample_input: &str,
        is_async: bool,
    ) {
        let call = format!("{}({})", function, self.string_literal(sample_input));
        out.line(0, "if (require.main === module) {");
        if is_async {
            out.line(1, format!("{}.then((output) => console.log(output));", call));
        } else {
            out.line(1, format!("const output = {};", call));
            out.line(1, "console.log(output);");
        }
        out.line(0, "}");
    }
}
