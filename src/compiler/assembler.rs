use serde::Serialize;

/// An append-only buffer of indented source lines.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent_unit: String,
    statements: usize,
}

impl CodeWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit: " ".repeat(indent_width),
            statements: 0,
        }
    }

    /// Appends a line of code at the given depth.
    pub fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        self.push(indent, text.as_ref());
        self.statements += 1;
    }

    /// Appends an already-rendered comment. Comments do not count as block content.
    pub fn comment(&mut self, indent: usize, rendered: impl AsRef<str>) {
        self.push(indent, rendered.as_ref());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn push(&mut self, indent: usize, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", self.indent_unit.repeat(indent), text));
        }
    }

    /// Number of code lines written so far, comments excluded.
    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

/// The four logical sections of a generated program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sections {
    pub imports: String,
    pub declarations: String,
    pub body: String,
    pub entrypoint: String,
}

impl Sections {
    /// Joins the non-empty sections with blank lines.
    pub fn assemble(&self) -> String {
        let parts: Vec<&str> = [
            &self.imports,
            &self.declarations,
            &self.body,
            &self.entrypoint,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

        let mut text = parts.join("\n\n");
        text.push('\n');
        text
    }
}
