use super::{Compiler, CompilerOptions};
use crate::dialect::{Dialect, DialectChoice};

/// Configures a [`Compiler`] before use.
pub struct CompilerBuilder {
    dialect: Box<dyn Dialect>,
    options: CompilerOptions,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            dialect: DialectChoice::default().into_dialect(),
            options: CompilerOptions::default(),
        }
    }

    pub fn dialect(mut self, choice: DialectChoice) -> Self {
        self.dialect = choice.into_dialect();
        self
    }

    /// Use a dialect that is not built in.
    pub fn with_custom_dialect(mut self, dialect: Box<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.options.function_name = name.into();
        self
    }

    pub fn sample_input(mut self, input: impl Into<String>) -> Self {
        self.options.sample_input = input.into();
        self
    }

    pub fn runtime_module(mut self, module: impl Into<String>) -> Self {
        self.options.runtime_module = module.into();
        self
    }

    pub fn indent_width(mut self, width: usize) -> Self {
        self.options.indent_width = width;
        self
    }

    pub fn header(mut self, enabled: bool) -> Self {
        self.options.header = enabled;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            dialect: self.dialect,
            options: self.options,
        }
    }
}
