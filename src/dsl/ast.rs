use super::Span;

/// A parsed Desktopfile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub variants: Vec<Variant>,
}

/// One `configuration <name> do ... end` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `env KEY, VALUE`
    SetVar { key: String, value: String },
    /// `alias_cmd NAME, EXPANSION`
    SetAlias { key: String, value: String },
    /// `echo TEXT`
    Echo { text: String },
    /// `cmd COMMAND`
    RunCommand { command: String },
    /// `os TAG, ... do ... end`
    Conditional { tags: Vec<String>, body: Vec<Statement> },
}
