// AST (Abstract Syntax Tree) definitions for the Linen front end

use super::tables::Operator;

/// Identifier of an expression node, unique within one parse
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One node of an expression tree.
///
/// `parent` is a back-reference for diagnostics and upward lookup only. It
/// never owns anything; children are owned through `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: ExprKind,
    pub location: SourceLocation,
}

/// Expression node variants
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `left` is `None` exactly for unary operators
    Operator {
        op: Operator,
        left: Option<Box<ExprNode>>,
        right: Box<ExprNode>,
    },
    Number(f64),
    Str(String),
    Bool(bool),
    Variable(String),
    FunctionCall {
        name: String,
        args: Vec<ExprNode>,
    },
    /// Reserved; the parser does not produce objects yet
    Object,
    /// Reserved; the parser does not produce closures yet
    Closure,
}

impl ExprNode {
    pub fn new(id: NodeId, kind: ExprKind, location: SourceLocation) -> Self {
        ExprNode {
            id,
            parent: None,
            kind,
            location,
        }
    }

    /// The operator of an operator node
    pub fn operator(&self) -> Option<Operator> {
        match &self.kind {
            ExprKind::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&ExprNode> {
        match &self.kind {
            ExprKind::Operator { left, right, .. } => {
                let mut children = Vec::with_capacity(2);
                if let Some(left) = left {
                    children.push(left.as_ref());
                }
                children.push(right.as_ref());
                children
            }
            ExprKind::FunctionCall { args, .. } => args.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Find a node in this subtree by id
    pub fn find(&self, id: NodeId) -> Option<&ExprNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression {
        expr: ExprNode,
        location: SourceLocation,
    },
    If {
        condition: ExprNode,
        on_true: CodeBlock,
        /// `Some` exactly when an `else` clause was written, even if empty
        on_false: Option<CodeBlock>,
        location: SourceLocation,
    },
    For {
        init: ExprNode,
        condition: ExprNode,
        step: ExprNode,
        body: CodeBlock,
        location: SourceLocation,
    },
    While {
        condition: ExprNode,
        body: CodeBlock,
        location: SourceLocation,
    },
    DoWhile {
        body: CodeBlock,
        condition: ExprNode,
        location: SourceLocation,
    },
    Return {
        value: Option<ExprNode>,
        location: SourceLocation,
    },
    Scope {
        body: CodeBlock,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Statement::Expression { location, .. } => location,
            Statement::If { location, .. } => location,
            Statement::For { location, .. } => location,
            Statement::While { location, .. } => location,
            Statement::DoWhile { location, .. } => location,
            Statement::Return { location, .. } => location,
            Statement::Scope { location, .. } => location,
        }
    }

    /// Short name of the statement kind, used by the printer
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Expression { .. } => "Expression",
            Statement::If { .. } => "If",
            Statement::For { .. } => "For",
            Statement::While { .. } => "While",
            Statement::DoWhile { .. } => "DoWhile",
            Statement::Return { .. } => "Return",
            Statement::Scope { .. } => "Scope",
        }
    }
}

/// Statements sharing one scope depth, in execution order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub statements: Vec<Statement>,
}

impl CodeBlock {
    pub fn new() -> Self {
        CodeBlock::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
