use std::fmt;

/// Canonical parenthesized rendering of syntax trees.
///
/// Every node prints as a prefix s-expression, e.g. `1 + 2 * 3` becomes
/// `(+ 1 (* 2 3))`. The rendering is what hosts echo back for each statement.
pub mod printer;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code: numbers (decimal or radix), strings and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit floating-point literal.
    Number(f64),
    /// A string literal without its quotes.
    Str(String),
    /// A boolean literal value: `TRUE` or `FALSE`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// The header and body of a function literal.
///
/// A declaration such as `F(X) = X * 2, X > 0` parses to an assignment of a
/// `FunctionExpr` to `F`. The optional guard decides whether this clause
/// applies to a call; a function without one accepts every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    /// The parameter names (e.g. `X`).
    pub params:       Vec<String>,
    /// Whether the parameters were written `[A, B]`, binding the elements of
    /// a single vector argument.
    pub destructured: bool,
    /// The body expression evaluated when the clause applies.
    pub body:         Box<Expr>,
    /// The condition under which the clause applies.
    pub guard:        Option<Box<Expr>>,
    /// Line number in the source code.
    pub line:         usize,
}

/// One `NAME = value` entry of a `WITH` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The local name.
    pub name:  String,
    /// The value, which may be a function literal.
    pub value: Expr,
    /// Line number in the source code.
    pub line:  usize,
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant models a distinct syntactic construct and carries the source
/// line of its first token for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binds a name in the current scope: `X = 1`, `CONST PI = 3.14`.
    Assign {
        /// The name being bound.
        name:     String,
        /// The value expression.
        value:    Box<Self>,
        /// Whether the binding is frozen immediately.
        is_const: bool,
        /// Line number in the source code.
        line:     usize,
    },
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// The left-hand operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// The right-hand operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `condition ? then : else`
    Ternary {
        /// Must evaluate to a boolean.
        condition:   Box<Self>,
        /// Evaluated when the condition holds.
        then_branch: Box<Self>,
        /// Evaluated otherwise.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A call of any callable value.
    Call {
        /// Expression producing the callable.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A function literal.
    Function(FunctionExpr),
    /// A parenthesized expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Short-circuiting `&&` and `||`.
    Logical {
        /// The left-hand operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// The right-hand operand, evaluated only when needed.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `$NAME`, naming a binding without looking it up.
    Reference {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Negation, logical NOT and `|x|`.
    Unary {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `[a, b, c]`
    Vector {
        /// The element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `WITH {A = 1, B = A + 1} body`: sequential local bindings visible in
    /// the following binding values and in the body.
    With {
        /// The local bindings, in order.
        locals: Vec<Binding>,
        /// The expression evaluated with the locals in scope.
        body:   Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Returns the line number associated with this expression.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Function(FunctionExpr { line, .. })
            | Self::Assign { line, .. }
            | Self::Binary { line, .. }
            | Self::Ternary { line, .. }
            | Self::Call { line, .. }
            | Self::Grouping { line, .. }
            | Self::Literal { line, .. }
            | Self::Logical { line, .. }
            | Self::Reference { line, .. }
            | Self::Unary { line, .. }
            | Self::Variable { line, .. }
            | Self::Vector { line, .. }
            | Self::With { line, .. } => *line,
        }
    }
}

/// A value allowed on the right of `=` inside a pragma.
#[derive(Debug, Clone, PartialEq)]
pub enum PragmaValue {
    /// A bare name, kept as text.
    Name(String),
    /// A numeric literal.
    Number(f64),
    /// `TRUE` or `FALSE`.
    Bool(bool),
}

/// Represents a top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its result, declarations included.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `IMPORT "path"`
    Import {
        /// The path between the quotes.
        path: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `#[NAME(KEY = VALUE, ...)]`, a directive for the host.
    Pragma {
        /// The pragma name.
        name:       String,
        /// Attributes in source order.
        attributes: Vec<(String, PragmaValue)>,
        /// Line number in the source code.
        line:       usize,
    },
}

impl Stmt {
    /// Returns the line number associated with this statement.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. } | Self::Import { line, .. } | Self::Pragma { line, .. } => {
                *line
            },
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floor division (`\`)
    IntDiv,
    /// Remainder with the sign of the dividend (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Short-circuiting boolean operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-X`).
    Negate,
    /// Logical NOT (e.g. `!X`).
    Not,
    /// Absolute value (e.g. `|X|`).
    Abs,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul, NotEqual,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            IntDiv => "\\",
            Mod => "%",
            Pow => "^",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
            Self::Abs => write!(f, "ABS"),
        }
    }
}
