use std::fmt;

use crate::{
    ast::{Binding, Expr, FunctionExpr, LiteralValue, PragmaValue, Stmt},
    util::num::format_number,
};

/// Renders syntax trees as parenthesized prefix expressions.
///
/// # Example
/// ```
/// use abacus::{ast::printer::AstPrinter, interpreter::parser::parse_source};
///
/// let statements = parse_source("F(X) = X * 2, X > 0").unwrap();
///
/// assert_eq!(AstPrinter::print_stmt(&statements[0]),
///            "(expr (= F (fn (X) (* X 2) (> X 0))))");
/// ```
pub struct AstPrinter;

impl AstPrinter {
    /// Renders a statement.
    #[must_use]
    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression { expr, .. } => parenthesize("expr", [Self::print_expr(expr)]),
            Stmt::Import { path, .. } => format!("(import {path})"),
            Stmt::Pragma { name, attributes, .. } => {
                let parts = attributes.iter()
                                      .map(|(key, value)| format!("{key}={}", print_pragma_value(value)));
                parenthesize(&format!("pragma {name}"), parts)
            },
        }
    }

    /// Renders an expression.
    #[must_use]
    pub fn print_expr(expr: &Expr) -> String {
        match expr {
            Expr::Assign { name,
                           value,
                           is_const,
                           .. } => {
                let head = if *is_const { "const" } else { "=" };
                format!("({head} {name} {})", Self::print_expr(value))
            },
            Expr::Binary { left, op, right, .. } => {
                parenthesize(&op.to_string(), [Self::print_expr(left), Self::print_expr(right)])
            },
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            .. } => parenthesize("?:",
                                                 [Self::print_expr(condition),
                                                  Self::print_expr(then_branch),
                                                  Self::print_expr(else_branch)]),
            Expr::Call { callee, arguments, .. } => {
                let parts = std::iter::once(Self::print_expr(callee)).chain(arguments.iter()
                                                                                     .map(Self::print_expr));
                parenthesize("call", parts)
            },
            Expr::Function(function) => print_function(function),
            Expr::Grouping { expr, .. } => parenthesize("group", [Self::print_expr(expr)]),
            Expr::Literal { value, .. } => match value {
                LiteralValue::Number(n) => format_number(*n),
                LiteralValue::Str(s) => format!("\"{s}\""),
                LiteralValue::Bool(b) => b.to_string(),
            },
            Expr::Logical { left, op, right, .. } => {
                parenthesize(&op.to_string(), [Self::print_expr(left), Self::print_expr(right)])
            },
            Expr::Reference { name, .. } => format!("(ref {name})"),
            Expr::Unary { op, expr, .. } => parenthesize(&op.to_string(), [Self::print_expr(expr)]),
            Expr::Variable { name, .. } => name.clone(),
            Expr::Vector { elements, .. } => parenthesize("vec", elements.iter().map(Self::print_expr)),
            Expr::With { locals, body, .. } => {
                let parts = locals.iter()
                                  .map(print_binding)
                                  .chain(std::iter::once(Self::print_expr(body)));
                parenthesize("with", parts)
            },
        }
    }
}

fn parenthesize(head: &str, parts: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("({head}");
    for part in parts {
        out.push(' ');
        out.push_str(&part);
    }
    out.push(')');
    out
}

fn print_function(function: &FunctionExpr) -> String {
    let params = function.params.join(" ");
    let params = if function.destructured { format!("([{params}])") } else { format!("({params})") };

    let mut parts = vec![params, AstPrinter::print_expr(&function.body)];
    if let Some(guard) = &function.guard {
        parts.push(AstPrinter::print_expr(guard));
    }
    parenthesize("fn", parts)
}

fn print_binding(binding: &Binding) -> String {
    format!("(= {} {})", binding.name, AstPrinter::print_expr(&binding.value))
}

fn print_pragma_value(value: &PragmaValue) -> String {
    match value {
        PragmaValue::Name(name) => name.clone(),
        PragmaValue::Number(n) => format_number(*n),
        PragmaValue::Bool(b) => b.to_string(),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AstPrinter::print_expr(self))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AstPrinter::print_stmt(self))
    }
}
