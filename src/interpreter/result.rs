use crate::{
    ast::{PragmaValue, Stmt},
    interpreter::value::core::{ErrorValue, Value},
};

/// A directive produced by a `#[NAME(...)]` statement, for the host to act
/// on.
#[derive(Debug, Clone, PartialEq)]
pub struct Pragma {
    pub name:       String,
    pub attributes: Vec<(String, PragmaValue)>,
}

impl Pragma {
    /// The value of attribute `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PragmaValue> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The value of attribute `key` if it is a boolean.
    ///
    /// # Example
    /// ```
    /// use abacus::{ast::PragmaValue, interpreter::result::Pragma};
    ///
    /// let pragma = Pragma { name:       "OUTPUT".to_string(),
    ///                       attributes: vec![("AST".to_string(), PragmaValue::Bool(false))], };
    ///
    /// assert_eq!(pragma.flag("AST"), Some(false));
    /// assert_eq!(pragma.flag("RESULT"), None);
    /// ```
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(PragmaValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

/// One item of the ordered output of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    /// The statement about to be reported on.
    Statement(Stmt),
    /// The value a statement produced.
    Value(Value),
    /// A lexical, syntax or runtime failure.
    Error(ErrorValue),
    /// A host directive.
    Pragma(Pragma),
}

/// Everything a call to `run` produced, in order.
///
/// For each statement the stream holds `Statement, Value` on success,
/// `Statement, Error` on failure (which ends the run), `Statement` followed
/// by the module's own entries for an import, and `Pragma, Statement` for a
/// pragma.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpreterResult {
    pub entries:   Vec<ResultEntry>,
    pub has_error: bool,
}

impl InterpreterResult {
    /// Appends an error entry and marks the run as failed.
    pub fn push_error(&mut self, error: ErrorValue) {
        self.has_error = true;
        self.entries.push(ResultEntry::Error(error));
    }

    /// Appends everything `child` produced, propagating its failure.
    pub fn extend(&mut self, child: Self) {
        self.has_error |= child.has_error;
        self.entries.extend(child.entries);
    }

    /// The values produced, in order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().filter_map(|entry| match entry {
                               ResultEntry::Value(v) => Some(v),
                               _ => None,
                           })
    }

    /// The errors reported, in order.
    pub fn errors(&self) -> impl Iterator<Item = &ErrorValue> {
        self.entries.iter().filter_map(|entry| match entry {
                               ResultEntry::Error(e) => Some(e),
                               _ => None,
                           })
    }

    /// The value of the last statement that produced one.
    #[must_use]
    pub fn last_value(&self) -> Option<&Value> {
        self.values().last()
    }
}

/// What executing one statement yields.
///
/// Expression statements produce a value; imports and pragmas produce
/// something that is not a language value and is reported through its own
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    Value(Value),
    Nested(InterpreterResult),
    Pragma(Pragma),
}

impl StatementOutcome {
    /// The value's tag, or `ANY` for outcomes that are not values.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Value(v) => v.tag(),
            Self::Nested(_) | Self::Pragma(_) => "ANY",
        }
    }
}
