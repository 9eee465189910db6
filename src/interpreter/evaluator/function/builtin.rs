use tracing::debug;

use crate::interpreter::{
    environment::Environment,
    evaluator::{
        core::EvalResult,
        function::{math, meta, vector},
    },
    value::{
        callable::{Arity, Callable, NativeBody, NativeFunction},
        core::Value,
    },
};

/// Defines builtin functions by generating a static table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity,
/// - a body of one of the [`NativeBody`] shapes.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table the interpreter installs from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                body: $body:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, body: $body },
            )*
        ];
        /// Names of every native builtin, in installation order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "SIN"       => { arity: Arity::exact(1), body: NativeBody::Numeric(math::sin) },
    "COS"       => { arity: Arity::exact(1), body: NativeBody::Numeric(math::cos) },
    "TAN"       => { arity: Arity::exact(1), body: NativeBody::Numeric(math::tan) },
    "ASIN"      => { arity: Arity::exact(1), body: NativeBody::Numeric(math::asin) },
    "ACOS"      => { arity: Arity::exact(1), body: NativeBody::Numeric(math::acos) },
    "ATAN"      => { arity: Arity::exact(1), body: NativeBody::Numeric(math::atan) },
    "ATAN2"     => { arity: Arity::exact(2), body: NativeBody::Numeric(math::atan2) },
    "CEIL"      => { arity: Arity::exact(1), body: NativeBody::Numeric(math::ceil) },
    "FLOOR"     => { arity: Arity::exact(1), body: NativeBody::Numeric(math::floor) },
    "INT"       => { arity: Arity::exact(1), body: NativeBody::Numeric(math::int) },
    "LOG"       => { arity: Arity::exact(1), body: NativeBody::Numeric(math::log) },
    "RND"       => { arity: Arity::exact(0), body: NativeBody::Numeric(math::rnd) },
    "ASSERT"    => { arity: Arity::range(1, 2), body: NativeBody::Raw(meta::assert_fn) },
    "TYPE"      => { arity: Arity::exact(1), body: NativeBody::Raw(meta::type_of) },
    "NUM"       => { arity: Arity::exact(1), body: NativeBody::Raw(meta::to_number) },
    "STR"       => { arity: Arity::exact(1), body: NativeBody::Raw(meta::to_string) },
    "FREEZE"    => { arity: Arity::exact(1), body: NativeBody::WithEnv(meta::freeze) },
    "ISDEF"     => { arity: Arity::exact(1), body: NativeBody::WithEnv(meta::is_defined) },
    "ISFROZEN"  => { arity: Arity::exact(1), body: NativeBody::WithEnv(meta::is_frozen) },
    "RESOLVE"   => { arity: Arity::exact(1), body: NativeBody::WithEnv(meta::resolve) },
    "DELETE"    => { arity: Arity::exact(1), body: NativeBody::WithEnv(meta::delete) },
    "ASSIGN"    => { arity: Arity::exact(2), body: NativeBody::WithEnv(meta::assign) },
    "VECEMPTY"  => { arity: Arity::exact(1), body: NativeBody::Raw(vector::vec_empty) },
    "VECHEAD"   => { arity: Arity::exact(1), body: NativeBody::Raw(vector::vec_head) },
    "VECTAIL"   => { arity: Arity::exact(1), body: NativeBody::Raw(vector::vec_tail) },
    "VECLEN"    => { arity: Arity::exact(1), body: NativeBody::Raw(vector::vec_len) },
    "VECCONCAT" => { arity: Arity::exact(2), body: NativeBody::Raw(vector::vec_concat) },
}

/// Defines every builtin as a constant in `env`.
///
/// Each interpreter installs its own copies into its root scope, so no
/// state is shared between instances.
///
/// # Errors
/// `Redefinition` if `env` already binds one of the names.
pub fn install_builtins(env: &Environment) -> EvalResult<()> {
    for native in BUILTIN_TABLE {
        let callable = Callable::Native(NativeFunction { name:  native.name,
                                                         arity: native.arity,
                                                         body:  native.body, });
        env.define_constant(native.name, Value::from(callable))?;
    }
    debug!(count = BUILTIN_TABLE.len(), "installed builtins");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_a_constant() {
        let env = Environment::root();
        install_builtins(&env).unwrap();

        for name in BUILTIN_FUNCTIONS {
            assert!(env.is_constant(name), "{name} is not constant");
            assert!(env.get(name).unwrap().as_callable().is_ok());
        }
    }

    #[test]
    fn installing_twice_fails() {
        let env = Environment::root();
        install_builtins(&env).unwrap();
        assert!(install_builtins(&env).is_err());
    }
}
