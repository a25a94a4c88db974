//! Names of the runtime helper library referenced by lowered code.
//!
//! The helpers themselves ship with the generated program; this pass only
//! emits calls against their fixed contract:
//!
//! - `$esdownRuntime.superGet(receiver, home, name)` reads `name` starting
//!   from the prototype chain above `home`, with `receiver` as `this` for
//!   accessors.
//! - `$esdownRuntime.superSet(receiver, home, name, value)` is the matching
//!   write; returns `value`.
//! - `$esdownRuntime.superConstructor(ctor)` returns a callable bound to the
//!   ancestor constructor of `ctor`.

use esdown_ast::string_interner::{StringId, StringInterner};

pub const RUNTIME_NAMESPACE: &str = "$esdownRuntime";
pub const SUPER_GET: &str = "superGet";
pub const SUPER_SET: &str = "superSet";
pub const SUPER_CONSTRUCTOR: &str = "superConstructor";

/// Pre-interned names referenced by generated code.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeNames {
    pub namespace: StringId,
    pub super_get: StringId,
    pub super_set: StringId,
    pub super_constructor: StringId,
    pub call: StringId,
    pub prototype: StringId,
}

impl RuntimeNames {
    pub fn new(interner: &StringInterner) -> Self {
        Self {
            namespace: interner.intern(RUNTIME_NAMESPACE),
            super_get: interner.intern(SUPER_GET),
            super_set: interner.intern(SUPER_SET),
            super_constructor: interner.intern(SUPER_CONSTRUCTOR),
            call: interner.intern("call"),
            prototype: interner.intern("prototype"),
        }
    }
}
