//! Collision-free synthetic identifier generation.

use esdown_ast::ast::Program;
use esdown_ast::bindings::collect_binding_identifiers;
use esdown_ast::string_interner::{StringId, StringInterner};
use rustc_hash::FxHashSet;

/// Mints `$__<n>` identifiers that are unique within one compilation unit
/// and never collide with a name bound anywhere in the source tree.
///
/// The counter only increases; a candidate that happens to match a
/// blacklisted name is skipped, never reused. One instance serves all
/// transformers operating on the same unit.
#[derive(Debug, Default)]
pub struct UniqueIdentifierGenerator {
    next_index: u64,
    blacklist: FxHashSet<StringId>,
}

impl UniqueIdentifierGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every identifier bound in `program` so it is never emitted.
    pub fn blacklist_program(&mut self, program: &Program<'_>) {
        collect_binding_identifiers(program, &mut self.blacklist);
    }

    pub fn blacklist_name(&mut self, name: StringId) {
        self.blacklist.insert(name);
    }

    /// The next free synthetic identifier.
    pub fn next(&mut self, interner: &StringInterner) -> StringId {
        loop {
            let candidate = format!("$__{}", self.next_index);
            self.next_index = self
                .next_index
                .checked_add(1)
                .expect("synthetic identifier counter overflowed");
            let id = interner.intern(&candidate);
            if !self.blacklist.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_names_are_sequential() {
        let interner = StringInterner::new();
        let mut ids = UniqueIdentifierGenerator::new();
        assert_eq!(interner.resolve(ids.next(&interner)), "$__0");
        assert_eq!(interner.resolve(ids.next(&interner)), "$__1");
        assert_eq!(interner.resolve(ids.next(&interner)), "$__2");
    }

    #[test]
    fn test_blacklisted_name_is_skipped() {
        let interner = StringInterner::new();
        let mut ids = UniqueIdentifierGenerator::new();
        ids.blacklist_name(interner.intern("$__0"));
        ids.blacklist_name(interner.intern("$__2"));
        assert_eq!(interner.resolve(ids.next(&interner)), "$__1");
        assert_eq!(interner.resolve(ids.next(&interner)), "$__3");
    }

    #[test]
    fn test_generated_names_never_repeat() {
        let interner = StringInterner::new();
        let mut ids = UniqueIdentifierGenerator::new();
        let mut seen = FxHashSet::default();
        for _ in 0..100 {
            assert!(seen.insert(ids.next(&interner)));
        }
    }

    proptest! {
        /// No generated name ever matches a blacklisted `$__<k>` binding.
        #[test]
        fn prop_never_emits_blacklisted(blocked in proptest::collection::hash_set(0u64..64, 0..16)) {
            let interner = StringInterner::new();
            let mut ids = UniqueIdentifierGenerator::new();
            let mut blocked_ids = FxHashSet::default();
            for k in &blocked {
                let id = interner.intern(&format!("$__{k}"));
                ids.blacklist_name(id);
                blocked_ids.insert(id);
            }
            for _ in 0..128 {
                let generated = ids.next(&interner);
                prop_assert!(!blocked_ids.contains(&generated));
            }
        }
    }
}
