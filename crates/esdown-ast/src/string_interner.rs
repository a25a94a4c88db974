//! String interning for identifiers and string literals.
//!
//! Interned strings are passed around as `StringId` (a `u32`), so identifier
//! comparison is an integer comparison. One interner is shared per
//! compilation unit, behind `Arc`, by every pipeline stage that needs to
//! mint or resolve names.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// An interned string.
///
/// Cheap to copy and to compare; use [`StringInterner::resolve`] to get the
/// text back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

impl StringId {
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    lookup: FxHashMap<String, StringId>,
    strings: Vec<String>,
}

/// Deduplicating string pool.
///
/// Interning takes `&self` so the interner can be shared behind `Arc` while
/// later stages (the unique identifier generator in particular) still mint
/// new names.
#[derive(Debug, Default)]
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing id if it was seen before.
    pub fn intern(&self, text: &str) -> StringId {
        if let Some(&id) = self.inner.read().lookup.get(text) {
            return id;
        }
        let mut inner = self.inner.write();
        // Re-check under the write lock; another thread may have won the race.
        if let Some(&id) = inner.lookup.get(text) {
            return id;
        }
        let id = StringId(
            u32::try_from(inner.strings.len()).expect("string interner exhausted u32 id space"),
        );
        inner.strings.push(text.to_owned());
        inner.lookup.insert(text.to_owned(), id);
        id
    }

    /// Resolve an id back to its text.
    pub fn resolve(&self, id: StringId) -> String {
        self.inner.read().strings[id.0 as usize].clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
