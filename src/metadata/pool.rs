//! Interning registry for type names and member references.
//!
//! The [`RefPool`] is the planner's analog of the container format's id
//! tables: every type name, field reference, and method reference is interned
//! once and addressed by a [`Token`]. Classes store tokens rather than
//! strings, so the capacity sets deduplicate by token identity, and the
//! pruner can map any instruction operand back to its defining class.
//!
//! Interning is idempotent: asking for the same type name or member spec
//! twice yields the same token. The pool is append-only; entries are never
//! removed.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::metadata::token::{Token, TABLE_FIELD_IDS, TABLE_METHOD_IDS, TABLE_TYPE_IDS};

/// A field or method reference entry: the defining type and the member name.
///
/// Two members with the same owner and name intern to the same token. The
/// planner does not model descriptors; name-level identity is sufficient to
/// drive capacity accounting and reachability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    /// Type token of the defining class.
    pub owner: Token,
    /// Member name.
    pub name: Arc<str>,
}

/// Interning registry backing all [`Token`] handles.
///
/// # Example
///
/// ```rust
/// use dexpack::metadata::pool::RefPool;
///
/// let mut pool = RefPool::new();
/// let ty = pool.intern_type("com/app/Main");
/// let again = pool.intern_type("com/app/Main");
/// assert_eq!(ty, again);
///
/// let method = pool.intern_method(ty, "onCreate");
/// assert_eq!(pool.owner_of(method), Some(ty));
/// ```
#[derive(Debug, Default)]
pub struct RefPool {
    type_names: Vec<Arc<str>>,
    type_index: FxHashMap<Arc<str>, Token>,
    methods: Vec<MemberSpec>,
    method_index: FxHashMap<(Token, Arc<str>), Token>,
    fields: Vec<MemberSpec>,
    field_index: FxHashMap<(Token, Arc<str>), Token>,
}

impl RefPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a type name, returning its type token.
    ///
    /// Repeated calls with the same name return the same token.
    pub fn intern_type(&mut self, name: &str) -> Token {
        if let Some(token) = self.type_index.get(name) {
            return *token;
        }
        let name: Arc<str> = Arc::from(name);
        let token = Token::type_id(self.type_names.len() as u32);
        self.type_names.push(Arc::clone(&name));
        self.type_index.insert(name, token);
        token
    }

    /// Looks up a type name without interning it.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<Token> {
        self.type_index.get(name).copied()
    }

    /// Returns the canonical name of a type token.
    #[must_use]
    pub fn type_name(&self, token: Token) -> Option<&Arc<str>> {
        if token.table() != TABLE_TYPE_IDS {
            return None;
        }
        self.type_names.get(token.row() as usize)
    }

    /// Interns a method reference defined by `owner`.
    pub fn intern_method(&mut self, owner: Token, name: &str) -> Token {
        if let Some(token) = self.method_index.get(&(owner, Arc::from(name))) {
            return *token;
        }
        let name: Arc<str> = Arc::from(name);
        let token = Token::method_id(self.methods.len() as u32);
        self.methods.push(MemberSpec {
            owner,
            name: Arc::clone(&name),
        });
        self.method_index.insert((owner, name), token);
        token
    }

    /// Interns a field reference defined by `owner`.
    pub fn intern_field(&mut self, owner: Token, name: &str) -> Token {
        if let Some(token) = self.field_index.get(&(owner, Arc::from(name))) {
            return *token;
        }
        let name: Arc<str> = Arc::from(name);
        let token = Token::field_id(self.fields.len() as u32);
        self.fields.push(MemberSpec {
            owner,
            name: Arc::clone(&name),
        });
        self.field_index.insert((owner, name), token);
        token
    }

    /// Returns the entry for a method token.
    #[must_use]
    pub fn method(&self, token: Token) -> Option<&MemberSpec> {
        if token.table() != TABLE_METHOD_IDS {
            return None;
        }
        self.methods.get(token.row() as usize)
    }

    /// Returns the entry for a field token.
    #[must_use]
    pub fn field(&self, token: Token) -> Option<&MemberSpec> {
        if token.table() != TABLE_FIELD_IDS {
            return None;
        }
        self.fields.get(token.row() as usize)
    }

    /// Returns the type token of the class defining `token`.
    ///
    /// A type token is its own owner; field and method tokens resolve through
    /// their pool entries. Returns `None` for tokens that do not resolve.
    #[must_use]
    pub fn owner_of(&self, token: Token) -> Option<Token> {
        match token.table() {
            TABLE_TYPE_IDS => self.type_names.get(token.row() as usize).map(|_| token),
            TABLE_FIELD_IDS => self.field(token).map(|spec| spec.owner),
            TABLE_METHOD_IDS => self.method(token).map(|spec| spec.owner),
            _ => None,
        }
    }

    /// Number of interned type names.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.type_names.len()
    }

    /// Number of interned method references.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Number of interned field references.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_type_idempotent() {
        let mut pool = RefPool::new();
        let a = pool.intern_type("com/app/A");
        let b = pool.intern_type("com/app/B");
        assert_ne!(a, b);
        assert_eq!(pool.intern_type("com/app/A"), a);
        assert_eq!(pool.type_count(), 2);
        assert_eq!(pool.type_name(a).unwrap().as_ref(), "com/app/A");
    }

    #[test]
    fn test_find_type_does_not_intern() {
        let mut pool = RefPool::new();
        assert_eq!(pool.find_type("com/app/A"), None);
        let a = pool.intern_type("com/app/A");
        assert_eq!(pool.find_type("com/app/A"), Some(a));
        assert_eq!(pool.type_count(), 1);
    }

    #[test]
    fn test_member_interning_and_owner() {
        let mut pool = RefPool::new();
        let a = pool.intern_type("com/app/A");
        let b = pool.intern_type("com/app/B");

        let m = pool.intern_method(a, "run");
        assert_eq!(pool.intern_method(a, "run"), m);
        assert_ne!(pool.intern_method(b, "run"), m);
        assert_eq!(pool.owner_of(m), Some(a));

        let f = pool.intern_field(b, "count");
        assert_eq!(pool.owner_of(f), Some(b));
        assert_eq!(pool.field(f).unwrap().name.as_ref(), "count");
    }

    #[test]
    fn test_owner_of_type_is_itself() {
        let mut pool = RefPool::new();
        let a = pool.intern_type("com/app/A");
        assert_eq!(pool.owner_of(a), Some(a));
    }

    #[test]
    fn test_unresolvable_tokens() {
        let pool = RefPool::new();
        assert_eq!(pool.owner_of(Token::type_id(0)), None);
        assert_eq!(pool.owner_of(Token::method_id(9)), None);
        assert_eq!(pool.method(Token::field_id(0)), None);
    }
}
