//! Class, method, and instruction handles.
//!
//! A [`DexClass`] is the opaque unit the planner moves between containers:
//! it exposes a canonical name, access flags, the rename predicate, and the
//! reference surfaces the capacity accounting and the pruner read. Classes
//! are built once — by whatever loaded the input containers, or by
//! [`ClassBuilder`] for synthesized classes — and shared as [`ClassRc`]
//! handles; the planner never clones or mutates a class, it only reorders
//! references to them.
//!
//! Method bodies are sequences of [`Instruction`], a tagged variant carrying
//! at most one metadata operand. The pruner walks these to discover which
//! cold-start classes actually reach each other.

use std::sync::Arc;

use crate::metadata::flags::{ClassAccessFlags, MethodAccessFlags};
use crate::metadata::token::Token;

/// Reference-counted class handle.
///
/// Class handles live for the entire pass; containers and trackers share
/// them.
pub type ClassRc = Arc<DexClass>;

/// A single bytecode instruction, reduced to its metadata operand.
///
/// The planner cares only about which pool entry an instruction references,
/// so opcodes are collapsed into four variants: the three reference-carrying
/// shapes and an opaque rest. This keeps operand access a match instead of a
/// runtime cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// An invocation carrying a method reference.
    Invoke(Token),
    /// A field access carrying a field reference.
    FieldAccess(Token),
    /// A type-referencing operation (instance-of, cast, new-instance, const-class).
    TypeRef(Token),
    /// Any instruction without a metadata operand.
    Opaque,
}

impl Instruction {
    /// Returns the method operand, if this is an invocation.
    #[must_use]
    pub fn method_ref(&self) -> Option<Token> {
        match self {
            Instruction::Invoke(token) => Some(*token),
            _ => None,
        }
    }

    /// Returns the field operand, if this is a field access.
    #[must_use]
    pub fn field_ref(&self) -> Option<Token> {
        match self {
            Instruction::FieldAccess(token) => Some(*token),
            _ => None,
        }
    }

    /// Returns the type operand, if this is a type-referencing operation.
    #[must_use]
    pub fn type_ref(&self) -> Option<Token> {
        match self {
            Instruction::TypeRef(token) => Some(*token),
            _ => None,
        }
    }

    /// Returns the metadata operand regardless of kind.
    #[must_use]
    pub fn metadata_ref(&self) -> Option<Token> {
        match self {
            Instruction::Invoke(token)
            | Instruction::FieldAccess(token)
            | Instruction::TypeRef(token) => Some(*token),
            Instruction::Opaque => None,
        }
    }
}

/// A method declared by a class: its method-id token, access flags, and body.
#[derive(Debug, Clone)]
pub struct DexMethod {
    token: Token,
    access: MethodAccessFlags,
    code: Vec<Instruction>,
}

impl DexMethod {
    /// Creates a method from its token, flags, and body.
    #[must_use]
    pub fn new(token: Token, access: MethodAccessFlags, code: Vec<Instruction>) -> Self {
        Self {
            token,
            access,
            code,
        }
    }

    /// Creates a bodyless method (abstract or native).
    #[must_use]
    pub fn abstract_method(token: Token, access: MethodAccessFlags) -> Self {
        Self::new(token, access, Vec::new())
    }

    /// The method-id token.
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// The method's access flags.
    #[must_use]
    pub fn access_flags(&self) -> MethodAccessFlags {
        self.access
    }

    /// Returns true if the method is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access.is_static()
    }

    /// The method body.
    #[must_use]
    pub fn code(&self) -> &[Instruction] {
        &self.code
    }
}

/// A class declared in one input container.
///
/// Exposes the surfaces the pass reads: the canonical name, the type token,
/// access flags, the rename predicate, and reference gathering. Instances
/// are shared as [`ClassRc`]; identity for emit bookkeeping is the type
/// token (names are unique across the input).
#[derive(Debug)]
pub struct DexClass {
    type_token: Token,
    name: Arc<str>,
    access: ClassAccessFlags,
    superclass: Option<Token>,
    interfaces: Vec<Token>,
    static_fields: Vec<Token>,
    instance_fields: Vec<Token>,
    direct_methods: Vec<DexMethod>,
    virtual_methods: Vec<DexMethod>,
    pinned: bool,
}

impl DexClass {
    /// The canonical class name.
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// The class's type token.
    #[must_use]
    pub fn type_token(&self) -> Token {
        self.type_token
    }

    /// The class's access flags.
    #[must_use]
    pub fn access_flags(&self) -> ClassAccessFlags {
        self.access
    }

    /// Returns true if the class is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.access.is_interface()
    }

    /// Returns false when an external contract (reflective or native
    /// callers, keep rules) forbids moving or renaming the class.
    ///
    /// The pruner treats non-renameable classes as always reachable.
    #[must_use]
    pub fn can_rename(&self) -> bool {
        !self.pinned
    }

    /// The superclass type token, absent only for the root object type.
    #[must_use]
    pub fn superclass(&self) -> Option<Token> {
        self.superclass
    }

    /// Implemented interface type tokens.
    #[must_use]
    pub fn interfaces(&self) -> &[Token] {
        &self.interfaces
    }

    /// Declared static field tokens.
    #[must_use]
    pub fn static_fields(&self) -> &[Token] {
        &self.static_fields
    }

    /// Declared instance field tokens.
    #[must_use]
    pub fn instance_fields(&self) -> &[Token] {
        &self.instance_fields
    }

    /// Declared direct (constructor, private, static) methods.
    #[must_use]
    pub fn direct_methods(&self) -> &[DexMethod] {
        &self.direct_methods
    }

    /// Declared virtual methods.
    #[must_use]
    pub fn virtual_methods(&self) -> &[DexMethod] {
        &self.virtual_methods
    }

    /// All declared methods, direct then virtual.
    pub fn methods(&self) -> impl Iterator<Item = &DexMethod> {
        self.direct_methods.iter().chain(self.virtual_methods.iter())
    }

    /// Enumerates the method references this class contributes to a
    /// container: its declared methods plus every invocation operand in any
    /// body.
    ///
    /// Duplicates are allowed; consumers union the result into a set. The
    /// enumeration is deterministic for a fixed class.
    #[must_use]
    pub fn gather_methods(&self) -> Vec<Token> {
        let mut refs = Vec::new();
        for method in self.methods() {
            refs.push(method.token());
            for inst in method.code() {
                if let Some(target) = inst.method_ref() {
                    refs.push(target);
                }
            }
        }
        refs
    }

    /// Enumerates the field references this class contributes: declared
    /// fields plus every field-access operand in any body.
    #[must_use]
    pub fn gather_fields(&self) -> Vec<Token> {
        let mut refs = Vec::new();
        refs.extend_from_slice(&self.static_fields);
        refs.extend_from_slice(&self.instance_fields);
        for method in self.methods() {
            for inst in method.code() {
                if let Some(target) = inst.field_ref() {
                    refs.push(target);
                }
            }
        }
        refs
    }

    /// Enumerates the type references this class contains: superclass,
    /// interfaces, and every type operand in any body.
    #[must_use]
    pub fn gather_types(&self) -> Vec<Token> {
        let mut refs = Vec::new();
        if let Some(superclass) = self.superclass {
            refs.push(superclass);
        }
        refs.extend_from_slice(&self.interfaces);
        for method in self.methods() {
            for inst in method.code() {
                if let Some(target) = inst.type_ref() {
                    refs.push(target);
                }
            }
        }
        refs
    }
}

/// Builder for [`DexClass`] handles.
///
/// Used by tests and fixtures to model input classes, and by the pass itself
/// to materialize canary classes (a public abstract interface extending the
/// root object type).
///
/// # Example
///
/// ```rust
/// use dexpack::metadata::class::ClassBuilder;
/// use dexpack::metadata::flags::ClassAccessFlags;
/// use dexpack::metadata::pool::RefPool;
///
/// let mut pool = RefPool::new();
/// let object = pool.intern_type("java/lang/Object");
/// let ty = pool.intern_type("com/app/Main");
///
/// let class = ClassBuilder::new(ty, "com/app/Main")
///     .access(ClassAccessFlags::PUBLIC | ClassAccessFlags::FINAL)
///     .superclass(object)
///     .build();
/// assert_eq!(class.name().as_ref(), "com/app/Main");
/// ```
#[derive(Debug)]
pub struct ClassBuilder {
    class: DexClass,
}

impl ClassBuilder {
    /// Starts a class with its type token and canonical name.
    #[must_use]
    pub fn new(type_token: Token, name: &str) -> Self {
        Self {
            class: DexClass {
                type_token,
                name: Arc::from(name),
                access: ClassAccessFlags::PUBLIC,
                superclass: None,
                interfaces: Vec::new(),
                static_fields: Vec::new(),
                instance_fields: Vec::new(),
                direct_methods: Vec::new(),
                virtual_methods: Vec::new(),
                pinned: false,
            },
        }
    }

    /// Sets the access flags.
    #[must_use]
    pub fn access(mut self, access: ClassAccessFlags) -> Self {
        self.class.access = access;
        self
    }

    /// Sets the superclass type token.
    #[must_use]
    pub fn superclass(mut self, superclass: Token) -> Self {
        self.class.superclass = Some(superclass);
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn interface(mut self, interface: Token) -> Self {
        self.class.interfaces.push(interface);
        self
    }

    /// Marks the class as pinned by an external contract (`can_rename`
    /// becomes false).
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.class.pinned = true;
        self
    }

    /// Adds a declared static field.
    #[must_use]
    pub fn static_field(mut self, field: Token) -> Self {
        self.class.static_fields.push(field);
        self
    }

    /// Adds a declared instance field.
    #[must_use]
    pub fn instance_field(mut self, field: Token) -> Self {
        self.class.instance_fields.push(field);
        self
    }

    /// Adds a direct method.
    #[must_use]
    pub fn direct_method(mut self, method: DexMethod) -> Self {
        self.class.direct_methods.push(method);
        self
    }

    /// Adds a virtual method.
    #[must_use]
    pub fn virtual_method(mut self, method: DexMethod) -> Self {
        self.class.virtual_methods.push(method);
        self
    }

    /// Finishes the class and wraps it in a shared handle.
    #[must_use]
    pub fn build(self) -> ClassRc {
        Arc::new(self.class)
    }
}
