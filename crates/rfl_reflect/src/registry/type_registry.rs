use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{HashMap, HashSet, TypeIdMap};
use crate::impls::ReflectBox;
use crate::info::Typed;
use crate::registry::TypeReflection;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// Registering a type stores its [`TypeReflection`] and, recursively, the
/// reflections of its field types and base class.
///
/// The [global](TypeRegistry::global) registry is what polymorphic decoding
/// consults to turn a type name back into an instance.
///
/// # Example
///
/// ```
/// use rfl_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// let reflection = registry.get_with_type_name("String").unwrap();
/// let value = reflection.create_default().unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "");
/// ```
pub struct TypeRegistry {
    reflections: TypeIdMap<&'static TypeReflection>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            reflections: TypeIdMap::new(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Create a type registry with default registrations for built-in types.
    ///
    /// - `()` `bool`
    /// - `i8 - i64` `isize`
    /// - `u8 - u64` `usize`
    /// - `f32` `f64`
    /// - `String`
    /// - `ReflectBox`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<ReflectBox>();
        registry
    }

    /// The process-wide registry.
    ///
    /// Initialized on first access with [`TypeRegistry::new`] plus every type
    /// submitted for [automatic registration](TypeRegistry::auto_register).
    pub fn global() -> &'static TypeRegistryArc {
        static GLOBAL: OnceLock<TypeRegistryArc> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut registry = TypeRegistry::new();
            registry.auto_register();
            TypeRegistryArc::new(registry)
        })
    }

    // The type must **not** already exist.
    fn add_new_name_index(&mut self, reflection: &'static TypeReflection) {
        let type_name = reflection.name();

        if self.ambiguous_names.contains(type_name) {
            log::warn!("type name `{type_name}` is ambiguous, lookups by name will fail");
            return;
        }

        if self.type_name_to_id.contains_key(type_name) {
            log::warn!("type name `{type_name}` is ambiguous, lookups by name will fail");
            self.type_name_to_id.remove(type_name);
            self.ambiguous_names.insert(type_name);
        } else {
            self.type_name_to_id.insert(type_name, reflection.ty_id());
        }
    }

    /// Insert a reflection without its dependencies.
    ///
    /// Returns `false` and does nothing if its type is already registered.
    pub fn insert(&mut self, reflection: &'static TypeReflection) -> bool {
        let inserted = self.reflections.try_insert(reflection.ty_id(), || reflection);
        if inserted {
            self.add_new_name_index(reflection);
        }
        inserted
    }

    /// Register a reflection and, recursively, its dependencies.
    pub fn register_reflection(&mut self, reflection: &'static TypeReflection) {
        if self.insert(reflection) {
            crate::debug_trace!("registered reflected type `{}`", reflection.name());
            reflection.register_dependencies(self);
        }
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// Field types and the base class of a derived class are registered too.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use rfl_reflect::{derive::Reflect, registry::TypeRegistry};
    /// #[derive(Reflect, Default)]
    /// struct Foo {
    ///   names: Vec<String>,
    ///   value: i32
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Foo>();
    ///
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// assert!(registry.contains(TypeId::of::<Vec<String>>()));
    /// assert!(registry.contains(TypeId::of::<String>()));
    /// assert!(registry.contains(TypeId::of::<i32>()));
    /// ```
    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.register_reflection(T::type_reflection());
    }

    /// Automatically registers all types annotated with `#[reflect(auto_register)]`
    /// or declared via `impl_auto_register!`.
    ///
    /// Returns `true` if automatic registration is supported on the current
    /// platform. Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature. When disabled, it does nothing and
    /// returns `false`.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::__register_types(self)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.reflections.contains(&type_id)
    }

    /// Returns the [`TypeReflection`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeReflection> {
        self.reflections.get(&type_id).copied()
    }

    /// Returns the [`TypeReflection`] of the type with the given name.
    ///
    /// If the name is ambiguous or unknown, returns `None`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeReflection> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given name matches multiple registered types.
    ///
    /// # Example
    /// ```
    /// # use rfl_reflect::registry::TypeRegistry;
    /// # mod foo {
    /// #     use rfl_reflect::derive::Reflect;
    /// #     #[derive(Reflect, Default)]
    /// #     pub struct MyType { pub a: i32 }
    /// # }
    /// # mod bar {
    /// #     use rfl_reflect::derive::Reflect;
    /// #     #[derive(Reflect, Default)]
    /// #     pub struct MyType { pub b: i32 }
    /// # }
    /// let mut registry = TypeRegistry::default();
    /// registry.register::<foo::MyType>();
    /// registry.register::<bar::MyType>();
    /// assert!(registry.is_ambiguous("MyType"));
    /// assert!(registry.get_with_type_name("MyType").is_none());
    /// ```
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    /// Returns an iterator over the registered reflections.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeReflection> + '_ {
        self.reflections.values().copied()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A synchronized wrapper around a [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let registry = self.read();
        let mut names: Vec<&str> = registry.iter().map(TypeReflection::name).collect();
        names.sort_unstable();
        f.debug_list().entries(names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect, Default)]
    #[reflect(type_name = "RegistryLeaf")]
    struct Leaf {
        value: u16,
    }

    #[derive(Reflect, Default)]
    #[reflect(type_name = "RegistryNode")]
    struct Node {
        #[reflect(base)]
        leaf: Leaf,
        children: Vec<[f32; 2]>,
    }

    #[test]
    fn register_walks_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Node>();

        assert!(registry.contains(TypeId::of::<Node>()));
        assert!(registry.contains(TypeId::of::<Leaf>()));
        assert!(registry.contains(TypeId::of::<u16>()));
        assert!(registry.contains(TypeId::of::<Vec<[f32; 2]>>()));
        assert!(registry.contains(TypeId::of::<[f32; 2]>()));
        assert!(registry.contains(TypeId::of::<f32>()));
        assert_eq!(registry.len(), 6);

        // Already present: no-op.
        registry.register::<Node>();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Node>();

        let reflection = registry.get_with_type_name("RegistryNode").unwrap();
        assert!(reflection.type_is::<Node>());
        assert!(reflection.has_default());
        assert!(registry.get_with_type_name("Vec<[f32; 2]>").is_some());
        assert!(registry.get_with_type_name("Missing").is_none());
    }

    #[derive(Reflect, Default)]
    #[reflect(type_name = "RegistryAuto", auto_register)]
    struct Auto {
        flag: bool,
    }

    crate::derive::impl_auto_register!(Vec<Vec<u16>>);

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_registered_types_reach_the_global_registry() {
        let registry = TypeRegistry::global().read();
        assert!(registry.contains(TypeId::of::<Auto>()));
        assert!(registry.get_with_type_name("RegistryAuto").is_some());
        assert!(registry.get_with_type_name("Vec<Vec<u16>>").is_some());
        assert!(registry.get_with_type_name("Vec<u16>").is_some());
    }

    #[test]
    fn new_covers_builtins() {
        let registry = TypeRegistry::new();
        for name in ["()", "bool", "u8", "i64", "f64", "String", "ReflectBox"] {
            assert!(registry.get_with_type_name(name).is_some(), "{name}");
        }
    }
}
