use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{Class, FieldInfo};

// -----------------------------------------------------------------------------
// BaseClass

/// Link from a class to the base class it embeds.
///
/// `upcast` and `upcast_mut` take an instance of the derived class and return
/// the embedded base instance.
#[derive(Clone, Copy, Debug)]
pub struct BaseClass {
    field_set: fn() -> &'static FieldSet,
    upcast: fn(&dyn Reflect) -> &dyn Reflect,
    upcast_mut: fn(&mut dyn Reflect) -> &mut dyn Reflect,
}

impl BaseClass {
    #[inline]
    pub const fn new<B: Class>(
        upcast: fn(&dyn Reflect) -> &dyn Reflect,
        upcast_mut: fn(&mut dyn Reflect) -> &mut dyn Reflect,
    ) -> Self {
        Self {
            field_set: B::field_set,
            upcast,
            upcast_mut,
        }
    }

    #[inline]
    pub fn field_set(&self) -> &'static FieldSet {
        (self.field_set)()
    }

    #[inline]
    pub fn upcast<'a>(&self, derived: &'a dyn Reflect) -> &'a dyn Reflect {
        (self.upcast)(derived)
    }

    #[inline]
    pub fn upcast_mut<'a>(&self, derived: &'a mut dyn Reflect) -> &'a mut dyn Reflect {
        (self.upcast_mut)(derived)
    }
}

// -----------------------------------------------------------------------------
// FieldSet

/// The fields one class declares itself, in declaration order, plus an
/// optional link to its base class' set.
///
/// A derived class' flattened field order is its own fields first, then the
/// base class' flattened fields.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{derive::Reflect, info::Class};
///
/// #[derive(Reflect, Default)]
/// struct Base {
///     id: u32,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Derived {
///     #[reflect(base)]
///     base: Base,
///     label: String,
///     weight: f64,
/// }
///
/// let set = Derived::field_set();
/// assert_eq!(set.class_name(), "Derived");
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.total_len(), 3);
///
/// let names: Vec<_> = set.infos().map(|(class, info)| (class, info.name())).collect();
/// assert_eq!(names, [("Derived", "label"), ("Derived", "weight"), ("Base", "id")]);
/// ```
pub struct FieldSet {
    class_name: &'static str,
    fields: Box<[FieldInfo]>,
    base: Option<BaseClass>,
}

impl FieldSet {
    /// A class with the given own fields and no base class.
    pub fn new(class_name: &'static str, fields: &[FieldInfo]) -> Self {
        Self {
            class_name,
            fields: fields.into(),
            base: None,
        }
    }

    #[inline]
    pub fn with_base(mut self, base: BaseClass) -> Self {
        self.base = Some(base);
        self
    }

    #[inline]
    pub const fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Number of fields declared by this class itself.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fields declared by this class itself.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Look up an own field by name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|info| info.name() == name)
    }

    #[inline]
    pub fn base(&self) -> Option<&BaseClass> {
        self.base.as_ref()
    }

    /// The base class' field set.
    #[inline]
    pub fn base_field_set(&self) -> Option<&'static FieldSet> {
        self.base.as_ref().map(BaseClass::field_set)
    }

    /// This set, then each ancestor's set.
    #[inline]
    pub fn chain(&self) -> FieldSetChain<'_> {
        FieldSetChain { next: Some(self) }
    }

    /// Number of fields across the whole base chain.
    pub fn total_len(&self) -> usize {
        self.chain().map(FieldSet::len).sum()
    }

    /// Every field across the chain in flattened order, paired with the name of
    /// the declaring class.
    pub fn infos(&self) -> impl Iterator<Item = (&'static str, &FieldInfo)> {
        self.chain()
            .flat_map(|set| set.fields.iter().map(move |info| (set.class_name, info)))
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSet")
            .field("class_name", &self.class_name)
            .field(
                "fields",
                &self.fields.iter().map(FieldInfo::name).collect::<Vec<_>>(),
            )
            .field("base", &self.base_field_set().map(FieldSet::class_name))
            .finish()
    }
}

/// Iterator over a [`FieldSet`] and its ancestors.
#[derive(Clone)]
pub struct FieldSetChain<'a> {
    next: Option<&'a FieldSet>,
}

impl<'a> Iterator for FieldSetChain<'a> {
    type Item = &'a FieldSet;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base_field_set();
        Some(current)
    }
}
