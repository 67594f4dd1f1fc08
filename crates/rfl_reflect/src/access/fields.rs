use alloc::string::String;
use core::any::Any;

use crate::Reflect;
use crate::info::{FieldFlags, FieldInfo, FieldSet};
use crate::registry::TypeReflection;
use crate::wire::{Reader, WireError, Writer};

// -----------------------------------------------------------------------------
// ReflectedFields

/// Read-only flattened view over an instance's fields.
///
/// Index `0..count()` walks the instance's own fields first, then its base
/// class' fields, and so on up the chain. The view is cheap to copy and is
/// invalidated with the instance borrow it holds.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{access::ReflectedFields, derive::Reflect, info::Class};
///
/// #[derive(Reflect, Default)]
/// struct Shape {
///     sides: u8,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Square {
///     #[reflect(base)]
///     shape: Shape,
///     size: f32,
/// }
///
/// let square = Square { shape: Shape { sides: 4 }, size: 1.5 };
/// let fields = ReflectedFields::new(&square, Square::field_set());
///
/// assert_eq!(fields.count(), 2);
/// let sides = fields.at(1);
/// assert_eq!(sides.class_name(), "Shape");
/// assert_eq!(sides.downcast_ref::<u8>(), Some(&4));
/// ```
#[derive(Clone, Copy)]
pub struct ReflectedFields<'a> {
    instance: &'a dyn Reflect,
    head: &'static FieldSet,
    count: usize,
}

impl<'a> ReflectedFields<'a> {
    /// View `instance`'s fields through `head`, the field set of its class.
    ///
    /// `instance` must be of the class `head` describes; a mismatch panics on
    /// first field access.
    pub fn new(instance: &'a dyn Reflect, head: &'static FieldSet) -> Self {
        Self {
            instance,
            head,
            count: head.total_len(),
        }
    }

    /// View over any class instance, `None` if `instance` is not a class.
    pub fn of(instance: &'a dyn Reflect) -> Option<Self> {
        instance
            .reflect_field_set()
            .map(|head| Self::new(instance, head))
    }

    /// Number of fields across the whole chain.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The field set of the instance's own class.
    #[inline]
    pub fn field_set(&self) -> &'static FieldSet {
        self.head
    }

    /// The field at flattened `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn at(&self, index: usize) -> Field<'a> {
        match self.get(index) {
            Some(field) => field,
            None => panic!(
                "field index {index} out of range for `{}` with {} field(s)",
                self.head.class_name(),
                self.count,
            ),
        }
    }

    /// The field at flattened `index`, `None` past the end.
    pub fn get(&self, index: usize) -> Option<Field<'a>> {
        let mut index = index;
        let mut set = self.head;
        let mut instance = self.instance;
        loop {
            if let Some(info) = set.field_at(index) {
                return Some(Field {
                    info,
                    class_name: set.class_name(),
                    value: info.get(instance),
                });
            }
            index -= set.len();
            let base = set.base()?;
            instance = base.upcast(instance);
            set = base.field_set();
        }
    }

    /// Iterate the flattened fields in order.
    pub fn iter(self) -> impl ExactSizeIterator<Item = Field<'a>> {
        (0..self.count).map(move |index| self.at(index))
    }
}

// -----------------------------------------------------------------------------
// ReflectedFieldsMut

/// Mutable flattened view over an instance's fields.
///
/// Exclusive: only one field can be borrowed at a time.
pub struct ReflectedFieldsMut<'a> {
    instance: &'a mut dyn Reflect,
    head: &'static FieldSet,
    count: usize,
}

impl<'a> ReflectedFieldsMut<'a> {
    /// See [`ReflectedFields::new`].
    pub fn new(instance: &'a mut dyn Reflect, head: &'static FieldSet) -> Self {
        Self {
            instance,
            head,
            count: head.total_len(),
        }
    }

    /// See [`ReflectedFields::of`].
    pub fn of(instance: &'a mut dyn Reflect) -> Option<Self> {
        let head = instance.reflect_field_set()?;
        Some(Self::new(instance, head))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn field_set(&self) -> &'static FieldSet {
        self.head
    }

    /// Read-only view of the same instance.
    #[inline]
    pub fn as_fields(&self) -> ReflectedFields<'_> {
        ReflectedFields {
            instance: &*self.instance,
            head: self.head,
            count: self.count,
        }
    }

    /// The field at flattened `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn at_mut(&mut self, index: usize) -> FieldMut<'_> {
        let count = self.count;
        let class_name = self.head.class_name();
        match self.get_mut(index) {
            Some(field) => field,
            None => panic!(
                "field index {index} out of range for `{class_name}` with {count} field(s)"
            ),
        }
    }

    /// The field at flattened `index`, `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        let mut index = index;
        let mut set = self.head;
        let mut instance: &mut dyn Reflect = &mut *self.instance;
        loop {
            if let Some(info) = set.field_at(index) {
                return Some(FieldMut {
                    info,
                    class_name: set.class_name(),
                    value: info.get_mut(instance),
                });
            }
            index -= set.len();
            let base = set.base()?;
            instance = base.upcast_mut(instance);
            set = base.field_set();
        }
    }

    /// Visit each field in flattened order, stopping at the first error.
    pub fn try_for_each<E>(
        &mut self,
        mut f: impl FnMut(FieldMut<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        for index in 0..self.count {
            f(self.at_mut(index))?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Field

/// One resolved field: its descriptor, declaring class and value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    info: &'static FieldInfo,
    class_name: &'static str,
    value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    #[inline]
    pub fn info(&self) -> &'static FieldInfo {
        self.info
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    /// Name of the class that declares this field.
    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    #[inline]
    pub fn flags(&self) -> FieldFlags {
        self.info.flags()
    }

    #[inline]
    pub fn value(&self) -> &'a dyn Reflect {
        self.value
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    /// Reflection of the declared type.
    #[inline]
    pub fn type_reflection(&self) -> &'static TypeReflection {
        self.info.type_reflection()
    }

    /// Whether the declared type is `T`.
    #[inline]
    pub fn is_type<T: Any>(&self) -> bool {
        self.info.type_is::<T>()
    }

    /// Declared type name.
    #[inline]
    pub fn static_type_name(&self) -> &'static str {
        self.info.static_type_name()
    }

    /// Type name of the current value; differs from the declared name only for
    /// polymorphic fields.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_reflection().type_name(self.value)
    }

    #[inline]
    pub fn is_polymorphic(&self) -> bool {
        self.info.is_polymorphic()
    }

    /// Encode the value with its declared type's codec.
    #[inline]
    pub fn serialize(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        self.type_reflection().serialize(self.value, writer)
    }

    /// Append the value's text form to `out`.
    #[inline]
    pub fn write_text(&self, out: &mut String, mask: FieldFlags) {
        self.type_reflection().write_text(self.value, out, mask);
    }

    pub fn to_text(&self, mask: FieldFlags) -> String {
        self.type_reflection().to_text(self.value, mask)
    }
}

impl core::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("class_name", &self.class_name)
            .field("name", &self.name())
            .field("type", &self.type_name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// FieldMut

/// Mutable counterpart of [`Field`].
pub struct FieldMut<'a> {
    info: &'static FieldInfo,
    class_name: &'static str,
    value: &'a mut dyn Reflect,
}

impl<'a> FieldMut<'a> {
    #[inline]
    pub fn info(&self) -> &'static FieldInfo {
        self.info
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    #[inline]
    pub fn flags(&self) -> FieldFlags {
        self.info.flags()
    }

    #[inline]
    pub fn value(&self) -> &dyn Reflect {
        &*self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.value
    }

    #[inline]
    pub fn into_value(self) -> &'a mut dyn Reflect {
        self.value
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    #[inline]
    pub fn type_reflection(&self) -> &'static TypeReflection {
        self.info.type_reflection()
    }

    #[inline]
    pub fn is_type<T: Any>(&self) -> bool {
        self.info.type_is::<T>()
    }

    #[inline]
    pub fn static_type_name(&self) -> &'static str {
        self.info.static_type_name()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_reflection().type_name(&*self.value)
    }

    #[inline]
    pub fn is_polymorphic(&self) -> bool {
        self.info.is_polymorphic()
    }

    /// Decode into the value in place with its declared type's codec.
    #[inline]
    pub fn deserialize(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        self.type_reflection().deserialize(&mut *self.value, reader)
    }

    /// Parse `text` into the value.
    #[inline]
    pub fn set_from_string(&mut self, text: &str) -> Result<(), WireError> {
        self.type_reflection().parse_text(&mut *self.value, text)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;
    use crate::derive::Reflect;
    use crate::info::Class;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Grandparent {
        a: i32,
        b: bool,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Parent {
        #[reflect(base)]
        base: Grandparent,
        c: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Child {
        #[reflect(base)]
        base: Parent,
        d: f64,
        e: Vec<u8>,
    }

    #[derive(Reflect, Default)]
    struct Empty {}

    fn sample() -> Child {
        Child {
            base: Parent {
                base: Grandparent { a: -7, b: true },
                c: "mid".to_string(),
            },
            d: 0.25,
            e: alloc::vec![1, 2],
        }
    }

    #[test]
    fn three_level_order() {
        let child = sample();
        let fields = ReflectedFields::new(&child, Child::field_set());
        assert_eq!(fields.count(), 5);

        let order: Vec<_> = fields
            .iter()
            .map(|field| (field.class_name(), field.name()))
            .collect();
        assert_eq!(
            order,
            [
                ("Child", "d"),
                ("Child", "e"),
                ("Parent", "c"),
                ("Grandparent", "a"),
                ("Grandparent", "b"),
            ]
        );

        assert_eq!(fields.at(3).downcast_ref::<i32>(), Some(&-7));
        assert_eq!(fields.at(2).downcast_ref::<String>().unwrap(), "mid");
        assert!(fields.get(5).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn at_past_end_panics() {
        let child = sample();
        ReflectedFields::new(&child, Child::field_set()).at(5);
    }

    #[test]
    fn empty_class() {
        let empty = Empty {};
        let fields = ReflectedFields::of(&empty).unwrap();
        assert_eq!(fields.count(), 0);
        assert!(fields.is_empty());
        assert_eq!(fields.iter().count(), 0);
        assert!(ReflectedFields::of(&5u8).is_none());
    }

    #[test]
    fn mutate_through_chain() {
        let mut child = sample();
        {
            let mut fields = ReflectedFieldsMut::of(&mut child).unwrap();
            *fields.at_mut(4).downcast_mut::<bool>().unwrap() = false;
            fields.at_mut(2).set_from_string("top").unwrap();
            fields.at_mut(0).set_from_string("4.5").unwrap();
            assert_eq!(fields.as_fields().at(0).to_text(FieldFlags::all()), "4.5");
        }
        assert!(!child.base.base.b);
        assert_eq!(child.base.c, "top");
        assert_eq!(child.d, 4.5);
    }

    #[test]
    fn field_type_queries() {
        let child = sample();
        let fields = ReflectedFields::of(&child).unwrap();
        let e = fields.at(1);
        assert!(e.is_type::<Vec<u8>>());
        assert!(!e.is_type::<Vec<i8>>());
        assert_eq!(e.static_type_name(), "Vec<u8>");
        assert_eq!(e.type_name(), "Vec<u8>");
        assert!(!e.is_polymorphic());
        assert_eq!(e.flags(), FieldFlags::STATE);
    }
}
