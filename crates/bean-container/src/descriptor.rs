//! # Type Descriptors
//!
//! The container never reflects over values. Every type it deals with is
//! described up front by a [`TypeDescriptor`]: either a concrete component type
//! or an interface (`dyn Trait`). Both are keyed by [`TypeId`], so a field of
//! type `Autowired<dyn Inventory>` and a binding declared as
//! `implement::<dyn Inventory>` meet on the same key.

use std::any::{type_name, TypeId};
use std::fmt;

/// Whether a descriptor names a concrete type or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Concrete,
    Interface,
}

/// Identity and display name of a type known to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describes a concrete (sized) type.
    pub fn concrete<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: TypeKind::Concrete,
        }
    }

    /// Describes an interface, normally a `dyn Trait`.
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: TypeKind::Interface,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Short name used as the default bean name.
    ///
    /// `app::model::UserDirectory` becomes `UserDirectory`,
    /// `app::Cache<u32>` becomes `Cache` and `dyn app::Inventory` becomes
    /// `Inventory`. Falls back to the full name when nothing is left.
    pub fn simple_name(&self) -> String {
        simple_name(self.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub(crate) fn simple_name(full: &str) -> String {
    let base = full.trim_start_matches("dyn ");
    let base = base.split('<').next().unwrap_or(base);
    let base = base.split(" + ").next().unwrap_or(base);
    match base.rsplit("::").next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => full.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Inventory {}
    struct Warehouse;
    struct Cache<T>(T);

    #[test]
    fn test_simple_name_strips_path() {
        assert_eq!(TypeDescriptor::concrete::<Warehouse>().simple_name(), "Warehouse");
    }

    #[test]
    fn test_simple_name_strips_generics() {
        assert_eq!(TypeDescriptor::concrete::<Cache<u32>>().simple_name(), "Cache");
    }

    #[test]
    fn test_simple_name_for_interface() {
        let descriptor = TypeDescriptor::interface::<dyn Inventory + Send + Sync>();
        assert!(descriptor.is_interface());
        assert_eq!(descriptor.simple_name(), "Inventory");
    }

    #[test]
    fn test_simple_name_of_primitive() {
        assert_eq!(simple_name("u32"), "u32");
        assert_eq!(simple_name(""), "");
    }

    #[test]
    fn test_same_type_same_id() {
        assert_eq!(
            TypeDescriptor::concrete::<Warehouse>().id(),
            TypeDescriptor::concrete::<Warehouse>().id()
        );
        assert_ne!(
            TypeDescriptor::concrete::<Warehouse>().id(),
            TypeDescriptor::concrete::<Cache<u8>>().id()
        );
    }
}
