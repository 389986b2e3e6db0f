//! # Bean Registry
//!
//! The tables behind the container. The registry itself is not synchronised;
//! [`Container`](crate::Container) owns it behind a single `RwLock`.
//!
//! - `beans`: every accepted bean, in registration order. Resolution and
//!   ambiguity tie-breaks follow this order.
//! - `by_type`: concrete type -> first bean of that type.
//! - `by_name`: declared name -> bean.
//! - `implementors`: interface -> beans declaring it, in registration order.
//!   This is the side index that turns interface scans into lookups.
//! - `controllers`: the legacy bulk list, filled by collaborators.
//! - `fatal_errors`: registration conflicts that block `start_up`.

use crate::component::{Binding, Bindings, Component};
use crate::descriptor::TypeDescriptor;
use crate::error::ContainerError;
use crate::lifecycle::BeanState;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// One registered instance with its implements-relation.
pub(crate) struct Bean {
    name: String,
    descriptor: TypeDescriptor,
    component: Arc<dyn Component>,
    bindings: Vec<Binding>,
    pub(crate) state: BeanState,
}

impl Bean {
    pub(crate) fn new<T: Component>(instance: Arc<T>, name: String) -> Self {
        let mut bindings = Bindings::new(Arc::clone(&instance));
        T::bindings(&mut bindings);
        let component: Arc<dyn Component> = instance;
        Self {
            name,
            descriptor: TypeDescriptor::concrete::<T>(),
            component,
            bindings: bindings.finish(),
            state: BeanState::Registered,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    pub(crate) fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// Erased `Arc<I>` for `id`, if this bean is or implements it.
    pub(crate) fn binding(&self, id: TypeId) -> Option<&(dyn Any + Send + Sync)> {
        self.bindings
            .iter()
            .find(|b| b.target.id() == id)
            .map(|b| b.handle.as_ref())
    }

    pub(crate) fn handle<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        self.binding(TypeId::of::<I>())?
            .downcast_ref::<Arc<I>>()
            .cloned()
    }

    fn interfaces(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.bindings
            .iter()
            .filter(|b| b.target.is_interface())
            .map(|b| b.target.id())
    }
}

/// Outcome of [`Registry::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// Accepted; `named` tells whether the name index now points to it.
    Accepted { index: usize, named: bool },
    /// A bean of the same concrete type already exists.
    DuplicateType,
}

#[derive(Default)]
pub(crate) struct Registry {
    beans: Vec<Bean>,
    by_type: HashMap<TypeId, usize>,
    by_name: HashMap<String, usize>,
    implementors: HashMap<TypeId, Vec<usize>>,
    controllers: Vec<Arc<dyn Any + Send + Sync>>,
    fatal_errors: Vec<ContainerError>,
}

impl Registry {
    /// Inserts a bean registered under its default name.
    ///
    /// Same concrete type twice: the first bean stays, the second is dropped.
    /// Default name already taken: the bean is kept but not name-indexed.
    pub(crate) fn insert(&mut self, bean: Bean) -> Inserted {
        let type_id = bean.descriptor.id();
        if self.by_type.contains_key(&type_id) {
            return Inserted::DuplicateType;
        }
        let named = !self.by_name.contains_key(bean.name());
        let index = self.push(bean);
        self.by_type.insert(type_id, index);
        if named {
            self.by_name.insert(self.beans[index].name.clone(), index);
        }
        Inserted::Accepted { index, named }
    }

    /// Inserts a bean under an explicit name the caller checked is free.
    ///
    /// The type index always points at the newest named bean of its type;
    /// an earlier bean of that type stays reachable through its own name.
    pub(crate) fn insert_named(&mut self, bean: Bean) -> usize {
        let type_id = bean.descriptor.id();
        let index = self.push(bean);
        self.by_type.insert(type_id, index);
        self.by_name.insert(self.beans[index].name.clone(), index);
        index
    }

    fn push(&mut self, bean: Bean) -> usize {
        let index = self.beans.len();
        for iface in bean.interfaces() {
            self.implementors.entry(iface).or_default().push(index);
        }
        self.beans.push(bean);
        index
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn contains_type(&self, id: TypeId) -> bool {
        self.by_type.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.beans.len()
    }

    pub(crate) fn bean(&self, index: usize) -> &Bean {
        &self.beans[index]
    }

    pub(crate) fn bean_mut(&mut self, index: usize) -> &mut Bean {
        &mut self.beans[index]
    }

    pub(crate) fn by_type(&self, id: TypeId) -> Option<&Bean> {
        self.by_type.get(&id).map(|&i| &self.beans[i])
    }

    pub(crate) fn by_name(&self, name: &str) -> Option<&Bean> {
        self.by_name.get(name).map(|&i| &self.beans[i])
    }

    /// Beans implementing the interface `id`, earliest registration first.
    pub(crate) fn implementors(&self, id: TypeId) -> impl Iterator<Item = &Bean> + '_ {
        self.implementors
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&i| &self.beans[i])
    }

    /// Names currently in the name index, in registration order.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut named: Vec<(usize, &String)> =
            self.by_name.iter().map(|(name, &i)| (i, name)).collect();
        named.sort_by_key(|(i, _)| *i);
        named.into_iter().map(|(_, name)| name.clone()).collect()
    }

    pub(crate) fn record_fatal(&mut self, error: ContainerError) {
        self.fatal_errors.push(error);
    }

    pub(crate) fn fatal_errors(&self) -> &[ContainerError] {
        &self.fatal_errors
    }

    pub(crate) fn track_controller(&mut self, controller: Arc<dyn Any + Send + Sync>) {
        self.controllers.push(controller);
    }

    pub(crate) fn controllers(&self) -> &[Arc<dyn Any + Send + Sync>] {
        &self.controllers
    }

    /// Drops every table and the fatal error log.
    pub(crate) fn clear(&mut self) {
        self.beans.clear();
        self.by_type.clear();
        self.by_name.clear();
        self.implementors.clear();
        self.controllers.clear();
        self.fatal_errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Speaker: Send + Sync {}

    struct Loud;
    impl Speaker for Loud {}
    impl Component for Loud {
        fn bindings(b: &mut Bindings<Self>) {
            b.implement::<dyn Speaker>(|this| this);
        }
    }

    struct Quiet;
    impl Speaker for Quiet {}
    impl Component for Quiet {
        fn bindings(b: &mut Bindings<Self>) {
            b.implement::<dyn Speaker>(|this| this);
        }
    }

    fn bean<T: Component>(value: T, name: &str) -> Bean {
        Bean::new(Arc::new(value), name.to_string())
    }

    #[test]
    fn test_first_registration_of_type_wins() {
        let mut registry = Registry::default();
        let first = Arc::new(Loud);
        assert!(matches!(
            registry.insert(Bean::new(first.clone(), "Loud".into())),
            Inserted::Accepted { index: 0, named: true }
        ));
        assert_eq!(registry.insert(bean(Loud, "Loud")), Inserted::DuplicateType);
        assert_eq!(registry.len(), 1);

        let stored = registry.by_type(TypeId::of::<Loud>()).unwrap();
        let stored = stored.handle::<Loud>().unwrap();
        assert!(Arc::ptr_eq(&stored, &first));
    }

    #[test]
    fn test_default_name_collision_keeps_bean_unnamed() {
        let mut registry = Registry::default();
        registry.insert(bean(Loud, "Speaker"));
        let outcome = registry.insert(bean(Quiet, "Speaker"));
        assert_eq!(outcome, Inserted::Accepted { index: 1, named: false });
        assert_eq!(registry.names(), vec!["Speaker".to_string()]);
        assert!(registry.contains_type(TypeId::of::<Quiet>()));
    }

    #[test]
    fn test_implementors_in_registration_order() {
        let mut registry = Registry::default();
        registry.insert(bean(Quiet, "Quiet"));
        registry.insert(bean(Loud, "Loud"));
        let names: Vec<&str> = registry
            .implementors(TypeId::of::<dyn Speaker>())
            .map(|b| b.name())
            .collect();
        assert_eq!(names, vec!["Quiet", "Loud"]);
    }

    #[test]
    fn test_named_insert_replaces_type_entry() {
        let mut registry = Registry::default();
        registry.insert(bean(Loud, "Loud"));
        registry.insert_named(bean(Loud, "SecondLoud"));
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.by_type(TypeId::of::<Loud>()).unwrap().name(),
            "SecondLoud"
        );
        assert_eq!(registry.by_name("Loud").unwrap().name(), "Loud");

        // A plain insert of the same type is still a duplicate.
        assert_eq!(registry.insert(bean(Loud, "Loud")), Inserted::DuplicateType);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut registry = Registry::default();
        registry.insert(bean(Loud, "Loud"));
        registry.track_controller(Arc::new(Quiet));
        registry.record_fatal(ContainerError::DuplicateName("Loud".into()));
        registry.clear();
        assert_eq!(registry.len(), 0);
        assert!(registry.names().is_empty());
        assert!(registry.controllers().is_empty());
        assert!(registry.fatal_errors().is_empty());
        assert_eq!(registry.implementors(TypeId::of::<dyn Speaker>()).count(), 0);
    }
}
