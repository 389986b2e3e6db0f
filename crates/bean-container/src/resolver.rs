//! # Injection Resolver
//!
//! Wires the tagged fields of one bean against a registry snapshot. Nothing in
//! here fails: every outcome is logged and a field that cannot be wired keeps
//! its current (normally empty) value.
//!
//! | Tag | Mode | On miss |
//! |---|---|---|
//! | `"true"` | mandatory, by type | `error!` |
//! | `"false"` | optional, by type | `info!` |
//! | anything else | by name | `error!` |
//!
//! By-type resolution depends on the field's target:
//!
//! - **interface**: the first implementor in registration order wins; more
//!   than one implementor logs a warning listing all of them.
//! - **concrete**: the type's simple name is looked up in the name index and
//!   the bean found there must be exactly that type.

use crate::autowired::InjectionPoint;
use crate::component::{FieldEntry, Fields};
use crate::registry::{Bean, Registry};
use tracing::{debug, error, info, warn};

/// How a tagged field is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringMode {
    MandatoryByType,
    OptionalByType,
    ByName(String),
}

impl WiringMode {
    /// Parses a wiring tag. `None` for an empty (untagged) value.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "" => None,
            "true" => Some(Self::MandatoryByType),
            "false" => Some(Self::OptionalByType),
            name => Some(Self::ByName(name.to_string())),
        }
    }
}

/// Field-level context carried into the log lines.
struct Site<'a> {
    bean: &'a str,
    field: &'static str,
    point: &'a dyn InjectionPoint,
}

/// Resolves every tagged field of the bean at `index`.
pub(crate) fn resolve_bean(registry: &Registry, index: usize) {
    let bean = registry.bean(index);
    let mut fields = Fields::new();
    bean.component().describe(&mut fields);

    for entry in fields.into_entries() {
        let FieldEntry::Wired { name, tag, point } = entry else {
            continue;
        };
        let Some(mode) = WiringMode::parse(tag) else {
            continue;
        };
        let site = Site {
            bean: bean.name(),
            field: name,
            point,
        };

        if !point.is_settable() {
            error!(
                bean = site.bean,
                field = site.field,
                tag,
                "Field carries a wiring tag but is not settable, skipping"
            );
            continue;
        }

        debug!(
            bean = site.bean,
            field = site.field,
            target = %point.target(),
            tag,
            "Resolving field"
        );

        match mode {
            WiringMode::MandatoryByType => by_type(registry, &site, true),
            WiringMode::OptionalByType => by_type(registry, &site, false),
            WiringMode::ByName(target) => by_name(registry, &site, &target),
        }
    }
}

fn by_type(registry: &Registry, site: &Site<'_>, mandatory: bool) {
    if site.point.target().is_interface() {
        by_interface(registry, site, mandatory);
    } else {
        by_type_name(registry, site, mandatory);
    }
}

fn by_interface(registry: &Registry, site: &Site<'_>, mandatory: bool) {
    let target = site.point.target();
    let candidates: Vec<&Bean> = registry.implementors(target.id()).collect();

    let Some(first) = candidates.first() else {
        if mandatory {
            error!(
                bean = site.bean,
                field = site.field,
                iface = %target,
                "No implementation found for mandatory interface field"
            );
        } else {
            info!(
                bean = site.bean,
                field = site.field,
                iface = %target,
                "No implementation found for optional interface field, leaving it empty"
            );
        }
        return;
    };

    if !assign(site, first) {
        return;
    }
    if candidates.len() > 1 {
        let impls: Vec<&str> = candidates.iter().map(|b| b.descriptor().name()).collect();
        warn!(
            bean = site.bean,
            field = site.field,
            iface = %target,
            chosen = %first.descriptor(),
            ?impls,
            "Interface has multiple implementations, injected the first registered"
        );
    } else {
        debug!(
            bean = site.bean,
            field = site.field,
            iface = %target,
            implementation = %first.descriptor(),
            "Injected interface field"
        );
    }
}

fn by_type_name(registry: &Registry, site: &Site<'_>, mandatory: bool) {
    let target = site.point.target();
    let type_name = target.simple_name();

    let Some(found) = registry.by_name(&type_name) else {
        if mandatory {
            error!(
                bean = site.bean,
                field = site.field,
                type_name = %type_name,
                "No bean registered under the field's type name"
            );
        } else {
            info!(
                bean = site.bean,
                field = site.field,
                type_name = %type_name,
                "No bean registered under the field's type name, leaving it empty"
            );
        }
        return;
    };

    if found.descriptor().id() == target.id() && assign(site, found) {
        debug!(
            bean = site.bean,
            field = site.field,
            type_name = %type_name,
            actual = %found.descriptor(),
            "Injected field by type name"
        );
    } else if mandatory {
        error!(
            bean = site.bean,
            field = site.field,
            expected = %target,
            found = %found.descriptor(),
            "Bean registered under the field's type name has a different type"
        );
    } else {
        info!(
            bean = site.bean,
            field = site.field,
            expected = %target,
            found = %found.descriptor(),
            "Bean registered under the field's type name has a different type, leaving it empty"
        );
    }
}

fn by_name(registry: &Registry, site: &Site<'_>, name: &str) {
    let Some(found) = registry.by_name(name) else {
        error!(
            bean = site.bean,
            field = site.field,
            name,
            "No bean registered under this name"
        );
        return;
    };

    // Compatible when the bean is the field's type or declares it as an interface.
    if found.binding(site.point.target().id()).is_some() && assign(site, found) {
        debug!(
            bean = site.bean,
            field = site.field,
            name,
            actual = %found.descriptor(),
            "Injected field by name"
        );
    } else {
        error!(
            bean = site.bean,
            field = site.field,
            name,
            expected = %site.point.target(),
            found = %found.descriptor(),
            "Bean registered under this name is not compatible with the field"
        );
    }
}

fn assign(site: &Site<'_>, candidate: &Bean) -> bool {
    let Some(handle) = candidate.binding(site.point.target().id()) else {
        error!(
            bean = site.bean,
            field = site.field,
            candidate = %candidate.descriptor(),
            "Candidate does not provide the field's type"
        );
        return false;
    };
    site.point.assign(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(WiringMode::parse(""), None);
        assert_eq!(WiringMode::parse("true"), Some(WiringMode::MandatoryByType));
        assert_eq!(WiringMode::parse("false"), Some(WiringMode::OptionalByType));
        assert_eq!(
            WiringMode::parse("AuditLog"),
            Some(WiringMode::ByName("AuditLog".into()))
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            WiringMode::parse("True"),
            Some(WiringMode::ByName("True".into()))
        );
    }
}
