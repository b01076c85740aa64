use crate::{
    cache::{CacheIndex, FieldInfo, Getter, Setter},
    model::{Annotations, Record},
};
use parking_lot::RwLock;
use std::{any::Any, sync::Arc};

// Typed accessor erased for storage; downcast back with the record type.
pub(super) type ErasedAccessor = Arc<dyn Any + Send + Sync>;

///
/// TypeSlot
///
/// Per-type synchronization point. Population holds the write lock for the
/// whole guarded section, so readers never observe a partial entry.
///

#[derive(Default)]
pub(super) struct TypeSlot {
    pub(super) entry: RwLock<TypeEntry>,
}

///
/// TypeEntry
///
/// The four parallel indices for one record type, each `None` until its
/// first registration. Vectors keep declaration order.
///

#[derive(Default)]
pub(super) struct TypeEntry {
    pub(super) fields: Option<Vec<Arc<FieldInfo>>>,
    pub(super) getters: Option<Vec<(&'static str, ErasedAccessor)>>,
    pub(super) setters: Option<Vec<(&'static str, ErasedAccessor)>>,
    pub(super) annotations: Option<Vec<(&'static str, Arc<Annotations>)>>,
}

impl TypeEntry {
    pub(super) const fn has(&self, index: CacheIndex) -> bool {
        match index {
            CacheIndex::Fields => self.fields.is_some(),
            CacheIndex::Getters => self.getters.is_some(),
            CacheIndex::Setters => self.setters.is_some(),
            CacheIndex::Annotations => self.annotations.is_some(),
        }
    }

    /// Populate one index from `R`'s descriptor table.
    /// Returns false when the index was already present.
    pub(super) fn populate<R: Record>(&mut self, index: CacheIndex) -> bool {
        if self.has(index) {
            return false;
        }

        match index {
            CacheIndex::Fields => self.fields = Some(build_fields::<R>()),
            CacheIndex::Getters => self.getters = Some(build_getters::<R>()),
            CacheIndex::Setters => self.setters = Some(build_setters::<R>()),
            CacheIndex::Annotations => self.annotations = Some(build_annotations::<R>()),
        }

        true
    }

    pub(super) fn field(&self, name: &str) -> Option<&Arc<FieldInfo>> {
        self.fields
            .as_ref()?
            .iter()
            .find(|field| field.name == name)
    }

    pub(super) fn getter<R: 'static>(&self, name: &str) -> Option<Getter<R>> {
        find_erased(self.getters.as_deref()?, name)?
            .downcast_ref::<Getter<R>>()
            .cloned()
    }

    pub(super) fn setter<R: 'static>(&self, name: &str) -> Option<Setter<R>> {
        find_erased(self.setters.as_deref()?, name)?
            .downcast_ref::<Setter<R>>()
            .cloned()
    }

    pub(super) fn annotations(&self, name: &str) -> Option<&Arc<Annotations>> {
        self.annotations
            .as_ref()?
            .iter()
            .find_map(|(key, annotations)| (*key == name).then_some(annotations))
    }
}

fn find_erased<'a>(
    accessors: &'a [(&'static str, ErasedAccessor)],
    name: &str,
) -> Option<&'a ErasedAccessor> {
    accessors
        .iter()
        .find_map(|(key, accessor)| (*key == name).then_some(accessor))
}

fn build_fields<R: Record>() -> Vec<Arc<FieldInfo>> {
    R::MODEL
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_eligible())
        .filter_map(|(position, field)| {
            let (kind, nullable) = match field.kind {
                crate::model::FieldKind::Scalar { kind, nullable } => (kind, nullable),
                crate::model::FieldKind::Composite => return None,
            };

            Some(Arc::new(FieldInfo {
                name: field.name,
                kind,
                nullable,
                position,
            }))
        })
        .collect()
}

fn build_getters<R: Record>() -> Vec<(&'static str, ErasedAccessor)> {
    R::MODEL
        .eligible_fields()
        .filter_map(|field| {
            let getter = Getter::compile(field)?;
            Some((field.name, Arc::new(getter) as ErasedAccessor))
        })
        .collect()
}

fn build_setters<R: Record>() -> Vec<(&'static str, ErasedAccessor)> {
    R::MODEL
        .eligible_fields()
        .filter_map(|field| {
            let setter = Setter::compile(field)?;
            Some((field.name, Arc::new(setter) as ErasedAccessor))
        })
        .collect()
}

// Field annotations first, then bindings; a binding that reuses a field
// name replaces that field's annotations.
fn build_annotations<R: Record>() -> Vec<(&'static str, Arc<Annotations>)> {
    let mut out: Vec<(&'static str, Arc<Annotations>)> = R::MODEL
        .eligible_fields()
        .map(|field| (field.name, Arc::new(Annotations::capture(field.annotations))))
        .collect();

    for binding in R::MODEL.bindings {
        let annotations = Arc::new(Annotations::capture(binding.annotations));
        match out.iter_mut().find(|(name, _)| *name == binding.name) {
            Some(slot) => slot.1 = annotations,
            None => out.push((binding.name, annotations)),
        }
    }

    out
}
