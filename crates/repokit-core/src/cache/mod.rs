//! Process-wide metadata cache.
//!
//! Four parallel indices per record type (field info, getters, setters,
//! annotations), populated on first registration and immutable afterwards.
//! Registration is serialized per type; lookups only take shared locks.

mod accessor;
mod slot;


pub use accessor::{Getter, Setter};
pub use tokio_util::sync::CancellationToken;

use crate::{
    error::RepoError,
    model::{Annotations, Record},
    obs::{CacheCounters, CacheStats},
    value::ScalarKind,
};
use parking_lot::RwLock;
use slot::{TypeEntry, TypeSlot};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

#[cfg(test)]
thread_local! {
    // Cancelled while the guarded section still holds the type's lock.
    static CANCEL_INSIDE_SECTION: std::cell::RefCell<Option<CancellationToken>> =
        const { std::cell::RefCell::new(None) };
}

///
/// CacheIndex
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CacheIndex {
    Fields,
    Getters,
    Setters,
    Annotations,
}

impl CacheIndex {
    pub const ALL: [Self; 4] = [
        Self::Fields,
        Self::Getters,
        Self::Setters,
        Self::Annotations,
    ];
}

///
/// FieldInfo
///
/// Descriptive record for one eligible field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: ScalarKind,
    pub nullable: bool,
    /// Declaration position in the record's descriptor table.
    pub position: usize,
}

///
/// FieldDescriptor
///
/// Field info plus whatever accessors and annotations are registered for it.
///

pub struct FieldDescriptor<R> {
    pub info: Arc<FieldInfo>,
    pub getter: Option<Getter<R>>,
    pub setter: Option<Setter<R>>,
    pub annotations: Option<Arc<Annotations>>,
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            info: Arc::clone(&self.info),
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("info", &self.info)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("annotations", &self.annotations)
            .finish()
    }
}

///
/// MetadataCache
///

#[derive(Default)]
pub struct MetadataCache {
    slots: RwLock<HashMap<&'static str, Arc<TypeSlot>>>,
    stats: CacheCounters,
}

impl MetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared process-wide instance.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();

        GLOBAL.get_or_init(Self::new)
    }

    ///
    /// REGISTRATION
    ///

    /// Populate all four indices for `R`.
    pub fn register<R: Record>(&self, cancel: &CancellationToken) -> Result<(), RepoError> {
        self.populate::<R>(&CacheIndex::ALL, cancel)
    }

    /// Populate the field, getter and setter indices for `R` in one section.
    pub fn register_field_accessors<R: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), RepoError> {
        self.populate::<R>(
            &[CacheIndex::Fields, CacheIndex::Getters, CacheIndex::Setters],
            cancel,
        )
    }

    pub fn register_fields<R: Record>(&self, cancel: &CancellationToken) -> Result<(), RepoError> {
        self.populate::<R>(&[CacheIndex::Fields], cancel)
    }

    pub fn register_getters<R: Record>(&self, cancel: &CancellationToken) -> Result<(), RepoError> {
        self.populate::<R>(&[CacheIndex::Getters], cancel)
    }

    pub fn register_setters<R: Record>(&self, cancel: &CancellationToken) -> Result<(), RepoError> {
        self.populate::<R>(&[CacheIndex::Setters], cancel)
    }

    pub fn register_annotations<R: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), RepoError> {
        self.populate::<R>(&[CacheIndex::Annotations], cancel)
    }

    // Check-then-populate under the type's exclusive lock. Cancellation is
    // honored before the section; a cancel observed after it reports the
    // work as committed.
    fn populate<R: Record>(
        &self,
        indices: &[CacheIndex],
        cancel: &CancellationToken,
    ) -> Result<(), RepoError> {
        let model = R::MODEL;

        Self::check_cancel(cancel)?;
        if model.fields.is_empty() {
            return Err(RepoError::InvalidArgument(format!(
                "record '{}' declares no fields",
                model.name
            )));
        }
        if !model.cacheable {
            tracing::trace!(record = model.path, "record opted out of metadata caching");
            return Ok(());
        }

        let slot = self.slot_or_insert(model.path);
        let mut entry = slot.entry.write();
        Self::check_cancel(cancel)?;

        let mut populated = 0_u64;
        for index in indices {
            if entry.populate::<R>(*index) {
                populated += 1;
            }
        }
        #[cfg(test)]
        CANCEL_INSIDE_SECTION.with_borrow(|token| {
            if let Some(token) = token {
                token.cancel();
            }
        });
        drop(entry);

        if populated > 0 {
            self.stats.record_registrations(populated);
            tracing::debug!(
                record = model.path,
                indices = ?indices,
                populated,
                "registered record metadata"
            );
        }

        if cancel.is_cancelled() {
            return Err(RepoError::Cancelled { committed: true });
        }

        Ok(())
    }

    fn slot_or_insert(&self, path: &'static str) -> Arc<TypeSlot> {
        if let Some(slot) = self.slots.read().get(path) {
            return Arc::clone(slot);
        }

        Arc::clone(self.slots.write().entry(path).or_default())
    }

    fn slot(&self, path: &str) -> Option<Arc<TypeSlot>> {
        self.slots.read().get(path).cloned()
    }

    ///
    /// LOOKUP
    ///

    /// Field info by type path and field name.
    pub fn lookup_field_info(
        &self,
        type_path: &str,
        field: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<FieldInfo>, RepoError> {
        Self::check_cancel(cancel)?;

        let found = self.with_entry(type_path, CacheIndex::Fields, |entry| {
            entry.field(field).cloned()
        });

        self.resolve(type_path, field, found)
    }

    /// Field info, accessors, and annotations for one field of `R`.
    pub fn lookup_field_descriptor<R: Record>(
        &self,
        field: &str,
        cancel: &CancellationToken,
    ) -> Result<FieldDescriptor<R>, RepoError> {
        Self::check_cancel(cancel)?;

        let path = R::MODEL.path;
        let found = self.with_entry(path, CacheIndex::Fields, |entry| {
            entry.field(field).map(|info| FieldDescriptor {
                info: Arc::clone(info),
                getter: entry.getter::<R>(field),
                setter: entry.setter::<R>(field),
                annotations: entry.annotations(field).cloned(),
            })
        });

        self.resolve(path, field, found)
    }

    pub fn lookup_getter<R: Record>(
        &self,
        field: &str,
        cancel: &CancellationToken,
    ) -> Result<Getter<R>, RepoError> {
        Self::check_cancel(cancel)?;

        let path = R::MODEL.path;
        let found = self.with_entry(path, CacheIndex::Getters, |entry| entry.getter::<R>(field));

        self.resolve(path, field, found)
    }

    pub fn lookup_setter<R: Record>(
        &self,
        field: &str,
        cancel: &CancellationToken,
    ) -> Result<Setter<R>, RepoError> {
        Self::check_cancel(cancel)?;

        let path = R::MODEL.path;
        let found = self.with_entry(path, CacheIndex::Setters, |entry| entry.setter::<R>(field));

        self.resolve(path, field, found)
    }

    pub fn lookup_annotations<R: Record>(
        &self,
        field: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Annotations>, RepoError> {
        Self::check_cancel(cancel)?;

        let path = R::MODEL.path;
        let found = self.with_entry(path, CacheIndex::Annotations, |entry| {
            entry.annotations(field).cloned()
        });

        self.resolve(path, field, found)
    }

    /// Annotations for `name` on `R`, distinguishing an unregistered type
    /// (error) from a name with no annotation entry (`None`).
    pub(crate) fn find_annotations<R: Record>(
        &self,
        name: &str,
    ) -> Result<Option<Arc<Annotations>>, RepoError> {
        let path = R::MODEL.path;

        match self.with_entry(path, CacheIndex::Annotations, |entry| {
            entry.annotations(name).cloned()
        }) {
            Some(Ok(found)) => {
                self.stats.record_lookup(true);
                Ok(Some(found))
            }
            Some(Err(())) => {
                self.stats.record_lookup(false);
                Ok(None)
            }
            None => {
                self.stats.record_lookup(false);
                Err(RepoError::record_not_found(path))
            }
        }
    }

    /// Field info for every eligible field of `R`, in declaration order.
    pub fn fields<R: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Arc<FieldInfo>>, RepoError> {
        self.enumerate::<R, _>(cancel, |entry| entry.fields.clone())
    }

    /// All getters for `R` in declaration order.
    pub fn getters<R: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<(&'static str, Getter<R>)>, RepoError> {
        self.enumerate::<R, _>(cancel, |entry| {
            let names = entry.getters.as_ref()?;

            Some(
                names
                    .iter()
                    .filter_map(|(name, _)| Some((*name, entry.getter::<R>(name)?)))
                    .collect(),
            )
        })
    }

    /// All setters for `R` in declaration order.
    pub fn setters<R: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<(&'static str, Setter<R>)>, RepoError> {
        self.enumerate::<R, _>(cancel, |entry| {
            let names = entry.setters.as_ref()?;

            Some(
                names
                    .iter()
                    .filter_map(|(name, _)| Some((*name, entry.setter::<R>(name)?)))
                    .collect(),
            )
        })
    }

    ///
    /// INTROSPECTION
    ///

    /// True if any type has populated `index`.
    #[must_use]
    pub fn has_any(&self, index: CacheIndex) -> bool {
        self.slots
            .read()
            .values()
            .any(|slot| slot.entry.read().has(index))
    }

    #[must_use]
    pub fn is_registered<R: Record>(&self, index: CacheIndex) -> bool {
        self.slot(R::MODEL.path)
            .is_some_and(|slot| slot.entry.read().has(index))
    }

    /// Drop every cached entry. Types re-populate on next registration.
    pub fn reset(&self) {
        let mut slots = self.slots.write();
        let dropped = slots.len();
        slots.clear();
        drop(slots);

        self.stats.record_reset();
        tracing::debug!(dropped, "metadata cache reset");
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    ///
    /// HELPERS
    ///

    fn check_cancel(cancel: &CancellationToken) -> Result<(), RepoError> {
        if cancel.is_cancelled() {
            return Err(RepoError::Cancelled { committed: false });
        }

        Ok(())
    }

    // Whole-index read for `R`; `f` returns `None` when the index is missing.
    fn enumerate<R: Record, T>(
        &self,
        cancel: &CancellationToken,
        f: impl FnOnce(&TypeEntry) -> Option<T>,
    ) -> Result<T, RepoError> {
        Self::check_cancel(cancel)?;

        let path = R::MODEL.path;
        let found = self.slot(path).and_then(|slot| f(&slot.entry.read()));

        self.stats.record_lookup(found.is_some());
        found.ok_or_else(|| RepoError::record_not_found(path))
    }

    // Run `f` against the type's entry when `index` is populated.
    // Outer `None`: type or index missing. Inner `Err`: name missing.
    fn with_entry<T>(
        &self,
        path: &str,
        index: CacheIndex,
        f: impl FnOnce(&TypeEntry) -> Option<T>,
    ) -> Option<Result<T, ()>> {
        let slot = self.slot(path)?;
        let entry = slot.entry.read();

        entry.has(index).then(|| f(&entry).ok_or(()))
    }

    fn resolve<T>(
        &self,
        record: &str,
        field: &str,
        found: Option<Result<T, ()>>,
    ) -> Result<T, RepoError> {
        let hit = matches!(found, Some(Ok(_)));
        self.stats.record_lookup(hit);
        tracing::trace!(record, field, hit, "metadata lookup");

        match found {
            Some(Ok(value)) => Ok(value),
            Some(Err(())) => Err(RepoError::field_not_found(record, field)),
            None => Err(RepoError::record_not_found(record)),
        }
    }
}

impl fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCache")
            .field("types", &self.slots.read().len())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
