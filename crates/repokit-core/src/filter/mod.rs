//! Filter predicate compiler.
//!
//! Turns a filter record into one predicate over a target record, driven by
//! the annotations the target declares for each filter field name.

mod op;
mod predicate;


pub use op::{CompareOp, MergeOp};
pub use predicate::Predicate;

use crate::{
    cache::{CancellationToken, MetadataCache},
    config::{RepoConfig, UnmappedFieldPolicy},
    error::RepoError,
    model::{AnnotationValue, Annotations, Record, annotation},
    value::Value,
};

///
/// FieldRule
///
/// Resolved comparison rule for one filter field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct FieldRule<'a> {
    compare: CompareOp,
    merge: MergeOp,
    target: &'a str,
}

impl<'a> FieldRule<'a> {
    // An empty map means every default applies; a non-empty map must carry
    // an explicit comparison operator.
    fn resolve(
        record: &str,
        field: &'a str,
        annotations: &'a Annotations,
    ) -> Result<Self, RepoError> {
        let missing = |name: &'static str| RepoError::MissingAnnotation {
            record: record.to_string(),
            field: field.to_string(),
            annotation: name,
        };

        let compare = match annotations.get(annotation::COMPARE) {
            Some(AnnotationValue::Compare(op)) => *op,
            None if annotations.is_empty() => CompareOp::default(),
            _ => return Err(missing(annotation::COMPARE)),
        };
        let merge = match annotations.get(annotation::MERGE) {
            Some(AnnotationValue::Merge(op)) => *op,
            None => MergeOp::default(),
            Some(_) => return Err(missing(annotation::MERGE)),
        };
        let target = match annotations.get(annotation::TARGET) {
            Some(AnnotationValue::Text(target)) => *target,
            None => field,
            Some(_) => return Err(missing(annotation::TARGET)),
        };

        Ok(Self {
            compare,
            merge,
            target,
        })
    }
}

///
/// FilterCompiler
///

#[derive(Clone, Copy, Debug)]
pub struct FilterCompiler<'a> {
    cache: &'a MetadataCache,
    unmapped: UnmappedFieldPolicy,
}

impl<'a> FilterCompiler<'a> {
    #[must_use]
    pub fn new(cache: &'a MetadataCache) -> Self {
        Self {
            cache,
            unmapped: UnmappedFieldPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_config(cache: &'a MetadataCache, config: &RepoConfig) -> Self {
        Self::new(cache).with_policy(config.filter.unmapped)
    }

    #[must_use]
    pub const fn with_policy(mut self, unmapped: UnmappedFieldPolicy) -> Self {
        self.unmapped = unmapped;
        self
    }

    /// Compile `filter` into a predicate over `R`.
    ///
    /// Returns `Ok(None)` when no filter field is set, or when an unmapped
    /// field aborts compilation under `UnmappedFieldPolicy::Abort`.
    pub fn compile<R, F>(
        &self,
        filter: &F,
        cancel: &CancellationToken,
    ) -> Result<Option<Predicate<R>>, RepoError>
    where
        R: Record,
        F: Record,
    {
        self.cache.register::<F>(cancel)?;
        self.cache.register::<R>(cancel)?;

        let target_path = R::MODEL.path;
        let mut acc: Option<Predicate<R>> = None;
        let mut pending_merge = MergeOp::default();

        for (name, getter) in self.cache.getters::<F>(cancel)? {
            let value = getter.get(filter);
            if value.is_unset() {
                tracing::trace!(filter = F::MODEL.path, field = name, "filter field unset");
                continue;
            }

            let Some(annotations) = self.cache.find_annotations::<R>(name)? else {
                tracing::warn!(
                    filter = F::MODEL.path,
                    record = target_path,
                    field = name,
                    policy = ?self.unmapped,
                    "filter field has no annotations on target record"
                );

                match self.unmapped {
                    UnmappedFieldPolicy::Abort => return Ok(None),
                    UnmappedFieldPolicy::Skip => continue,
                    UnmappedFieldPolicy::Reject => {
                        return Err(RepoError::UnmappedFilterField {
                            record: target_path.to_string(),
                            field: name.to_string(),
                        });
                    }
                }
            };

            let rule = FieldRule::resolve(target_path, name, &annotations)?;
            let predicate = self.field_predicate::<R>(&rule, value, cancel)?;

            acc = Some(match acc {
                Some(prev) => prev.merge(pending_merge, predicate),
                None => predicate,
            });
            pending_merge = rule.merge;
        }

        Ok(acc)
    }

    fn field_predicate<R: Record>(
        &self,
        rule: &FieldRule<'_>,
        expected: Value,
        cancel: &CancellationToken,
    ) -> Result<Predicate<R>, RepoError> {
        let descriptor = self
            .cache
            .lookup_field_descriptor::<R>(rule.target, cancel)?;

        let field_kind = descriptor.info.kind;
        let Some(value_kind) = expected.kind() else {
            return Err(RepoError::InvalidArgument(format!(
                "filter value for '{}' is null",
                rule.target
            )));
        };
        if !rule.compare.supports(field_kind, value_kind) {
            return Err(RepoError::UnsupportedComparison {
                field: rule.target.to_string(),
                op: rule.compare,
                kind: field_kind,
                value: value_kind,
            });
        }

        let Some(getter) = descriptor.getter else {
            return Err(RepoError::field_not_found(R::MODEL.path, rule.target));
        };
        let op = rule.compare;

        Ok(Predicate::new(move |record: &R| {
            op.eval(&getter.get(record), &expected)
        }))
    }
}
