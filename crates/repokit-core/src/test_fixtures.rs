use crate::{
    filter::MergeOp,
    model::{Annotation, FieldKind, FieldModel, GetFn, Record, RecordModel, SetFn},
    value::{ScalarKind, Value, ValueError},
};
use chrono::NaiveDate;
use repokit_derive::Record;

///
/// Person
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(binding(name = "min_age", target = "age", compare = "gte"))]
#[record(binding(name = "max_age", target = "age", compare = "lte"))]
pub(crate) struct Person {
    pub(crate) id: u64,

    #[filter(compare = "contains", merge = "or")]
    pub(crate) name: String,

    pub(crate) age: u32,

    #[filter(compare = "contains")]
    pub(crate) city: String,

    pub(crate) active: bool,
    pub(crate) born: NaiveDate,
    pub(crate) score: f64,
    pub(crate) tags: Vec<String>,

    #[record(no_cache)]
    pub(crate) secret: String,

    pub(crate) nickname: Option<String>,
}

impl Person {
    pub(crate) fn new(id: u64, name: &str, age: u32, city: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
            city: city.to_string(),
            active: true,
            born: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            ..Self::default()
        }
    }
}

///
/// PersonFilter
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct PersonFilter {
    pub(crate) name: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) min_age: Option<u32>,
    pub(crate) max_age: Option<u32>,
    pub(crate) active: Option<bool>,
}

///
/// LooseFilter
///
/// Carries a field with no annotation entry on `Person`.
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct LooseFilter {
    pub(crate) name: Option<String>,
    pub(crate) shoe_size: Option<u32>,
}

///
/// AuditTrail
///

#[derive(Clone, Debug, Default, Record)]
#[record(no_cache)]
pub(crate) struct AuditTrail {
    pub(crate) id: u64,
    pub(crate) action: String,
}

///
/// Empty
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Empty;

impl Record for Empty {
    const MODEL: &'static RecordModel<Self> = &RecordModel {
        name: "Empty",
        path: "fixtures::Empty",
        cacheable: true,
        fields: &[],
        bindings: &[],
    };
}

///
/// Legacy
///
/// Hand-written table whose `code` field declares a merge but no compare.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Legacy {
    pub(crate) code: String,
}

impl Legacy {
    fn get_code(record: &Self) -> Value {
        Value::Text(record.code.clone())
    }

    fn set_code(record: &mut Self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Text(code) => {
                record.code = code;
                Ok(())
            }
            other => Err(ValueError::mismatch("code", ScalarKind::Text, &other)),
        }
    }
}

impl Record for Legacy {
    const MODEL: &'static RecordModel<Self> = &RecordModel {
        name: "Legacy",
        path: "fixtures::Legacy",
        cacheable: true,
        fields: &[FieldModel {
            name: "code",
            kind: FieldKind::Scalar {
                kind: ScalarKind::Text,
                nullable: false,
            },
            cacheable: true,
            annotations: &[Annotation::merge(MergeOp::Or)],
            get: Some(Self::get_code as GetFn<Self>),
            set: Some(Self::set_code as SetFn<Self>),
        }],
        bindings: &[],
    };
}

///
/// LegacyFilter
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct LegacyFilter {
    pub(crate) code: Option<String>,
}

pub(crate) fn people() -> Vec<Person> {
    vec![
        Person::new(1, "Ada", 36, "London"),
        Person::new(2, "Brendan", 29, "Boston"),
        Person::new(3, "Carla", 41, "Lisbon"),
        Person::new(4, "Dmitri", 23, "Berlin"),
        Person::new(5, "Anika", 52, "Leeds"),
    ]
}
