use syn::{GenericArgument, PathArguments, Type};

// Last path segments recognized as scalar without `#[record(scalar)]`.
const SCALAR_IDENTS: [&str; 19] = [
    "bool",
    "char",
    "i8",
    "i16",
    "i32",
    "i64",
    "i128",
    "isize",
    "u8",
    "u16",
    "u32",
    "u64",
    "u128",
    "usize",
    "f32",
    "f64",
    "String",
    "NaiveDate",
    "NaiveDateTime",
];

///
/// FieldShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldShape {
    Scalar,
    Composite,
}

/// Syntactic classification; `Option<T>` is scalar when `T` is.
///
/// `DateTime` is only scalar in its `DateTime<Utc>` form; any other time
/// zone is an error here rather than a trait-bound failure in generated code.
pub fn classify_field(ty: &Type, forced_scalar: bool) -> darling::Result<FieldShape> {
    if forced_scalar {
        return Ok(FieldShape::Scalar);
    }

    let inner = option_inner(ty).unwrap_or(ty);
    if is_scalar(inner)? {
        Ok(FieldShape::Scalar)
    } else {
        Ok(FieldShape::Composite)
    }
}

fn is_scalar(ty: &Type) -> darling::Result<bool> {
    if is_path_ident(ty, "DateTime") {
        return if first_type_arg(ty).is_some_and(|tz| is_path_ident(tz, "Utc")) {
            Ok(true)
        } else {
            Err(darling::Error::custom(
                "DateTime fields must be DateTime<Utc>; use #[record(scalar)] with a custom FieldValue type for other time zones",
            )
            .with_span(ty))
        };
    }

    Ok(SCALAR_IDENTS
        .iter()
        .any(|ident| is_path_ident(ty, ident)))
}

fn option_inner(ty: &Type) -> Option<&Type> {
    if !is_path_ident(ty, "Option") {
        return None;
    }

    first_type_arg(ty)
}

fn first_type_arg(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}
