use crate::{
    args::{FieldArgs, RecordArgs},
    ty::{FieldShape, classify_field},
};
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, ext::IdentExt};

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let args = RecordArgs::from_derive_input(input)?;

    if !args.generics.params.is_empty() {
        return Err(
            darling::Error::custom("Record cannot be derived for generic types")
                .with_span(&args.generics),
        );
    }

    let fields = args
        .data
        .as_ref()
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();
    if fields.is_empty() {
        return Err(
            darling::Error::custom("Record requires at least one named field")
                .with_span(&args.ident),
        );
    }

    validate_targets(&args, &fields)?;

    let ident = &args.ident;
    let name = args.name.clone().unwrap_or_else(|| ident.to_string());
    let cacheable = !args.no_cache.is_present();

    let mut accessors = Vec::new();
    let mut models = Vec::new();
    for field in &fields {
        let (accessor, model) = expand_field(field)?;
        accessors.push(accessor);
        models.push(model);
    }

    let bindings = args.bindings.iter().map(|binding| {
        let name = &binding.name;
        let annotations = binding.filter().annotations();

        quote!(::repokit::model::FilterBinding::new(#name, #annotations))
    });

    Ok(quote! {
        #[doc(hidden)]
        impl #ident {
            #(#accessors)*
        }

        impl ::repokit::model::Record for #ident {
            const MODEL: &'static ::repokit::model::RecordModel<Self> =
                &::repokit::model::RecordModel {
                    name: #name,
                    path: concat!(module_path!(), "::", stringify!(#ident)),
                    cacheable: #cacheable,
                    fields: &[#(#models),*],
                    bindings: &[#(#bindings),*],
                };
        }
    })
}

// Returns the hidden accessor fns and the FieldModel expression.
fn expand_field(field: &FieldArgs) -> darling::Result<(TokenStream, TokenStream)> {
    let Some(field_ident) = field.ident.as_ref() else {
        return Err(darling::Error::custom("Record requires named fields").with_span(&field.ty));
    };

    let ty = &field.ty;
    let name = field_ident.unraw().to_string();
    let cacheable = !field.no_cache.is_present();
    let annotations = match field.filter()? {
        Some(filter) => filter.annotations(),
        None => quote!(&[]),
    };

    if classify_field(ty, field.scalar.is_present())? == FieldShape::Composite {
        let model = quote! {
            ::repokit::model::FieldModel {
                name: #name,
                kind: ::repokit::model::FieldKind::Composite,
                cacheable: #cacheable,
                annotations: #annotations,
                get: None,
                set: None,
            }
        };

        return Ok((TokenStream::new(), model));
    }

    let get_fn = accessor_ident("get", field_ident);
    let set_fn = accessor_ident("set", field_ident);

    let accessors = quote! {
        fn #get_fn(record: &Self) -> ::repokit::value::Value {
            ::repokit::traits::FieldValue::to_value(&record.#field_ident)
        }

        fn #set_fn(
            record: &mut Self,
            value: ::repokit::value::Value,
        ) -> ::core::result::Result<(), ::repokit::value::ValueError> {
            match <#ty as ::repokit::traits::FieldValue>::from_value(&value) {
                Some(v) => {
                    record.#field_ident = v;
                    Ok(())
                }
                None => Err(::repokit::value::ValueError::mismatch(
                    #name,
                    <#ty as ::repokit::traits::FieldValue>::KIND,
                    &value,
                )),
            }
        }
    };

    let model = quote! {
        ::repokit::model::FieldModel {
            name: #name,
            kind: ::repokit::model::FieldKind::Scalar {
                kind: <#ty as ::repokit::traits::FieldValue>::KIND,
                nullable: <#ty as ::repokit::traits::FieldValue>::NULLABLE,
            },
            cacheable: #cacheable,
            annotations: #annotations,
            get: Some(Self::#get_fn as ::repokit::model::GetFn<Self>),
            set: Some(Self::#set_fn as ::repokit::model::SetFn<Self>),
        }
    };

    Ok((accessors, model))
}

// Every `target` must name a field declared on this struct.
fn validate_targets(args: &RecordArgs, fields: &[&FieldArgs]) -> darling::Result<()> {
    let declared = |target: &str| {
        fields
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| ident.unraw() == target))
    };

    let mut errors = darling::Error::accumulator();

    for field in fields {
        if let Some(filter) = errors.handle(field.filter()).flatten()
            && let Some(target) = &filter.target
            && !declared(target)
        {
            errors.push(
                darling::Error::custom(format!("filter target '{target}' is not a field"))
                    .with_span(&field.ty),
            );
        }
    }

    for binding in &args.bindings {
        if binding.name.trim().is_empty() {
            errors.push(darling::Error::custom("binding name cannot be empty").with_span(&args.ident));
        }
        if let Some(target) = &binding.target
            && !declared(target)
        {
            errors.push(
                darling::Error::custom(format!(
                    "binding '{}' targets unknown field '{target}'",
                    binding.name
                ))
                .with_span(&args.ident),
            );
        }
    }

    errors.finish()
}

fn accessor_ident(kind: &str, field: &Ident) -> Ident {
    format_ident!("__repokit_{}_{}", kind, field.unraw())
}
