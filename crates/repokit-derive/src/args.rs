use darling::{FromDeriveInput, FromField, FromMeta, ast::Data, util::Flag};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Generics, Ident, Type};

///
/// RecordArgs
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordArgs {
    pub ident: Ident,
    pub generics: Generics,
    pub data: Data<(), FieldArgs>,

    #[darling(default)]
    pub name: Option<String>,

    pub no_cache: Flag,

    #[darling(multiple, rename = "binding")]
    pub bindings: Vec<BindingArgs>,
}

///
/// FieldArgs
///

#[derive(Debug, FromField)]
#[darling(attributes(record), forward_attrs(filter))]
pub struct FieldArgs {
    pub ident: Option<Ident>,
    pub ty: Type,
    pub attrs: Vec<Attribute>,

    pub no_cache: Flag,

    /// Treat a user type as scalar; it must implement `FieldValue`.
    pub scalar: Flag,
}

impl FieldArgs {
    /// Parse the forwarded `#[filter(..)]` attribute, if present.
    pub fn filter(&self) -> darling::Result<Option<FilterArgs>> {
        let mut found = None;

        for attr in &self.attrs {
            if found.is_some() {
                return Err(darling::Error::custom("duplicate #[filter] attribute").with_span(attr));
            }
            found = Some(FilterArgs::from_meta(&attr.meta)?);
        }

        Ok(found)
    }
}

///
/// FilterArgs
///

#[derive(Debug, Default, FromMeta)]
pub struct FilterArgs {
    #[darling(default)]
    pub compare: Option<CompareArg>,

    #[darling(default)]
    pub merge: Option<MergeArg>,

    #[darling(default)]
    pub target: Option<String>,
}

impl FilterArgs {
    /// Annotation constructors; `compare` is always emitted.
    pub fn annotations(&self) -> TokenStream {
        let compare = self.compare.unwrap_or_default();
        let merge = self.merge.map(|merge| {
            quote!(::repokit::model::Annotation::merge(#merge),)
        });
        let target = self.target.as_ref().map(|target| {
            quote!(::repokit::model::Annotation::target(#target),)
        });

        quote! {
            &[
                ::repokit::model::Annotation::compare(#compare),
                #merge
                #target
            ]
        }
    }
}

///
/// BindingArgs
///

#[derive(Debug, FromMeta)]
pub struct BindingArgs {
    pub name: String,

    #[darling(default)]
    pub compare: Option<CompareArg>,

    #[darling(default)]
    pub merge: Option<MergeArg>,

    #[darling(default)]
    pub target: Option<String>,
}

impl BindingArgs {
    pub fn filter(&self) -> FilterArgs {
        FilterArgs {
            compare: self.compare,
            merge: self.merge,
            target: self.target.clone(),
        }
    }
}

///
/// CompareArg
///

#[derive(Clone, Copy, Debug, Default)]
pub enum CompareArg {
    #[default]
    Equal,
    Contains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl FromMeta for CompareArg {
    fn from_string(s: &str) -> darling::Result<Self> {
        match s {
            "eq" | "equal" => Ok(Self::Equal),
            "contains" => Ok(Self::Contains),
            "gt" | "greater_than" => Ok(Self::GreaterThan),
            "lt" | "less_than" => Ok(Self::LessThan),
            "gte" | "greater_than_or_equal" => Ok(Self::GreaterThanOrEqual),
            "lte" | "less_than_or_equal" => Ok(Self::LessThanOrEqual),
            _ => Err(darling::Error::unknown_value(s)),
        }
    }
}

impl ToTokens for CompareArg {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::Equal => quote!(Equal),
            Self::Contains => quote!(Contains),
            Self::GreaterThan => quote!(GreaterThan),
            Self::LessThan => quote!(LessThan),
            Self::GreaterThanOrEqual => quote!(GreaterThanOrEqual),
            Self::LessThanOrEqual => quote!(LessThanOrEqual),
        };

        tokens.extend(quote!(::repokit::filter::CompareOp::#variant));
    }
}

///
/// MergeArg
///

#[derive(Clone, Copy, Debug)]
pub enum MergeArg {
    And,
    Or,
}

impl FromMeta for MergeArg {
    fn from_string(s: &str) -> darling::Result<Self> {
        match s {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(darling::Error::unknown_value(s)),
        }
    }
}

impl ToTokens for MergeArg {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::And => quote!(And),
            Self::Or => quote!(Or),
        };

        tokens.extend(quote!(::repokit::filter::MergeOp::#variant));
    }
}
