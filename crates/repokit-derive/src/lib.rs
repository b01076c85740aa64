use proc_macro::TokenStream;

mod args;
mod record;
mod ty;

/// Derive a record descriptor table.
///
/// Struct attributes: `#[record(no_cache)]`, `#[record(name = "..")]`, and
/// repeated `#[record(binding(name = "..", target = "..", compare = "..", merge = ".."))]`.
///
/// Field attributes: `#[record(no_cache)]`, `#[record(scalar)]`, and
/// `#[filter(compare = "..", merge = "..", target = "..")]`.
#[proc_macro_derive(Record, attributes(record, filter))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}
