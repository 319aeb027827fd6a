//! Nodes of the document outside of schemas.

mod example;
mod info;
mod message;
mod operation;
mod parameter;
mod path_item;
mod responses;
pub(crate) mod security_requirement;
mod server;
mod tag;

pub use self::example::{Example, ExampleValue};
pub use self::info::{Contact, Info, License};
pub use self::message::{RequestBody, Response};
pub use self::operation::Operation;
pub use self::parameter::{Header, Parameter, ParameterLocation};
pub use self::path_item::{Callback, HttpMethod, PathItem};
pub use self::responses::Responses;
pub use self::security_requirement::SecurityRequirement;
pub use self::server::{Server, ServerVariable};
pub use self::tag::{ExternalDocs, Tag};

/// Replaces the item sharing the key of `item`, or appends it.
pub(crate) fn upsert<T, K>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> K)
where
    K: PartialEq,
{
    let item_key = key(&item);
    match items.iter_mut().find(|existing| key(existing) == item_key) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
