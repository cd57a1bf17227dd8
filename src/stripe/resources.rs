//! Stripe resource registry.
//!
//! Request paths are assembled only from this fixed set of collection names
//! (plus literal identifiers appended via [`Stripe::id`](super::Stripe::id)).
//! Anything else is rejected before a request is built.

/// Allow-listed resource names, matched case-sensitively.
pub const RESOURCES: &[&str] = &[
    "charges",
    "customers",
    "invoices",
    "invoiceitems",
    "tokens",
    "events",
    "plans",
    "coupons",
    "subscription",
    "incoming",
];

/// Whether `name` is an allow-listed resource
pub fn is_resource(name: &str) -> bool {
    RESOURCES.contains(&name)
}
