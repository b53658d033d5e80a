pub(crate) mod closure;
pub(crate) mod store;
