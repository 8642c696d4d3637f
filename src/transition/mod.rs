pub(crate) mod completion;
pub(crate) mod record;
pub(crate) mod registry;
