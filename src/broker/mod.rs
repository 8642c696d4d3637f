pub(crate) mod lifecycle;
pub(crate) mod opts;
pub(crate) mod scheduler;
