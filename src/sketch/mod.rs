pub(crate) mod app;
pub(crate) mod random;
pub(crate) mod runner;
pub(crate) mod scheduler;
