pub(crate) mod builder;
pub(crate) mod def;
pub(crate) mod model;
