pub(crate) mod alphabet;
pub(crate) mod cache;
pub(crate) mod normalize;
pub(crate) mod stats;
