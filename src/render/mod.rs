pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod label;
pub(crate) mod scene;
pub(crate) mod sprites;
