pub(crate) mod compositor;
pub(crate) mod layout;
pub(crate) mod params;
pub(crate) mod surface;
