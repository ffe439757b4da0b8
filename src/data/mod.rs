pub(crate) mod loader;

pub(crate) use loader::CityMap;
