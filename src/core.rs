mod bus;
mod feeder;

pub use self::{
    bus::{Bus, GeoPoint},
    feeder::{BuildError, Feeder, PopulateOptions},
};
