pub mod overlap;
pub mod radial;
