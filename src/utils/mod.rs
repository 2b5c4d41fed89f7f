pub mod display;
pub mod figure;
pub mod io;
pub mod plot;
