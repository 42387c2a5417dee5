mod horizon;

pub use horizon::{HorizonData, HorizonPoint, HorizonResponse};
