pub mod inventory;
pub mod site;

pub use inventory::*;
pub use site::*;
