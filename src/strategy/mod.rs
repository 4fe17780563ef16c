pub mod bandwidth;
pub mod implementations;
pub mod traits;
