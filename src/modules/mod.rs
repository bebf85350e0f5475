pub mod clusters;
pub mod lessons;
pub mod packages;
pub mod roles;
pub mod units;
pub mod users;
