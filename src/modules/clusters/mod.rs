pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod view;
