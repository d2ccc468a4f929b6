pub mod refresher;
pub mod snapshot;
pub mod view;
