pub mod config;
pub mod messenger;
pub mod shared;

pub use config::ConfigView;
pub use messenger::MessengerView;
