pub mod backend;
pub mod config;
pub mod controller;
pub mod entries;
pub mod error;
pub mod facade;
pub mod session;

pub use backend::CompetitionBackend;
pub use config::{ClientConfig, Transport};
pub use controller::{
    Confirm, EditTarget, EmptyState, Level, ListController, Notification, ViewState,
};
pub use error::{ClientError, ErrorKind, Result};
pub use facade::QueryFacade;
pub use session::{Session, User};
