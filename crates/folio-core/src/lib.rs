pub mod config;
pub mod controller;
pub mod lang;
pub mod loader;
pub mod nav;
pub mod routes;

pub use config::{load_config, ContentConfig, FolioConfig, ProfileConfig, RelayConfig};
pub use controller::{PresentationController, PresentationDecision};
pub use lang::LanguageState;
pub use loader::{ViewLoader, ViewSource};
pub use nav::Navigator;
pub use routes::RouteTable;
