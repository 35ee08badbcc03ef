pub mod relay;
pub mod source;
pub mod store;

pub use relay::{FormRelay, RelayError};
pub use source::ContentSource;
pub use store::{ContentClient, StoreError};
