pub mod provider;
pub mod resolver;

pub use provider::{AnonymousIdentity, HostedIdentity, IdentityProvider};
pub use resolver::SessionResolver;
