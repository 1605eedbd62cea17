//! Authentication: token claim extraction, the persisted auth state, and the
//! credential providers `login` can delegate to.

pub mod claims;
pub mod provider;
pub mod state;

pub use claims::TokenClaims;
pub use provider::{
    effective_kind, provider_for, resolve_provider, CredentialProvider, LoginRequest,
};
pub use state::{AuthStore, SessionDetails};
