pub mod cookie;
pub mod gate;
pub mod identity;
pub mod jwt;

pub use identity::{Identity, IdentityClaim};
pub use jwt::{mint_access_token, verify_access_token, Claims, TokenError};
