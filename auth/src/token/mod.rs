pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::AccessTokenClaims;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenConfig;
pub use issuer::TokenIssuer;
