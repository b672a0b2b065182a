//! Authentication and authorization.
//!
//! [`resolver`] turns raw request headers into a [`Principal`]; [`gate`]
//! decides what that principal may do; [`device_gate`] is the separate
//! operational check on the calling device.

pub mod device_gate;
mod errors;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;
mod principal;
mod repository;
mod resolver;

pub use device_gate::DeviceGate;
pub use errors::AuthError;
pub use identity::{IdentityError, IdentityToolkitClient, TokenVerifier, VerifiedIdToken};
pub use jwt::{JwtCodec, JwtError, MobileClaims};
pub use password::{PasswordError, hash_password, verify_password};
pub use principal::*;
pub use resolver::{BearerAuthenticator, CredentialResolver};
