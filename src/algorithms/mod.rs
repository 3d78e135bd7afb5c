//! Algorithm declarations: typed identifiers, operation surfaces and the
//! parameter shapes engines consume.

pub mod aead;
pub mod digest;
pub mod hmac;

pub use aead::{Aead, AeadKey, AeadParameters, SymmetricKeyParameters, CHACHA20_POLY1305};
pub use digest::{Digest, SHA256, SHA512};
pub use hmac::{Hmac, HmacKey, HmacParameters, HMAC};
