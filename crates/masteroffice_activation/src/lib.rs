//! Activation codes for technician onboarding
//!
//! An activation code is 9 characters from `[A-Z0-9]`, stored raw
//! (`ABCDEF123`) and shown to people grouped (`ABC-DEF-123`). The same
//! generator also produces device API keys.
//!
//! # Example
//!
//! ```rust
//! use masteroffice_activation::{codec, ActivationCode};
//!
//! let code = ActivationCode::generate();
//! assert!(codec::is_valid(code.as_str()));
//!
//! assert_eq!(codec::format("ABCDEFGHI"), "ABC-DEF-GHI");
//! assert_eq!(codec::unformat("abc-def-ghi"), "ABCDEFGHI");
//!
//! let typed = ActivationCode::parse("abc-def-ghi").unwrap();
//! assert_eq!(typed.as_str(), "ABCDEFGHI");
//! ```

pub mod code;
pub mod codec;

pub use code::{ActivationCode, CodeError};
pub use codec::{format, generate, is_valid, unformat};
