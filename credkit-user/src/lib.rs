//! Password credentials for credkit documents.
//!
//! Installing [`Credentials`] on an [`EntitySchema`](credkit_model::EntitySchema)
//! adds:
//! - persisted `hashed_password` and `salt` text fields (default `""`)
//! - a virtual `password` field: writing it validates the plaintext,
//!   regenerates the salt and stores the new digest; reading it returns the
//!   plaintext held in memory since the last write
//! - path validators for every other field named in the validation options
//!
//! [`Credentials::authenticate`] checks a candidate plaintext against the
//! stored digest.
//!
//! ```no_run
//! use credkit_model::{Document, EntitySchema};
//! use credkit_user::Credentials;
//! use std::sync::Arc;
//!
//! let credentials = Credentials::default();
//! let mut schema = EntitySchema::new("user");
//! schema.plugin(&credentials)?;
//! let schema = Arc::new(schema);
//!
//! let mut user = Document::new(schema, "alice");
//! user.set("password", "correct horse battery")?;
//! assert!(credentials.authenticate(&user, "correct horse battery"));
//! # Ok::<(), credkit_model::ModelError>(())
//! ```

mod controller;
mod error;
mod options;
mod plugin;

pub use controller::{Credentials, PasswordChange};
pub use error::{CredentialError, CredentialResult};
pub use options::{CredentialOptions, CredentialSettings};
pub use plugin::{
    HASHED_PASSWORD_FIELD, PASSWORD_FIELD, PasswordField, SALT_FIELD, TRANSIENT_PASSWORD_KEY,
    VIRTUAL_PATHS,
};
