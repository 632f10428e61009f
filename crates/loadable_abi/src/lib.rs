//! Host ABI and glue for writing bash loadable builtins in Rust.
//!
//! A builtin implements [`LoadableBuiltin`], describes itself with a
//! `const` [`Registration`] and hands both to [`export_builtin!`], which
//! emits the `<name>_struct` record and the hooks bash looks up after
//! `enable -f`. Everything between the C entry points and the trait lives
//! here: word-list conversion, status mapping, panic containment, usage
//! rendering through bash's `builtin_usage`, and logging bootstrap.

pub mod abi;
pub mod builtin;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ffi;
pub mod host;
pub mod logging;
mod macros;
pub mod registration;
pub mod testing;

pub use abi::{BuiltinFlags, ExitStatus};
pub use builtin::LoadableBuiltin;
pub use error::{BuiltinError, BuiltinResult};
pub use host::{BashHost, Host};
pub use registration::Registration;
