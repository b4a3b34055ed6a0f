//! Debug-level call tracing that masks sensitive arguments by parameter name.
//!
//! A [`Tracer`] owns a set of parameter names to mask. Wrapping a function
//! with it makes every call emit exactly one debug record such as
//!
//! ```text
//! Executing function login with args=[Arnold, **********] and kwargs={username: pony}
//! ```
//!
//! before the function runs with its original, unmasked arguments.
//!
//! Rust can't enumerate parameter names at runtime, so the wrapped function's
//! parameters are declared with a [`Signature`]:
//!
//! ```
//! use logtracer::{CallArgs, Signature, Tracer};
//!
//! let tracer = Tracer::new(["password"]);
//! let login = tracer
//!     .trace(
//!         Signature::new("login")
//!             .param("username")
//!             .param("password")
//!             .var_positional("args")
//!             .var_keyword("kwargs"),
//!         |args: CallArgs<&str>| args.positional().len(),
//!     )
//!     .unwrap();
//!
//! let called_with = login.call(
//!     CallArgs::new()
//!         .arg("Arnold")
//!         .arg("Secret!")
//!         .arg("some")
//!         .kwarg("mykey1", "kwarg1"),
//! );
//! assert_eq!(3, called_with);
//! ```
//!
//! For plain Rust functions, the `trace_function` attribute derives the
//! signature at compile time. Arguments are rendered with `Debug`, so they
//! need to implement it.
//!
//! ```
//! use logtracer::{trace_function, Tracer};
//! use once_cell::sync::Lazy;
//!
//! static TRACER: Lazy<Tracer> = Lazy::new(|| Tracer::new(["pw"]));
//!
//! #[trace_function(TRACER)]
//! fn login(user: &str, pw: &str) -> bool {
//!     user.len() < pw.len()
//! }
//!
//! // logs `Executing function login with args=["Arnold", **********] and kwargs={}`
//! assert!(login("Arnold", "asd123456"));
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;

mod args;
mod mask;
mod render;
mod signature;
mod tracer;

pub use args::CallArgs;
pub use config::{LoggerDescriptor, TracerConfig};
pub use error::{ConfigError, ConfigResult, SignatureError, TraceError, TraceResult};
pub use mask::{MaskSet, SENTINEL};
pub use render::{Debugged, Rendering};
pub use signature::{Param, ParamKind, Signature};
pub use tracer::{CallSite, Traced, Tracer, DEFAULT_TARGET, FN_NAME_KEY};

pub use log_mdc;
pub use logtracer_impl::*;
pub use once_cell;

#[doc(hidden)]
pub mod __private {
    use crate::{CallArgs, CallSite, TraceResult, Tracer};
    use std::fmt::Display;

    /// Entry point of `#[trace_function]` expansions.
    pub fn trace_call(tracer: &Tracer, site: &TraceResult<CallSite>, args: &CallArgs<&dyn Display>) {
        let traced = site.as_ref().map_err(Clone::clone).and_then(|site| tracer.emit(site, args));
        if let Err(e) = traced {
            panic!("{}", e);
        }
    }
}
