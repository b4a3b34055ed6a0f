use crate::args::CallArgs;
use crate::config::TracerConfig;
use crate::error::{TraceError, TraceResult};
use crate::mask::MaskSet;
use crate::render::{render_named, render_positional, Rendering};
use crate::signature::Signature;
use log::debug;
use std::fmt::Display;
use std::sync::Arc;

pub const DEFAULT_TARGET: &str = "logtracer";

/// MDC key holding the name of the function being traced.
pub const FN_NAME_KEY: &str = "fn_name";

/// Emits one debug record per traced call, masking the configured parameter names.
///
/// ```
/// use logtracer::{CallArgs, Signature, Tracer};
///
/// let tracer = Tracer::new(["pw"]).with_target("my_app::auth");
/// let login = tracer
///     .trace(Signature::new("login").param("user").param("pw"), |args: CallArgs<&str>| {
///         args.positional().len()
///     })
///     .unwrap();
///
/// // logs `Executing function login with args=[Arnold, **********] and kwargs={}`
/// assert_eq!(2, login.call(CallArgs::new().arg("Arnold").arg("asd123")));
/// ```
#[derive(Debug, Clone)]
pub struct Tracer {
    target: String,
    masked: Arc<MaskSet>,
}

impl Default for Tracer {
    fn default() -> Self {
        Tracer::new(Vec::<String>::new())
    }
}

impl Tracer {
    pub fn new<I, S>(masked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Tracer {
            target: DEFAULT_TARGET.to_string(),
            masked: Arc::new(MaskSet::new(masked)),
        }
    }

    pub fn from_config(config: &TracerConfig) -> Self {
        let tracer = Tracer::new(config.masked_params().iter().cloned());
        match config.target() {
            Some(target) => tracer.with_target(target),
            None => tracer,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn masked(&self) -> &MaskSet {
        &self.masked
    }

    /// Validates `signature` and resolves which declared positions are masked.
    pub fn prepare(&self, signature: &Signature) -> TraceResult<CallSite> {
        signature.validate()?;

        Ok(CallSite {
            function: signature.name().to_string(),
            masked_positions: signature
                .positional_names()
                .map(|name| self.masked.contains(name))
                .collect(),
        })
    }

    /// Wraps `function` so that every call through the returned [`Traced`] is logged first.
    pub fn trace<F>(&self, signature: Signature, function: F) -> TraceResult<Traced<F>> {
        let site = self.prepare(&signature)?;
        Ok(Traced {
            tracer: self.clone(),
            signature,
            site,
            function,
        })
    }

    pub fn render<V: Display>(&self, site: &CallSite, args: &CallArgs<V>) -> TraceResult<Rendering> {
        let render_error = |_| TraceError::Render {
            function: site.function.clone(),
        };

        Ok(Rendering {
            args: render_positional(args.positional(), &site.masked_positions)
                .map_err(render_error)?,
            kwargs: render_named(args.named(), &self.masked).map_err(render_error)?,
        })
    }

    pub fn emit<V: Display>(&self, site: &CallSite, args: &CallArgs<V>) -> TraceResult<()> {
        let rendering = self.render(site, args)?;
        debug!(
            target: self.target.as_str(),
            "Executing function {} with {}", site.function, rendering
        );
        Ok(())
    }
}

/// A [`Signature`] resolved against one tracer's mask set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    function: String,
    masked_positions: Vec<bool>,
}

impl CallSite {
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn is_position_masked(&self, index: usize) -> bool {
        self.masked_positions.get(index).copied().unwrap_or(false)
    }
}

/// A function wrapped by [`Tracer::trace`].
#[derive(Debug, Clone)]
pub struct Traced<F> {
    tracer: Tracer,
    signature: Signature,
    site: CallSite,
    function: F,
}

impl<F> Traced<F> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn site(&self) -> &CallSite {
        &self.site
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Logs the call, then forwards the original `args` and returns the result untouched.
    pub fn try_call<V, R>(&self, args: CallArgs<V>) -> TraceResult<R>
    where
        V: Display,
        F: Fn(CallArgs<V>) -> R,
    {
        let _fn_name = log_mdc::insert_scoped(FN_NAME_KEY, self.site.function());
        self.tracer.emit(&self.site, &args)?;
        Ok((self.function)(args))
    }

    /// Like [`Traced::try_call`].
    ///
    /// # Panics
    ///
    /// Panics if an argument's `Display` implementation fails, the same way
    /// `ToString::to_string` does.
    pub fn call<V, R>(&self, args: CallArgs<V>) -> R
    where
        V: Display,
        F: Fn(CallArgs<V>) -> R,
    {
        self.try_call(args).unwrap_or_else(|e| panic!("{}", e))
    }
}
