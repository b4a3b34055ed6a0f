use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    ext::IdentExt, parse_macro_input, punctuated::Punctuated, spanned::Spanned, token::Comma,
    FnArg, ItemFn, Pat, PatType, Path,
};

macro_rules! macro_error {
    ($msg:literal) => {
        quote::quote! {
            compile_error!($msg);
        }
        .into()
    };

    ($msg:literal, $span:expr) => {
        quote::quote_spanned! { $span =>
            compile_error!($msg);
        }
        .into()
    };
}

/// Logs every call of the annotated function through a `logtracer::Tracer`.
///
/// The argument is a path to a `Tracer` reachable from a static, usually a
/// `once_cell::sync::Lazy<Tracer>`. Each typed parameter becomes a declared
/// positional parameter of the traced signature, so parameters named in the
/// tracer's mask set are rendered as `**********`. `self` receivers are not
/// rendered. Arguments are rendered with `Debug`.
///
/// ```ignore
/// static TRACER: Lazy<Tracer> = Lazy::new(|| Tracer::new(["pw"]));
///
/// #[trace_function(TRACER)]
/// fn login(user: &str, pw: &str) -> bool { .. }
/// ```
#[proc_macro_attribute]
pub fn trace_function(attr: TokenStream, input: TokenStream) -> TokenStream {
    if attr.is_empty() {
        return macro_error!("expected a path to a `Tracer`, e.g. #[trace_function(TRACER)]");
    }
    let tracer = parse_macro_input!(attr as Path);
    let fn_decl = parse_macro_input!(input as ItemFn);

    let params = match collect_params(&fn_decl.sig.inputs) {
        Ok(params) => params,
        Err(err) => return err.into(),
    };

    let fn_name = fn_decl.sig.ident.unraw().to_string();
    let param_names: Vec<String> = params.iter().map(|p| p.unraw().to_string()).collect();

    // The MDC is thread-local, so it can't follow an async body across awaits.
    let fn_name_guard = if fn_decl.sig.asyncness.is_some() {
        TokenStream2::new()
    } else {
        quote! {
            let __logtracer_fn_name =
                ::logtracer::log_mdc::insert_scoped(::logtracer::FN_NAME_KEY, #fn_name);
        }
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = fn_decl;
    let stmts = &block.stmts;

    quote! {
        #(#attrs)*
        #vis #sig {
            static __LOGTRACER_SITE: ::logtracer::once_cell::sync::Lazy<
                ::logtracer::TraceResult<::logtracer::CallSite>,
            > = ::logtracer::once_cell::sync::Lazy::new(|| {
                ::logtracer::Tracer::prepare(
                    &#tracer,
                    &::logtracer::Signature::new(#fn_name) #(.param(#param_names))*,
                )
            });
            #fn_name_guard
            ::logtracer::__private::trace_call(
                &#tracer,
                &__LOGTRACER_SITE,
                &::logtracer::CallArgs::<&dyn ::core::fmt::Display>::new()
                    #(.arg(&::logtracer::Debugged(&#params)))*,
            );
            #(#stmts)*
        }
    }
    .into()
}

fn collect_params(inputs: &Punctuated<FnArg, Comma>) -> Result<Vec<Ident>, TokenStream2> {
    let mut params = vec![];
    for arg in inputs {
        match arg {
            FnArg::Receiver(_) => {}
            FnArg::Typed(PatType { pat, .. }) => match &**pat {
                Pat::Ident(p) => params.push(p.ident.clone()),
                other => {
                    return Err(macro_error!(
                        "only parameters bound to a plain identifier can be traced",
                        other.span()
                    ));
                }
            },
        }
    }
    Ok(params)
}
