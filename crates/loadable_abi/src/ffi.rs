//! C-side bodies of the hooks emitted by [`export_builtin!`](crate::export_builtin).
//!
//! Every entry point converts its C arguments, runs the Rust side under
//! `catch_unwind` and flushes output before control returns to bash. A
//! panic never unwinds into the shell: it is reported on stderr and turned
//! into `EXECUTION_FAILURE` (invoke), a refused load (load) or nothing at
//! all (unload).

use std::any::Any;
use std::ffi::{c_char, c_int, CStr};
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::abi::{self, ExitStatus, WordList};
use crate::builtin::LoadableBuiltin;
use crate::config::LogConfig;
use crate::dispatch;
use crate::host::{BashHost, Host};
use crate::logging;
use crate::registration::Registration;

/// Body of `<name>_builtin`.
///
/// # Safety
///
/// `list` must be null or a valid bash word list.
pub unsafe fn invoke<B: LoadableBuiltin>(builtin: &B, list: *const WordList) -> c_int {
    let args = abi::word_list_to_args(list);
    let mut host = BashHost::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        dispatch::invoke(builtin, &mut host, &args)
    }));
    let status = outcome.unwrap_or_else(|payload| {
        report_panic(&mut host, builtin.registration(), "invocation", payload.as_ref());
        ExitStatus::Failure
    });
    host.flush();
    status.code()
}

/// Body of `<name>_builtin_load`; returns 1 to accept the load, 0 to refuse.
///
/// # Safety
///
/// `name` must be null or a valid C string.
pub unsafe fn load<B: LoadableBuiltin>(builtin: &B, name: *const c_char) -> c_int {
    let registration = builtin.registration();
    let name = hook_name(name, registration);
    let mut host = BashHost::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        bootstrap_logging(&mut host, registration);
        dispatch::load(builtin, &mut host, &name)
    }));
    let loaded = outcome.unwrap_or_else(|payload| {
        report_panic(&mut host, registration, "load", payload.as_ref());
        false
    });
    host.flush();
    c_int::from(loaded)
}

/// Body of `<name>_builtin_unload`.
///
/// # Safety
///
/// `name` must be null or a valid C string.
pub unsafe fn unload<B: LoadableBuiltin>(builtin: &B, name: *const c_char) {
    let registration = builtin.registration();
    let name = hook_name(name, registration);
    let mut host = BashHost::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        dispatch::unload(builtin, &mut host, &name)
    }));
    if let Err(payload) = outcome {
        report_panic(&mut host, registration, "unload", payload.as_ref());
    }
    host.flush();
}

/// Name bash passed to a lifecycle hook, falling back to the registered one.
unsafe fn hook_name(name: *const c_char, registration: &Registration) -> String {
    if name.is_null() {
        registration.name().into_owned()
    } else {
        CStr::from_ptr(name).to_string_lossy().into_owned()
    }
}

fn bootstrap_logging(host: &mut dyn Host, registration: &Registration) {
    let result = LogConfig::from_env(&registration.name()).and_then(|config| logging::init(&config));
    if let Err(err) = result {
        let _ = writeln!(host.stderr(), "{}: logging disabled: {err:#}", registration.name());
    }
}

fn report_panic(host: &mut dyn Host, registration: &Registration, stage: &str, payload: &(dyn Any + Send)) {
    let message = panic_message(payload);
    debug!(builtin = %registration.name(), stage, %message, "builtin panicked");
    let _ = writeln!(host.stderr(), "{}: internal error during {stage}: {message}", registration.name());
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
