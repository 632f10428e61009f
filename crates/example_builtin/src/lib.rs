//! `example` builtin – starting point for new bash loadable builtins.
//!
//! ```text
//! $ cargo build -p example_builtin
//! $ bash
//! $ enable -f target/debug/libexample.so example
//! example builtin loading
//! $ example foo
//! this is just an example builtin
//! $ help example
//! $ enable -d example
//! example builtin unloading
//! ```
//!
//! To start a new builtin from this one, rename `example` everywhere in this
//! file: the registration strings, the type, and every symbol handed to
//! `export_builtin!` (bash derives `NAME_struct`, `NAME_builtin_load` and
//! `NAME_builtin_unload` from the name given to `enable`). Then replace the
//! body of `execute` with the real command.

use loadable_abi::{
    export_builtin, BuiltinError, BuiltinFlags, BuiltinResult, ExitStatus, Host, LoadableBuiltin,
    Registration,
};
use tracing::{debug, warn};

/// Registration record, exported to bash as `example_struct`.
pub const REGISTRATION: Registration = Registration {
    name: c"example",
    flags: BuiltinFlags::ENABLED,
    long_doc: &[
        c"TODO: write a short description of this example builtin",
        c"",
        c"TODO: write a longer, more detailed description and instructions",
    ],
    short_doc: c"example <cmd> ",
};

pub const INFO_MESSAGE: &str = "this is just an example builtin";

#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleBuiltin;

impl LoadableBuiltin for ExampleBuiltin {
    fn registration(&self) -> &'static Registration {
        &REGISTRATION
    }

    fn execute(&self, host: &mut dyn Host, args: &[String]) -> BuiltinResult<ExitStatus> {
        // Only the presence of <cmd> is checked; nothing else is parsed yet.
        if args.first().is_none() {
            return Err(BuiltinError::MissingArgument("<cmd>".into()));
        }

        writeln!(host.stdout(), "{INFO_MESSAGE}")?;
        Ok(ExitStatus::Success)
    }

    fn load(&self, host: &mut dyn Host, name: &str) -> anyhow::Result<()> {
        debug!(name, "enabling");
        writeln!(host.stdout(), "{} builtin loading", REGISTRATION.name())?;
        Ok(())
    }

    fn unload(&self, host: &mut dyn Host, name: &str) {
        debug!(name, "disabling");
        if let Err(err) = writeln!(host.stdout(), "{} builtin unloading", REGISTRATION.name()) {
            warn!(name, error = %err, "could not report unload");
        }
    }
}

export_builtin! {
    builtin: ExampleBuiltin,
    registration: REGISTRATION,
    record: EXAMPLE_STRUCT = "example_struct",
    function: example_builtin,
    load: example_builtin_load,
    unload: example_builtin_unload,
}
