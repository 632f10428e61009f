//! Turns [`LoadableBuiltin`] results into what bash expects from each hook.

use tracing::debug;

use crate::abi::ExitStatus;
use crate::builtin::LoadableBuiltin;
use crate::host::Host;

/// Run one invocation and map its outcome to a status code.
///
/// Usage errors print the message, a blank line and the usage block, then
/// yield [`ExitStatus::Usage`]. Other errors go to stderr prefixed with the
/// builtin name and yield [`ExitStatus::Failure`].
pub fn invoke<B>(builtin: &B, host: &mut dyn Host, args: &[String]) -> ExitStatus
where
    B: LoadableBuiltin + ?Sized,
{
    let registration = builtin.registration();
    debug!(builtin = %registration.name(), argc = args.len(), "invoking builtin");

    match builtin.execute(host, args) {
        Ok(status) => status,
        Err(err) if err.is_usage() => {
            let _ = writeln!(host.stdout(), "{err}\n");
            host.usage(registration);
            ExitStatus::Usage
        }
        Err(err) => {
            debug!(builtin = %registration.name(), error = %err, "builtin failed");
            let _ = writeln!(host.stderr(), "{}: {err}", registration.name());
            ExitStatus::Failure
        }
    }
}

/// Run the load hook; `false` tells bash to abort `enable -f`.
pub fn load<B>(builtin: &B, host: &mut dyn Host, name: &str) -> bool
where
    B: LoadableBuiltin + ?Sized,
{
    match builtin.load(host, name) {
        Ok(()) => {
            debug!(name, "builtin loaded");
            true
        }
        Err(err) => {
            debug!(name, error = %err, "builtin refused to load");
            let _ = writeln!(host.stderr(), "{name}: load failed: {err:#}");
            false
        }
    }
}

pub fn unload<B>(builtin: &B, host: &mut dyn Host, name: &str)
where
    B: LoadableBuiltin + ?Sized,
{
    builtin.unload(host, name);
    debug!(name, "builtin unloaded");
}
