use crate::abi::ExitStatus;
use crate::error::BuiltinResult;
use crate::host::Host;
use crate::registration::Registration;

/// A command bash can load with `enable -f`.
///
/// The three methods line up with the three hooks bash calls: `load` once
/// on `enable -f`, `execute` for every invocation, `unload` once on
/// `enable -d`. Implementations keep no state between calls.
pub trait LoadableBuiltin {
    fn registration(&self) -> &'static Registration;

    /// Run the command. `args` excludes the command name and may be empty.
    fn execute(&self, host: &mut dyn Host, args: &[String]) -> BuiltinResult<ExitStatus>;

    /// Returning an error makes bash abort the load.
    fn load(&self, host: &mut dyn Host, name: &str) -> anyhow::Result<()> {
        let _ = (host, name);
        Ok(())
    }

    fn unload(&self, host: &mut dyn Host, name: &str) {
        let _ = (host, name);
    }
}
