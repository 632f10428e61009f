//! Services a builtin gets from the shell that loaded it.

use std::io::{self, Write};

use tracing::debug;

use crate::registration::Registration;

/// The shell as seen from inside a builtin.
pub trait Host {
    fn stdout(&mut self) -> &mut dyn Write;

    fn stderr(&mut self) -> &mut dyn Write;

    /// Print the usage block for `registration`.
    fn usage(&mut self, registration: &Registration);
}

/// Host backed by the running bash process.
///
/// Output goes to file descriptors 1 and 2, so redirections set up by bash
/// apply. Usage rendering is delegated to bash's own `builtin_usage`.
pub struct BashHost {
    stdout: io::Stdout,
    stderr: io::Stderr,
}

impl BashHost {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            stderr: io::stderr(),
        }
    }

    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
        let _ = self.stderr.flush();
    }
}

impl Default for BashHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for BashHost {
    fn stdout(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut dyn Write {
        &mut self.stderr
    }

    fn usage(&mut self, registration: &Registration) {
        // bash writes the usage line through its own stdio buffers.
        let _ = self.stdout.flush();
        match resolve_builtin_usage() {
            Some(builtin_usage) => unsafe { builtin_usage() },
            None => {
                debug!("builtin_usage not found in process, rendering usage locally");
                let _ = writeln!(self.stderr, "{}", registration.usage_line());
            }
        }
    }
}

type BuiltinUsageFn = unsafe extern "C" fn();

/// Look up `builtin_usage` in the global symbol scope of the process.
#[cfg(unix)]
fn resolve_builtin_usage() -> Option<BuiltinUsageFn> {
    let this = libloading::os::unix::Library::this();
    let symbol = unsafe { this.get::<BuiltinUsageFn>(b"builtin_usage\0") }.ok()?;
    Some(*symbol)
}

#[cfg(not(unix))]
fn resolve_builtin_usage() -> Option<BuiltinUsageFn> {
    None
}
