//! In-process stand-ins for bash, for testing builtins without a shell.

use std::ffi::{c_char, CString, NulError};
use std::io::Write;
use std::ptr;

use crate::abi::{ExitStatus, WordDesc, WordList};
use crate::builtin::LoadableBuiltin;
use crate::dispatch;
use crate::host::Host;
use crate::registration::Registration;

/// Host that records everything a builtin prints.
///
/// Usage blocks are rendered on stderr in bash's format.
#[derive(Debug, Default)]
pub struct CaptureHost {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub usage_calls: usize,
}

impl CaptureHost {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
        self.usage_calls = 0;
    }
}

impl Host for CaptureHost {
    fn stdout(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut dyn Write {
        &mut self.stderr
    }

    fn usage(&mut self, registration: &Registration) {
        self.usage_calls += 1;
        let _ = writeln!(self.stderr, "{}", registration.usage_line());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unloaded,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{0}: not loaded")]
    NotLoaded(String),

    #[error("{0}: already loaded")]
    AlreadyLoaded(String),

    #[error("{0}: load hook refused")]
    LoadRefused(String),
}

/// Drives a builtin through `enable -f`, invocations and `enable -d` the way
/// bash does, rejecting calls made in the wrong lifecycle state.
pub struct Session<'b, B: LoadableBuiltin + ?Sized> {
    builtin: &'b B,
    host: CaptureHost,
    state: Lifecycle,
    enabled_as: Option<String>,
}

impl<'b, B: LoadableBuiltin + ?Sized> Session<'b, B> {
    pub fn new(builtin: &'b B) -> Self {
        Self {
            builtin,
            host: CaptureHost::default(),
            state: Lifecycle::Unloaded,
            enabled_as: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn host(&self) -> &CaptureHost {
        &self.host
    }

    /// Output captured since the last call, as `(stdout, stderr)`.
    pub fn take_output(&mut self) -> (String, String) {
        let output = (self.host.stdout_str(), self.host.stderr_str());
        self.host.clear();
        output
    }

    pub fn enable(&mut self, name: &str) -> Result<(), SessionError> {
        if self.state == Lifecycle::Loaded {
            return Err(SessionError::AlreadyLoaded(name.to_string()));
        }
        if !dispatch::load(self.builtin, &mut self.host, name) {
            return Err(SessionError::LoadRefused(name.to_string()));
        }
        self.state = Lifecycle::Loaded;
        self.enabled_as = Some(name.to_string());
        Ok(())
    }

    pub fn invoke<S: AsRef<str>>(&mut self, args: &[S]) -> Result<ExitStatus, SessionError> {
        if self.state != Lifecycle::Loaded {
            return Err(SessionError::NotLoaded(self.builtin.registration().name().into_owned()));
        }
        let args: Vec<String> = args.iter().map(|arg| arg.as_ref().to_string()).collect();
        Ok(dispatch::invoke(self.builtin, &mut self.host, &args))
    }

    pub fn disable(&mut self) -> Result<(), SessionError> {
        let Some(name) = self.enabled_as.take() else {
            return Err(SessionError::NotLoaded(self.builtin.registration().name().into_owned()));
        };
        dispatch::unload(self.builtin, &mut self.host, &name);
        self.state = Lifecycle::Unloaded;
        Ok(())
    }
}

/// A bash word list owned by Rust, for driving the C entry points.
pub struct OwnedWordList {
    head: *mut WordList,
    _nodes: Vec<Box<WordList>>,
    _descs: Vec<Box<WordDesc>>,
    _words: Vec<CString>,
}

impl OwnedWordList {
    pub fn new<I, W>(words: I) -> Result<Self, NulError>
    where
        I: IntoIterator<Item = W>,
        W: Into<Vec<u8>>,
    {
        let words = words
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        let mut descs: Vec<Box<WordDesc>> = words
            .iter()
            .map(|word| {
                Box::new(WordDesc {
                    word: word.as_ptr() as *mut c_char,
                    flags: 0,
                })
            })
            .collect();

        let mut nodes = Vec::with_capacity(descs.len());
        let mut next: *mut WordList = ptr::null_mut();
        for desc in descs.iter_mut().rev() {
            let mut node = Box::new(WordList {
                next,
                word: &mut **desc,
            });
            next = &mut *node;
            nodes.push(node);
        }

        Ok(Self {
            head: next,
            _nodes: nodes,
            _descs: descs,
            _words: words,
        })
    }

    /// A one-node list whose word descriptor is missing.
    pub fn null_head() -> Self {
        let mut node = Box::new(WordList {
            next: ptr::null_mut(),
            word: ptr::null_mut(),
        });
        Self {
            head: &mut *node,
            _nodes: vec![node],
            _descs: Vec::new(),
            _words: Vec::new(),
        }
    }

    pub fn as_ptr(&self) -> *mut WordList {
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::BuiltinFlags;
    use crate::error::BuiltinResult;

    const QUIET: Registration = Registration {
        name: c"quiet",
        flags: BuiltinFlags::ENABLED,
        long_doc: &[],
        short_doc: c"quiet",
    };

    struct Quiet;

    impl LoadableBuiltin for Quiet {
        fn registration(&self) -> &'static Registration {
            &QUIET
        }

        fn execute(&self, _host: &mut dyn Host, _args: &[String]) -> BuiltinResult<ExitStatus> {
            Ok(ExitStatus::Success)
        }
    }

    #[test]
    fn invoke_requires_load() {
        let mut session = Session::new(&Quiet);
        assert_eq!(
            session.invoke(&["x"]),
            Err(SessionError::NotLoaded("quiet".into()))
        );
        assert_eq!(session.disable(), Err(SessionError::NotLoaded("quiet".into())));
    }

    #[test]
    fn lifecycle_transitions() {
        let mut session = Session::new(&Quiet);
        assert_eq!(session.state(), Lifecycle::Unloaded);
        session.enable("quiet").unwrap();
        assert_eq!(session.state(), Lifecycle::Loaded);
        assert_eq!(session.enable("quiet"), Err(SessionError::AlreadyLoaded("quiet".into())));
        assert_eq!(session.invoke::<&str>(&[]), Ok(ExitStatus::Success));
        session.disable().unwrap();
        assert_eq!(session.state(), Lifecycle::Unloaded);
    }

    #[test]
    fn word_list_rejects_interior_nul() {
        assert!(OwnedWordList::new(["a\0b"]).is_err());
    }

    #[test]
    fn capture_host_renders_usage_on_stderr() {
        let mut host = CaptureHost::default();
        host.usage(&QUIET);
        assert_eq!(host.stderr_str(), "quiet: usage: quiet\n");
        host.clear();
        assert_eq!(host.usage_calls, 0);
    }
}
