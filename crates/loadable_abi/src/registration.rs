use std::borrow::Cow;
use std::ffi::CStr;

use crate::abi::BuiltinFlags;

/// Compile-time description of a loadable builtin.
///
/// Declared as a `const` next to the builtin and turned into the exported
/// `struct builtin` by [`export_builtin!`](crate::export_builtin). Help lines
/// are a plain slice here; the NULL terminator bash expects only exists in
/// the generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Must match the name given to `enable`.
    pub name: &'static CStr,
    pub flags: BuiltinFlags,
    /// Rendered by `help <name>`.
    pub long_doc: &'static [&'static CStr],
    /// Usage synopsis, printed by `builtin_usage`.
    pub short_doc: &'static CStr,
}

impl Registration {
    pub fn name(&self) -> Cow<'static, str> {
        self.name.to_string_lossy()
    }

    pub fn synopsis(&self) -> Cow<'static, str> {
        self.short_doc.to_string_lossy()
    }

    pub fn help_lines(&self) -> impl Iterator<Item = Cow<'static, str>> + '_ {
        self.long_doc.iter().map(|line| line.to_string_lossy())
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(BuiltinFlags::ENABLED)
    }

    /// Line bash prints for a usage error: `<name>: usage: <synopsis>`.
    pub fn usage_line(&self) -> String {
        format!("{}: usage: {}", self.name(), self.synopsis())
    }
}
