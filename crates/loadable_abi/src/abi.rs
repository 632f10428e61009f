//! `#[repr(C)]` mirrors of the bash structures a loadable builtin touches.
//!
//! Layouts follow bash's `command.h` (`WORD_DESC`, `WORD_LIST`) and
//! `builtins.h` (`struct builtin`). Values owned by bash, the flag bits and
//! the status codes, are mirrored verbatim and must never be renumbered.

use std::cell::UnsafeCell;
use std::ffi::{c_char, c_int, CStr};
use std::ptr;

use bitflags::bitflags;

use crate::registration::Registration;

/// `EXECUTION_SUCCESS` from `shell.h`.
pub const EXECUTION_SUCCESS: c_int = 0;
/// `EXECUTION_FAILURE` from `shell.h`.
pub const EXECUTION_FAILURE: c_int = 1;
/// `EX_USAGE` from `shell.h`. bash reports it to the user as status 2.
pub const EX_USAGE: c_int = 258;

/// Status a builtin hands back to bash.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    Success = EXECUTION_SUCCESS,
    Failure = EXECUTION_FAILURE,
    Usage = EX_USAGE,
}

impl ExitStatus {
    pub const fn code(self) -> c_int {
        self as c_int
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ExitStatus> for c_int {
    fn from(status: ExitStatus) -> Self {
        status.code()
    }
}

bitflags! {
    /// Builtin flag bits from `builtins.h`.
    pub struct BuiltinFlags: c_int {
        const ENABLED = 0x01;
        const DELETED = 0x02;
        const STATIC = 0x04;
        const SPECIAL = 0x08;
        const ASSIGNMENT = 0x10;
        const POSIX = 0x20;
        const LOCALVAR = 0x40;
        const ARRAYREF = 0x80;
    }
}

/// `WORD_DESC`
#[repr(C)]
#[derive(Debug)]
pub struct WordDesc {
    pub word: *mut c_char,
    pub flags: c_int,
}

/// `WORD_LIST`
#[repr(C)]
#[derive(Debug)]
pub struct WordList {
    pub next: *mut WordList,
    pub word: *mut WordDesc,
}

/// Entry point bash calls for every execution of the builtin.
pub type BuiltinFn = unsafe extern "C" fn(list: *mut WordList) -> c_int;

/// `<name>_builtin_load`; returning 0 makes `enable -f` fail.
pub type LoadFn = unsafe extern "C" fn(name: *mut c_char) -> c_int;

/// `<name>_builtin_unload`
pub type UnloadFn = unsafe extern "C" fn(name: *mut c_char);

/// Collect the words of a bash word list.
///
/// The walk stops at the first missing node, descriptor or word, so a list
/// whose head carries no word yields no arguments at all.
///
/// # Safety
///
/// `list` must be null or point to a word list that stays valid for the
/// duration of the call.
pub unsafe fn word_list_to_args(list: *const WordList) -> Vec<String> {
    let mut args = Vec::new();
    let mut node = list;
    while let Some(entry) = node.as_ref() {
        let Some(desc) = entry.word.as_ref() else {
            break;
        };
        if desc.word.is_null() {
            break;
        }
        args.push(CStr::from_ptr(desc.word).to_string_lossy().into_owned());
        node = entry.next;
    }
    args
}

/// NULL-terminated `long_doc` array built at compile time.
///
/// `N` must be the number of lines plus one for the terminator.
#[repr(transparent)]
pub struct DocTable<const N: usize>([*const c_char; N]);

// SAFETY: the table only ever points at `'static` C string literals and is
// never written after construction.
unsafe impl<const N: usize> Sync for DocTable<N> {}

impl<const N: usize> DocTable<N> {
    pub const fn new(lines: &[&CStr]) -> Self {
        assert!(N == lines.len() + 1, "doc table needs exactly one slot for the NULL terminator");
        let mut table = [ptr::null(); N];
        let mut i = 0;
        while i < lines.len() {
            table[i] = lines[i].as_ptr();
            i += 1;
        }
        Self(table)
    }

    pub const fn as_ptr(&self) -> *const *const c_char {
        self.0.as_ptr()
    }
}

/// `struct builtin` as bash reads it from `<name>_struct`.
#[repr(C)]
#[derive(Debug)]
pub struct BuiltinStruct {
    pub name: *const c_char,
    pub function: BuiltinFn,
    pub flags: c_int,
    pub long_doc: *const *const c_char,
    pub short_doc: *const c_char,
    /// Owned by bash, which stores the `dlopen` handle here.
    pub handle: *mut c_char,
}

impl BuiltinStruct {
    pub const fn new(
        registration: &Registration,
        long_doc: *const *const c_char,
        function: BuiltinFn,
    ) -> Self {
        Self {
            name: registration.name.as_ptr(),
            function,
            flags: registration.flags.bits(),
            long_doc,
            short_doc: registration.short_doc.as_ptr(),
            handle: ptr::null_mut(),
        }
    }

    pub fn flags(&self) -> BuiltinFlags {
        BuiltinFlags::from_bits_truncate(self.flags)
    }

    /// # Safety
    ///
    /// `name` must point to a valid C string.
    pub unsafe fn name(&self) -> &CStr {
        CStr::from_ptr(self.name)
    }

    /// # Safety
    ///
    /// `short_doc` must point to a valid C string.
    pub unsafe fn short_doc(&self) -> &CStr {
        CStr::from_ptr(self.short_doc)
    }

    /// Lines of `long_doc` up to, not including, the NULL terminator.
    ///
    /// # Safety
    ///
    /// `long_doc` must be null or a NULL-terminated array of valid C strings.
    pub unsafe fn long_doc(&self) -> Vec<&CStr> {
        let mut lines = Vec::new();
        if self.long_doc.is_null() {
            return lines;
        }
        let mut cursor = self.long_doc;
        while !(*cursor).is_null() {
            lines.push(CStr::from_ptr(*cursor));
            cursor = cursor.add(1);
        }
        lines
    }
}

/// The exported registration record.
///
/// bash writes into the record it finds (the `dlopen` handle, flag updates
/// on `enable -n`), so it has to live in writable memory.
#[repr(transparent)]
pub struct ExportedBuiltin(UnsafeCell<BuiltinStruct>);

// SAFETY: bash drives builtins from a single thread; the module itself never
// writes to the record after construction.
unsafe impl Sync for ExportedBuiltin {}

impl ExportedBuiltin {
    pub const fn new(record: BuiltinStruct) -> Self {
        Self(UnsafeCell::new(record))
    }

    pub fn as_ptr(&self) -> *mut BuiltinStruct {
        self.0.get()
    }

    /// # Safety
    ///
    /// No other code, bash included, may write to the record while the
    /// returned reference is alive.
    pub unsafe fn record(&self) -> &BuiltinStruct {
        &*self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::OwnedWordList;

    #[test]
    fn status_codes_match_bash() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
        assert_eq!(ExitStatus::Usage.code(), 258);
        assert_eq!(c_int::from(ExitStatus::Usage), EX_USAGE);
    }

    #[test]
    fn null_list_has_no_args() {
        assert!(unsafe { word_list_to_args(ptr::null()) }.is_empty());
    }

    #[test]
    fn null_head_word_has_no_args() {
        let list = OwnedWordList::null_head();
        assert!(unsafe { word_list_to_args(list.as_ptr()) }.is_empty());
    }

    #[test]
    fn words_keep_their_order() {
        let list = OwnedWordList::new(["foo", "bar", "baz qux"]).unwrap();
        let args = unsafe { word_list_to_args(list.as_ptr()) };
        assert_eq!(args, vec!["foo", "bar", "baz qux"]);
    }

    #[test]
    fn non_utf8_words_are_lossy() {
        let list = OwnedWordList::new([b"a\xffb".to_vec()]).unwrap();
        let args = unsafe { word_list_to_args(list.as_ptr()) };
        assert_eq!(args, vec!["a\u{fffd}b"]);
    }

    #[test]
    fn doc_table_is_null_terminated() {
        static TABLE: DocTable<3> = DocTable::new(&[c"one", c"two"]);
        let record = BuiltinStruct {
            name: c"t".as_ptr(),
            function: noop,
            flags: 0,
            long_doc: TABLE.as_ptr(),
            short_doc: c"t".as_ptr(),
            handle: ptr::null_mut(),
        };
        let lines = unsafe { record.long_doc() };
        assert_eq!(lines, vec![c"one", c"two"]);
    }

    #[test]
    fn unknown_flag_bits_are_dropped() {
        let record = BuiltinStruct {
            name: c"t".as_ptr(),
            function: noop,
            flags: 0x01 | 0x1000,
            long_doc: ptr::null(),
            short_doc: c"t".as_ptr(),
            handle: ptr::null_mut(),
        };
        assert_eq!(record.flags(), BuiltinFlags::ENABLED);
        assert!(unsafe { record.long_doc() }.is_empty());
    }

    unsafe extern "C" fn noop(_list: *mut WordList) -> c_int {
        EXECUTION_SUCCESS
    }
}
