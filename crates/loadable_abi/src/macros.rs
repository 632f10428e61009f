/// Export a [`LoadableBuiltin`](crate::builtin::LoadableBuiltin) to bash.
///
/// bash locates everything by name after `enable -f lib.so NAME`:
/// `NAME_struct` for the record, `NAME_builtin_load` and
/// `NAME_builtin_unload` for the lifecycle hooks. The record's entry point
/// is conventionally `NAME_builtin`.
///
/// ```ignore
/// loadable_abi::export_builtin! {
///     builtin: Greet,
///     registration: REGISTRATION,
///     record: GREET_STRUCT = "greet_struct",
///     function: greet_builtin,
///     load: greet_builtin_load,
///     unload: greet_builtin_unload,
/// }
/// ```
#[macro_export]
macro_rules! export_builtin {
    (
        builtin: $builtin:expr,
        registration: $registration:ident,
        record: $record:ident = $record_symbol:literal,
        function: $function:ident,
        load: $load:ident,
        unload: $unload:ident $(,)?
    ) => {
        #[export_name = $record_symbol]
        pub static $record: $crate::abi::ExportedBuiltin = {
            static LONG_DOC: $crate::abi::DocTable<{ $registration.long_doc.len() + 1 }> =
                $crate::abi::DocTable::new($registration.long_doc);
            $crate::abi::ExportedBuiltin::new($crate::abi::BuiltinStruct::new(
                &$registration,
                LONG_DOC.as_ptr(),
                $function,
            ))
        };

        /// # Safety
        ///
        /// Called by bash with a valid (possibly null) word list.
        #[no_mangle]
        pub unsafe extern "C" fn $function(list: *mut $crate::abi::WordList) -> ::std::ffi::c_int {
            $crate::ffi::invoke(&$builtin, list)
        }

        /// # Safety
        ///
        /// Called by bash with the name given to `enable -f`.
        #[no_mangle]
        pub unsafe extern "C" fn $load(name: *mut ::std::ffi::c_char) -> ::std::ffi::c_int {
            $crate::ffi::load(&$builtin, name)
        }

        /// # Safety
        ///
        /// Called by bash with the name given to `enable -d`.
        #[no_mangle]
        pub unsafe extern "C" fn $unload(name: *mut ::std::ffi::c_char) {
            $crate::ffi::unload(&$builtin, name)
        }
    };
}
