use example::ExampleBuiltin;
use loadable_abi::testing::{Lifecycle, Session};
use loadable_abi::ExitStatus;
use proptest::prelude::*;

const USAGE_OUTPUT: &str = "Error - <cmd> is a required argument. See usage..\n\n";
const USAGE_BLOCK: &str = "example: usage: example <cmd> \n";

fn loaded_session() -> Session<'static, ExampleBuiltin> {
    let mut session = Session::new(&ExampleBuiltin);
    session.enable("example").unwrap();
    session.take_output();
    session
}

#[test]
fn enable_prints_loading_message() {
    let mut session = Session::new(&ExampleBuiltin);
    session.enable("example").unwrap();
    assert_eq!(session.state(), Lifecycle::Loaded);
    let (stdout, stderr) = session.take_output();
    assert_eq!(stdout, "example builtin loading\n");
    assert!(stderr.is_empty());
}

#[test]
fn enable_under_another_name_still_succeeds() {
    let mut session = Session::new(&ExampleBuiltin);
    session.enable("renamed").unwrap();
    assert_eq!(session.take_output().0, "example builtin loading\n");
}

#[test]
fn empty_invocation_is_usage_error() {
    let mut session = loaded_session();
    let status = session.invoke::<&str>(&[]).unwrap();
    assert_eq!(status, ExitStatus::Usage);
    assert_eq!(status.code(), 258);
    assert_eq!(session.host().usage_calls, 1);

    let (stdout, stderr) = session.take_output();
    assert_eq!(stdout, USAGE_OUTPUT);
    assert_eq!(stderr, USAGE_BLOCK);
}

#[test]
fn foo_invocation_succeeds() {
    let mut session = loaded_session();
    let status = session.invoke(&["foo"]).unwrap();
    assert_eq!(status, ExitStatus::Success);
    assert_eq!(session.take_output(), ("this is just an example builtin\n".into(), String::new()));
}

#[test]
fn disable_prints_unloading_message() {
    let mut session = loaded_session();
    session.disable().unwrap();
    assert_eq!(session.state(), Lifecycle::Unloaded);
    assert_eq!(session.take_output().0, "example builtin unloading\n");
}

#[test]
fn reload_cycles_repeat_the_same_output() {
    let mut session = Session::new(&ExampleBuiltin);
    let mut transcripts = Vec::new();
    for _ in 0..3 {
        session.enable("example").unwrap();
        session.invoke::<&str>(&[]).unwrap();
        session.invoke(&["foo", "bar"]).unwrap();
        session.disable().unwrap();
        transcripts.push(session.take_output());
    }
    assert!(transcripts.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(transcripts[0].0.starts_with("example builtin loading\n"));
    assert!(transcripts[0].0.ends_with("example builtin unloading\n"));
}

proptest! {
    #[test]
    fn any_non_empty_args_succeed(args in proptest::collection::vec(".*", 1..6)) {
        let mut session = loaded_session();
        let status = session.invoke(&args[..]).unwrap();
        prop_assert_eq!(status, ExitStatus::Success);
        prop_assert_eq!(session.take_output().0, "this is just an example builtin\n");
    }

    #[test]
    fn any_load_name_is_accepted(name in "[a-z_][a-z0-9_]{0,15}") {
        let mut session = Session::new(&ExampleBuiltin);
        prop_assert!(session.enable(&name).is_ok());
        session.disable().unwrap();
        prop_assert_eq!(
            session.take_output().0,
            "example builtin loading\nexample builtin unloading\n"
        );
    }
}
