//! Integration tests for level-gated logging across verbosity presets.

use logging::{
    DebugFlag, DiagnosticEvent, InfoFlag, VerbosityConfig, apply_debug_flag, debug_log,
    drain_events, info_log, init,
};

fn reset(config: VerbosityConfig) {
    init(config);
    drain_events();
}

#[test]
fn verbose_one_reports_filter_outcomes_only() {
    reset(VerbosityConfig::from_verbose_level(1));

    info_log!(Filter, 1, "accepted {}", "wantedfile");
    info_log!(Enum, 1, "listing root");
    debug_log!(Ancestor, 1, "synthesized sub");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        DiagnosticEvent::Info { flag: InfoFlag::Filter, level: 1, message } if message == "accepted wantedfile"
    ));
}

#[test]
fn verbose_three_adds_ancestor_debugging() {
    reset(VerbosityConfig::from_verbose_level(3));

    debug_log!(Ancestor, 1, "synthesized {}", "sub/subsub");
    debug_log!(Ancestor, 2, "too detailed");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        DiagnosticEvent::Debug { flag: DebugFlag::Ancestor, .. }
    ));
}

#[test]
fn flag_tokens_refine_preset() {
    reset(VerbosityConfig::from_verbose_level(0));
    apply_debug_flag("scope3").expect("valid token");

    debug_log!(Scope, 3, "deep scope detail");
    debug_log!(Filter, 1, "still silent");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "deep scope detail");
}

#[test]
fn events_are_thread_local() {
    reset(VerbosityConfig::from_verbose_level(4));
    info_log!(Stats, 1, "main thread");

    let handle = std::thread::spawn(|| {
        info_log!(Stats, 1, "worker thread, default config");
        drain_events().len()
    });
    assert_eq!(handle.join().expect("worker joins"), 0);
    assert_eq!(drain_events().len(), 1);
}
