//! Workspace boundary checks

use architectural_enforcement::{manifest, offending_lines, production_source, rust_files};

#[test]
fn core_has_no_ui_dependencies() {
    let core = manifest("companion/core/Cargo.toml");
    assert!(!core.is_empty(), "core manifest not found");
    for ui in ["ratatui", "crossterm"] {
        assert!(!core.contains(ui), "lion-core must not depend on {ui}");
    }
}

#[test]
fn core_never_sleeps() {
    let files = rust_files("companion/core/src");
    assert!(!files.is_empty());

    for path in files {
        let source = production_source(&path);
        for needle in ["thread::sleep", "time::sleep"] {
            let hits = offending_lines(&source, needle);
            assert!(
                hits.is_empty(),
                "{} calls {needle}; advance the Clock instead: {hits:?}",
                path.display()
            );
        }
    }
}

#[test]
fn core_library_logs_through_tracing() {
    for path in rust_files("companion/core/src") {
        // The headless binary prints its JSON to stdout on purpose
        if path.components().any(|c| c.as_os_str() == "bin") {
            continue;
        }
        let source = production_source(&path);
        for needle in ["println!", "eprintln!", "dbg!"] {
            let hits = offending_lines(&source, needle);
            assert!(hits.is_empty(), "{} uses {needle}: {hits:?}", path.display());
        }
    }
}

#[test]
fn tui_embeds_the_core() {
    let tui = manifest("tui/Cargo.toml");
    assert!(tui.contains("lion-core = { path = \"../companion/core\" }"));
}

#[test]
fn tui_never_touches_pet_state() {
    for path in rust_files("tui/src") {
        let source = production_source(&path);
        for needle in ["Pet::new", ".apply_activity(", ".complete_devotional(now"] {
            let hits = offending_lines(&source, needle);
            assert!(
                hits.is_empty(),
                "{} reaches into the pet ({needle}); send a SurfaceEvent instead",
                path.display()
            );
        }
    }
}
