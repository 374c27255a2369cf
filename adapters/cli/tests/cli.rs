use std::process::{Command, Output};

fn munch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_munch"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run the munch binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn validate_topic_reports_the_cache_key() {
    let output = munch(&["validate-topic", "  Ancient Egpyt "]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("accepted: Ancient Egpyt\n"), "{text}");
    assert!(text.contains("normalized: ancient egypt\n"), "{text}");
    assert!(text.contains("cache key: ancient egpyt"), "{text}");
}

#[test]
fn validate_topic_rejects_numbers() {
    let output = munch(&["validate-topic", "12345"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("rejected"));
}

#[test]
fn preview_prints_a_full_board() {
    let output = munch(&["preview", "--offline", "--seed", "3", "--topic", "words"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let rows = text.lines().filter(|line| line.starts_with('|')).count();
    assert_eq!(rows, 6, "{text}");
    assert!(text.contains("cells are correct"), "{text}");
}

#[test]
fn preview_synthesizes_custom_topics_offline() {
    let output = munch(&[
        "preview",
        "--offline",
        "--seed",
        "5",
        "--topic",
        "custom",
        "--custom",
        "Dinosaurs",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Custom: Dinosaurs - level 1"));
}

#[test]
fn autopilot_plays_until_the_game_ends() {
    let output = munch(&[
        "play",
        "--offline",
        "--seed",
        "11",
        "--topic",
        "math",
        "--max-frames",
        "4000",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("topic: Mathematics"), "{text}");
    assert!(text.contains("score: "), "{text}");
}

#[test]
fn unknown_topics_are_refused_by_the_parser() {
    let output = munch(&["preview", "--topic", "astrology"]);
    assert!(!output.status.success());
}
