use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use super::command::{Command, parse};
use super::event_loop::{EventLoopState, Input, handle_command, report_changes, run};
use crate::audio::AudioEvent;
use crate::audio::testing::{Call, MockBackend};
use crate::config::Settings;
use crate::controller::PlaybackController;
use crate::library::{MetadataExtractor, TrackRecord};

struct UntaggedExtractor;

impl MetadataExtractor for UntaggedExtractor {
    fn extract(&self, path: &Path) -> Option<TrackRecord> {
        Some(TrackRecord::untagged(path))
    }
}

type Controller = PlaybackController<MockBackend, UntaggedExtractor>;

fn controller() -> (Controller, Receiver<AudioEvent>) {
    let (backend, rx) = MockBackend::new();
    let c = PlaybackController::new(backend, UntaggedExtractor, &Settings::default()).unwrap();
    (c, rx)
}

fn pump(c: &mut Controller, rx: &Receiver<AudioEvent>) {
    while let Ok(ev) = rx.try_recv() {
        c.handle_audio_event(ev);
    }
}

fn exec(c: &mut Controller, line: &str) -> (bool, String) {
    let mut out = Vec::new();
    let quit = handle_command(parse(line).unwrap(), &Settings::default(), c, &mut out).unwrap();
    (quit, String::from_utf8(out).unwrap())
}

#[test]
fn parse_basic_commands() {
    assert_eq!(parse("next").unwrap(), Command::Next);
    assert_eq!(parse("  PREV ").unwrap(), Command::Prev);
    assert_eq!(parse("q").unwrap(), Command::Quit);
    assert_eq!(parse("").unwrap(), Command::Empty);
    assert_eq!(parse("vol 40").unwrap(), Command::Volume(40));
    assert_eq!(parse("eq").unwrap(), Command::EqShow);
    assert_eq!(parse("eq reset").unwrap(), Command::EqReset);
    assert_eq!(
        parse("eq q 250 2").unwrap(),
        Command::EqQ {
            freq_hz: 250.0,
            q: 2.0
        }
    );
    assert_eq!(
        parse("eq 1000 -3.5").unwrap(),
        Command::EqSet {
            freq_hz: 1000.0,
            gain_db: -3.5
        }
    );
}

#[test]
fn parse_track_numbers_are_one_based() {
    assert_eq!(parse("select 1").unwrap(), Command::Select(0));
    assert_eq!(parse("delete 3").unwrap(), Command::Delete(2));
    assert!(parse("select 0").is_err());
    assert!(parse("select").is_err());
    assert!(parse("delete x").is_err());
}

#[test]
fn parse_add_honours_quotes() {
    assert_eq!(
        parse(r#"add "/music/My Album" /tmp/a.mp3"#).unwrap(),
        Command::Add(vec![
            PathBuf::from("/music/My Album"),
            PathBuf::from("/tmp/a.mp3")
        ])
    );
    assert!(parse("add").is_err());
    assert!(parse(r#"add "/music/unterminated"#).is_err());
}

#[test]
fn parse_seek_accepts_ms_and_minutes_seconds() {
    assert_eq!(parse("seek 1500").unwrap(), Command::Seek(1500));
    assert_eq!(parse("seek 1:30").unwrap(), Command::Seek(90_000));
    assert_eq!(parse("seek -200").unwrap(), Command::Seek(-200));
    assert!(parse("seek 1:75").is_err());
    assert!(parse("seek 999999999999999999:00").is_err());
    assert!(parse("seek soon").is_err());
}

#[test]
fn parse_rejects_unknown_commands() {
    let err = parse("shuffle").unwrap_err();
    assert!(err.contains("unknown command"));
    assert!(parse("eq 1000").is_err());
}

#[test]
fn add_then_select_plays_the_chosen_track() {
    let (mut c, rx) = controller();
    let (quit, out) = exec(&mut c, "add /m/a.mp3 /m/b.mp3");
    assert!(!quit);
    assert_eq!(out, "added 2 track(s)\n");
    pump(&mut c, &rx);

    exec(&mut c, "select 2");
    pump(&mut c, &rx);
    assert_eq!(c.playlist().current_index(), Some(1));
    assert_eq!(c.engine().source(), Some(Path::new("/m/b.mp3")));
}

#[test]
fn out_of_range_track_is_reported() {
    let (mut c, _rx) = controller();
    assert_eq!(exec(&mut c, "select 4").1, "no track 4\n");
    assert_eq!(exec(&mut c, "delete 1").1, "no track 1\n");
    assert_eq!(exec(&mut c, "next").1, "playlist is empty\n");
}

#[test]
fn pause_only_pauses_when_playing() {
    let (mut c, rx) = controller();
    exec(&mut c, "add /m/a.mp3");
    pump(&mut c, &rx);

    let calls_before = c.engine().backend().calls.len();
    exec(&mut c, "play");
    assert_eq!(c.engine().backend().calls.len(), calls_before);

    exec(&mut c, "pause");
    assert_eq!(c.engine().backend().calls.last(), Some(&Call::Pause));
}

#[test]
fn volume_and_eq_commands_report_applied_values() {
    let (mut c, _rx) = controller();
    assert_eq!(exec(&mut c, "volume 250").1, "volume 100%\n");
    assert_eq!(exec(&mut c, "eq 1000 6").1, "1kHz +6.0 dB\n");
    assert!(exec(&mut c, "eq 1234 6").1.starts_with("eq: "));
    assert_eq!(exec(&mut c, "eq q 1000 0.7").1, "1kHz q 0.700\n");
    assert!(exec(&mut c, "eq q 1000 0").1.starts_with("eq: invalid q"));
    assert_eq!(exec(&mut c, "eq reset").1, "equalizer reset to flat\n");
    assert!(c.equalizer().bands().iter().all(|b| b.gain_db == 0.0));
}

#[test]
fn config_command_prints_effective_settings() {
    let (mut c, _rx) = controller();
    let out = exec(&mut c, "config").1;
    assert!(out.contains("[audio]"));
    assert!(out.contains("volume_percent = 100"));
}

#[test]
fn quit_ends_the_loop() {
    let (mut c, _rx) = controller();
    assert!(exec(&mut c, "quit").0);
}

#[test]
fn report_changes_prints_playlist_and_now_playing() {
    let (mut c, rx) = controller();
    let mut state = EventLoopState::new(&c);
    exec(&mut c, "add /m/a.mp3");
    pump(&mut c, &rx);

    let mut out = Vec::new();
    report_changes(&mut c, &mut state, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(">   1. a.mp3"));
    assert!(text.contains("now playing 1/1: a.mp3"));
    assert!(text.contains("[playing]"));

    let mut out = Vec::new();
    report_changes(&mut c, &mut state, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn event_loop_runs_commands_until_quit() {
    let (mut c, audio_rx) = controller();
    let (tx, input_rx) = mpsc::channel();
    tx.send(Input::Line("add /m/a.mp3 /m/b.mp3".into())).unwrap();
    tx.send(Input::Line("bogus".into())).unwrap();
    tx.send(Input::Line("next".into())).unwrap();
    tx.send(Input::Line("quit".into())).unwrap();
    tx.send(Input::Line("next".into())).unwrap();

    let mut state = EventLoopState::new(&c);
    let mut out = Vec::new();
    run(&Settings::default(), &mut c, &audio_rx, &input_rx, &mut state, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("unknown command: bogus"));
    assert_eq!(c.playlist().current_index(), Some(1));
}

#[test]
fn event_loop_stops_when_input_closes() {
    let (mut c, audio_rx) = controller();
    let (tx, input_rx) = mpsc::channel();
    tx.send(Input::Closed).unwrap();

    let mut state = EventLoopState::new(&c);
    let mut out = Vec::new();
    run(&Settings::default(), &mut c, &audio_rx, &input_rx, &mut state, &mut out).unwrap();
}
