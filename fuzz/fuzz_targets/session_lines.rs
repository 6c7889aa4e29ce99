//! Fuzz target for the session state engine
//!
//! Every line goes through the built-in handlers; afterwards each member
//! directory must still be keyed by nickname.

#![no_main]

use anolis::{Context, Session};
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let (session, _outbox) = Session::new("fuzz");
    for line in input.lines() {
        let _ = session.handle_line(line);
    }

    for name in session.channels().names() {
        if let Some(channel) = session.channels().get(&name) {
            assert!(channel.users().is_consistent());
        }
    }
});
