//! Property-based tests for line parsing.
//!
//! Uses proptest to generate random IRC components and verify that:
//! 1. Parsing never panics, whatever the input
//! 2. Lines assembled from valid pieces parse back into those pieces
//! 3. Membership bookkeeping keeps keys and nicknames in step
//!
//! Run with: `cargo test --test proptest_parser`

use proptest::prelude::*;
use anolis::{Context, Message, Session, User, Users};

// =============================================================================
// STRATEGIES - Generators for valid IRC components
// =============================================================================

/// Valid IRC nickname: starts with letter or special char, followed by
/// letters, digits, or special chars.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

/// Valid IRC username (ident): alphanumeric, no spaces or @ or !
fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

/// Valid hostname: simplified version
fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

/// Channel name as tracked by the directory.
fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("#[a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Command word: letters or a three-digit numeric.
fn command_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z]{1,12}").expect("valid regex"),
        prop::string::string_regex("[0-9]{3}").expect("valid regex"),
    ]
}

/// A middle argument: non-empty, no spaces, not starting with ':'.
fn arg_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#&+\\-_.*][a-zA-Z0-9#&+\\-_.*:]{0,15}")
        .expect("valid regex")
}

/// Message text that doesn't contain CR/LF (which would break IRC protocol)
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,400}").expect("valid regex")
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Arbitrary input never panics the parser.
    #[test]
    fn parse_never_panics(input in "\\PC{0,600}") {
        let _ = Message::parse(&input);
    }

    /// A line built from valid pieces parses back into those pieces.
    #[test]
    fn assembled_line_parses(
        nick in nickname_strategy(),
        user in username_strategy(),
        host in hostname_strategy(),
        command in command_strategy(),
        args in prop::collection::vec(arg_strategy(), 0..6),
        text in message_text_strategy()
    ) {
        let mut line = format!(":{}!{}@{} {}", nick, user, host, command);
        for arg in &args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(" :");
        line.push_str(&text);

        let msg = Message::parse(&line).expect("assembled line should parse");
        let source = msg.source.as_ref().expect("source");
        prop_assert_eq!(&source.nickname, &nick);
        prop_assert_eq!(&source.username, &user);
        prop_assert_eq!(&source.hostname, &host);
        prop_assert_eq!(msg.command, command.to_ascii_uppercase());
        prop_assert_eq!(msg.args, args);
        prop_assert_eq!(msg.trailing.as_deref(), Some(text.as_str()));
    }

    /// Prefix splitting recovers all three parts.
    #[test]
    fn user_parse_splits_prefix(
        nick in nickname_strategy(),
        user in username_strategy(),
        host in hostname_strategy()
    ) {
        let parsed = User::parse(&format!("{}!{}@{}", nick, user, host));
        prop_assert_eq!(parsed.nickname, nick);
        prop_assert_eq!(parsed.username, user);
        prop_assert_eq!(parsed.hostname, host);
    }

    /// Adding the same user twice leaves one entry; removing twice is harmless.
    #[test]
    fn users_add_remove_idempotent(nicks in prop::collection::vec(nickname_strategy(), 1..20)) {
        let users = Users::new();
        for nick in &nicks {
            users.add(User::from_nick(nick.clone()));
            users.add(User::from_nick(nick.clone()));
        }
        let mut distinct = nicks.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(users.len(), distinct.len());
        prop_assert!(users.is_consistent());

        for nick in &nicks {
            users.remove_name(nick);
            users.remove_name(nick);
        }
        prop_assert!(users.is_empty());
    }

    /// Renames through NICK keep every channel consistent.
    #[test]
    fn nick_chain_stays_consistent(
        channels in prop::collection::btree_set(channel_strategy(), 1..5),
        nicks in prop::collection::vec(nickname_strategy(), 1..8)
    ) {
        let (session, _outbox) = Session::new("anolis");
        for channel in &channels {
            session.handle_line(&format!(":anolis!a@h JOIN {}", channel)).unwrap();
            session.handle_line(&format!(":peer!p@h JOIN :{}", channel)).unwrap();
        }

        let mut current = "peer".to_string();
        for next in &nicks {
            if *next == current || next == "anolis" {
                continue;
            }
            session.handle_line(&format!(":{}!p@h NICK :{}", current, next)).unwrap();
            current = next.clone();
        }

        for channel in &channels {
            let channel = session.channels().get(channel).unwrap();
            prop_assert!(channel.users().is_consistent());
            prop_assert!(channel.users().has_name(&current));
            prop_assert_eq!(channel.users().len(), 2);
        }
    }
}
