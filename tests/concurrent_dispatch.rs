//! Many threads driving one session with disjoint users.
//!
//! Every directory operation is atomic, so however the threads interleave,
//! each user ends up exactly where its own lines put it and no directory
//! holds a key that disagrees with its value.

use std::sync::Arc;
use std::thread;

use anolis::{Context, Session};

const THREADS: usize = 8;
const USERS_PER_THREAD: usize = 25;
const CHANNELS: [&str; 3] = ["#one", "#two", "#three"];

fn nick(thread: usize, user: usize) -> String {
    format!("u{}_{}", thread, user)
}

#[test]
fn test_disjoint_users_across_shared_channels() {
    let (session, _outbox) = Session::new("anolis");
    for name in CHANNELS {
        session
            .handle_line(&format!(":anolis!bot@host JOIN {}", name))
            .unwrap();
    }

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for u in 0..USERS_PER_THREAD {
                    let prefix = format!(":{}!ident@host{}", nick(t, u), t);
                    for name in CHANNELS {
                        session
                            .handle_line(&format!("{} JOIN :{}", prefix, name))
                            .unwrap();
                    }
                    session
                        .handle_line(&format!("{} PRIVMSG #two :hello", prefix))
                        .unwrap();
                    session
                        .handle_line(&format!("{} PART #one :bye", prefix))
                        .unwrap();
                    if u % 2 == 1 {
                        session
                            .handle_line(&format!("{} QUIT :gone", prefix))
                            .unwrap();
                    } else if u % 4 == 0 {
                        session
                            .handle_line(&format!("{} NICK :{}_r", prefix, nick(t, u)))
                            .unwrap();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    for name in CHANNELS {
        let channel = session.channels().get(name).unwrap();
        assert!(channel.users().is_consistent(), "{} is inconsistent", name);
        assert!(channel.users().has_name("anolis"));
    }

    let one = session.channels().get("#one").unwrap();
    assert_eq!(one.users().len(), 1);

    for name in ["#two", "#three"] {
        let channel = session.channels().get(name).unwrap();
        for t in 0..THREADS {
            for u in 0..USERS_PER_THREAD {
                let original = nick(t, u);
                let renamed = format!("{}_r", original);
                match u {
                    u if u % 2 == 1 => {
                        assert!(!channel.users().has_name(&original));
                        assert!(!channel.users().has_name(&renamed));
                    }
                    u if u % 4 == 0 => {
                        assert!(channel.users().has_name(&renamed), "{} missing {}", name, renamed);
                        assert!(!channel.users().has_name(&original));
                    }
                    _ => assert!(channel.users().has_name(&original)),
                }
            }
        }
        let survivors = THREADS * ((USERS_PER_THREAD + 1) / 2);
        assert_eq!(channel.users().len(), survivors + 1);
    }
}

#[test]
fn test_registration_while_dispatching() {
    let (session, _outbox) = Session::new("anolis");
    session.handle_line(":anolis!bot@host JOIN #x").unwrap();

    let registrar = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for _ in 0..100 {
                session
                    .events()
                    .register("PRIVMSG", |_: &mut anolis::Message, _: &dyn Context| {});
            }
        })
    };

    for i in 0..200 {
        session
            .handle_line(&format!(":p{}!i@h PRIVMSG #x :hi", i))
            .unwrap();
    }
    registrar.join().unwrap();

    assert_eq!(session.events().count("PRIVMSG"), 101);
    assert_eq!(session.channels().get("#x").unwrap().users().len(), 201);
}
