pub mod fixtures;

use demoji_coordinator::{Mode, Session, SharedDocument};
use demoji_dom::Document;
use demoji_domain::{RelayMessage, StateUpdate};
use demoji_relay::Relay;
use fixtures::*;
use std::time::Duration;

async fn wait_until(doc: &SharedDocument, ready: impl Fn(&Document) -> bool) {
    while !doc.read(&ready) {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn run_applies_relay_messages_in_order() {
    let doc = SharedDocument::new(page());
    let relay = Relay::new();
    let inbox = relay.attach("tab-1");

    let disable = StateUpdate { enabled: Some(false), ..Default::default() };
    let allow_rocket =
        StateUpdate { enabled: Some(true), allow_list: Some("🚀".into()), block_list: None };
    relay.forward(RelayMessage::from(disable)).await;
    relay.forward(RelayMessage::from(allow_rocket)).await;
    assert_eq!(relay.shutdown(), 1);

    let mut session = Session::new(store(true, "", ""));
    let mode = session.run(&doc, inbox).await;

    assert_eq!(mode, Mode::Active);
    assert_eq!(session.config().allow_list, vec!['🚀']);
    assert_eq!(doc.read(|d| d.text_content(first(d, "p"))), "Hello  World 🚀");
}

#[tokio::test]
async fn run_on_a_disabled_profile_stays_idle() {
    let doc = SharedDocument::new(page());
    let relay = Relay::new();
    let inbox = relay.attach("tab-1");
    let _ = relay.shutdown();

    let mut session = Session::new(store(false, "", ""));
    assert_eq!(session.run(&doc, inbox).await, Mode::Idle);
    assert_eq!(doc.read(|d| d.text_content(first(d, "p"))), "Hello 😀 World 🚀");
}

#[tokio::test]
async fn started_session_is_not_restarted_by_run() {
    let mut page = page();
    let mut session = Session::new(store(true, "", ""));
    session.start(&mut page).await;

    let doc = SharedDocument::new(page);
    let relay = Relay::new();
    let inbox = relay.attach("tab-1");
    let _ = relay.shutdown();

    assert_eq!(session.run(&doc, inbox).await, Mode::Active);
}

#[tokio::test]
async fn host_edits_are_scrubbed_while_running() {
    let doc = SharedDocument::new(page());
    let relay = Relay::new();
    let inbox = relay.attach("tab-1");
    let mut session = Session::new(store(true, "", ""));

    let host = async {
        wait_until(&doc, Document::is_observing).await;

        let (added, untouched) = doc.edit(|d| {
            let body = d.body().unwrap();
            let p = d.create_element("p");
            let text = d.create_text("late 🎉");
            d.append_child(p, text).unwrap();
            d.append_child(body, p).unwrap();
            (p, first(d, "script"))
        });

        let scrubbed = wait_until(&doc, |d| d.text_content(added) == "late ");
        tokio::time::timeout(Duration::from_secs(1), scrubbed)
            .await
            .expect("edit handled before the relay closed");
        assert_eq!(doc.read(|d| d.text_content(untouched)), "var s = '😀';");

        doc.edit(|d| {
            let text = d.children(added).next().unwrap();
            d.set_text(text, "again 🚀").unwrap();
        });
        let rescrubbed = wait_until(&doc, |d| d.text_content(added) == "again ");
        tokio::time::timeout(Duration::from_secs(1), rescrubbed)
            .await
            .expect("text change handled before the relay closed");

        relay.shutdown()
    };

    let (mode, detached) = tokio::join!(session.run(&doc, inbox), host);
    assert_eq!(mode, Mode::Active);
    assert_eq!(detached, 1);
}

#[tokio::test]
async fn edit_racing_the_shutdown_is_still_handled() {
    let doc = SharedDocument::new(page());
    let relay = Relay::new();
    let inbox = relay.attach("tab-1");
    let mut session = Session::new(store(true, "", ""));

    let host = async {
        wait_until(&doc, Document::is_observing).await;
        let body = doc.read(|d| d.body().unwrap());
        let added = doc.edit(|d| {
            let text = d.create_text("bye 👋");
            d.append_child(body, text).unwrap();
            text
        });
        let _ = relay.shutdown();
        added
    };

    let (_, added) = tokio::join!(session.run(&doc, inbox), host);
    assert_eq!(doc.read(|d| d.text(added).map(str::to_owned)), Some("bye ".to_owned()));
}
