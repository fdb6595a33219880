//! Relay specs
//!
//! A relay is both a receiver and a sender. Forwarded messages keep the
//! sender that produced them.

use crate::prelude::*;

#[test]
fn message_relaying() {
    let sender = Sender::new();
    let relay = Relay::new(FakeRelay::new());
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());

    relay.subscribe_to_messages_from(&sender);
    receiver.subscribe_to_messages_from(&relay);

    sender
        .send_message(MessageLevel::INFO, "Message sent from a sender.")
        .unwrap();
    relay
        .send_message(MessageLevel::INFO, "Message sent from a relay.")
        .unwrap();

    assert!(relay.handler().message_received());
    assert!(fake.message_received());

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(&calls[0].sender, sender.sender_ref());
    assert_eq!(calls[0].text, "Message sent from a sender.");
    assert_eq!(&calls[1].sender, relay.sender_ref());
    assert_eq!(calls[1].text, "Message sent from a relay.");
}

#[test]
fn relay_only_forwards_when_its_handler_does() {
    let sender = Sender::new();
    let relay = Relay::new(FakeRelay::silent());
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    relay.subscribe_to_messages_from(&sender);
    receiver.subscribe_to_messages_from(&relay);

    sender.send_message(MessageLevel::INFO, "held").unwrap();

    assert!(relay.handler().message_received());
    assert!(!fake.message_received());
}

#[test]
fn chain_of_relays_reports_the_origin() {
    let origin = Sender::new();
    let chain = relay_chain(&origin, 5);
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    receiver.subscribe_to_messages_from(chain.last().unwrap());

    origin.send_message(MessageLevel::WARN, "far away").unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(&calls[0].sender, origin.sender_ref());
    assert!(chain.iter().all(|relay| &calls[0].sender != relay.sender_ref()));
}

#[test]
fn relay_may_receive_from_several_senders() {
    let a = Sender::new();
    let b = Sender::new();
    let relay = forwarding_relay();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    relay.subscribe_to_messages_from(&a);
    relay.subscribe_to_messages_from(&b);
    receiver.subscribe_to_messages_from(&relay);

    a.send_message(MessageLevel::INFO, "from a").unwrap();
    b.send_message(MessageLevel::INFO, "from b").unwrap();

    let calls = fake.calls();
    assert_eq!(&calls[0].sender, a.sender_ref());
    assert_eq!(&calls[1].sender, b.sender_ref());
}

#[test]
fn forward_message_is_available_outside_the_handler() {
    let elsewhere = Sender::new();
    let relay = forwarding_relay();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    receiver.subscribe_to_messages_from(&relay);

    relay
        .forward_message(
            elsewhere.sender_ref(),
            &Message::new(MessageLevel::DEBUG, "handed over"),
        )
        .unwrap();

    assert_eq!(&fake.calls()[0].sender, elsewhere.sender_ref());
}
