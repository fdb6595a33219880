//! Delivery specs
//!
//! A sender notifies every subscribed receiver, once per subscription,
//! in subscription order.

use crate::prelude::*;
use std::sync::Arc;

#[test]
fn receive_message_from_single_sender() {
    let sender = Sender::new();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());

    receiver.subscribe_to_messages_from(&sender);
    sender
        .send_message(MessageLevel::INFO, "This is a test.")
        .unwrap();

    assert!(fake.message_received());
    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(&calls[0].sender, sender.sender_ref());
    assert_eq!(calls[0].level, MessageLevel::INFO);
    assert_eq!(calls[0].text, "This is a test.");
    assert_eq!(calls[0].cause, None);
}

#[test]
fn receive_message_from_multiple_senders() {
    let a_sender = Sender::new();
    let another_sender = Sender::new();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());

    receiver.subscribe_to_messages_from(&a_sender);
    receiver.subscribe_to_messages_from(&another_sender);

    a_sender
        .send_message(MessageLevel::INFO, "Message sent from a sender.")
        .unwrap();
    another_sender
        .send_message(MessageLevel::INFO, "Message sent from another sender.")
        .unwrap();

    let senders: Vec<SenderRef> = fake.calls().into_iter().map(|c| c.sender).collect();
    assert_eq!(
        senders,
        vec![
            a_sender.sender_ref().clone(),
            another_sender.sender_ref().clone()
        ]
    );
}

#[test]
fn cause_travels_with_the_message() {
    let sender = Sender::new();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    receiver.subscribe_to_messages_from(&sender);

    sender
        .send_message_with_cause(
            MessageLevel::FATAL,
            "cannot continue",
            Arc::new(std::io::Error::other("out of memory")),
        )
        .unwrap();

    let calls = fake.calls();
    assert_eq!(calls[0].level, MessageLevel::FATAL);
    assert_eq!(calls[0].cause.as_deref(), Some("out of memory"));
}

#[test]
fn sending_with_no_subscribers_does_nothing() {
    let sender = Sender::new();
    sender.send_message(MessageLevel::TRACE, "unheard").unwrap();
    assert_eq!(sender.subscriber_count(), 0);
}

#[test]
fn every_subscriber_is_notified_in_subscription_order() {
    let sender = Sender::new();
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let receivers: Vec<_> = (0..4)
        .map(|n| {
            let order = Arc::clone(&order);
            Receiver::new(
                move |_: &SenderRef, _: &Message| -> Result<(), mb_core::HandlerError> {
                    order.lock().unwrap().push(n);
                    Ok(())
                },
            )
        })
        .collect();
    for receiver in &receivers {
        receiver.subscribe_to_messages_from(&sender);
    }

    sender.send_message(MessageLevel::INFO, "roll call").unwrap();

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn out_of_range_levels_are_delivered_verbatim() {
    let sender = Sender::new();
    let fake = FakeReceiver::new();
    let receiver = Receiver::new(fake.clone());
    receiver.subscribe_to_messages_from(&sender);

    sender.send_message(MessageLevel::new(-3), "low").unwrap();
    sender.send_message(MessageLevel::new(42), "high").unwrap();

    let levels: Vec<i32> = fake.calls().iter().map(|c| c.level.value()).collect();
    assert_eq!(levels, vec![-3, 42]);
}

#[test]
fn failing_receiver_does_not_stop_the_others() {
    let sender = Sender::new();
    let broken = FakeReceiver::new();
    broken.fail_with("broken receiver");
    let healthy = FakeReceiver::new();
    let first = Receiver::new(broken.clone());
    let second = Receiver::new(healthy.clone());
    first.subscribe_to_messages_from(&sender);
    second.subscribe_to_messages_from(&sender);

    let err = sender
        .send_message(MessageLevel::ERROR, "x")
        .unwrap_err();

    assert!(broken.message_received());
    assert!(healthy.message_received());
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].receiver, first.id());
}
