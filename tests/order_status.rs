use tableside::models::order::OrderStatus;

#[test]
fn status_strings_round_trip() {
    for status in [
        OrderStatus::New,
        OrderStatus::OrderReceived,
        OrderStatus::Preparing,
        OrderStatus::OnTheWay,
        OrderStatus::PickupReady,
        OrderStatus::Delivered,
        OrderStatus::PickedUp,
        OrderStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
    }
    assert!("Unknown".parse::<OrderStatus>().is_err());
}

#[test]
fn workflow_follows_the_two_fulfilment_branches() {
    use OrderStatus::*;

    assert!(New.can_transition_to(OrderReceived));
    assert!(OrderReceived.can_transition_to(Preparing));
    assert!(Preparing.can_transition_to(OnTheWay));
    assert!(Preparing.can_transition_to(PickupReady));
    assert!(OnTheWay.can_transition_to(Delivered));
    assert!(PickupReady.can_transition_to(PickedUp));

    // No skipping ahead, no crossing branches, no going backwards.
    assert!(!New.can_transition_to(Preparing));
    assert!(!New.can_transition_to(Delivered));
    assert!(!OrderReceived.can_transition_to(OnTheWay));
    assert!(!OnTheWay.can_transition_to(PickedUp));
    assert!(!PickupReady.can_transition_to(Delivered));
    assert!(!Preparing.can_transition_to(OrderReceived));
    assert!(!Delivered.can_transition_to(New));
}

#[test]
fn cancellation_is_allowed_until_a_terminal_state() {
    use OrderStatus::*;

    for status in [New, OrderReceived, Preparing, OnTheWay, PickupReady] {
        assert!(status.can_transition_to(Cancelled), "{status} -> Cancelled");
        assert!(!status.is_terminal());
    }
    for status in [Delivered, PickedUp, Cancelled] {
        assert!(status.is_terminal());
        assert!(!status.can_transition_to(Cancelled), "{status} is final");
        assert!(!status.can_transition_to(New));
    }
}
