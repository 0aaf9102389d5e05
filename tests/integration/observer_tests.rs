//! Observer subscription and fan-out.

use std::sync::Arc;

use catpoint::alarm::{AlarmStatus, ArmingMode};
use catpoint::app::events::StatusEvent;
use catpoint::app::ports::StatusListener;

use crate::mock_repo::{RecordingListener, RecordingRepository, service_with};

#[test]
fn every_subscriber_sees_every_event() {
    let repo = RecordingRepository::new(
        ArmingMode::ArmedHome,
        AlarmStatus::NoAlarm,
        &[("Door", false)],
    );
    let (mut svc, first) = service_with(repo);
    let second = Arc::new(RecordingListener::default());
    svc.subscribe(second.clone());

    svc.set_sensor_active("Door", true).unwrap();
    svc.report_detection(true).unwrap();

    // Order between subscribers is not guaranteed; compare per subscriber.
    let expected = [
        StatusEvent::AlarmStatus(AlarmStatus::PendingAlarm),
        StatusEvent::SensorsChanged,
        StatusEvent::AlarmStatus(AlarmStatus::Alarm),
        StatusEvent::CatDetected(true),
    ];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}

#[test]
fn duplicate_subscription_delivers_once() {
    let repo = RecordingRepository::new(ArmingMode::ArmedAway, AlarmStatus::NoAlarm, &[]);
    let (mut svc, listener) = service_with(repo);
    svc.subscribe(listener.clone());
    assert_eq!(svc.listener_count(), 1);

    svc.report_detection(true).unwrap();

    assert_eq!(listener.events(), [StatusEvent::CatDetected(true)]);
}

#[test]
fn unsubscribed_listener_hears_nothing_more() {
    let repo = RecordingRepository::new(ArmingMode::ArmedAway, AlarmStatus::NoAlarm, &[]);
    let (mut svc, listener) = service_with(repo);

    svc.report_detection(true).unwrap();
    let handle: Arc<dyn StatusListener> = listener.clone();
    svc.unsubscribe(&handle);
    svc.report_detection(false).unwrap();

    assert_eq!(listener.events(), [StatusEvent::CatDetected(true)]);
    assert_eq!(svc.listener_count(), 0);
}

#[test]
fn unsubscribing_a_stranger_is_a_no_op() {
    let repo = RecordingRepository::new(ArmingMode::Disarmed, AlarmStatus::NoAlarm, &[]);
    let (mut svc, _) = service_with(repo);
    let stranger: Arc<dyn StatusListener> = Arc::new(RecordingListener::default());

    svc.unsubscribe(&stranger);

    assert_eq!(svc.listener_count(), 1);
}
