//! Cat-detection rules and the image-processing entry point.

use catpoint::Error;
use catpoint::alarm::{AlarmStatus, ArmingMode};
use catpoint::app::events::StatusEvent;
use catpoint::app::ports::{CameraFrame, DetectionError};

use crate::mock_repo::{RecordingRepository, StubDetector, service_with, service_with_detector};

#[test]
fn cat_while_armed_home_alarms_from_any_status() {
    for status in AlarmStatus::ALL {
        let repo = RecordingRepository::new(ArmingMode::ArmedHome, status, &[]);
        let (mut svc, _) = service_with(repo);

        svc.report_detection(true).unwrap();

        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm, "from {status}");
    }
}

#[test]
fn cat_while_away_or_disarmed_changes_nothing() {
    for mode in [ArmingMode::ArmedAway, ArmingMode::Disarmed] {
        let repo = RecordingRepository::new(mode, AlarmStatus::PendingAlarm, &[("Door", true)]);
        let (mut svc, listener) = service_with(repo);

        svc.report_detection(true).unwrap();

        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm, "{mode}");
        assert!(svc.repository().status_writes().is_empty());
        assert_eq!(listener.events(), [StatusEvent::CatDetected(true)]);
        assert!(svc.cat_detected());
    }
}

#[test]
fn no_cat_and_no_active_sensors_clears_when_armed() {
    for mode in [ArmingMode::ArmedHome, ArmingMode::ArmedAway] {
        let repo = RecordingRepository::new(
            mode,
            AlarmStatus::Alarm,
            &[("Door", false), ("Window", false)],
        );
        let (mut svc, _) = service_with(repo);

        svc.report_detection(false).unwrap();

        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm, "{mode}");
    }
}

#[test]
fn no_cat_with_empty_registry_clears() {
    let repo = RecordingRepository::new(ArmingMode::ArmedAway, AlarmStatus::PendingAlarm, &[]);
    let (mut svc, _) = service_with(repo);

    svc.report_detection(false).unwrap();

    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn no_cat_with_an_active_sensor_keeps_status() {
    let repo = RecordingRepository::new(
        ArmingMode::ArmedHome,
        AlarmStatus::Alarm,
        &[("Door", false), ("Window", true)],
    );
    let (mut svc, _) = service_with(repo);

    svc.report_detection(false).unwrap();

    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert!(svc.repository().status_writes().is_empty());
}

#[test]
fn no_cat_while_disarmed_only_notifies() {
    let repo = RecordingRepository::new(ArmingMode::Disarmed, AlarmStatus::NoAlarm, &[]);
    let (mut svc, listener) = service_with(repo);

    svc.report_detection(false).unwrap();

    assert!(svc.repository().calls.is_empty());
    assert_eq!(listener.events(), [StatusEvent::CatDetected(false)]);
}

#[test]
fn cat_then_clear_walks_the_ladder_back() {
    let repo = RecordingRepository::new(ArmingMode::ArmedHome, AlarmStatus::NoAlarm, &[]);
    let (mut svc, listener) = service_with(repo);

    svc.report_detection(true).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    svc.report_detection(false).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    assert_eq!(
        listener.events(),
        [
            StatusEvent::AlarmStatus(AlarmStatus::Alarm),
            StatusEvent::CatDetected(true),
            StatusEvent::AlarmStatus(AlarmStatus::NoAlarm),
            StatusEvent::CatDetected(false),
        ]
    );
}

#[test]
fn process_image_feeds_the_detector_answer_into_the_rules() {
    let repo = RecordingRepository::new(ArmingMode::ArmedHome, AlarmStatus::NoAlarm, &[]);
    let (mut svc, listener) = service_with_detector(repo, StubDetector::answering(true));

    let found = svc.process_image(&CameraFrame::from_bytes(vec![0xFF, 0xD8])).unwrap();

    assert!(found);
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert_eq!(listener.count(StatusEvent::CatDetected(true)), 1);
}

#[test]
fn detector_fault_propagates_and_notifies_nobody() {
    let repo = RecordingRepository::new(ArmingMode::ArmedHome, AlarmStatus::NoAlarm, &[]);
    let detector = StubDetector {
        answer: Err(DetectionError::Unavailable),
        thresholds: Vec::new(),
    };
    let (mut svc, listener) = service_with_detector(repo, detector);

    let err = svc.process_image(&CameraFrame::default()).unwrap_err();

    assert_eq!(err, Error::Detection(DetectionError::Unavailable));
    assert!(listener.events().is_empty());
    assert!(svc.repository().calls.is_empty());
}
