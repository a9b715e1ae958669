use super::*;

#[test]
fn splits_remaining_time() {
    let left = 3 * DAY_MS + 4 * HOUR_MS + 5 * MINUTE_MS + 6 * SECOND_MS + 999;
    assert_eq!(
        countdown(left, 0),
        Countdown::Remaining { days: 3, hours: 4, minutes: 5, seconds: 6 }
    );
}

#[test]
fn exact_target_is_all_zero() {
    assert_eq!(
        countdown(5_000, 5_000),
        Countdown::Remaining { days: 0, hours: 0, minutes: 0, seconds: 0 }
    );
}

#[test]
fn past_target_has_arrived() {
    assert_eq!(countdown(5_000, 5_001), Countdown::Arrived);
    assert_eq!(Countdown::Arrived.display(), None);
}

#[test]
fn display_pads_to_two_digits() {
    let fields = countdown(112 * DAY_MS + 7 * SECOND_MS, 0).display().unwrap();
    assert_eq!(
        fields,
        [
            ("days", "112".to_owned()),
            ("hours", "00".to_owned()),
            ("minutes", "00".to_owned()),
            ("seconds", "07".to_owned()),
        ]
    );
}

#[test]
fn extreme_timestamps_saturate() {
    assert_eq!(countdown(i64::MIN, i64::MAX), Countdown::Arrived);
    let Countdown::Remaining { days, .. } = countdown(i64::MAX, i64::MIN) else {
        panic!("far future target should still be remaining");
    };
    assert_eq!(days, i64::MAX / DAY_MS);
}
