//! Calendar arithmetic checked against chrono's proleptic Gregorian calendar

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};
use fdl_times::{days_from_civil, decode_row, FlightWindow, ParsedRow, WindowAggregator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_day_count_matches_chrono_for_every_supported_day() {
    let unix_epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let mut date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();

    while date <= last {
        let expected = date.signed_duration_since(unix_epoch).num_days();
        let actual = days_from_civil(
            i64::from(date.year()),
            i64::from(date.month()),
            i64::from(date.day()),
        );
        assert_eq!(actual, expected, "{date}");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_decoded_rows_round_trip_through_reference_calendar() {
    let mut rng = StdRng::seed_from_u64(0x5eed_f11e);
    let mut checked = 0;

    while checked < 5_000 {
        let year = rng.gen_range(2020..=2100);
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=31);
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let hour = rng.gen_range(0..24);
        let minute = rng.gen_range(0..60);
        let second = rng.gen_range(0..60);
        let negative = rng.gen_bool(0.5);
        let offset_hours = rng.gen_range(0..=12);
        let offset_minutes = [0, 15, 30, 45][rng.gen_range(0..4)];

        let sign = if negative { '-' } else { '+' };
        let line = format!(
            "{year:04}-{month:02}-{day:02}, {hour:02}:{minute:02}:{second:02},  {sign}{offset_hours:02}:{offset_minutes:02},"
        );
        let epoch = decode_row(line.as_bytes()).value();

        let magnitude = offset_hours * 3600 + offset_minutes * 60;
        let offset_seconds = if negative { -magnitude } else { magnitude };
        let zone = FixedOffset::east_opt(offset_seconds).unwrap();
        let local = date.and_hms_opt(hour, minute, second).unwrap();
        let reference = zone.from_local_datetime(&local).single().unwrap();
        assert_eq!(epoch, reference.timestamp(), "{line}");

        let back = DateTime::from_timestamp(epoch, 0)
            .unwrap()
            .with_timezone(&zone)
            .naive_local();
        assert_eq!(
            (back.year(), back.month(), back.day()),
            (year, month, day),
            "{line}"
        );
        assert_eq!(
            (back.hour(), back.minute(), back.second()),
            (hour, minute, second),
            "{line}"
        );
        checked += 1;
    }
}

#[test]
fn test_window_invariants_on_random_sequences() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let first_fix: i64 = rng.gen_range(1_577_836_800..4_102_444_800);
        let leading = rng.gen_range(0..50u64);

        let mut aggregator = WindowAggregator::new();
        for _ in 0..leading {
            aggregator.push(ParsedRow::SENTINEL);
        }
        aggregator.push(ParsedRow::new(first_fix));

        let mut latest = first_fix;
        for _ in 0..rng.gen_range(0..200) {
            let row = if rng.gen_bool(0.1) {
                ParsedRow::SENTINEL
            } else {
                let value = first_fix + rng.gen_range(-600..20_000);
                latest = latest.max(value);
                ParsedRow::new(value)
            };
            aggregator.push(row);
        }

        let (window, stats) = aggregator.finish();
        assert_eq!(window, FlightWindow::new(first_fix - leading as i64, latest));
        assert_eq!(stats.leading_sentinel_rows, leading);
        assert!(window.end >= window.start);

        let expected = format!("{:.1}", (window.end - window.start) as f64 / 3600.0);
        assert_eq!(fdl_times::format_duration_hours(&window), expected);
    }
}
