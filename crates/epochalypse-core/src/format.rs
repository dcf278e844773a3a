//! Textual projections of an instant
//!
//! Date fields use `Www Mmm _d hh:mm:ss ZONE yyyy`, the layout `date(1)` prints
//! by default:
//!
//! ```text
//! Thu Jan  1 00:01:40 UTC 1970
//! ```
//!
//! Parsing splits on whitespace and expects exactly six tokens. The weekday
//! must be a weekday name but is not checked against the date. The zone token
//! is checked per field, see [`parse_utc`] and [`parse_local`].

use chrono::{FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc, Weekday};

use crate::{Instant, LocalZone, ParseError, ParseResult};

/// Everything before the zone token
const WALL_CLOCK_FORMAT: &str = "%a %b %e %H:%M:%S";
/// Time-of-day token
const TIME_FORMAT: &str = "%H:%M:%S";

/// Zone tokens the UTC field accepts
const UTC_TOKENS: [&str; 2] = ["UTC", "GMT"];

/// Unix field text: plain decimal seconds
pub fn format_unix(instant: Instant) -> String {
    instant.as_unix().to_string()
}

/// UTC field text
pub fn format_utc(instant: Instant) -> String {
    format_with(instant, Utc.fix(), "UTC")
}

/// Local field text, named with the zone's abbreviation at `instant`
pub fn format_local<Z: LocalZone + ?Sized>(zone: &Z, instant: Instant) -> String {
    let name = zone.describe(instant);
    format_with(instant, name.offset, &name.abbreviation)
}

fn format_with(instant: Instant, offset: FixedOffset, abbreviation: &str) -> String {
    let local = instant.to_utc().with_timezone(&offset);
    format!(
        "{} {} {}",
        local.format(WALL_CLOCK_FORMAT),
        abbreviation,
        local.format("%Y")
    )
}

/// Parse Unix field text. A leading `+` or `-` is allowed.
pub fn parse_unix(text: &str) -> ParseResult<Instant> {
    let secs: i64 = text.parse()?;
    Instant::from_unix(secs).ok_or(ParseError::OutOfRange(secs))
}

/// Parse UTC field text. The zone token must be `UTC` or `GMT`.
pub fn parse_utc(text: &str) -> ParseResult<Instant> {
    let parsed = DateTimeText::parse(text)?;
    if !is_utc_token(parsed.zone) {
        return Err(ParseError::UnknownZone(parsed.zone.to_string()));
    }
    wall_as_utc(parsed.wall)
}

/// Parse local field text.
///
/// The wall-clock reading is resolved in `zone`. When it maps to more than
/// one instant (a DST overlap) the zone token picks the one with that
/// abbreviation. A `UTC`/`GMT` token that matches no candidate reads the
/// wall clock as UTC. Any other token falls back to the earliest candidate,
/// so a stale abbreviation left over from editing the date still parses.
/// Wall-clock readings skipped by a DST gap fail.
pub fn parse_local<Z: LocalZone + ?Sized>(zone: &Z, text: &str) -> ParseResult<Instant> {
    let parsed = DateTimeText::parse(text)?;
    let candidates = zone.resolve(parsed.wall);

    if let Some(instant) = candidates
        .iter()
        .copied()
        .find(|candidate| zone.describe(*candidate).abbreviation == parsed.zone)
    {
        return Ok(instant);
    }
    if is_utc_token(parsed.zone) {
        return wall_as_utc(parsed.wall);
    }
    candidates
        .first()
        .copied()
        .ok_or(ParseError::NonexistentLocalTime(parsed.wall))
}

fn is_utc_token(token: &str) -> bool {
    UTC_TOKENS.contains(&token)
}

fn wall_as_utc(wall: NaiveDateTime) -> ParseResult<Instant> {
    let secs = wall.and_utc().timestamp();
    Instant::from_unix(secs).ok_or(ParseError::OutOfRange(secs))
}

/// Date field text split into its wall-clock reading and zone token
#[derive(Debug)]
struct DateTimeText<'a> {
    wall: NaiveDateTime,
    zone: &'a str,
}

impl<'a> DateTimeText<'a> {
    fn parse(text: &'a str) -> ParseResult<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [weekday, month, day, time, zone, year] = tokens.as_slice() else {
            return Err(ParseError::TokenCount(tokens.len()));
        };
        weekday
            .parse::<Weekday>()
            .map_err(|_| ParseError::InvalidWeekday(weekday.to_string()))?;
        // Abbreviated or full name, any case
        let month = month
            .parse::<Month>()
            .map_err(|_| ParseError::InvalidMonth(month.to_string()))?;
        let invalid_date = || ParseError::InvalidDate(format!("{year} {} {day}", month.name()));
        let day: u32 = day.parse().map_err(|_| invalid_date())?;
        let year: i32 = year.parse().map_err(|_| invalid_date())?;
        let date = NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .ok_or_else(invalid_date)?;
        let time = NaiveTime::parse_from_str(time, TIME_FORMAT)?;
        Ok(DateTimeText {
            wall: date.and_time(time),
            zone: *zone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedZone, ZoneName};
    use proptest::prelude::*;

    fn at(secs: i64) -> Instant {
        Instant::from_unix(secs).unwrap()
    }

    fn cet() -> FixedZone {
        FixedZone::east(3600, "CET").unwrap()
    }

    /// Toy zone: `XDT` (+1h) before `FALL_BACK`, `XST` (+0) from then on.
    /// Wall-clock readings in the hour after `FALL_BACK` happen twice.
    struct FallBackZone;

    const FALL_BACK: i64 = 1_000_000_000;

    impl LocalZone for FallBackZone {
        fn describe(&self, instant: Instant) -> ZoneName {
            if instant.as_unix() < FALL_BACK {
                ZoneName {
                    offset: FixedOffset::east_opt(3600).unwrap(),
                    abbreviation: "XDT".to_string(),
                }
            } else {
                ZoneName {
                    offset: FixedOffset::east_opt(0).unwrap(),
                    abbreviation: "XST".to_string(),
                }
            }
        }

        fn resolve(&self, local: NaiveDateTime) -> Vec<Instant> {
            let wall = local.and_utc().timestamp();
            let mut out = Vec::new();
            if wall - 3600 < FALL_BACK {
                out.push(at(wall - 3600));
            }
            if wall >= FALL_BACK {
                out.push(at(wall));
            }
            out
        }
    }

    /// Toy zone that skips the hour starting at `SPRING_FORWARD`
    struct GapZone;

    const SPRING_FORWARD: i64 = 2_000_000_000;

    impl LocalZone for GapZone {
        fn describe(&self, instant: Instant) -> ZoneName {
            let secs = if instant.as_unix() < SPRING_FORWARD { 0 } else { 3600 };
            ZoneName::numeric(FixedOffset::east_opt(secs).unwrap())
        }

        fn resolve(&self, local: NaiveDateTime) -> Vec<Instant> {
            let wall = local.and_utc().timestamp();
            if wall < SPRING_FORWARD {
                vec![at(wall)]
            } else if wall < SPRING_FORWARD + 3600 {
                Vec::new()
            } else {
                vec![at(wall - 3600)]
            }
        }
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_unix(Instant::EPOCH), "0");
        assert_eq!(format_utc(Instant::EPOCH), "Thu Jan  1 00:00:00 UTC 1970");
        assert_eq!(
            format_local(&cet(), Instant::EPOCH),
            "Thu Jan  1 01:00:00 CET 1970"
        );
    }

    #[test]
    fn test_format_hundred_seconds() {
        assert_eq!(format_utc(at(100)), "Thu Jan  1 00:01:40 UTC 1970");
        assert_eq!(format_unix(at(100)), "100");
    }

    #[test]
    fn test_format_two_digit_day() {
        assert_eq!(format_utc(at(1_700_000_000)), "Tue Nov 14 22:13:20 UTC 2023");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_unix(at(-1)), "-1");
        assert_eq!(format_utc(at(-1)), "Wed Dec 31 23:59:59 UTC 1969");
    }

    #[test]
    fn test_parse_unix() {
        assert_eq!(parse_unix("100"), Ok(at(100)));
        assert_eq!(parse_unix("+100"), Ok(at(100)));
        assert_eq!(parse_unix("-100"), Ok(at(-100)));
        assert!(matches!(parse_unix("abc"), Err(ParseError::InvalidSeconds(_))));
        assert!(matches!(parse_unix(""), Err(ParseError::InvalidSeconds(_))));
        assert!(matches!(parse_unix("-"), Err(ParseError::InvalidSeconds(_))));
        assert!(matches!(
            parse_unix("99999999999999999999"),
            Err(ParseError::InvalidSeconds(_))
        ));
        assert_eq!(
            parse_unix(&i64::MAX.to_string()),
            Err(ParseError::OutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_parse_utc() {
        assert_eq!(parse_utc("Thu Jan  1 00:01:40 UTC 1970"), Ok(at(100)));
        assert_eq!(parse_utc("Thu Jan 1 00:01:40 GMT 1970"), Ok(at(100)));
        assert_eq!(parse_utc("  Thu   Jan 1 00:01:40 UTC 1970  "), Ok(at(100)));
    }

    #[test]
    fn test_parse_utc_rejects_other_zones() {
        assert_eq!(
            parse_utc("Thu Jan  1 01:00:00 CET 1970"),
            Err(ParseError::UnknownZone("CET".to_string()))
        );
    }

    #[test]
    fn test_parse_ignores_weekday_mismatch() {
        // 1970-01-01 was a Thursday
        assert_eq!(parse_utc("Mon Jan  1 00:00:00 UTC 1970"), Ok(Instant::EPOCH));
    }

    #[test]
    fn test_parse_accepts_long_names() {
        assert_eq!(
            parse_utc("thursday january 1 00:00:00 UTC 1970"),
            Ok(Instant::EPOCH)
        );
    }

    #[test]
    fn test_parse_month_any_case() {
        for month in ["Jan", "jan", "JAN", "January", "january", "JANUARY"] {
            let text = format!("Thu {month} 1 00:01:40 UTC 1970");
            assert_eq!(parse_utc(&text), Ok(at(100)), "{text}");
        }
        assert_eq!(
            parse_local(&cet(), "Sat September 13 01:00:00 CET 1975"),
            parse_local(&cet(), "Sat Sep 13 01:00:00 CET 1975")
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_utc("not a date"), Err(ParseError::TokenCount(3)));
        assert_eq!(parse_utc(""), Err(ParseError::TokenCount(0)));
        assert_eq!(
            parse_utc("Xyz Jan  1 00:00:00 UTC 1970"),
            Err(ParseError::InvalidWeekday("Xyz".to_string()))
        );
        assert_eq!(
            parse_utc("Thu Feb 30 00:00:00 UTC 1970"),
            Err(ParseError::InvalidDate("1970 February 30".to_string()))
        );
        assert!(matches!(
            parse_utc("Thu Jan 1st 00:00:00 UTC 1970"),
            Err(ParseError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_utc("Thu Jan  1 25:00:00 UTC 1970"),
            Err(ParseError::InvalidDateTime(_))
        ));
        assert_eq!(
            parse_utc("Thu Foo  1 00:00:00 UTC 1970"),
            Err(ParseError::InvalidMonth("Foo".to_string()))
        );
        assert!(matches!(
            parse_utc("Thu Janu 1 00:00:00 UTC 1970"),
            Err(ParseError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_parse_local_fixed() {
        assert_eq!(parse_local(&cet(), "Thu Jan  1 01:00:00 CET 1970"), Ok(Instant::EPOCH));
    }

    #[test]
    fn test_parse_local_utc_token() {
        assert_eq!(parse_local(&cet(), "Thu Jan  1 00:00:00 UTC 1970"), Ok(Instant::EPOCH));
    }

    #[test]
    fn test_parse_local_stale_abbreviation() {
        // Unknown token: the wall clock is still read in the local zone
        assert_eq!(parse_local(&cet(), "Thu Jan  1 01:00:00 PST 1970"), Ok(Instant::EPOCH));
    }

    #[test]
    fn test_parse_local_overlap_uses_abbreviation() {
        let zone = FallBackZone;
        let daylight = at(FALL_BACK - 1800);
        let standard = at(FALL_BACK + 1800);

        let daylight_text = format_local(&zone, daylight);
        let standard_text = format_local(&zone, standard);
        // Same wall clock, different abbreviation
        assert_eq!(daylight_text.replace("XDT", "XST"), standard_text);

        assert_eq!(parse_local(&zone, &daylight_text), Ok(daylight));
        assert_eq!(parse_local(&zone, &standard_text), Ok(standard));
    }

    #[test]
    fn test_parse_local_gap() {
        let zone = GapZone;
        let wall = at(SPRING_FORWARD + 1800).to_utc().naive_utc();
        let text = format!("{} +0000 {}", wall.format(WALL_CLOCK_FORMAT), wall.format("%Y"));
        assert_eq!(
            parse_local(&zone, &text),
            Err(ParseError::NonexistentLocalTime(wall))
        );
    }

    #[test]
    fn test_round_trip_at_extremes() {
        for secs in [Instant::min_unix(), Instant::max_unix()] {
            let instant = at(secs);
            assert_eq!(parse_unix(&format_unix(instant)), Ok(instant));
            assert_eq!(parse_utc(&format_utc(instant)), Ok(instant));
            assert_eq!(parse_local(&cet(), &format_local(&cet(), instant)), Ok(instant));
        }
    }

    proptest! {
        #[test]
        fn prop_unix_round_trip(secs in Instant::min_unix()..=Instant::max_unix()) {
            let instant = at(secs);
            prop_assert_eq!(parse_unix(&format_unix(instant)), Ok(instant));
        }

        #[test]
        fn prop_utc_round_trip(secs in -100_000_000_000i64..100_000_000_000i64) {
            let instant = at(secs);
            prop_assert_eq!(parse_utc(&format_utc(instant)), Ok(instant));
        }

        #[test]
        fn prop_local_round_trip(
            secs in -100_000_000_000i64..100_000_000_000i64,
            offset_minutes in -(14 * 60)..=(14 * 60),
        ) {
            let zone = FixedZone::new(
                FixedOffset::east_opt(offset_minutes * 60).unwrap(),
                "LCL",
            );
            let instant = at(secs);
            prop_assert_eq!(parse_local(&zone, &format_local(&zone, instant)), Ok(instant));
        }

        #[test]
        fn prop_dst_round_trip(secs in (FALL_BACK - 7200)..(FALL_BACK + 7200)) {
            let instant = at(secs);
            prop_assert_eq!(parse_local(&FallBackZone, &format_local(&FallBackZone, instant)), Ok(instant));
        }

        #[test]
        fn prop_fields_agree(secs in -100_000_000_000i64..100_000_000_000i64) {
            let instant = at(secs);
            let zone = cet();
            let from_unix = parse_unix(&format_unix(instant));
            let from_utc = parse_utc(&format_utc(instant));
            let from_local = parse_local(&zone, &format_local(&zone, instant));
            prop_assert_eq!(&from_unix, &from_utc);
            prop_assert_eq!(&from_utc, &from_local);
        }
    }
}
