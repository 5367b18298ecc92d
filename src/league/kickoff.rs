// src/league/kickoff.rs
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Combine a match date with a local kickoff time under the league's fixed
/// reference offset and normalize to UTC. Fixtures without a kickoff time
/// have no instant.
pub fn kickoff_instant(
    date: NaiveDate,
    time: Option<NaiveTime>,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let time = time?;
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn no_time_means_no_instant() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(kickoff_instant(date, None, offset(2)), None);
    }

    #[test]
    fn local_time_is_normalized_to_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let time = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

        let instant = kickoff_instant(date, Some(time), offset(2)).unwrap();
        assert_eq!(instant.hour(), 17);
        assert_eq!(instant.minute(), 30);
        assert_eq!(instant.date_naive(), date);
    }

    #[test]
    fn western_offset_can_roll_into_next_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let time = NaiveTime::from_hms_opt(23, 0, 0).unwrap();

        let instant = kickoff_instant(date, Some(time), offset(-5)).unwrap();
        assert_eq!(
            instant.date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
        assert_eq!(instant.hour(), 4);
    }
}
