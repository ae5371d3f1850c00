use chrono::{DateTime, SecondsFormat};

/// Convert OLE Automation time (sometimes also referred to as Variant time) to unixepoch
pub(crate) fn ole_automationtime_to_unixepoch(oletime: &f64) -> i64 {
    // OLE automation time is just the number of days since Jan 1 1900 as float64
    let hours = 24.0;
    let mins = 60.0;
    let secs = 60.0;
    let adjust_epoch = 2208988800.0;

    // Jan 1 1900 is actually a value of two (2) days instead of one (1) due to some old Lotus bug
    let adjust_jan1 = 172800.0;

    let mut seconds = oletime * hours * mins * secs;
    seconds -= adjust_epoch;
    seconds -= adjust_jan1;
    seconds.round() as i64
}

/// Convert unixepoch to ISO8601 format
pub(crate) fn unixepoch_to_iso(timestamp: i64) -> String {
    let iso_opt = DateTime::from_timestamp(timestamp, 0);
    match iso_opt {
        Some(result) => result.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => String::from("1970-01-01T00:00:00.000Z"),
    }
}
