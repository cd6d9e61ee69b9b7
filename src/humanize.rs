use std::time::Duration;

use itertools::Itertools;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Renders an elapsed time using the largest units that apply, e.g.
/// `"2 hours 0 minutes 5 seconds"`. Sub-second precision is truncated.
pub fn humanize(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let units = [
        (total / DAY, "days"),
        (total % DAY / HOUR, "hours"),
        (total % HOUR / MINUTE, "minutes"),
        (total % MINUTE, "seconds"),
    ];
    let skip = if total < MINUTE {
        3
    } else if total < HOUR {
        2
    } else if total < DAY {
        1
    } else {
        0
    };
    units[skip..]
        .iter()
        .map(|(value, unit)| format!("{value} {unit}"))
        .join(" ")
}
