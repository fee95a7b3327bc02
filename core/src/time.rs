use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use anyhow::{anyhow, Result};

/// The next `target` strictly after `today`. Asking for today's own weekday lands a week out.
pub fn next_day_of_week(target: Weekday, today: NaiveDate) -> NaiveDate {
    let days_until = (target.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    if days_until == 0 {
        today + Duration::weeks(1)
    } else {
        today + Duration::days(days_until)
    }
}

/// Full English weekday names only ("monday", "Friday"); abbreviations are rejected.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of `date`, used as an inclusive upper bound.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Explicit due-date input: today/tomorrow, weekday names, +Nd/+Nw, or YYYY-MM-DD.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw)
    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative format: {}", input));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;

        let offset = match unit {
            "d" => Duration::try_days(count),
            "w" => Duration::try_weeks(count),
            _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
        };
        return offset
            .and_then(|delta| today.checked_add_signed(delta))
            .ok_or_else(|| anyhow!("Date out of range: {}", input));
    }

    // 3. Weekday, optionally prefixed with "next"
    let day_str = input.strip_prefix("next ").map(str::trim).unwrap_or(input.as_str());
    if let Ok(weekday) = parse_weekday_str(day_str) {
        return Ok(next_day_of_week(weekday, today));
    }

    // 4. Fallback to ISO
    NaiveDate::parse_from_str(&input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Explicit due-time input: "17:30", "5pm", "10:15am".
pub fn parse_clock(input: &str) -> Result<NaiveTime> {
    let lower = input.trim().to_lowercase().replace(' ', "");

    let (clock, meridiem) = if let Some(stripped) = lower.strip_suffix("am") {
        (stripped, Some(false))
    } else if let Some(stripped) = lower.strip_suffix("pm") {
        (stripped, Some(true))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok(), m.parse::<u32>().ok()),
        None if meridiem.is_some() => (clock.parse::<u32>().ok(), Some(0)),
        None => (None, None),
    };
    let (hour, minute) = match (hour, minute) {
        (Some(h), Some(m)) => (h, m),
        _ => return Err(anyhow!("Could not parse time: {}", input)),
    };

    let hour = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return Err(anyhow!("Hour out of range for 12h clock: {}", input));
            }
            match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| anyhow!("Invalid time: {}", input))
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s {
        "mon" => Ok(Weekday::Mon),
        "tue" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thu" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        other => weekday_from_name(other).ok_or_else(|| anyhow!("Invalid weekday")),
    }
}
