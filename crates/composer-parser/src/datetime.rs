//! Date-time pattern formatting for `%pattern%` macros.
//!
//! Patterns use letter runs (`dd/MM/yyyy hh:mm:ss a`): a run of the same
//! letter selects a field and its width, text inside single quotes is copied
//! as-is (`''` is a literal quote), `[` and `]` mark optional sections that
//! always print, and any other non-letter is copied through.
//!
//! | Letter | Field | Runs |
//! |---|---|---|
//! | `G` | era | 1–3 (`AD`), 4 (`Anno Domini`), 5 (`A`) |
//! | `y`, `u` | year | `yy` two digits, otherwise zero-padded to the run length |
//! | `Y` | ISO week-based year | as `y` |
//! | `Q`, `q` | quarter | 1–2 (`01`), 3 (`Q1`), 4 (`1st quarter`), 5 (`1`) |
//! | `M`, `L` | month | `M`, `MM`, `MMM` (`Mar`), `MMMM` (`March`), `MMMMM` (`M`) |
//! | `w` | ISO week of week-based year | 1–2 |
//! | `d` | day of month | 1–2 |
//! | `D` | day of year | 1–3 |
//! | `E` | day of week | 1–3 (`Tue`), 4 (`Tuesday`), 5 (`T`) |
//! | `e` | day of week, Monday is 1 | 1–2 numeric, 3–5 as `E` |
//! | `a` | AM/PM marker | 1 |
//! | `H` | hour 0–23 | 1–2 |
//! | `k` | hour 1–24 | 1–2 |
//! | `K` | hour 0–11 | 1–2 |
//! | `h` | hour 1–12 | 1–2 |
//! | `m` | minute | 1–2 |
//! | `s` | second | 1–2 |
//! | `S` | fraction of second | 1–9 |
//! | `n` | nano of second | 1–19 |
//!
//! Weeks follow ISO 8601: they start on Monday and week 1 holds the first
//! Thursday of the year.

use std::{iter::Peekable, str::Chars};

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::PatternError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const QUARTER_NAMES: [&str; 4] = ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Formats `datetime` according to `pattern`.
///
/// # Errors
///
/// Returns a [`PatternError`] for unknown letters, runs longer than a field
/// allows, reserved characters (`#`, `{`, `}`), an unterminated quote, or a
/// `]` without a matching `[`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use composer_parser::datetime::format;
///
/// let datetime = NaiveDate::from_ymd_opt(2024, 3, 5)
///     .unwrap()
///     .and_hms_opt(14, 7, 9)
///     .unwrap();
/// assert_eq!(format("dd/MM/yyyy", &datetime).unwrap(), "05/03/2024");
/// ```
pub fn format(pattern: &str, datetime: &NaiveDateTime) -> Result<String, PatternError> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    let mut optional_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\'' => quoted_literal(&mut chars, &mut out)?,
            '[' => optional_depth += 1,
            ']' => {
                optional_depth = optional_depth
                    .checked_sub(1)
                    .ok_or(PatternError::UnbalancedOptional)?;
            }
            '#' | '{' | '}' => return Err(PatternError::ReservedCharacter(c)),
            letter if letter.is_ascii_alphabetic() => {
                let mut count = 1;
                while chars.next_if_eq(&letter).is_some() {
                    count += 1;
                }
                write_field(&mut out, letter, count, datetime)?;
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Copies a quoted run after its opening `'`. `''` yields one quote.
fn quoted_literal(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), PatternError> {
    if chars.next_if_eq(&'\'').is_some() {
        out.push('\'');
        return Ok(());
    }

    while let Some(c) = chars.next() {
        if c != '\'' {
            out.push(c);
        } else if chars.next_if_eq(&'\'').is_some() {
            out.push('\'');
        } else {
            return Ok(());
        }
    }

    Err(PatternError::UnterminatedQuote)
}

fn write_field(
    out: &mut String,
    letter: char,
    count: usize,
    datetime: &NaiveDateTime,
) -> Result<(), PatternError> {
    let too_many = || PatternError::TooManyLetters { letter, count };

    match letter {
        'G' => {
            let (short, long) = if datetime.year() > 0 {
                ("AD", "Anno Domini")
            } else {
                ("BC", "Before Christ")
            };
            match count {
                1..=3 => out.push_str(short),
                4 => out.push_str(long),
                5 => out.push_str(&short[..1]),
                _ => return Err(too_many()),
            }
        }
        'y' | 'u' => push_year(out, datetime.year(), count),
        'Y' => push_year(out, datetime.iso_week().year(), count),
        'Q' | 'q' => {
            let quarter = datetime.month0() / 3 + 1;
            match count {
                1 | 2 => push_padded(out, quarter, count),
                3 => out.push_str(&format!("Q{quarter}")),
                4 => out.push_str(QUARTER_NAMES[(quarter - 1) as usize]),
                5 => push_padded(out, quarter, 1),
                _ => return Err(too_many()),
            }
        }
        'M' | 'L' => {
            let month = datetime.month();
            let name = MONTH_NAMES[datetime.month0() as usize];
            match count {
                1 | 2 => push_padded(out, month, count),
                3 => out.push_str(&name[..3]),
                4 => out.push_str(name),
                5 => out.push_str(&name[..1]),
                _ => return Err(too_many()),
            }
        }
        'w' => push_bounded(out, datetime.iso_week().week(), count, 2).ok_or_else(too_many)?,
        'd' => push_bounded(out, datetime.day(), count, 2).ok_or_else(too_many)?,
        'D' => push_bounded(out, datetime.ordinal(), count, 3).ok_or_else(too_many)?,
        'e' if count <= 2 => {
            push_padded(out, datetime.weekday().number_from_monday(), count);
        }
        'E' | 'e' => {
            let name = WEEKDAY_NAMES[datetime.weekday().num_days_from_monday() as usize];
            match count {
                1..=3 => out.push_str(&name[..3]),
                4 => out.push_str(name),
                5 => out.push_str(&name[..1]),
                _ => return Err(too_many()),
            }
        }
        'a' => {
            if count > 1 {
                return Err(too_many());
            }
            let (is_pm, _) = datetime.hour12();
            out.push_str(if is_pm { "PM" } else { "AM" });
        }
        'H' => push_bounded(out, datetime.hour(), count, 2).ok_or_else(too_many)?,
        'k' => {
            let hour = match datetime.hour() {
                0 => 24,
                hour => hour,
            };
            push_bounded(out, hour, count, 2).ok_or_else(too_many)?
        }
        'K' => push_bounded(out, datetime.hour() % 12, count, 2).ok_or_else(too_many)?,
        'h' => push_bounded(out, datetime.hour12().1, count, 2).ok_or_else(too_many)?,
        'm' => push_bounded(out, datetime.minute(), count, 2).ok_or_else(too_many)?,
        's' => push_bounded(out, datetime.second(), count, 2).ok_or_else(too_many)?,
        'S' => {
            if count > 9 {
                return Err(too_many());
            }
            let nanos = format!("{:09}", datetime.nanosecond() % 1_000_000_000);
            out.push_str(&nanos[..count]);
        }
        'n' => push_bounded(out, datetime.nanosecond() % 1_000_000_000, count, 19)
            .ok_or_else(too_many)?,
        _ => return Err(PatternError::UnknownLetter(letter)),
    }

    Ok(())
}

/// `yy` keeps the last two digits; other runs pad the full year.
fn push_year(out: &mut String, year: i32, count: usize) {
    if count == 2 {
        push_padded(out, year.rem_euclid(100), 2);
    } else {
        push_padded(out, year, count);
    }
}

fn push_padded(out: &mut String, value: impl std::fmt::Display, width: usize) {
    out.push_str(&format!("{value:0width$}"));
}

/// Pads `value` to `count` digits, or returns `None` when `count` exceeds `max`.
fn push_bounded(out: &mut String, value: u32, count: usize, max: usize) -> Option<()> {
    (count <= max).then(|| push_padded(out, value, count))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    /// Tuesday, 5 March 2024, 14:07:09.042
    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_milli_opt(14, 7, 9, 42)
            .unwrap()
    }

    fn fmt(pattern: &str) -> Result<String, PatternError> {
        format(pattern, &sample())
    }

    #[test]
    fn test_numeric_fields() {
        assert_eq!(fmt("dd/MM/yyyy").unwrap(), "05/03/2024");
        assert_eq!(fmt("d/M/yy").unwrap(), "5/3/24");
        assert_eq!(fmt("HH:mm:ss").unwrap(), "14:07:09");
        assert_eq!(fmt("D").unwrap(), "65");
        assert_eq!(fmt("DDD").unwrap(), "065");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(fmt("hh:mm:ss a").unwrap(), "02:07:09 PM");
        assert_eq!(fmt("K k").unwrap(), "2 14");
    }

    #[test]
    fn test_names() {
        assert_eq!(fmt("MMM").unwrap(), "Mar");
        assert_eq!(fmt("MMMM").unwrap(), "March");
        assert_eq!(fmt("EEE").unwrap(), "Tue");
        assert_eq!(fmt("EEEE, d MMMM").unwrap(), "Tuesday, 5 March");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fmt("ss.SSS").unwrap(), "09.042");
        assert_eq!(fmt("S").unwrap(), "0");
    }

    #[test]
    fn test_quarter_and_era() {
        assert_eq!(fmt("Q qq QQQ QQQQ QQQQQ").unwrap(), "1 01 Q1 1st quarter 1");
        assert_eq!(fmt("G GGGG GGGGG").unwrap(), "AD Anno Domini A");

        let late = NaiveDate::from_ymd_opt(2024, 11, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format("QQQ", &late).unwrap(), "Q4");

        let before_common_era = NaiveDate::from_ymd_opt(0, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format("G", &before_common_era).unwrap(), "BC");
    }

    #[test]
    fn test_iso_week_fields() {
        assert_eq!(fmt("w ww").unwrap(), "10 10");
        assert_eq!(fmt("YYYY-'W'ww-e").unwrap(), "2024-W10-2");
        assert_eq!(fmt("e ee eee eeee").unwrap(), "2 02 Tue Tuesday");

        // 2021-01-01 is a Friday in ISO week 53 of 2020
        let new_year = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format("YYYY ww", &new_year).unwrap(), "2020 53");
    }

    #[test]
    fn test_nano_of_second() {
        assert_eq!(fmt("n").unwrap(), "42000000");
        assert_eq!(fmt("nnnnnnnnnn").unwrap(), "0042000000");
    }

    #[test]
    fn test_quoted_literals() {
        assert_eq!(fmt("'day' d").unwrap(), "day 5");
        assert_eq!(fmt("h 'o''clock'").unwrap(), "2 o'clock");
        assert_eq!(fmt("''").unwrap(), "'");
    }

    #[test]
    fn test_optional_sections_print() {
        assert_eq!(fmt("HH[:mm]").unwrap(), "14:07");
        assert_eq!(fmt("HH]"), Err(PatternError::UnbalancedOptional));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(fmt("").unwrap(), "");
    }

    #[test]
    fn test_errors() {
        assert_eq!(fmt("bb"), Err(PatternError::UnknownLetter('b')));
        assert_eq!(
            fmt("QQQQQQ"),
            Err(PatternError::TooManyLetters {
                letter: 'Q',
                count: 6
            })
        );
        assert_eq!(
            fmt("ddd"),
            Err(PatternError::TooManyLetters {
                letter: 'd',
                count: 3
            })
        );
        assert_eq!(
            fmt("aa"),
            Err(PatternError::TooManyLetters {
                letter: 'a',
                count: 2
            })
        );
        assert_eq!(fmt("'open"), Err(PatternError::UnterminatedQuote));
        assert_eq!(fmt("#"), Err(PatternError::ReservedCharacter('#')));
    }

    #[test]
    fn test_midnight_hours() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format("hh a", &midnight).unwrap(), "12 AM");
        assert_eq!(format("kk", &midnight).unwrap(), "24");
        assert_eq!(format("HH", &midnight).unwrap(), "00");
        assert_eq!(format("E", &midnight).unwrap(), "Mon");
    }
}
