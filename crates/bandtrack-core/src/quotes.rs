//! Motivational quote of the day.

use chrono::{Datelike, NaiveDate};

pub const QUOTES: [&str; 10] = [
    "Success is the sum of small efforts, repeated day in and day out.",
    "Every expert was once a beginner. Keep practicing!",
    "Your limitation—it's only your imagination. Break through!",
    "Push yourself, because no one else is going to do it for you.",
    "Great things never come from comfort zones. Step up!",
    "Dream it. Wish it. Do it. Achieve your IELTS goals!",
    "The harder you work for something, the greater you'll feel when you achieve it.",
    "Success doesn't just find you. You have to go out and get it.",
    "Don't stop when you're tired. Stop when you're done!",
    "Wake up with determination. Go to bed with satisfaction.",
];

/// The quote for `day`. Stable for a given date, rotates daily.
pub fn quote_for(day: NaiveDate) -> &'static str {
    let idx = day.num_days_from_ce().rem_euclid(QUOTES.len() as i32) as usize;
    QUOTES[idx]
}
