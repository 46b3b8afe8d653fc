use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::str::FromStr;
use teloxide::utils::html::escape;

use crate::{exchange::CashReport, scoring::ScoringPeriods};

/// Days between the end of a scoring period and its submission deadline.
pub const DEADLINE_OFFSET_DAYS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Ru,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported locale {other}")),
        }
    }
}

struct Phrases {
    no_money: &'static str,
    buy_now: &'static str,
    greeting: &'static str,
    balance: &'static str,
    notify_on: &'static str,
    notify_off: &'static str,
    react: &'static str,
    period_ends: &'static str,
    ends_in: &'static str,
    on: &'static str,
    at: &'static str,
    submit_before: &'static str,
    last_period: &'static str,
    direct_score: &'static str,
    referral_score: &'static str,
}

const EN: Phrases = Phrases {
    no_money: "No money, but hang in there!",
    buy_now: "Hurry up, buy the paintings!",
    greeting: "Hello",
    balance: "Balance",
    notify_on: "Positive balance notifications enabled",
    notify_off: "Positive balance notifications disabled",
    react: "Wow, you're having fun in here!",
    period_ends: "The current scoring period",
    ends_in: "ends in",
    on: "on",
    at: "at",
    submit_before: "Please make sure to submit your report before the deadline",
    last_period: "Last period",
    direct_score: "direct score",
    referral_score: "referral score",
};

const RU: Phrases = Phrases {
    no_money: "Денег нет, но вы держитесь!",
    buy_now: "Налетай, торопись, покупай живопИсь!",
    greeting: "Привет",
    balance: "Баланс",
    notify_on: "Уведомления о положительном балансе включены",
    notify_off: "Уведомления о положительном балансе отключены",
    react: "Весело тут у вас!",
    period_ends: "Текущий период оценки",
    ends_in: "заканчивается через",
    on: "",
    at: "в",
    submit_before: "Пожалуйста, отправьте отчёт до крайнего срока",
    last_period: "Прошлый период",
    direct_score: "прямые баллы",
    referral_score: "реферальные баллы",
};

impl Locale {
    fn phrases(self) -> &'static Phrases {
        match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }
}

/// HTML link to the user, labelled with their full name.
pub fn mention(user_id: u64, first_name: &str, last_name: Option<&str>) -> String {
    let name = format!("{} {}", first_name, last_name.unwrap_or_default());
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user_id,
        escape(name.trim())
    )
}

pub fn status_phrase(locale: Locale, balance: f64) -> &'static str {
    let phrases = locale.phrases();
    if balance < 1.0 {
        phrases.no_money
    } else {
        phrases.buy_now
    }
}

pub fn balance_reply(locale: Locale, mention: &str, balance: f64) -> String {
    let p = locale.phrases();
    format!(
        "{}, {}\n{}: {} BCH.\n{}",
        p.greeting,
        mention,
        p.balance,
        balance,
        status_phrase(locale, balance)
    )
}

pub fn balance_notification(locale: Locale, balance: f64) -> String {
    format!(
        "{}: {} BCH. {}",
        locale.phrases().balance,
        balance,
        status_phrase(locale, balance)
    )
}

pub fn notify_on_reply(locale: Locale, mention: &str) -> String {
    format!("{}, {}.", locale.phrases().notify_on, mention)
}

pub fn notify_off_reply(locale: Locale, mention: &str) -> String {
    format!("{}, {}.", locale.phrases().notify_off, mention)
}

pub fn react_reply(locale: Locale) -> String {
    locale.phrases().react.to_owned()
}

pub fn days_word(locale: Locale, days: i64) -> &'static str {
    match locale {
        Locale::En => {
            if days == 1 {
                "day"
            } else {
                "days"
            }
        }
        Locale::Ru => {
            let n = days.abs();
            match (n % 10, n % 100) {
                (1, rem) if rem != 11 => "день",
                (2..=4, rem) if !(12..=14).contains(&rem) => "дня",
                _ => "дней",
            }
        }
    }
}

/// Whole days from `now` until `end`, rounded to the nearest day.
pub fn days_until(end: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    let seconds = end.signed_duration_since(now).num_seconds() as f64;
    (seconds / 86_400.0).round() as i64
}

pub fn deadline(end: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    end + Duration::days(DEADLINE_OFFSET_DAYS)
}

pub fn scoring_reply(
    locale: Locale,
    mention: &str,
    periods: &ScoringPeriods,
    now: DateTime<Utc>,
) -> String {
    let p = locale.phrases();
    let current = &periods.current_scoring_period;
    let end = current.ends;
    let days = days_until(end, now);

    let on = if p.on.is_empty() {
        ",".to_owned()
    } else {
        format!(" {}", p.on)
    };

    let mut message = format!(
        "{}, {}!\n{} <b>#{}</b> {} <b>{} {}{} {} {} {}</b>\n{} <b>{}</b>",
        p.greeting,
        mention,
        p.period_ends,
        current.scoring_period_id,
        p.ends_in,
        days,
        days_word(locale, days),
        on,
        end.format("%A %d %b"),
        p.at,
        end.format("%H:%M"),
        p.submit_before,
        deadline(end).format("%A %d %b %H:%M"),
    );

    if let Some(last) = &periods.last_period {
        message.push_str(&format!(
            "\n\n{} <b>#{}</b>: {} {}, {} {}",
            p.last_period,
            last.scoring_period_id,
            p.direct_score,
            last.total_direct_score,
            p.referral_score,
            last.total_referral_score
        ));
        for highlight in &last.highlights {
            message.push_str(&format!("\n• {}", escape(highlight)));
        }
    }

    message
}

fn exchange_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date.format("%A %d %b %H:%M").to_string(),
        Err(_) => raw.to_owned(),
    }
}

pub fn cash_report(report: &CashReport) -> String {
    let totals = report.totals;
    let mut message = format!(
        "<b>Total USD: {}</b>\n\n<b>Total Paid: {}</b>\n\n<b>Total Left: {}</b>\n\nMy exchanges:\n",
        totals.total, totals.paid, totals.left
    );
    for e in &report.exchanges {
        message.push_str(&format!(
            "<b>Amount tJOY</b>: <code>{}</code>\n\
             <b>Amount USD</b>: <code>{}</code>\n\
             <b>Sender</b>: <code>{}</code>\n\
             <b>Date</b>: <code>{}</code>\n\
             <b>Status</b>: <code>{}</code>\n\n",
            e.amount,
            e.amount_usd,
            escape(&e.sender),
            exchange_date(&e.log_time),
            escape(&e.status)
        ));
    }
    message
}
