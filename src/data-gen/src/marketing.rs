use chrono::Duration;
use chrono::NaiveDate;
use common::aggregate::channel_checkins;
use common::aggregate::ChannelTotals;
use common::decimal;
use common::metrics;
use common::metrics::Funnel;
use common::records::ChargeLine;
use common::records::MarketingPerformance;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;

use crate::dictionary::BOOKING_CHANNELS;
use crate::Config;

pub fn campaign_name(channel: &str, date: NaiveDate) -> String {
    format!("{channel} Campaign {}", date.format("%Y-%m"))
}

/// Daily spend range in cents, inclusive.
fn cost_cents(channel: &str) -> (i64, i64) {
    if channel.contains("Paid") || channel.contains("OTA") || channel.contains("Ads") {
        (10000, 200000)
    } else if channel.starts_with("Direct-") {
        (1000, 10000)
    } else {
        (5000, 50000)
    }
}

fn row(
    rng: &mut StdRng,
    date: NaiveDate,
    channel: &str,
    totals: &ChannelTotals,
) -> MarketingPerformance {
    let bookings = totals.bookings_count();
    let sessions: i32 = if bookings > 0 {
        rng.gen_range(50..=500)
    } else {
        rng.gen_range(10..=100)
    };
    let clicks = rng.gen_range(sessions * 3 / 10..=sessions * 7 / 10);
    let impressions = rng.gen_range(clicks * 2..=clicks * 10);
    let (lo, hi) = cost_cents(channel);
    let cost = Decimal::new(rng.gen_range(lo..=hi), 2);

    let m = metrics::marketing(Funnel {
        clicks,
        sessions,
        bookings,
        revenue: totals.revenue,
        cost,
    });

    MarketingPerformance {
        date,
        channel: channel.to_string(),
        campaign_name: campaign_name(channel, date),
        impressions,
        clicks,
        sessions,
        bookings,
        room_nights: totals.room_nights,
        total_revenue_eur: decimal::money(totals.revenue),
        room_revenue_eur: decimal::money(totals.room_revenue),
        marketing_cost_eur: cost,
        cpc_eur: m.cpc_eur,
        cpa_eur: m.cpa_eur,
        roas: m.roas,
        conversion_rate: m.conversion_rate,
    }
}

/// One row per date and booking channel, attributed by check-in date.
pub fn generate(
    rng: &mut StdRng,
    cfg: &Config,
    lines: &[ChargeLine],
) -> Vec<MarketingPerformance> {
    let checkins = channel_checkins(lines);
    let idle = ChannelTotals::default();
    let mut out = Vec::new();

    let mut date = cfg.from;
    while date <= cfg.to {
        for channel in BOOKING_CHANNELS {
            let totals = checkins
                .get(&(date, channel.to_string()))
                .unwrap_or(&idle);
            out.push(row(rng, date, channel, totals));
        }
        date += Duration::days(1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_names() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(campaign_name("Email", d), "Email Campaign 2025-01");
    }

    #[test]
    fn spend_by_channel() {
        assert_eq!(cost_cents("Social-Paid"), (10000, 200000));
        assert_eq!(cost_cents("OTA-Expedia"), (10000, 200000));
        assert_eq!(cost_cents("Direct-Phone"), (1000, 10000));
        assert_eq!(cost_cents("Corporate"), (5000, 50000));
    }
}
