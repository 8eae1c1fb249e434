#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Datelike;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    use crate::app::utils::{
        parse_datetime, parse_decimal, validate_coin_id, validate_price, validate_quantity,
    };
    use crate::services::RefreshRate;

    #[test]
    fn parse_datetime_accepts_iso_dates() {
        let parsed = parse_datetime("2025-02-03").unwrap();
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), 2);

        assert!(parse_datetime("03.02.2025").is_err());
    }

    #[test]
    fn parse_decimal_reports_field_name() {
        assert_eq!(parse_decimal("1.25", "quantity").unwrap(), dec!(1.25));

        let err = parse_decimal("abc", "quantity").unwrap_err();
        assert!(format!("{}", err).contains("quantity"));
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(&dec!(0.00000001)).is_ok());
        assert!(validate_quantity(&Decimal::ZERO).is_err());
        assert!(validate_quantity(&dec!(-1)).is_err());
    }

    #[test]
    fn price_must_not_be_negative() {
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert!(validate_price(&dec!(20000)).is_ok());
        assert!(validate_price(&dec!(-0.01)).is_err());
    }

    #[test]
    fn coin_id_must_be_a_lowercase_slug() {
        assert!(validate_coin_id("bitcoin").is_ok());
        assert!(validate_coin_id("usd-coin").is_ok());
        assert!(validate_coin_id("Bitcoin").is_err());
        assert!(validate_coin_id("bit coin").is_err());
        assert!(validate_coin_id("").is_err());
    }

    #[test]
    fn refresh_rates_stay_within_polling_band() {
        for rate in RefreshRate::iter() {
            assert!(rate.interval() >= Duration::from_secs(30));
            assert!(rate.interval() <= Duration::from_secs(600));
        }
    }
}
