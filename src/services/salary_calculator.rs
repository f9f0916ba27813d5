use crate::database::models::{ActivityTotals, RateTable};

/// Computed pay components in whole yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayComponents {
    pub distance_pay: i64,
    pub time_pay: i64,
    pub vital_pay: i64,
    pub total_amount: i64,
}

/// Pure breakdown computation. Each component is rounded to the nearest whole
/// yen independently and the total is the exact integer sum of the rounded
/// components, so a displayed breakdown always foots to its displayed total.
/// Total over non-negative inputs; missing rate keys are the caller's problem.
pub fn calculate(totals: &ActivityTotals, rates: &RateTable) -> PayComponents {
    let distance_pay = round_yen(totals.total_distance_km * rates.distance_rate);
    // time_rate is per hour; fractional hours count proportionally
    let time_pay = round_yen(totals.total_minutes as f64 / 60.0 * rates.time_rate);
    let vital_pay = round_yen(totals.total_vital_count as f64 * rates.vital_rate);

    PayComponents {
        distance_pay,
        time_pay,
        vital_pay,
        total_amount: distance_pay + time_pay + vital_pay,
    }
}

fn round_yen(amount: f64) -> i64 {
    amount.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rates(distance: f64, time: f64, vital: f64) -> RateTable {
        RateTable {
            distance_rate: distance,
            time_rate: time,
            vital_rate: vital,
        }
    }

    #[test]
    fn worked_example_for_may_2025() {
        // 12,400 m + 8,600 m = 21.0 km; one 480-minute shift; three vitals
        let totals = ActivityTotals {
            total_distance_km: 21.0,
            total_minutes: 480,
            total_vital_count: 3,
        };

        let pay = calculate(&totals, &rates(150.0, 1200.0, 50.0));

        assert_eq!(pay.distance_pay, 3150);
        assert_eq!(pay.time_pay, 9600);
        assert_eq!(pay.vital_pay, 150);
        assert_eq!(pay.total_amount, 12900);
    }

    #[test]
    fn total_foots_to_components_after_per_component_rounding() {
        // Components land on fractional yen; rounding the summed total
        // instead of the parts would disagree with the displayed breakdown.
        let totals = ActivityTotals {
            total_distance_km: 10.01,
            total_minutes: 95,
            total_vital_count: 7,
        };
        let pay = calculate(&totals, &rates(150.0, 1234.0, 33.5));

        assert_eq!(
            pay.total_amount,
            pay.distance_pay + pay.time_pay + pay.vital_pay
        );
    }

    #[test]
    fn zero_activity_pays_nothing() {
        let pay = calculate(&ActivityTotals::zero(), &rates(150.0, 1200.0, 50.0));

        assert_eq!(
            pay,
            PayComponents {
                distance_pay: 0,
                time_pay: 0,
                vital_pay: 0,
                total_amount: 0,
            }
        );
    }

    #[test]
    fn doubling_distance_rate_only_doubles_distance_pay() {
        let totals = ActivityTotals {
            total_distance_km: 34.2,
            total_minutes: 612,
            total_vital_count: 11,
        };

        let base = calculate(&totals, &rates(150.0, 1200.0, 50.0));
        let doubled = calculate(&totals, &rates(300.0, 1200.0, 50.0));

        assert_eq!(doubled.distance_pay, base.distance_pay * 2);
        assert_eq!(doubled.time_pay, base.time_pay);
        assert_eq!(doubled.vital_pay, base.vital_pay);
    }

    #[test]
    fn fractional_hours_count_proportionally() {
        let totals = ActivityTotals {
            total_distance_km: 0.0,
            total_minutes: 90,
            total_vital_count: 0,
        };

        let pay = calculate(&totals, &rates(0.0, 1000.0, 0.0));

        assert_eq!(pay.time_pay, 1500);
        assert_eq!(pay.total_amount, 1500);
    }

    #[test]
    fn components_round_to_nearest_yen() {
        // 1.4 km at 333/km = 466.2 -> 466; 10 min at 1000/h = 166.66.. -> 167
        let totals = ActivityTotals {
            total_distance_km: 1.4,
            total_minutes: 10,
            total_vital_count: 0,
        };

        let pay = calculate(&totals, &rates(333.0, 1000.0, 0.0));

        assert_eq!(pay.distance_pay, 466);
        assert_eq!(pay.time_pay, 167);
    }
}
