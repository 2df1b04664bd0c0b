use {crate::Error, serde::Serialize};

/// The result of the Hull-Dobell full period check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub is_full_period: bool,
    pub conditions: Conditions,
    pub recommendation: String,
}

/// The Hull-Dobell conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    /// `c` and `m` are coprime.
    pub relatively_prime: bool,

    /// `a - 1` is divisible by every prime factor of `m`.
    pub prime_factors_divisible: bool,

    /// `a - 1` is divisible by 4 if `m` is.
    pub divisible_by_4: bool,
}

impl Conditions {
    fn full_period(self) -> bool {
        self.relatively_prime && self.prime_factors_divisible && self.divisible_by_4
    }

    fn recommendation(self) -> String {
        if self.full_period() {
            return String::from(
                "Excellent! These parameters satisfy the Hull-Dobell Theorem for a \
                full-period generator (period = m). This will yield a sequence that \
                visits every integer from 0 to m-1.",
            );
        }

        let mut s = String::from(
            "Warning: These parameters do NOT yield a full period. The sequence will \
            repeat earlier than expected, potentially leading to poor pseudo-randomness.",
        );

        if !self.relatively_prime {
            s.push_str(" 'c' and 'm' should be relatively prime.");
        }

        if !self.prime_factors_divisible {
            s.push_str(" 'a-1' should be divisible by all prime factors of 'm'.");
        }

        if !self.divisible_by_4 {
            s.push_str(" Since 'm' is divisible by 4, 'a-1' must also be divisible by 4.");
        }

        s
    }
}

/// Checks whether the generator `x ← (a * x + c) mod m` has the full period.
///
/// The conditions are evaluated on `|m|`.
///
/// # Errors
/// Returns [`ZeroModulus`](crate::Error::ZeroModulus) if `m` is zero.
pub fn analyze(a: i64, c: i64, m: i64) -> Result<Analysis, Error> {
    if m == 0 {
        return Err(Error::ZeroModulus);
    }

    let m = u128::from(m.unsigned_abs());
    let c = u128::from(c.unsigned_abs());
    let a1 = (i128::from(a) - 1).unsigned_abs();

    let conditions = Conditions {
        relatively_prime: gcd(c, m) == 1,
        prime_factors_divisible: prime_factors_divide(m, a1),
        divisible_by_4: m % 4 != 0 || a1 % 4 == 0,
    };

    Ok(Analysis {
        is_full_period: conditions.full_period(),
        conditions,
        recommendation: conditions.recommendation(),
    })
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

/// Checks that every prime factor of `n` divides `v`.
///
/// Strips the common factors from `n` until nothing is left, so `n` is never
/// factorized explicitly.
fn prime_factors_divide(mut n: u128, v: u128) -> bool {
    loop {
        let g = gcd(n, v);
        if g == 1 {
            return n == 1;
        }

        while n % g == 0 {
            n /= g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_parameters() {
        let analysis = analyze(1_664_525, 1_013_904_223, 1 << 32).expect("analysis");
        assert!(analysis.is_full_period, "numerical recipes generator");

        let analysis = analyze(1, 1, 256).expect("analysis");
        assert!(analysis.is_full_period, "counter");
        assert!(
            analysis.recommendation.starts_with("Excellent! These parameters satisfy"),
            "recommendation: {}",
            analysis.recommendation,
        );
        assert!(analysis.recommendation.contains("(period = m)"), "period hint");
    }

    #[test]
    fn all_conditions_fail() {
        let analysis = analyze(2, 0, 16).expect("analysis");
        let expected = Conditions {
            relatively_prime: false,
            prime_factors_divisible: false,
            divisible_by_4: false,
        };

        assert!(!analysis.is_full_period, "full period");
        assert_eq!(analysis.conditions, expected, "conditions");
        assert_eq!(
            analysis.recommendation,
            "Warning: These parameters do NOT yield a full period. The sequence will \
            repeat earlier than expected, potentially leading to poor pseudo-randomness. \
            'c' and 'm' should be relatively prime. \
            'a-1' should be divisible by all prime factors of 'm'. \
            Since 'm' is divisible by 4, 'a-1' must also be divisible by 4.",
            "recommendation",
        );
    }

    #[test]
    fn divisible_by_4_only() {
        // 3 - 1 = 2 is divisible by 2 but not by 4
        let analysis = analyze(3, 1, 8).expect("analysis");
        let expected = Conditions {
            relatively_prime: true,
            prime_factors_divisible: true,
            divisible_by_4: false,
        };

        assert_eq!(analysis.conditions, expected, "conditions");
        let hint = "pseudo-randomness. Since 'm' is divisible by 4, 'a-1' must also be divisible by 4.";
        assert!(
            analysis.recommendation.ends_with(hint),
            "recommendation: {}",
            analysis.recommendation,
        );
    }

    #[test]
    fn prime_factors() {
        assert!(prime_factors_divide(12, 6), "12 = 2^2 * 3");
        assert!(!prime_factors_divide(12, 2), "3 doesn't divide 2");
        assert!(prime_factors_divide(1, 7), "no prime factors");
        assert!(prime_factors_divide(30, 0), "everything divides 0");
        assert!(prime_factors_divide((1 << 61) - 1, ((1 << 61) - 1) * 2), "large prime");
    }

    #[test]
    fn negative_values() {
        let analysis = analyze(-3, -1, -4).expect("analysis");
        assert!(analysis.is_full_period, "a - 1 = -4");

        let analysis = analyze(i64::MIN, i64::MIN, i64::MIN).expect("analysis");
        assert!(!analysis.is_full_period, "overflow free");
    }

    #[test]
    fn zero_modulus() {
        assert!(
            matches!(analyze(1, 1, 0), Err(Error::ZeroModulus)),
            "zero modulus",
        );
    }

    #[test]
    fn json() {
        let analysis = analyze(1, 1, 256).expect("analysis");
        let json = serde_json::to_value(&analysis).expect("serialize");
        assert_eq!(json["isFullPeriod"], true, "full period");
        assert_eq!(json["conditions"]["relativelyPrime"], true, "coprime");
        assert_eq!(json["conditions"]["primeFactorsDivisible"], true, "factors");
        assert_eq!(json["conditions"]["divisibleBy4"], true, "divisible by 4");
    }
}
