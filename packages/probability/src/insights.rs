//! Plain-language advice derived from a [`ProbabilitySet`].

use weather_predict_weather_models::{
    ProbabilitySet,
    analysis::{Insight, InsightKind},
};

fn insight(kind: InsightKind, title: &str, message: String) -> Insight {
    Insight {
        kind,
        title: title.to_string(),
        message,
    }
}

/// Builds the list of insights for a probability set, in display order.
#[must_use]
pub fn generate_insights(p: &ProbabilitySet) -> Vec<Insight> {
    let mut insights = Vec::new();

    if p.hot > 60 {
        insights.push(insight(
            InsightKind::Warning,
            "High Heat Probability",
            format!(
                "There's a {}% chance of hot weather (>35°C). Consider heat protection measures.",
                p.hot
            ),
        ));
    } else if p.cold > 60 {
        insights.push(insight(
            InsightKind::Info,
            "Cold Weather Expected",
            format!(
                "There's a {}% chance of cold weather (<5°C). Dress warmly.",
                p.cold
            ),
        ));
    }

    if p.wet > 70 {
        insights.push(insight(
            InsightKind::Info,
            "High Rain Probability",
            format!(
                "There's a {}% chance of significant rainfall (>10mm). Bring an umbrella.",
                p.wet
            ),
        ));
    } else if p.wet < 20 {
        insights.push(insight(
            InsightKind::Success,
            "Dry Conditions Expected",
            format!(
                "Only a {}% chance of rain. Great weather for outdoor activities.",
                p.wet
            ),
        ));
    }

    if p.windy > 50 {
        insights.push(insight(
            InsightKind::Warning,
            "Windy Conditions",
            format!(
                "{}% chance of strong winds (>10m/s). Secure loose objects.",
                p.windy
            ),
        ));
    }

    if p.uncomfortable > 60 {
        insights.push(insight(
            InsightKind::Warning,
            "Uncomfortable Heat Index",
            format!(
                "{}% chance of uncomfortable conditions. Stay hydrated and seek shade.",
                p.uncomfortable
            ),
        ));
    }

    // "uncomfortable" is deliberately left out of this count.
    let likely = [p.hot, p.cold, p.wet, p.windy]
        .iter()
        .filter(|&&value| value > 50)
        .count();

    if likely == 0 {
        insights.push(insight(
            InsightKind::Success,
            "Moderate Weather Expected",
            "Weather conditions are expected to be generally moderate with no extreme conditions likely."
                .to_string(),
        ));
    } else if likely >= 3 {
        insights.push(insight(
            InsightKind::Warning,
            "Variable Conditions",
            "Multiple weather conditions are possible. Check forecasts closer to your date."
                .to_string(),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn calm_day_is_moderate_and_dry() {
        let p = ProbabilitySet {
            hot: 10,
            cold: 10,
            wet: 10,
            windy: 10,
            uncomfortable: 10,
        };
        assert_eq!(
            titles(&generate_insights(&p)),
            ["Dry Conditions Expected", "Moderate Weather Expected"]
        );
    }

    #[test]
    fn hot_takes_precedence_over_cold() {
        let p = ProbabilitySet {
            hot: 70,
            cold: 70,
            wet: 30,
            windy: 0,
            uncomfortable: 0,
        };
        let insights = generate_insights(&p);
        assert_eq!(insights[0].title, "High Heat Probability");
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(!titles(&insights).contains(&"Cold Weather Expected"));
    }

    #[test]
    fn many_likely_conditions_are_variable() {
        let p = ProbabilitySet {
            hot: 55,
            cold: 0,
            wet: 80,
            windy: 90,
            uncomfortable: 65,
        };
        assert_eq!(
            titles(&generate_insights(&p)),
            [
                "High Rain Probability",
                "Windy Conditions",
                "Uncomfortable Heat Index",
                "Variable Conditions",
            ]
        );
    }

    #[test]
    fn message_embeds_percentage() {
        let p = ProbabilitySet {
            hot: 0,
            cold: 75,
            wet: 50,
            windy: 0,
            uncomfortable: 0,
        };
        let insights = generate_insights(&p);
        assert!(insights[0].message.contains("75%"));
    }
}
