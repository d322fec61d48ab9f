//! Condition-to-pictogram classification.
//!
//! A strict ordered keyword cascade, not a scored match: the first rule whose
//! keyword list hits the lowercased condition text wins. The ordering is a
//! deliberate tie-break — "sunny with rain showers" is a rain icon because
//! the rain rule precedes the sun rule.

/// Pictogram shown in the widget's icon region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Storm,
    Rain,
    Snow,
    Fog,
    Cloud,
    Sun,
    Wind,
    PartlyCloudy,
    Warning,
}

impl Icon {
    pub const fn symbol(self) -> &'static str {
        match self {
            Icon::Storm => "⛈️",
            Icon::Rain => "🌧️",
            Icon::Snow => "❄️",
            Icon::Fog => "🌫️",
            Icon::Cloud => "☁️",
            Icon::Sun => "☀️",
            Icon::Wind => "🌬️",
            Icon::PartlyCloudy => "🌤️",
            Icon::Warning => "⚠️",
        }
    }
}

/// The cascade, in evaluation order. Exported so tests can enumerate it.
pub const ICON_RULES: &[(&[&str], Icon)] = &[
    (&["storm", "thunder"], Icon::Storm),
    (&["rain", "shower"], Icon::Rain),
    (&["snow"], Icon::Snow),
    (&["fog", "mist"], Icon::Fog),
    (&["cloud", "overcast"], Icon::Cloud),
    (&["sun", "clear", "mainly"], Icon::Sun),
    (&["wind"], Icon::Wind),
];

/// Classify a free-text condition. Empty or absent input falls through every
/// rule to the partly-cloudy default.
pub fn classify(condition: Option<&str>) -> Icon {
    let text = condition.unwrap_or_default().to_lowercase();

    for (keywords, icon) in ICON_RULES {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *icon;
        }
    }

    Icon::PartlyCloudy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_rule_matches_its_own_keywords() {
        for (keywords, icon) in ICON_RULES {
            for kw in *keywords {
                // A keyword may still be captured by an earlier rule
                // ("freezing rain" vs "rain"), so classify the bare keyword.
                assert_eq!(classify(Some(kw)), *icon, "keyword {kw:?}");
            }
        }
    }

    #[test]
    fn rain_beats_sun_when_both_present() {
        assert_eq!(classify(Some("rain and sunshine")), Icon::Rain);
        assert_eq!(classify(Some("sunny with rain showers")), Icon::Rain);
    }

    #[test]
    fn storm_beats_rain() {
        assert_eq!(classify(Some("thunderstorm with rain")), Icon::Storm);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify(Some("Overcast")), Icon::Cloud);
        assert_eq!(classify(Some("MAINLY CLEAR")), Icon::Sun);
    }

    #[test]
    fn unmatched_or_missing_condition_is_partly_cloudy() {
        assert_eq!(classify(Some("haze")), Icon::PartlyCloudy);
        assert_eq!(classify(Some("")), Icon::PartlyCloudy);
        assert_eq!(classify(None), Icon::PartlyCloudy);
    }

    #[test]
    fn wmo_style_conditions_map_sensibly() {
        assert_eq!(classify(Some("Mainly clear")), Icon::Sun);
        assert_eq!(classify(Some("Rain showers")), Icon::Rain);
        assert_eq!(classify(Some("Snowfall")), Icon::Snow);
        assert_eq!(classify(Some("Thunderstorm with hail")), Icon::Storm);
    }
}
